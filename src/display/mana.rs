use crate::data::models::CARD_COLORS;
use colored::*;
use std::collections::HashMap;
use std::rc::Rc;

fn wubrg_index(color: char) -> usize {
    CARD_COLORS
        .iter()
        .position(|c| *c == color)
        .unwrap_or(CARD_COLORS.len())
}

/// Coloured mana symbols in a cost such as `{1}{W}{U}` or `{W/U}`, in WUBRG order.
pub fn card_colors(mana_cost: &str) -> Vec<char> {
    let mut colors: Vec<char> = mana_cost
        .chars()
        .filter(|c| CARD_COLORS.contains(c))
        .collect();
    colors.sort_by_key(|c| wubrg_index(*c));
    colors.dedup();
    colors
}

/// Memoised terminal labels for colour combinations, keyed by WUBRG-sorted colours.
pub struct ManaSymbolCache {
    cache: HashMap<String, Rc<String>>,
    empty: Rc<String>,
}

impl Default for ManaSymbolCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ManaSymbolCache {
    pub fn new() -> Self {
        ManaSymbolCache {
            cache: HashMap::new(),
            empty: Rc::new("-".dimmed().to_string()),
        }
    }

    /// Label for any set of colours; order and repeats don't matter.
    pub fn label(&mut self, colors: &[char]) -> Rc<String> {
        let mut ordered: Vec<char> = colors
            .iter()
            .copied()
            .filter(|c| CARD_COLORS.contains(c))
            .collect();
        if ordered.is_empty() {
            return Rc::clone(&self.empty);
        }
        ordered.sort_by_key(|c| wubrg_index(*c));
        ordered.dedup();

        let key: String = ordered.iter().collect();
        let entry = self
            .cache
            .entry(key)
            .or_insert_with(|| Rc::new(ordered.iter().map(|c| paint(*c)).collect::<String>()));
        Rc::clone(entry)
    }

    /// Label from a card's colour list, falling back to its mana cost when
    /// the list has no coloured entries.
    pub fn for_card(&mut self, colors: &[String], mana_cost: Option<&str>) -> Rc<String> {
        let listed: Vec<char> = colors
            .iter()
            .filter_map(|c| c.chars().next())
            .filter(|c| CARD_COLORS.contains(c))
            .collect();
        if !listed.is_empty() {
            return self.label(&listed);
        }
        let from_cost = card_colors(mana_cost.unwrap_or_default());
        self.label(&from_cost)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

fn paint(color: char) -> String {
    let symbol = color.to_string();
    match color {
        'W' => symbol.bright_white().bold().to_string(),
        'U' => symbol.blue().bold().to_string(),
        'B' => symbol.purple().bold().to_string(),
        'R' => symbol.red().bold().to_string(),
        'G' => symbol.green().bold().to_string(),
        _ => symbol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_come_out_in_wubrg_order() {
        assert_eq!(card_colors("{1}{W}{U}"), vec!['W', 'U']);
        assert_eq!(card_colors("{G}{U}{G}"), vec!['U', 'G']);
        assert_eq!(card_colors("{2/W}{B/R}"), vec!['W', 'B', 'R']);
        assert!(card_colors("{5}").is_empty());
        assert!(card_colors("").is_empty());
    }

    #[test]
    fn labels_are_memoised_by_canonical_key() {
        let mut cache = ManaSymbolCache::new();
        let first = cache.label(&['U', 'W']);
        let second = cache.label(&['W', 'U', 'W']);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let colorless = cache.label(&['C']);
        assert!(Rc::ptr_eq(&colorless, &cache.label(&[])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn card_falls_back_to_mana_cost() {
        let mut cache = ManaSymbolCache::new();
        let from_cost = cache.for_card(&["C".to_string()], Some("{1}{B}"));
        assert!(Rc::ptr_eq(&from_cost, &cache.label(&['B'])));

        let listed = cache.for_card(&["G".to_string(), "B".to_string()], Some("{1}{B}"));
        assert!(Rc::ptr_eq(&listed, &cache.label(&['B', 'G'])));
    }
}

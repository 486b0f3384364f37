use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Tier id prefix; tables are named TIER0, TIER1, ... in load order.
pub const TIER_PREFIX: &str = "TIER";

const SPLIT_SEPARATOR: &str = " // ";

/// Tier lists keyed by tier id.
pub type TierTable = BTreeMap<String, TierList>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub collection_date: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierList {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub ratings: BTreeMap<String, Rating>,
}

/// Collapse split-card separators ("A /// B", "A//B") to "A // B" and squeeze whitespace.
/// A single `/` is part of the name.
pub fn canonical_card_name(name: &str) -> String {
    let faces: Vec<String> = name
        .split("//")
        .map(|face| {
            face.trim_matches(|c: char| c == '/' || c.is_whitespace())
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|face| !face.is_empty())
        .collect();
    faces.join(SPLIT_SEPARATOR)
}

fn front_face(canonical: &str) -> &str {
    canonical.split(SPLIT_SEPARATOR).next().unwrap_or(canonical)
}

impl TierList {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let list: TierList = serde_json::from_str(&content)?;
        info!(
            "Loaded tier list '{}' with {} ratings",
            list.meta.label,
            list.ratings.len()
        );
        Ok(list.canonicalized())
    }

    /// Re-key ratings by canonical name.
    pub fn canonicalized(self) -> Self {
        let ratings = self
            .ratings
            .into_iter()
            .map(|(name, rating)| (canonical_card_name(&name), rating))
            .collect();
        TierList {
            meta: self.meta,
            ratings,
        }
    }

    /// Rating for a card name; tolerates separator variants and single-face names.
    pub fn rating_for(&self, name: &str) -> Option<&Rating> {
        let canonical = canonical_card_name(name);
        if canonical.is_empty() {
            return None;
        }

        if let Some(rating) = self.ratings.get(&canonical) {
            return Some(rating);
        }

        // Table keys may not be canonical if the list was built in memory
        if let Some(rating) = self
            .ratings
            .iter()
            .find(|(key, _)| canonical_card_name(key) == canonical)
            .map(|(_, rating)| rating)
        {
            return Some(rating);
        }

        let front = front_face(&canonical);
        if front != canonical {
            if let Some(rating) = self.ratings.get(front) {
                return Some(rating);
            }
        }

        self.ratings
            .iter()
            .find(|(key, _)| front_face(&canonical_card_name(key)) == front)
            .map(|(_, rating)| rating)
    }
}

pub fn load_tier_table(paths: &[impl AsRef<Path>]) -> AppResult<TierTable> {
    let mut table = TierTable::new();
    for (idx, path) in paths.iter().enumerate() {
        let list = TierList::load(path.as_ref())?;
        table.insert(format!("{}{}", TIER_PREFIX, idx), list);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TierList {
        let mut ratings = BTreeMap::new();
        for (name, grade) in [
            ("Consign // Oblivion", "C+"),
            ("Etali, Primal Conqueror", "A+"),
            ("Brazen Borrower", "A-"),
        ] {
            ratings.insert(
                name.to_string(),
                Rating {
                    rating: grade.to_string(),
                    comment: String::new(),
                },
            );
        }
        TierList {
            meta: Meta::default(),
            ratings,
        }
    }

    #[test]
    fn canonical_name_collapses_separators() {
        assert_eq!(canonical_card_name("Consign /// Oblivion"), "Consign // Oblivion");
        assert_eq!(canonical_card_name("Consign//Oblivion"), "Consign // Oblivion");
        assert_eq!(canonical_card_name("  Push  //  Pull "), "Push // Pull");
        assert_eq!(canonical_card_name("Etali, Primal Conqueror"), "Etali, Primal Conqueror");
        assert_eq!(canonical_card_name(""), "");
        assert_eq!(canonical_card_name("Fire////Ice"), "Fire // Ice");
        assert_eq!(canonical_card_name("Who/What"), "Who/What");
        assert_eq!(canonical_card_name("Who / What"), "Who / What");
    }

    #[test]
    fn rating_lookup_tolerates_variants() {
        let list = table();
        assert_eq!(list.rating_for("Consign /// Oblivion").unwrap().rating, "C+");
        assert_eq!(list.rating_for("Consign").unwrap().rating, "C+");
        assert_eq!(list.rating_for("Brazen Borrower // Petty Theft").unwrap().rating, "A-");
        assert!(list.rating_for("Fake Card").is_none());
        assert!(list.rating_for("").is_none());
    }
}

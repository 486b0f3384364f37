use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colour key of the aggregate statistic across every deck.
pub const ALL_DECKS: &str = "All Decks";

/// Short label used for the aggregate when it trails a filtered breakdown.
pub const ALL_DECKS_LABEL: &str = "AD";

/// Card colours in WUBRG order.
pub const CARD_COLORS: [char; 5] = ['W', 'U', 'B', 'R', 'G'];

/// Per-colour statistics: colour key -> raw field key -> value.
pub type DeckColors = BTreeMap<String, BTreeMap<String, Option<f64>>>;

// Card record as stored in a downloaded set file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardRecord {
    pub name: String,
    #[serde(default, alias = "manaCost")]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: Option<f64>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default, alias = "deckColors")]
    pub deck_colors: DeckColors,
}

impl CardRecord {
    pub fn new(name: &str) -> Self {
        CardRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_mana_cost(mut self, mana_cost: &str) -> Self {
        self.mana_cost = Some(mana_cost.to_string());
        self
    }

    pub fn with_stat(mut self, color: &str, key: &str, value: f64) -> Self {
        self.deck_colors
            .entry(color.to_string())
            .or_default()
            .insert(key.to_string(), Some(value));
        self
    }

    /// Finite value of `key` under `color`, if the dataset has one.
    pub fn stat(&self, color: &str, key: &str) -> Option<f64> {
        self.deck_colors
            .get(color)
            .and_then(|fields| fields.get(key).copied().flatten())
            .filter(|value| value.is_finite())
    }
}

// One pack seen during the draft, as recorded by the log scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPick {
    #[serde(rename = "Pack")]
    pub pack: usize,
    #[serde(rename = "Pick")]
    pub pick: usize,
    #[serde(rename = "Cards", default)]
    pub cards: Vec<String>,
}

// Draft file handed over by the scanner: packs seen plus picks taken per pack
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftLog {
    #[serde(default)]
    pub history: Vec<DraftPick>,
    #[serde(default)]
    pub picks: Vec<Vec<String>>,
}

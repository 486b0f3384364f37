use super::models::CardRecord;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Anything that can resolve card ids seen in a pack to card records.
pub trait CardSource {
    /// Records for the ids that are known, in request order. Unknown ids are skipped.
    fn cards_by_id(&self, ids: &[String]) -> Vec<(String, CardRecord)>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetMeta {
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub game_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub meta: DatasetMeta,
    #[serde(default)]
    pub card_ratings: BTreeMap<String, CardRecord>,
}

impl Dataset {
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let dataset = Self::from_json(&content)?;
        info!(
            "Loaded {} cards from {}",
            dataset.card_ratings.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_json(content: &str) -> AppResult<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        if dataset.card_ratings.is_empty() {
            return Err(AppError::Dataset("set file contains no card ratings".to_string()));
        }
        Ok(dataset)
    }

    pub fn all_cards(&self) -> Vec<CardRecord> {
        self.card_ratings.values().cloned().collect()
    }

    /// Records whose names match, in request order. Matching ignores ASCII case.
    pub fn cards_by_name(&self, names: &[String]) -> Vec<CardRecord> {
        names
            .iter()
            .filter_map(|name| {
                let found = self
                    .card_ratings
                    .values()
                    .find(|card| card.name.eq_ignore_ascii_case(name));
                if found.is_none() {
                    debug!("No card named '{}' in dataset", name);
                }
                found.cloned()
            })
            .collect()
    }
}

impl CardSource for Dataset {
    fn cards_by_id(&self, ids: &[String]) -> Vec<(String, CardRecord)> {
        ids.iter()
            .filter_map(|id| {
                self.card_ratings
                    .get(id)
                    .map(|card| (id.clone(), card.clone()))
            })
            .collect()
    }
}

use super::fields::StatField;
use crate::data::models::CardRecord;
use std::collections::HashMap;
use tracing::debug;

/// Decimal places kept for set means and deviations.
pub const DEFAULT_PRECISION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetrics {
    pub mean: f64,
    pub std_dev: f64,
}

/// Per colour key and win-rate field spread across a whole set.
#[derive(Debug, Clone, Default)]
pub struct SetMetrics {
    metrics: HashMap<(String, StatField), FieldMetrics>,
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

impl SetMetrics {
    pub fn new() -> Self {
        SetMetrics::default()
    }

    pub fn from_cards(cards: &[CardRecord]) -> Self {
        Self::from_cards_with_precision(cards, DEFAULT_PRECISION)
    }

    pub fn from_cards_with_precision(cards: &[CardRecord], precision: u32) -> Self {
        let mut samples: HashMap<(String, StatField), Vec<f64>> = HashMap::new();

        for card in cards {
            for (color, values) in &card.deck_colors {
                for field in StatField::win_rate_fields() {
                    if let Some(value) = values.get(field.key()).copied().flatten() {
                        if value.is_finite() {
                            samples
                                .entry((color.clone(), field))
                                .or_default()
                                .push(value);
                        }
                    }
                }
            }
        }

        let metrics = samples
            .into_iter()
            .map(|(key, values)| {
                let count = values.len() as f64;
                let mean = values.iter().sum::<f64>() / count;
                let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
                let entry = FieldMetrics {
                    mean: round_to(mean, precision),
                    std_dev: round_to(variance.sqrt(), precision),
                };
                (key, entry)
            })
            .collect::<HashMap<_, _>>();

        debug!("Computed set metrics for {} colour/field pairs", metrics.len());
        SetMetrics { metrics }
    }

    pub fn insert(&mut self, color: &str, field: StatField, mean: f64, std_dev: f64) {
        self.metrics
            .insert((color.to_string(), field), FieldMetrics { mean, std_dev });
    }

    pub fn get(&self, color: &str, field: StatField) -> Option<FieldMetrics> {
        self.metrics.get(&(color.to_string(), field)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

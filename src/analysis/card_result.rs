use super::fields::{Field, StatField};
use super::grades::{rating_from_win_rate, round_tenths, Grade};
use super::metrics::SetMetrics;
use crate::config::{ResultFormat, Settings};
use crate::data::models::{CardRecord, ALL_DECKS, ALL_DECKS_LABEL};
use crate::data::tier_list::TierTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

const NOT_AVAILABLE: &str = "NA";

/// One formatted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// Win rate, grade, rating or tier cell; empty when there is no data.
    Text(String),
    /// Plain numeric statistic rounded to one decimal.
    Number(f64),
}

impl ResultValue {
    pub fn empty() -> Self {
        ResultValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResultValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Text(text) => write!(f, "{}", text),
            ResultValue::Number(value) => write!(f, "{:.1}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub name: String,
    pub mana_cost: Option<String>,
    pub colors: Vec<String>,
    /// One value per requested field, in request order.
    pub results: Vec<ResultValue>,
}

/// Final rendering step for a single win-rate number.
#[derive(Debug, Clone, Copy)]
enum ValueStyle<'a> {
    WinRate,
    Grade(&'a SetMetrics),
    Rating(&'a SetMetrics),
}

impl ValueStyle<'_> {
    fn render(&self, value: f64, color: &str, field: StatField) -> String {
        match self {
            ValueStyle::WinRate => format!("{:.1}", value),
            ValueStyle::Grade(metrics) => metrics
                .get(color, field)
                .map(|m| Grade::from_win_rate(value, m.mean, m.std_dev))
                .unwrap_or(Grade::Na)
                .to_string(),
            ValueStyle::Rating(metrics) => metrics
                .get(color, field)
                .and_then(|m| rating_from_win_rate(value, m.mean, m.std_dev))
                .map(|rating| format!("{:.1}", rating))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Formats card statistics for display under the configured result format.
pub struct CardResult<'a> {
    metrics: &'a SetMetrics,
    tier_table: Option<&'a TierTable>,
    settings: &'a Settings,
}

impl<'a> CardResult<'a> {
    pub fn new(
        metrics: &'a SetMetrics,
        tier_table: Option<&'a TierTable>,
        settings: &'a Settings,
    ) -> Self {
        CardResult {
            metrics,
            tier_table,
            settings,
        }
    }

    /// One row per card, in input order, with one value per field.
    pub fn return_results(
        &self,
        cards: &[CardRecord],
        filters: &[String],
        fields: &[Field],
    ) -> Vec<ResultRow> {
        let active = active_filters(filters);
        cards
            .iter()
            .map(|card| ResultRow {
                name: card.name.clone(),
                mana_cost: card.mana_cost.clone(),
                colors: card.colors.clone(),
                results: fields
                    .iter()
                    .map(|field| self.format_field(card, &active, field))
                    .collect(),
            })
            .collect()
    }

    fn format_field(&self, card: &CardRecord, filters: &[&str], field: &Field) -> ResultValue {
        match field {
            Field::Tier(tier_id) => ResultValue::Text(self.tier_rating(card, tier_id)),
            Field::Stat(stat) if stat.is_win_rate() => {
                ResultValue::Text(self.format_win_rate(card, filters, *stat))
            }
            Field::Stat(stat) => self.format_plain(card, filters, *stat),
        }
    }

    fn style(&self) -> ValueStyle<'a> {
        match self.settings.result_format {
            ResultFormat::WinRate => ValueStyle::WinRate,
            ResultFormat::Grade => ValueStyle::Grade(self.metrics),
            ResultFormat::Rating => ValueStyle::Rating(self.metrics),
        }
    }

    fn tier_rating(&self, card: &CardRecord, tier_id: &str) -> String {
        self.tier_table
            .and_then(|table| table.get(tier_id))
            .and_then(|list| list.rating_for(&card.name))
            .map(|rating| rating.rating.clone())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Rounded value of `field` under `color`; entries below the game threshold count as missing.
    fn color_value(&self, card: &CardRecord, color: &str, field: StatField) -> Option<f64> {
        let value = card.stat(color, field.key())?;
        let samples = field.sample_key().and_then(|key| card.stat(color, key));
        if samples.is_some_and(|games| games < f64::from(self.settings.min_game_count)) {
            return None;
        }
        Some(round_tenths(value))
    }

    fn format_win_rate(&self, card: &CardRecord, filters: &[&str], field: StatField) -> String {
        let style = self.style();
        let aggregate = self.color_value(card, ALL_DECKS, field);

        let mut pairs: Vec<(&str, f64)> = card
            .deck_colors
            .keys()
            .filter(|color| color.as_str() != ALL_DECKS)
            .filter_map(|color| {
                self.color_value(card, color, field)
                    .map(|value| (color.as_str(), value))
            })
            .collect();
        pairs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let render_pair =
            |(color, value): (&str, f64)| format!("{}: {}", color, style.render(value, color, field));

        // Sorted descending, so the first filtered pair is the best one
        let filtered = pairs
            .iter()
            .position(|(color, _)| filters.iter().any(|filter| filter == color));

        let (primary, rest) = match filtered {
            Some(idx) => {
                let selected = pairs.remove(idx);
                let mut rest: Vec<String> = pairs.into_iter().map(render_pair).collect();
                if let Some(value) = aggregate {
                    rest.push(format!(
                        "{}: {}",
                        ALL_DECKS_LABEL,
                        style.render(value, ALL_DECKS, field)
                    ));
                }
                (render_pair(selected), rest)
            }
            None => match aggregate {
                Some(value) => (
                    style.render(value, ALL_DECKS, field),
                    pairs.into_iter().map(render_pair).collect(),
                ),
                None => return String::new(),
            },
        };

        if rest.is_empty() {
            primary
        } else {
            format!("{}  {}", primary, rest.join(" "))
        }
    }

    fn format_plain(&self, card: &CardRecord, filters: &[&str], field: StatField) -> ResultValue {
        filters
            .iter()
            .copied()
            .chain(std::iter::once(ALL_DECKS))
            .find_map(|color| self.color_value(card, color, field))
            .map(ResultValue::Number)
            .unwrap_or_else(ResultValue::empty)
    }
}

/// Colour keys that narrow the breakdown; "All Decks" alone means no filter.
fn active_filters(filters: &[String]) -> Vec<&str> {
    filters
        .iter()
        .map(|filter| filter.trim())
        .filter(|filter| !filter.is_empty() && *filter != ALL_DECKS)
        .collect()
}

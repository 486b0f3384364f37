use crate::data::tier_list::TIER_PREFIX;
use crate::error::AppError;
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Statistics carried per colour key in a set file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StatField {
    /// Games-in-hand win rate
    Gihwr,
    /// Opening-hand win rate
    Ohwr,
    /// Games-played win rate
    Gpwr,
    /// Games-drawn win rate
    Gdwr,
    /// Games-not-seen win rate
    Gnswr,
    /// Improvement when drawn
    Iwd,
    /// Average taken at
    Ata,
    /// Average last seen at
    Alsa,
}

impl StatField {
    /// Key of this statistic inside a `deck_colors` entry.
    pub fn key(self) -> &'static str {
        match self {
            StatField::Gihwr => "gihwr",
            StatField::Ohwr => "ohwr",
            StatField::Gpwr => "gpwr",
            StatField::Gdwr => "gdwr",
            StatField::Gnswr => "gnswr",
            StatField::Iwd => "iwd",
            StatField::Ata => "ata",
            StatField::Alsa => "alsa",
        }
    }

    /// Win-rate-like fields get colour breakdowns and grade conversion.
    pub fn is_win_rate(self) -> bool {
        self.sample_key().is_some()
    }

    /// Key of the game count backing this win rate.
    pub fn sample_key(self) -> Option<&'static str> {
        match self {
            StatField::Gihwr => Some("gih"),
            StatField::Ohwr => Some("ngoh"),
            StatField::Gpwr => Some("ngp"),
            StatField::Gdwr => Some("ngd"),
            StatField::Gnswr => Some("gns"),
            StatField::Iwd | StatField::Ata | StatField::Alsa => None,
        }
    }

    pub fn win_rate_fields() -> impl Iterator<Item = StatField> {
        StatField::iter().filter(|field| field.is_win_rate())
    }
}

/// A requested result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Stat(StatField),
    /// Tier-list column, keyed by tier id (TIER0, TIER1, ...).
    Tier(String),
}

impl FromStr for Field {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let upper = trimmed.to_ascii_uppercase();
        if let Some(suffix) = upper.strip_prefix(TIER_PREFIX) {
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
                return Ok(Field::Tier(upper));
            }
        }
        StatField::from_str(trimmed)
            .map(Field::Stat)
            .map_err(|_| AppError::InvalidField(trimmed.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Stat(stat) => write!(f, "{}", stat),
            Field::Tier(id) => write!(f, "{}", id),
        }
    }
}

impl From<StatField> for Field {
    fn from(stat: StatField) -> Self {
        Field::Stat(stat)
    }
}

/// Parse a comma separated list such as "gihwr,alsa,tier0".
pub fn parse_field_list(raw: &str) -> Result<Vec<Field>, AppError> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Field::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_rate_fields_have_sample_keys() {
        let win_rates: Vec<_> = StatField::win_rate_fields().collect();
        assert_eq!(
            win_rates,
            vec![
                StatField::Gihwr,
                StatField::Ohwr,
                StatField::Gpwr,
                StatField::Gdwr,
                StatField::Gnswr
            ]
        );
        assert!(!StatField::Alsa.is_win_rate());
        assert!(!StatField::Iwd.is_win_rate());
    }

    #[test]
    fn field_list_parses_stats_and_tiers() {
        let fields = parse_field_list("gihwr, ALSA,tier0").unwrap();
        assert_eq!(
            fields,
            vec![
                Field::Stat(StatField::Gihwr),
                Field::Stat(StatField::Alsa),
                Field::Tier("TIER0".to_string())
            ]
        );
        assert_eq!(fields[0].to_string(), "GIHWR");
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(matches!(
            Field::from_str("winrate"),
            Err(AppError::InvalidField(_))
        ));
        assert!(Field::from_str("TIER").is_err());
    }
}

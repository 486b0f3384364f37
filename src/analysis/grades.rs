//! Letter grades shared by result formatting and sort-key extraction.
//!
//! `GRADE_BANDS` is the only place grade order is defined: band position gives
//! the rank, band threshold gives the conversion from a win rate.

use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Top of the 0-5 rating scale.
pub const RATING_SCALE_MAX: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum Grade {
    #[strum(serialize = "A+")]
    APlus,
    #[strum(serialize = "A")]
    A,
    #[strum(serialize = "A-")]
    AMinus,
    #[strum(serialize = "B+")]
    BPlus,
    #[strum(serialize = "B")]
    B,
    #[strum(serialize = "B-")]
    BMinus,
    #[strum(serialize = "C+")]
    CPlus,
    #[strum(serialize = "C")]
    C,
    #[strum(serialize = "C-")]
    CMinus,
    #[strum(serialize = "D+")]
    DPlus,
    #[strum(serialize = "D")]
    D,
    #[strum(serialize = "D-")]
    DMinus,
    #[strum(serialize = "F")]
    F,
    /// Sideboard card, only found in tier lists.
    #[strum(serialize = "SB")]
    Sb,
    #[strum(serialize = "NA")]
    Na,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeBand {
    pub grade: Grade,
    /// Minimum standard deviations above the set mean.
    pub deviation: f64,
}

const fn band(grade: Grade, deviation: f64) -> GradeBand {
    GradeBand { grade, deviation }
}

/// Best grade first.
pub const GRADE_BANDS: [GradeBand; 13] = [
    band(Grade::APlus, 2.33),
    band(Grade::A, 2.0),
    band(Grade::AMinus, 1.67),
    band(Grade::BPlus, 1.33),
    band(Grade::B, 1.0),
    band(Grade::BMinus, 0.67),
    band(Grade::CPlus, 0.33),
    band(Grade::C, 0.0),
    band(Grade::CMinus, -0.33),
    band(Grade::DPlus, -0.67),
    band(Grade::D, -1.0),
    band(Grade::DMinus, -1.33),
    band(Grade::F, -1.67),
];

const RANK_SB: u8 = 1;
const RANK_NA: u8 = 0;

impl Grade {
    /// Integer rank; higher is better. `NA` is the lowest.
    pub fn rank(self) -> u8 {
        match self {
            Grade::Sb => RANK_SB,
            Grade::Na => RANK_NA,
            graded => GRADE_BANDS
                .iter()
                .position(|b| b.grade == graded)
                .map(|idx| (GRADE_BANDS.len() + 1 - idx) as u8)
                .unwrap_or(RANK_NA),
        }
    }

    /// Best band whose threshold the deviation reaches; `F` below every band.
    pub fn from_deviation(deviation: f64) -> Grade {
        if !deviation.is_finite() {
            return Grade::Na;
        }
        GRADE_BANDS
            .iter()
            .find(|b| deviation >= b.deviation)
            .map(|b| b.grade)
            .unwrap_or(Grade::F)
    }

    /// Grade of a win rate against a set mean and standard deviation.
    pub fn from_win_rate(value: f64, mean: f64, std_dev: f64) -> Grade {
        if std_dev <= 0.0 || !value.is_finite() {
            return Grade::Na;
        }
        Grade::from_deviation((value - mean) / std_dev)
    }
}

/// Rank of a grade token, if it is one.
pub fn grade_rank(token: &str) -> Option<u8> {
    Grade::from_str(token.trim()).ok().map(Grade::rank)
}

/// Win rate mapped onto 0-5 between the `F` and `A+` thresholds, rounded to one decimal.
pub fn rating_from_win_rate(value: f64, mean: f64, std_dev: f64) -> Option<f64> {
    if std_dev <= 0.0 || !value.is_finite() {
        return None;
    }
    let upper = mean + std_dev * GRADE_BANDS[0].deviation;
    let lower = mean + std_dev * GRADE_BANDS[GRADE_BANDS.len() - 1].deviation;
    let rating = ((value - lower) / (upper - lower)) * RATING_SCALE_MAX;
    Some(round_tenths(rating.clamp(0.0, RATING_SCALE_MAX)))
}

/// Round to one decimal place. Values that round to zero come out as `0.0`, never `-0.0`.
pub fn round_tenths(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

use super::card_result::{ResultRow, ResultValue};
use super::grades::{grade_rank, Grade};
use std::str::FromStr;

/// Key for cells that hold neither a number nor a grade; sorts below everything else.
pub const SORT_KEY_FLOOR: f64 = f64::MIN;

/// Key for an `NA` cell: below every rating, win rate and grade rank, above the floor.
pub const NA_SORT_KEY: f64 = -1.0;

/// Finite keys with `-0.0` folded into `0.0`, so equal values compare equal.
fn normalized(value: f64) -> f64 {
    if !value.is_finite() {
        SORT_KEY_FLOOR
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Sort key of a formatted cell such as `"55.0  UB: 58.7"` or `"WU: A-  UB: B+ AD: A-"`.
///
/// Only the primary (first) value counts. A leading `PAIR:` label is skipped,
/// numbers sort by value and grades by their rank.
pub fn extract_sort_key(display: &str) -> f64 {
    let mut tokens = display.split_whitespace();
    let token = match tokens.next() {
        Some(first) if first.ends_with(':') => tokens.next(),
        first => first,
    };

    let Some(token) = token else {
        return SORT_KEY_FLOOR;
    };

    if let Ok(value) = token.parse::<f64>() {
        if value.is_finite() {
            return normalized(value);
        }
    }

    if matches!(Grade::from_str(token), Ok(Grade::Na)) {
        return NA_SORT_KEY;
    }
    grade_rank(token)
        .map(f64::from)
        .unwrap_or(SORT_KEY_FLOOR)
}

impl ResultValue {
    pub fn sort_key(&self) -> f64 {
        match self {
            ResultValue::Text(text) => extract_sort_key(text),
            ResultValue::Number(value) => normalized(*value),
        }
    }
}

/// Sort rows by one column, best first. Equal keys keep their input order.
pub fn sort_rows(rows: &mut [ResultRow], column: usize) {
    rows.sort_by(|a, b| {
        let key_a = a.results.get(column).map_or(SORT_KEY_FLOOR, ResultValue::sort_key);
        let key_b = b.results.get(column).map_or(SORT_KEY_FLOOR, ResultValue::sort_key);
        key_b.total_cmp(&key_a)
    });
}

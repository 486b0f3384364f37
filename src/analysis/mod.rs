pub mod card_result;
pub mod fields;
pub mod grades;
pub mod metrics;
pub mod sort_key;

pub use card_result::{CardResult, ResultRow, ResultValue};
pub use fields::{Field, StatField};
pub use grades::Grade;
pub use metrics::SetMetrics;
pub use sort_key::{extract_sort_key, sort_rows};

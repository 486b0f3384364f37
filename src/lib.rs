pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod export;

pub use error::{AppError, AppResult};

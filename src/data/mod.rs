pub mod dataset;
pub mod models;
pub mod tier_list;

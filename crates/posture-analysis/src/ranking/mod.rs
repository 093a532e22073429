//! Ranking list: one row per entity, sortable and filterable.

pub mod query;
pub mod types;

pub use query::RankingQuery;
pub use types::*;

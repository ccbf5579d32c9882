//! The filtering and aggregation pipeline.
//!
//! This module takes the loaded trip records plus user-supplied filter
//! criteria and deterministically produces summary KPIs, ranked top-N
//! breakdowns, a month-bucketed series, and "best of" highlights. Data
//! flows strictly forward: filter, aggregate, rank, highlight. No stage
//! mutates another's output.

pub mod aggregate;
pub mod filter;
pub mod highlight;
pub mod pipeline;
pub mod rank;
pub mod types;

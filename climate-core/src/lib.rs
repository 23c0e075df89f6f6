//! Core types for the climate analytics dashboards.
//!
//! Nothing in this crate performs I/O, so everything here builds for both
//! native targets and `wasm32-unknown-unknown`:
//! - `filter`: form state, validation and query strings
//! - `endpoint`: the backend API catalogue
//! - `payload`: serde models for every endpoint response
//! - `view_model`: payload to Plotly trace/layout mapping
//! - `kpi`: headline metric formatting and badge thresholds
//! - `rollup`: group-by-year reducer
//! - `panel`: per-chart load outcome

pub mod endpoint;
pub mod error;
pub mod filter;
pub mod kpi;
pub mod panel;
pub mod payload;
pub mod rollup;
pub mod view_model;

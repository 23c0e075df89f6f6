//! Client side of the climate analytics backend.
//!
//! `reqwest` runs on top of `fetch` in the browser and on hyper natively, so
//! the dashboards and the CLI share this crate:
//! - `client`: one typed async call per endpoint
//! - `config`: base URL and refresh period
//! - `settle`: run independent fetches, one outcome each
//! - `slot`: newest-request-wins cancellation per panel

pub mod client;
pub mod config;
pub mod settle;
pub mod slot;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use settle::settle_all;
pub use slot::RequestSlot;

//! Shared Dioxus components and Plotly.js bridge for the climate dashboards.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Plotly.js calls via `js_sys::eval()`
//! - `bindings`: typed DOM element ids, checked once after mount
//! - `renderer`: panel state to container contents
//! - `state`: reactive AppState with Dioxus Signals
//! - `timer`: `setTimeout`-backed async sleep
//! - `components`: reusable RSX components (filters, tiles, containers, etc.)

pub mod bindings;
pub mod components;
pub mod js_bridge;
pub mod renderer;
pub mod state;
pub mod timer;

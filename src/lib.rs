//! calgrid - TUI calendar grid viewer
//!
//! Renders a task/event list as a multi-week calendar grid. The core of the
//! crate is the pure layout engine in [`engine`]: day/week grid generation,
//! item-to-week assignment, and first-fit lane packing. The rest is the
//! application shell around it (config, logging, parsing, state, view).

pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod parser;
pub mod state;
pub mod view;

//! Core types, configuration, and history storage for lumen.
//!
//! This crate provides the foundational data structures used across all lumen crates:
//! - [`types`] — Issues, custom rules, analysis outcomes, and error types
//! - [`metrics`] — Per-URL per-day issue aggregates
//! - [`store`] — The [`HistoryStore`](store::HistoryStore) trait for result persistence
//! - [`sqlite`] — SQLite-backed implementation of `HistoryStore`
//! - [`config`] — Configuration loading from `.lumen/lumen.json`

pub mod config;
pub mod metrics;
pub mod sqlite;
pub mod store;
pub mod types;

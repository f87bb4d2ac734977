//! `msme-intel` library crate.
//!
//! The binary (`msme`) is a thin wrapper around this library so that:
//!
//! - the intent router and aggregations are testable without a terminal
//! - text, JSON, and TUI front-ends share one pipeline

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod query;
pub mod report;
pub mod tui;

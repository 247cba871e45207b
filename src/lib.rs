// src/lib.rs
//! Flags probable migrants in EDCS inscription tables.
//!
//! ```text
//! input table ─► record::Records ─┐
//!                                 ├─► migrants::MigrantIdentifier ─► report::emit
//! gazetteer table ─► gazetteer ───┘
//! ```
//! `runner::run` wires the stages; `cli` is the command-line front.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod gazetteer;
pub mod log;
pub mod migrants;
pub mod progress;
pub mod record;
pub mod report;
pub mod runner;
pub mod store;
pub mod table;

pub use error::{Error, Result};

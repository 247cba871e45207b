// src/core/mod.rs

pub mod sanitize;
pub mod words;

pub use words::Words;

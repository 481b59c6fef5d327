// src/lib.rs
//! Message pattern extraction from C/C++ sources and similarity scoring
//! between pattern baselines.

pub mod baseline;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exit;
pub mod extract;
pub mod lang;
pub mod report;
pub mod similarity;
pub mod syntax;

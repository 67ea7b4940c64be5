//! TOSSUP — coin-toss betting tournament simulator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod random;
pub mod source;
pub mod strategy;
pub mod engine;
pub mod presentation;
pub mod dashboard;

//! Betting strategy.
//!
//! Only stake sizing lives here; who calls and how the coin lands is the
//! resolver's job.

pub mod bet_sizer;

pub use bet_sizer::BetSizer;

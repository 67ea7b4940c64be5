//! Integration tests: full runs against an in-memory user source.

mod mock_source;
mod simulation;

//! Common test infrastructure
//!
//! Every end-to-end test builds its engine from the same small catalog:
//! 3 artists, 8 tracks, 4 users with likes, plays and artist listening counts.
//! Tests should only import from this module, not from internal submodules.

mod constants;
mod fixtures;

pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{test_engine, test_engine_with, test_snapshot, write_snapshot};

//! Common test utilities for shapegraph-inclusion
//!
//! Graph builders, a recording unfolder and the JSON scenario loader shared
//! by the integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

// Re-export all utilities
pub use builders::*;
pub use fixtures::*;

//! Configuration
//!
//! Preset-based configuration with builder overrides and versioned YAML:
//!
//! ```rust,ignore
//! use shapegraph_inclusion::config::{InclusionConfig, Preset};
//!
//! let config = InclusionConfig::from_preset(Preset::Fast).max_unfold_depth(16);
//! config.validate()?;
//! ```

pub mod error;
mod inclusion_config;
pub mod preset;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use inclusion_config::{InclusionConfig, MAX_UNFOLD_DEPTH_LIMIT};
pub use preset::Preset;
pub use validation::Validatable;

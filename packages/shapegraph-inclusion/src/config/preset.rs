//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Fixpoint checks inside tight loops
    ///
    /// - No unfolding retry after a failed structural rule
    /// - max_unfold_depth=8
    Fast,

    /// Default for analysis runs
    ///
    /// - Unfolding retry on soft failures
    /// - max_unfold_depth=32
    Balanced,

    /// Assertion checking and debugging of imprecise joins
    ///
    /// - Unfolding retry on soft failures
    /// - max_unfold_depth=128
    Thorough,

    /// Custom: User-defined (YAML only)
    ///
    /// Starts from the balanced values.
    Custom,
}

impl Preset {
    /// Parse preset from string
    pub fn parse(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            "custom" => Ok(Self::Custom),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

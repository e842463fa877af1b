//! Inclusion checker configuration
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! overrides:
//!   max_unfold_depth: 64
//!   node_count_heuristic: false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;

/// Upper bound accepted for `max_unfold_depth`
pub const MAX_UNFOLD_DEPTH_LIMIT: usize = 4096;

/// Settings of the inclusion procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionConfig {
    /// Preset the values were derived from
    pub preset: Preset,

    /// `check_inclusion` also requires every left edge to be consumed
    pub require_left_consumed: bool,

    /// Retry a failed structural rule at a right summary edge by unfolding it
    pub unfold_on_failure: bool,

    /// Maximum number of nested case splits (1..=4096)
    pub max_unfold_depth: usize,

    /// Seg/seg: equal node counts identify the segment destinations
    pub node_count_heuristic: bool,
}

impl Default for InclusionConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl InclusionConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                preset,
                require_left_consumed: true,
                unfold_on_failure: false,
                max_unfold_depth: 8,
                node_count_heuristic: true,
            },
            Preset::Balanced | Preset::Custom => Self {
                preset,
                require_left_consumed: true,
                unfold_on_failure: true,
                max_unfold_depth: 32,
                node_count_heuristic: true,
            },
            Preset::Thorough => Self {
                preset,
                require_left_consumed: true,
                unfold_on_failure: true,
                max_unfold_depth: 128,
                node_count_heuristic: true,
            },
        }
    }

    /// Builder: Set require_left_consumed
    pub fn require_left_consumed(mut self, v: bool) -> Self {
        self.require_left_consumed = v;
        self
    }

    /// Builder: Set unfold_on_failure
    pub fn unfold_on_failure(mut self, v: bool) -> Self {
        self.unfold_on_failure = v;
        self
    }

    /// Builder: Set max_unfold_depth
    pub fn max_unfold_depth(mut self, v: usize) -> Self {
        self.max_unfold_depth = v;
        self
    }

    /// Builder: Set node_count_heuristic
    pub fn node_count_heuristic(mut self, v: bool) -> Self {
        self.node_count_heuristic = v;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_unfold_depth == 0 || self.max_unfold_depth > MAX_UNFOLD_DEPTH_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_unfold_depth",
                self.max_unfold_depth,
                1,
                MAX_UNFOLD_DEPTH_LIMIT,
                "At least one case split is needed to unfold a summary",
            ));
        }
        Ok(())
    }

    /// Parse a versioned YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: InclusionConfigFile = serde_yaml::from_str(content)?;
        if file.version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: vec![1],
            });
        }

        let preset = Preset::parse(&file.preset)?;
        let mut config = Self::from_preset(preset);
        if let Some(overrides) = file.overrides {
            overrides.apply(&mut config);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as a versioned YAML document with every field overridden
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = InclusionConfigFile {
            version: 1,
            preset: self.preset.to_string(),
            overrides: Some(InclusionOverrides {
                require_left_consumed: Some(self.require_left_consumed),
                unfold_on_failure: Some(self.unfold_on_failure),
                max_unfold_depth: Some(self.max_unfold_depth),
                node_count_heuristic: Some(self.node_count_heuristic),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for InclusionConfig {
    fn validate(&self) -> ConfigResult<()> {
        InclusionConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "InclusionConfig"
    }
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct InclusionConfigFile {
    version: u32,
    preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    overrides: Option<InclusionOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct InclusionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    require_left_consumed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unfold_on_failure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_unfold_depth: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    node_count_heuristic: Option<bool>,
}

impl InclusionOverrides {
    fn apply(self, config: &mut InclusionConfig) {
        if let Some(v) = self.require_left_consumed {
            config.require_left_consumed = v;
        }
        if let Some(v) = self.unfold_on_failure {
            config.unfold_on_failure = v;
        }
        if let Some(v) = self.max_unfold_depth {
            config.max_unfold_depth = v;
        }
        if let Some(v) = self.node_count_heuristic {
            config.node_count_heuristic = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let fast = InclusionConfig::from_preset(Preset::Fast);
        assert!(!fast.unfold_on_failure);
        assert_eq!(fast.max_unfold_depth, 8);

        let thorough = InclusionConfig::from_preset(Preset::Thorough);
        assert!(thorough.unfold_on_failure);
        assert!(thorough.max_unfold_depth > InclusionConfig::default().max_unfold_depth);
    }

    #[test]
    fn test_validate_depth_range() {
        assert!(InclusionConfig::default().validate().is_ok());
        let err = InclusionConfig::default().max_unfold_depth(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "max_unfold_depth"));
        assert!(InclusionConfig::default()
            .max_unfold_depth(MAX_UNFOLD_DEPTH_LIMIT + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validatable_trait() {
        fn check<C: Validatable>(config: &C) -> ConfigResult<()> {
            config.validate()
        }
        assert!(check(&InclusionConfig::default()).is_ok());
        assert!(check(&InclusionConfig::default().max_unfold_depth(0)).is_err());
        assert_eq!(InclusionConfig::default().config_name(), "InclusionConfig");
    }

    #[test]
    fn test_yaml_overrides() {
        let yaml = r#"
version: 1
preset: fast
overrides:
  max_unfold_depth: 16
  node_count_heuristic: false
"#;
        let config = InclusionConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.preset, Preset::Fast);
        assert_eq!(config.max_unfold_depth, 16);
        assert!(!config.node_count_heuristic);
        assert!(!config.unfold_on_failure);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = InclusionConfig::from_preset(Preset::Thorough).unfold_on_failure(false);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: thorough"));
        assert_eq!(InclusionConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_rejections() {
        assert!(matches!(
            InclusionConfig::from_yaml_str("version: 2\npreset: fast\n"),
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
        assert!(matches!(
            InclusionConfig::from_yaml_str("version: 1\npreset: turbo\n"),
            Err(ConfigError::UnknownPreset(_))
        ));
        assert!(matches!(
            InclusionConfig::from_yaml_str("version: 1\npreset: fast\noverrides:\n  max_depth: 3\n"),
            Err(ConfigError::Yaml(_))
        ));
        assert!(matches!(
            InclusionConfig::from_yaml_str("version: 1\npreset: fast\noverrides:\n  max_unfold_depth: 0\n"),
            Err(ConfigError::Range { .. })
        ));
    }

    #[test]
    fn test_from_yaml_missing_file() {
        assert!(matches!(
            InclusionConfig::from_yaml("/nonexistent/inclusion.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}

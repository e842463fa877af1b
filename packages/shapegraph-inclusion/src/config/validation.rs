//! Configuration validation
//!
//! Code that accepts a configuration depends on [`Validatable`], not on the
//! concrete config type.

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use shapegraph_inclusion::config::Validatable;
///
/// fn build_checker<C: Validatable>(config: C) -> Result<Checker, ConfigError> {
///     config.validate()?;
///     // ... build checker
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

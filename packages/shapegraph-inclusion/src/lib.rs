/*
 * Shapegraph Inclusion - Shape Graph Entailment Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Heap graph, predicates, numeric constraints
 * - features/    : Vertical slices (inclusion: domain → ports → infrastructure → application)
 * - config/      : Presets, validation, YAML
 *
 * Single-threaded; search state is cloned at every case split.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Rule appliers thread many search parameters
#![allow(clippy::type_complexity)] // Complex types are necessary for analysis
#![allow(clippy::should_implement_trait)] // parse/as_str naming intentional
#![allow(clippy::derivable_impls)] // Manual impl for documentation
#![allow(clippy::needless_lifetimes)] // Explicit lifetimes for clarity
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models (heap graph, predicates, constraints)
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, ConfigResult, InclusionConfig, Preset};
pub use errors::{InclusionError, InclusionResult};
pub use features::inclusion::{
    DefinitionUnfolder, EmptyPreference, FactOracle, InclusionChecker, InclusionQuery, LeftOracle,
    NodeMap, PartialInclusion, UnfoldAlternative, Unfolder,
};
pub use shared::models::{
    AllocOrigin, Cell, HeapGraph, InductiveEdge, NodeId, NodeKind, NumConstraint, PredicateId,
    PredicateRegistry, SegmentEdge, ShapeEdge,
};

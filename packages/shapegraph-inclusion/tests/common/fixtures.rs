//! JSON scenario fixtures
//!
//! A scenario file is a list of inclusion problems. Node ids in `map` are
//! `[right, left]` pairs; `null` lists left nodes the oracle knows to be 0.

use serde::Deserialize;
use std::path::Path;

use shapegraph_inclusion::{FactOracle, HeapGraph, InclusionQuery, NodeId, NumConstraint};

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub left: HeapGraph,
    pub right: HeapGraph,
    #[serde(default)]
    pub map: Vec<(NodeId, NodeId)>,
    #[serde(default)]
    pub null: Vec<NodeId>,
    pub included: bool,
}

impl Scenario {
    pub fn query(&self) -> InclusionQuery {
        self.map
            .iter()
            .fold(
                InclusionQuery::new(self.left.clone(), self.right.clone()),
                |query, &(right, left)| query.map(right, left),
            )
    }

    pub fn oracle(&self) -> FactOracle {
        let mut oracle = FactOracle::from_graph(&self.left);
        for &node in &self.null {
            assert!(
                oracle.assume(&NumConstraint::is_null(node)),
                "scenario {}: null fact rejected",
                self.name
            );
        }
        oracle
    }
}

pub fn load_scenarios(file: &str) -> Vec<Scenario> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(file);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("cannot parse {}: {}", path.display(), e))
}

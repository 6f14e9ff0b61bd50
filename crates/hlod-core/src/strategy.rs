//! Strategy vocabulary shared by every pipeline stage: the three pluggable
//! categories and the opaque per-strategy option map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three pluggable strategy categories of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyCategory {
    /// Merges a partition group's meshes into fewer draw units.
    Batcher,
    /// Reduces triangle count of batched geometry.
    Simplifier,
    /// Lays out generated roots for eager or on-demand loading.
    Streaming,
}

impl std::fmt::Display for StrategyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Batcher => write!(f, "batcher"),
            Self::Simplifier => write!(f, "simplifier"),
            Self::Streaming => write!(f, "streaming"),
        }
    }
}

/// Free-form strategy options, passed through the orchestrator unchanged.
///
/// Keys and values are plain strings; each strategy documents the keys it
/// understands on its descriptor and ignores the rest. A `BTreeMap` keeps
/// iteration and serialization order deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyConfig(pub BTreeMap<String, String>);

impl StrategyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Parses a float option. Unparsable or missing values yield `None`;
    /// strategies fall back to their documented defaults.
    pub fn get_f32(&self, key: &str) -> Option<f32> {
        self.get(key)?.trim().parse().ok()
    }
}

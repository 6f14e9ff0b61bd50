//! Strategy registry: maps strategy names to factories per category.
//!
//! The registry is built once at startup (or per tool invocation) and shared
//! immutably by the orchestrator. Registration order is preserved so
//! configuration UIs list strategies deterministically.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use thiserror::Error;

use hlod_batch::{Batcher, MaterialGroupBatcher, MergeAllBatcher};
use hlod_core::{HlodError, StrategyCategory};
use hlod_simplify::{EdgeCollapseSimplifier, GridClusterSimplifier, Simplifier, SimplifyTarget};
use hlod_streaming::{OnDemandStreaming, ResidentStreaming, StreamingLayout};

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One tunable option a strategy understands, for configuration UIs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionKey {
    /// Key looked up in the strategy's option map.
    pub key: &'static str,
    /// Default value used when the key is absent.
    pub default: &'static str,
    /// Human-readable description.
    pub doc: &'static str,
}

/// Self-description of a registered strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrategyDescriptor {
    /// Name selected in [`HlodSettings`](hlod_core::HlodSettings).
    pub name: &'static str,
    /// Options the strategy reads from its option map.
    pub options: &'static [OptionKey],
}

pub type BatcherFactory = fn() -> Box<dyn Batcher>;
pub type SimplifierFactory = fn() -> Box<dyn Simplifier>;
pub type StreamingFactory = fn() -> Box<dyn StreamingLayout>;

/// Errors that can occur during strategy registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A strategy with the same name is already registered in the category.
    #[error("duplicate {category} strategy name: {name}")]
    DuplicateName {
        category: StrategyCategory,
        name: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Per-category catalog
// ---------------------------------------------------------------------------

/// Ordered entries plus a name index, shared by all three categories.
struct Catalog<F> {
    category: StrategyCategory,
    entries: Vec<(StrategyDescriptor, F)>,
    by_name: FxHashMap<&'static str, usize>,
}

impl<F> Catalog<F> {
    fn new(category: StrategyCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    fn register(&mut self, descriptor: StrategyDescriptor, factory: F) -> Result<(), RegistryError> {
        if self.by_name.contains_key(descriptor.name) {
            return Err(RegistryError::DuplicateName {
                category: self.category,
                name: descriptor.name,
            });
        }
        self.by_name.insert(descriptor.name, self.entries.len());
        self.entries.push((descriptor, factory));
        Ok(())
    }

    /// Descriptors in registration order, or [`HlodError::NoImplementationsFound`]
    /// when the category is empty.
    fn descriptors(&self) -> Result<Vec<&StrategyDescriptor>, HlodError> {
        if self.entries.is_empty() {
            return Err(HlodError::NoImplementationsFound(self.category));
        }
        Ok(self.entries.iter().map(|(d, _)| d).collect())
    }

    fn factory(&self, name: &str) -> Result<&F, HlodError> {
        if self.entries.is_empty() {
            return Err(HlodError::NoImplementationsFound(self.category));
        }
        let index = self
            .by_name
            .get(name)
            .ok_or_else(|| HlodError::UnknownStrategy {
                category: self.category,
                name: name.to_string(),
            })?;
        Ok(&self.entries[*index].1)
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Strategy implementations available to builds, one catalog per category.
pub struct StrategyRegistry {
    batchers: Catalog<BatcherFactory>,
    simplifiers: Catalog<SimplifierFactory>,
    streamers: Catalog<StreamingFactory>,
}

const SIMPLIFY_OPTIONS: &[OptionKey] = &[OptionKey {
    key: SimplifyTarget::RATIO_KEY,
    default: "0.25",
    doc: "triangle budget per batch, as a fraction of its input triangle count",
}];

impl StrategyRegistry {
    /// Creates a registry with no strategies registered.
    pub fn empty() -> Self {
        Self {
            batchers: Catalog::new(StrategyCategory::Batcher),
            simplifiers: Catalog::new(StrategyCategory::Simplifier),
            streamers: Catalog::new(StrategyCategory::Streaming),
        }
    }

    /// Creates a registry with every built-in strategy registered.
    ///
    /// # Panics
    ///
    /// Never panics in practice: built-in names are distinct by construction.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        let result: Result<(), RegistryError> = (|| {
            registry.register_batcher(
                StrategyDescriptor {
                    name: "merge-all",
                    options: &[],
                },
                || Box::new(MergeAllBatcher),
            )?;
            registry.register_batcher(
                StrategyDescriptor {
                    name: "material-group",
                    options: &[],
                },
                || Box::new(MaterialGroupBatcher),
            )?;
            registry.register_simplifier(
                StrategyDescriptor {
                    name: "grid-cluster",
                    options: SIMPLIFY_OPTIONS,
                },
                || Box::new(GridClusterSimplifier),
            )?;
            registry.register_simplifier(
                StrategyDescriptor {
                    name: "edge-collapse",
                    options: SIMPLIFY_OPTIONS,
                },
                || Box::new(EdgeCollapseSimplifier),
            )?;
            registry.register_streaming(
                StrategyDescriptor {
                    name: "resident",
                    options: &[],
                },
                || Box::new(ResidentStreaming),
            )?;
            registry.register_streaming(
                StrategyDescriptor {
                    name: "on-demand",
                    options: &[],
                },
                || Box::new(OnDemandStreaming),
            )?;
            Ok(())
        })();
        debug_assert!(result.is_ok(), "built-in strategy names collide");
        registry
    }

    /// Shared registry of built-in strategies, initialized on first use.
    pub fn global() -> &'static StrategyRegistry {
        static GLOBAL: OnceLock<StrategyRegistry> = OnceLock::new();
        GLOBAL.get_or_init(StrategyRegistry::with_builtins)
    }

    /// Registers a batching strategy.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_batcher(
        &mut self,
        descriptor: StrategyDescriptor,
        factory: BatcherFactory,
    ) -> Result<(), RegistryError> {
        self.batchers.register(descriptor, factory)
    }

    /// Registers a simplification strategy.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_simplifier(
        &mut self,
        descriptor: StrategyDescriptor,
        factory: SimplifierFactory,
    ) -> Result<(), RegistryError> {
        self.simplifiers.register(descriptor, factory)
    }

    /// Registers a streaming strategy.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register_streaming(
        &mut self,
        descriptor: StrategyDescriptor,
        factory: StreamingFactory,
    ) -> Result<(), RegistryError> {
        self.streamers.register(descriptor, factory)
    }

    /// Lists a category's strategies in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`HlodError::NoImplementationsFound`] when the category has no
    /// registered strategies.
    pub fn descriptors(
        &self,
        category: StrategyCategory,
    ) -> Result<Vec<&StrategyDescriptor>, HlodError> {
        match category {
            StrategyCategory::Batcher => self.batchers.descriptors(),
            StrategyCategory::Simplifier => self.simplifiers.descriptors(),
            StrategyCategory::Streaming => self.streamers.descriptors(),
        }
    }

    /// Instantiates the named batching strategy.
    ///
    /// # Errors
    ///
    /// Returns [`HlodError::NoImplementationsFound`] when the category is
    /// empty, or [`HlodError::UnknownStrategy`] when the name is not
    /// registered.
    pub fn create_batcher(&self, name: &str) -> Result<Box<dyn Batcher>, HlodError> {
        self.batchers.factory(name).map(|f| f())
    }

    /// Instantiates the named simplification strategy. Errors as
    /// [`create_batcher`](Self::create_batcher).
    pub fn create_simplifier(&self, name: &str) -> Result<Box<dyn Simplifier>, HlodError> {
        self.simplifiers.factory(name).map(|f| f())
    }

    /// Instantiates the named streaming strategy. Errors as
    /// [`create_batcher`](Self::create_batcher).
    pub fn create_streaming(&self, name: &str) -> Result<Box<dyn StreamingLayout>, HlodError> {
        self.streamers.factory(name).map(|f| f())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

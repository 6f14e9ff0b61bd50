//! Build orchestration: strategy registry, the generate/update/destroy state
//! machine, and cancellable background build tasks.

mod build;
mod orchestrator;
mod registry;
mod state;
mod task;

pub use orchestrator::Orchestrator;
pub use registry::{
    BatcherFactory, OptionKey, RegistryError, SimplifierFactory, StrategyDescriptor,
    StrategyRegistry, StreamingFactory,
};
pub use state::Operation;
pub use task::{BuildProgress, BuildReport, BuildTask};

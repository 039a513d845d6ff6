//! Neurofusion Agents - independent detectors evaluated once per fusion cycle
//!
//! One file per agent under src/agents/. Every agent owns its private memory
//! and reads nothing but the snapshot it is handed. New agents are wired in
//! through `create_default_registry` and the name match in `create_scoped_registry`.

pub mod agents;
pub mod registry;
pub mod state;

pub use agents::*;
pub use registry::{Agent, AgentRegistry};
pub use state::AgentMemory;

use neurofusion_core::FusionConfig;

/// Create the default registry with all eight agents, in evaluation order.
pub fn create_default_registry(config: &FusionConfig) -> AgentRegistry {
    let mut registry = AgentRegistry::new();

    // --- Camera ---
    registry.register(AttentionAgent::new(config.attention.clone()));

    // --- Language ---
    registry.register(OverloadAgent::new(config.overload.clone()));

    // --- Knowledge graph ---
    registry.register(GapAgent::new(config.gap.clone()));

    // --- Behavioral ---
    registry.register(EngagementAgent::new(config.engagement.clone()));
    registry.register(FatigueAgent::new(config.fatigue.clone()));

    // --- Language / knowledge graph ---
    registry.register(MemoryAgent::new(config.memory.clone()));
    registry.register(MisconceptionAgent::new(config.misconception.clone()));
    registry.register(PlateauAgent::new(config.plateau.clone()));

    registry
}

/// Create a registry holding only the named agents, in the order given.
///
/// Unknown names are logged and skipped.
pub fn create_scoped_registry(config: &FusionConfig, enabled: &[&str]) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    for name in enabled {
        match *name {
            AttentionAgent::NAME => registry.register(AttentionAgent::new(config.attention.clone())),
            OverloadAgent::NAME => registry.register(OverloadAgent::new(config.overload.clone())),
            GapAgent::NAME => registry.register(GapAgent::new(config.gap.clone())),
            EngagementAgent::NAME => registry.register(EngagementAgent::new(config.engagement.clone())),
            FatigueAgent::NAME => registry.register(FatigueAgent::new(config.fatigue.clone())),
            MemoryAgent::NAME => registry.register(MemoryAgent::new(config.memory.clone())),
            MisconceptionAgent::NAME => {
                registry.register(MisconceptionAgent::new(config.misconception.clone()))
            }
            PlateauAgent::NAME => registry.register(PlateauAgent::new(config.plateau.clone())),
            _ => tracing::warn!("Unknown agent in scope: {}", name),
        }
    }
    registry
}

//! Neurofusion: multi-agent intervention fusion for adaptive lesson playback
//!
//! Umbrella crate over the workspace members:
//! - [`neurofusion_core`]: signals, snapshot, proposals, configuration, errors
//! - [`neurofusion_agents`]: the `Agent` trait and the eight detectors
//! - [`neurofusion_engine`]: graph, cooldowns, conflict resolution, prioritization, coordinator

pub mod telemetry;

pub use neurofusion_agents;
pub use neurofusion_core;
pub use neurofusion_engine;

pub use neurofusion_core::{FusionConfig, InterventionProposal, SignalFrame};
pub use neurofusion_engine::{FusionCoordinator, LessonOrchestrator, SessionRegistry};

//! Neurofusion Engine - Fusion graph, cooldowns, conflict resolution, prioritization
//! and the per-session coordinator

pub mod audit;
pub mod clock;
pub mod conflict;
pub mod cooldown;
pub mod coordinator;
pub mod graph;
pub mod orchestrator;
pub mod prioritizer;
pub mod session;

pub use audit::CycleReport;
pub use clock::{Clock, ManualClock, SystemClock};
pub use conflict::{ConflictResolver, ConflictTable};
pub use cooldown::CooldownTracker;
pub use coordinator::FusionCoordinator;
pub use graph::{FusionGraph, GraphRun};
pub use orchestrator::LessonOrchestrator;
pub use prioritizer::{Prioritizer, DEFAULT_MAX_INTERVENTIONS};
pub use session::SessionRegistry;

pub mod attention;
pub mod engagement;
pub mod fatigue;
pub mod gap;
pub mod memory;
pub mod misconception;
pub mod overload;
pub mod plateau;

pub use attention::AttentionAgent;
pub use engagement::EngagementAgent;
pub use fatigue::FatigueAgent;
pub use gap::GapAgent;
pub use memory::MemoryAgent;
pub use misconception::MisconceptionAgent;
pub use overload::OverloadAgent;
pub use plateau::PlateauAgent;

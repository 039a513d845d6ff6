//! Neurofusion Core - Signals, snapshots, proposals, configuration and error handling

pub mod config;
pub mod error;
pub mod proposal;
pub mod signals;
pub mod snapshot;
pub mod types;

pub use config::FusionConfig;
pub use error::{Error, Result};
pub use proposal::{AgentEvaluation, InterventionProposal, Payload, ProposalBuilder};
pub use signals::*;
pub use snapshot::{AgentState, FusionSnapshot};
pub use types::*;

//! Fusion engine configuration
//!
//! All tunable thresholds in one place. Loaded from TOML at startup,
//! falls back to defaults if no config file exists.

use crate::error::{Error, Result};
use crate::types::InterventionKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level fusion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FusionConfig {
    /// Cycle cadence and selection limits.
    pub cycle: CycleConfig,
    pub attention: AttentionConfig,
    pub overload: OverloadConfig,
    pub gap: GapConfig,
    pub engagement: EngagementConfig,
    pub fatigue: FatigueConfig,
    pub memory: MemoryConfig,
    pub misconception: MisconceptionConfig,
    pub plateau: PlateauConfig,
    /// Mutually exclusive intervention pairs.
    pub conflicts: ConflictConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CycleConfig {
    /// Target cadence of the caller loop.
    pub interval_ms: u64,
    /// Upper bound on interventions surfaced per cycle.
    pub max_interventions: usize,
    /// Window for the `recent_interventions` context list.
    pub recent_window_secs: f64,
    /// Cycles slower than this are logged as warnings.
    pub latency_ceiling_ms: u64,
    /// Capacity of the audit report channel.
    pub audit_buffer: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AttentionConfig {
    pub cooldown_secs: u32,
    pub confidence: f64,
    /// Extra duration gate on top of the webcam layer's off-screen flag. 0 disables it.
    pub min_off_screen_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverloadConfig {
    /// Per-phrase suppression window.
    pub phrase_cooldown_secs: u32,
    pub base_confidence: f64,
    /// Added per corroborating signal.
    pub boost: f64,
    pub webcam_tension_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GapConfig {
    pub confidence: f64,
}

/// Frustration and mastery bands. Evaluated as rescue, then skip, then mirror.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngagementConfig {
    pub frustration_rescue: f64,
    pub mastery_boredom: f64,
    pub mastery_certain: f64,
    pub webcam_boredom: f64,
    pub frustration_mirror: f64,
    pub rescue_cooldown_secs: u32,
    pub skip_cooldown_secs: u32,
    pub mirror_cooldown_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FatigueConfig {
    pub threshold: f64,
    pub cooldown_secs: u32,
    pub break_duration_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemoryConfig {
    pub max_concepts_listed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MisconceptionConfig {
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlateauConfig {
    pub confidence: f64,
    pub replacement_method: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConflictConfig {
    /// Unordered pairs of `intervention_type` names.
    pub pairs: Vec<[String; 2]>,
}

// ============================================================
// Defaults
// ============================================================

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            interval_ms: 250,
            max_interventions: 2,
            recent_window_secs: 300.0,
            latency_ceiling_ms: 500,
            audit_buffer: 64,
        }
    }
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self { cooldown_secs: 120, confidence: 0.85, min_off_screen_ms: 0.0 }
    }
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self {
            phrase_cooldown_secs: 300,
            base_confidence: 0.70,
            boost: 0.10,
            webcam_tension_threshold: 0.5,
        }
    }
}

impl Default for GapConfig {
    fn default() -> Self {
        Self { confidence: 0.80 }
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            frustration_rescue: 0.70,
            mastery_boredom: 0.85,
            mastery_certain: 0.90,
            webcam_boredom: 0.60,
            frustration_mirror: 0.45,
            rescue_cooldown_secs: 300,
            skip_cooldown_secs: 180,
            mirror_cooldown_secs: 600,
        }
    }
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self { threshold: 0.75, cooldown_secs: 1200, break_duration_secs: 120 }
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { max_concepts_listed: 4 }
    }
}

impl Default for MisconceptionConfig {
    fn default() -> Self {
        Self { confidence: 0.75 }
    }
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            confidence: 0.80,
            replacement_method: "story_analogy".into(),
        }
    }
}

impl Default for ConflictConfig {
    fn default() -> Self {
        let pair = |a: InterventionKind, b: InterventionKind| [a.as_str().to_string(), b.as_str().to_string()];
        Self {
            pairs: vec![
                pair(InterventionKind::PauseVideo, InterventionKind::ForceBreak),
                pair(InterventionKind::PauseVideo, InterventionKind::SkipToChallenge),
                pair(InterventionKind::ForceBreak, InterventionKind::CheckpointConcepts),
                pair(InterventionKind::SkipToChallenge, InterventionKind::ExplainConcept),
            ],
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl FusionConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => {
                    tracing::info!("Loaded fusion config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                tracing::info!("No fusion config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Strict variant of [`FusionConfig::load`]: every failure is an error.
    pub fn try_load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the current config as TOML (for generating a default config file).
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle.max_interventions == 0 {
            return Err(Error::ConfigError("cycle.max_interventions must be at least 1".into()));
        }
        if !self.cycle.recent_window_secs.is_finite() || self.cycle.recent_window_secs < 0.0 {
            return Err(Error::ConfigError("cycle.recent_window_secs must be non-negative".into()));
        }

        let unit_values = [
            ("attention.confidence", self.attention.confidence),
            ("overload.base_confidence", self.overload.base_confidence),
            ("overload.boost", self.overload.boost),
            ("overload.webcam_tension_threshold", self.overload.webcam_tension_threshold),
            ("gap.confidence", self.gap.confidence),
            ("engagement.frustration_rescue", self.engagement.frustration_rescue),
            ("engagement.mastery_boredom", self.engagement.mastery_boredom),
            ("engagement.mastery_certain", self.engagement.mastery_certain),
            ("engagement.webcam_boredom", self.engagement.webcam_boredom),
            ("engagement.frustration_mirror", self.engagement.frustration_mirror),
            ("fatigue.threshold", self.fatigue.threshold),
            ("misconception.confidence", self.misconception.confidence),
            ("plateau.confidence", self.plateau.confidence),
        ];
        for (name, value) in unit_values {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::ConfigError(format!("{} = {} is outside [0, 1]", name, value)));
            }
        }

        if self.engagement.frustration_mirror > self.engagement.frustration_rescue {
            return Err(Error::ConfigError(
                "engagement.frustration_mirror must not exceed frustration_rescue".into(),
            ));
        }

        self.conflict_pairs()?;
        Ok(())
    }

    /// Conflict pairs resolved to intervention kinds.
    pub fn conflict_pairs(&self) -> Result<Vec<(InterventionKind, InterventionKind)>> {
        self.conflicts
            .pairs
            .iter()
            .map(|[a, b]| {
                let a = a.parse().map_err(|e: Error| Error::ConfigError(e.to_string()))?;
                let b = b.parse().map_err(|e: Error| Error::ConfigError(e.to_string()))?;
                Ok((a, b))
            })
            .collect()
    }
}

//! Private per-agent memory

/// Last-fire bookkeeping owned by a single agent instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentMemory {
    last_detection: Option<f64>,
    detection_count: u32,
}

impl AgentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while fewer than `cooldown_secs` have passed since the last recorded fire.
    pub fn is_on_cooldown(&self, now: f64, cooldown_secs: u32) -> bool {
        match self.last_detection {
            Some(last) => now - last < f64::from(cooldown_secs),
            None => false,
        }
    }

    /// Remember a fire at `now` and count it.
    pub fn record_detection(&mut self, now: f64) {
        self.last_detection = Some(now);
        self.detection_count += 1;
    }

    /// Count a fire without moving the cooldown anchor.
    pub fn count_detection(&mut self) {
        self.detection_count += 1;
    }

    pub fn last_detection(&self) -> Option<f64> {
        self.last_detection
    }

    pub fn detection_count(&self) -> u32 {
        self.detection_count
    }
}

//! Speed module - score to gravity interval

use serde::{Deserialize, Serialize};

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS, LINES_PER_SPEED_STEP};

/// Linear speed-up curve with a floor
///
/// `interval = max(floor, base - (score / lines_per_step) * step)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub base_ms: u32,
    pub step_ms: u32,
    pub lines_per_step: u32,
    pub floor_ms: u32,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            base_ms: BASE_DROP_MS,
            step_ms: DROP_STEP_MS,
            lines_per_step: LINES_PER_SPEED_STEP,
            floor_ms: DROP_INTERVAL_FLOOR_MS,
        }
    }
}

impl SpeedCurve {
    /// Gravity interval in milliseconds for a score
    pub fn interval_ms(&self, score: u32) -> u32 {
        let steps = score / self.lines_per_step.max(1);
        self.base_ms
            .saturating_sub(steps.saturating_mul(self.step_ms))
            .max(self.floor_ms)
    }
}

//! Mirrors a light position and its UV coordinates in both directions.
//!
//! Editing one side recomputes the other. The reentrancy guard lives on the
//! tracker itself, never in process-wide state, so trackers stay independent
//! and usable from multiple threads without a shared lock.

use serde::{Deserialize, Serialize};

use super::uv::{UvCoords, Vec3, compute_light_position, compute_uv};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LightTracker {
    pub light_position: Vec3,
    pub uv: UvCoords,
    #[serde(skip)]
    sync_in_progress: bool,
}

impl LightTracker {
    pub fn new(light_position: Vec3) -> Self {
        Self {
            light_position,
            uv: compute_uv(light_position),
            sync_in_progress: false,
        }
    }

    /// Host callback: the light position channel changed.
    pub fn set_light_position(&mut self, position: Vec3) {
        self.light_position = position;
        if self.sync_in_progress {
            log::debug!("Light position echo suppressed");
            return;
        }
        self.sync_in_progress = true;
        self.uv = compute_uv(position);
        self.sync_in_progress = false;
    }

    /// Host callback: the UV coordinate channel changed.
    pub fn set_uv(&mut self, uv: UvCoords) {
        self.uv = uv;
        if self.sync_in_progress {
            log::debug!("UV echo suppressed");
            return;
        }
        self.sync_in_progress = true;
        self.light_position = compute_light_position(uv, self.light_position);
        self.sync_in_progress = false;
    }
}

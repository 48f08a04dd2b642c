//! Static pickups placed in the arena.

use glam::Vec3;

use crate::state::common::PickupId;

/// A healing orb. Collected (and removed) when the hero walks within the
/// configured pickup radius; healing clamps at the hero's maximum health.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupState {
    pub id: PickupId,
    pub position: Vec3,
    pub heal_amount: f32,
}

impl PickupState {
    pub const DEFAULT_HEAL: f32 = 15.0;

    pub fn new(id: PickupId, position: Vec3) -> Self {
        Self {
            id,
            position,
            heal_amount: Self::DEFAULT_HEAL,
        }
    }
}

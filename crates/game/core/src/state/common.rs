//! Identifier newtypes and time primitives shared across the state tree.

use std::fmt;

/// Unique identifier for any actor tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player-controlled hero.
    pub const HERO: Self = Self(0);
}

impl Default for EntityId {
    fn default() -> Self {
        Self::HERO
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier for a monster template in the encounter bestiary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateId(pub u16);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

/// Identifier for a spawner placed in the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerId(pub u16);

impl fmt::Display for SpawnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spawner#{}", self.0)
    }
}

/// Identifier for a pickup placed in the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupId(pub u16);

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pickup#{}", self.0)
    }
}

/// Continuous simulation time in seconds since the match started.
///
/// All ability gates (`can_cast_at`, `can_move_at`, cooldowns, buff expiry)
/// are stored as absolute `GameTime` deadlines and compared with
/// [`has_reached`](GameTime::has_reached), which treats the boundary instant
/// as already elapsed. Deadlines therefore fire on the first tick whose time
/// meets them, and re-running a tick with `dt = 0` observes the same answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameTime(pub f32);

impl GameTime {
    pub const ZERO: Self = Self(0.0);

    pub fn new(seconds: f32) -> Self {
        Self(seconds)
    }

    /// The instant `seconds` after this one.
    pub fn after(self, seconds: f32) -> Self {
        Self(self.0 + seconds)
    }

    /// Whether this instant is at or past `deadline`.
    pub fn has_reached(self, deadline: GameTime) -> bool {
        self.0 >= deadline.0
    }

    /// Seconds elapsed since `earlier` (negative if `earlier` is ahead).
    pub fn since(self, earlier: GameTime) -> f32 {
        self.0 - earlier.0
    }
}

impl fmt::Display for GameTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

/// One step of simulation time as handed to the engine by the host loop.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Absolute time at the end of this step.
    pub now: GameTime,
    /// Seconds covered by this step. A zero `dt` replays the same instant
    /// and must not change timestamp-gated state.
    pub dt: f32,
}

impl Frame {
    pub fn new(now: GameTime, dt: f32) -> Self {
        Self { now, dt }
    }
}

/// Continuous resource pool (health) tracked per actor.
///
/// `damage` and `heal` clamp so `0 <= current <= maximum` holds after every
/// mutation; negative amounts are ignored rather than inverted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: f32,
    pub maximum: f32,
}

impl ResourceMeter {
    /// A full meter.
    pub fn new(maximum: f32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn with_current(current: f32, maximum: f32) -> Self {
        Self {
            current: current.clamp(0.0, maximum),
            maximum,
        }
    }

    /// Remove up to `amount` from the pool and return what was actually
    /// removed.
    pub fn damage(&mut self, amount: f32) -> f32 {
        let applied = amount.max(0.0).min(self.current);
        self.current -= applied;
        applied
    }

    /// Add up to `amount` to the pool and return what was actually added.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let applied = amount.max(0.0).min(self.maximum - self.current);
        self.current += applied;
        applied
    }

    /// Fill level in `[0, 1]`, or zero for a degenerate meter.
    pub fn fraction(&self) -> f32 {
        if self.maximum > 0.0 {
            self.current / self.maximum
        } else {
            0.0
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.maximum
    }
}

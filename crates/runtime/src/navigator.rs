//! Host-side movement: the authority over positions and facing.
//!
//! The simulation core owns no transforms. It steers actors exclusively
//! through [`Directive`]s and reads poses back through the
//! [`SceneOracle`] trait, which [`Navigator`] implements. Integration is
//! a deliberately simple kinematic model on the ground plane: accelerate
//! toward the destination, snap on arrival, clamp to the arena bounds.

use std::collections::HashMap;

use glam::Vec3;

use obelisk_core::{Directive, EntityId, Pose, SceneOracle};

/// Acceleration used for ordinary travel, in units per second squared.
/// Dashes override it through [`Directive::SetSpeed`].
pub const DEFAULT_ACCELERATION: f32 = 8.0;

/// Distance under which an agent counts as arrived.
const ARRIVE_EPSILON: f32 = 0.05;

/// Which team an agent fights for. Hostility is strictly cross-side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Hero,
    Monster,
}

/// One steered body tracked by the navigator.
#[derive(Clone, Copy, Debug)]
pub struct NavAgent {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit-length facing on the ground plane.
    pub forward: Vec3,
    pub speed: f32,
    pub acceleration: f32,
    side: Side,
    alive: bool,
    base_speed: f32,
    destination: Option<Vec3>,
    face_target: Option<Vec3>,
}

impl NavAgent {
    fn new(position: Vec3, speed: f32, side: Side) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            forward: Vec3::Z,
            speed,
            acceleration: DEFAULT_ACCELERATION,
            side,
            alive: true,
            base_speed: speed,
            destination: None,
            face_target: None,
        }
    }

    /// Whether the agent still has travel left: a pending destination or
    /// residual velocity that has not decayed yet.
    pub fn is_moving(&self) -> bool {
        self.destination.is_some() || self.velocity != Vec3::ZERO
    }
}

/// Kinematic integrator for every actor in the arena.
pub struct Navigator {
    agents: HashMap<EntityId, NavAgent>,
    turning_speed: f32,
    half_extent: f32,
}

impl Navigator {
    pub fn new(turning_speed: f32, half_extent: f32) -> Self {
        Self {
            agents: HashMap::new(),
            turning_speed,
            half_extent,
        }
    }

    pub fn insert_hero(&mut self, position: Vec3, speed: f32) {
        let spot = clamp_to_arena(flatten(position), self.half_extent);
        self.agents
            .insert(EntityId::HERO, NavAgent::new(spot, speed, Side::Hero));
    }

    pub fn insert_monster(&mut self, id: EntityId, position: Vec3, speed: f32) {
        let spot = clamp_to_arena(flatten(position), self.half_extent);
        self.agents.insert(id, NavAgent::new(spot, speed, Side::Monster));
    }

    pub fn remove(&mut self, id: EntityId) {
        self.agents.remove(&id);
    }

    /// Freezes an agent in place. The corpse keeps its pose so effects can
    /// still anchor to it until the despawn lands.
    pub fn set_defeated(&mut self, id: EntityId) {
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.alive = false;
            agent.velocity = Vec3::ZERO;
            agent.destination = None;
        }
    }

    pub fn agent(&self, id: EntityId) -> Option<&NavAgent> {
        self.agents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Applies one movement directive from the tick output. Cues are not
    /// movement and are ignored here.
    pub fn apply(&mut self, directive: &Directive) {
        match directive {
            Directive::SetDestination { actor, point } => {
                let clamped = clamp_to_arena(flatten(*point), self.half_extent);
                if let Some(agent) = self.agents.get_mut(actor)
                    && agent.alive
                {
                    agent.destination = Some(clamped);
                }
            }
            Directive::StopMovement { actor } => {
                if let Some(agent) = self.agents.get_mut(actor) {
                    agent.destination = None;
                }
            }
            Directive::SetSpeed {
                actor,
                speed,
                acceleration,
            } => {
                if let Some(agent) = self.agents.get_mut(actor) {
                    agent.speed = *speed;
                    agent.acceleration = *acceleration;
                }
            }
            Directive::ResetSpeed { actor } => {
                if let Some(agent) = self.agents.get_mut(actor) {
                    agent.speed = agent.base_speed;
                    agent.acceleration = DEFAULT_ACCELERATION;
                }
            }
            Directive::FaceToward { actor, point } => {
                if let Some(agent) = self.agents.get_mut(actor) {
                    agent.face_target = Some(*point);
                }
            }
            Directive::Cue(_) => {}
        }
    }

    /// Integrates every living agent forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for agent in self.agents.values_mut() {
            if agent.alive {
                integrate(agent, self.turning_speed, self.half_extent, dt);
            }
        }
    }
}

fn integrate(agent: &mut NavAgent, turning_speed: f32, half_extent: f32, dt: f32) {
    let mut desired = Vec3::ZERO;
    if let Some(destination) = agent.destination {
        let to = flatten(destination - agent.position);
        let distance = to.length();
        // Snap inside one frame's travel so the agent never orbits the
        // destination at high tick rates.
        if distance <= ARRIVE_EPSILON.max(agent.speed * dt) {
            agent.position = destination;
            agent.velocity = Vec3::ZERO;
            agent.destination = None;
        } else {
            desired = to / distance * agent.speed;
        }
    }

    if agent.destination.is_some() || agent.velocity != Vec3::ZERO {
        agent.velocity = steer(agent.velocity, desired, agent.acceleration * dt);
        agent.position = clamp_to_arena(agent.position + agent.velocity * dt, half_extent);
    }

    // An explicit facing order wins over travel direction for one frame.
    let heading = agent
        .face_target
        .take()
        .map(|point| point - agent.position)
        .or_else(|| (agent.velocity.length_squared() > 1e-6).then_some(agent.velocity));
    if let Some(heading) = heading
        && let Some(direction) = flatten(heading).try_normalize()
    {
        let blend = (turning_speed * dt).clamp(0.0, 1.0);
        agent.forward = agent
            .forward
            .lerp(direction, blend)
            .try_normalize()
            .unwrap_or(direction);
    }
}

/// Ramp `current` toward `desired` by at most `max_delta`.
fn steer(current: Vec3, desired: Vec3, max_delta: f32) -> Vec3 {
    let delta = desired - current;
    let distance = delta.length();
    if distance <= max_delta || distance < 1e-6 {
        desired
    } else {
        current + delta * (max_delta / distance)
    }
}

fn clamp_to_arena(point: Vec3, half_extent: f32) -> Vec3 {
    Vec3::new(
        point.x.clamp(-half_extent, half_extent),
        point.y,
        point.z.clamp(-half_extent, half_extent),
    )
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

impl SceneOracle for Navigator {
    fn pose(&self, actor: EntityId) -> Option<Pose> {
        // Corpses linger on purpose: the despawn directive removes them.
        self.agents
            .get(&actor)
            .map(|agent| Pose::new(agent.position, agent.forward))
    }

    fn hostiles_within(&self, of: EntityId, center: Vec3, radius: f32) -> Vec<EntityId> {
        let Some(me) = self.agents.get(&of) else {
            return Vec::new();
        };
        let radius_sq = radius * radius;
        let mut ids: Vec<EntityId> = self
            .agents
            .iter()
            .filter(|(_, agent)| agent.alive && agent.side != me.side)
            .filter(|(_, agent)| agent.position.distance_squared(center) <= radius_sq)
            .map(|(id, _)| *id)
            .collect();
        // HashMap iteration order is arbitrary; damage is applied in the
        // returned order, so it has to be stable.
        ids.sort_unstable();
        ids
    }
}

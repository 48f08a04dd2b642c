//! Built-in encounters.
//!
//! [`reference`] is the tuning baseline the rest of the workspace tests
//! against; `data/encounter.ron` ships the same encounter in file form.

use glam::Vec3;

use obelisk_core::{
    AbilityKind, AbilityPayload, AbilityProfile, BuffPayload, CastProfile, CastTime, Cooldown,
    DodgePayload, StrikePayload,
};

use crate::spec::{
    ArenaSpec, EncounterSpec, HeroSpec, MonsterSpec, PickupSpec, RulesSpec, SpawnerSpec, StatsSpec,
};

/// The reference arena: one awake imp nest, one dormant mixed nest, thirty
/// kills to win.
pub fn reference() -> EncounterSpec {
    EncounterSpec {
        name: "ember_gate".into(),
        seed: 7,
        required_kills: 30,
        rules: RulesSpec::default(),
        arena: ArenaSpec { half_extent: 20.0 },
        hero: HeroSpec {
            spawn: Vec3::ZERO,
            stats: StatsSpec {
                max_health: 500.0,
                movement_speed: 3.5,
                attacks_per_second: 1.5,
                attack_range: 2.0,
                attack_damage: 10.0,
            },
            abilities: vec![cleave(), warcry(), roll()],
        },
        monsters: vec![imp(), hexer()],
        spawners: vec![
            SpawnerSpec {
                position: Vec3::new(12.0, 0.0, 8.0),
                pool: vec![0],
                ..SpawnerSpec::default()
            },
            SpawnerSpec {
                position: Vec3::new(-14.0, 0.0, -6.0),
                dormant: true,
                pool: vec![0, 1],
                ..SpawnerSpec::default()
            },
        ],
        pickups: vec![
            PickupSpec {
                position: Vec3::new(6.0, 0.0, -4.0),
                heal_amount: 15.0,
            },
            PickupSpec {
                position: Vec3::new(-8.0, 0.0, 10.0),
                heal_amount: 15.0,
            },
            PickupSpec {
                position: Vec3::new(0.0, 0.0, 14.0),
                heal_amount: 15.0,
            },
        ],
    }
}

/// Forward arc swing in front of the hero.
fn cleave() -> AbilityProfile {
    AbilityProfile {
        name: "cleave".into(),
        kind: AbilityKind::MeleeStrike,
        cast: CastProfile {
            cast_time: CastTime::FromAttackSpeed,
            activation_fraction: 0.4,
            movement_lockout: 0.2,
            cooldown: Cooldown::SharedAttack,
        },
        payload: AbilityPayload::Strike(StrikePayload {
            reach: 1.0,
            spread: 1.0,
        }),
    }
}

/// Double damage out, a fifth of the damage in, for ten seconds.
fn warcry() -> AbilityProfile {
    AbilityProfile {
        name: "warcry".into(),
        kind: AbilityKind::Buff,
        cast: CastProfile {
            cast_time: CastTime::Fixed(0.5),
            activation_fraction: 0.8,
            movement_lockout: 0.2,
            cooldown: Cooldown::Dedicated(30.0),
        },
        payload: AbilityPayload::Buff(BuffPayload {
            duration: 10.0,
            damage_multiplier: 2.0,
            damage_reduction: 0.2,
        }),
    }
}

/// Invulnerable dash. The short buffer lets a press land during the
/// cooldown tail.
fn roll() -> AbilityProfile {
    AbilityProfile {
        name: "roll".into(),
        kind: AbilityKind::Dodge,
        cast: CastProfile {
            cast_time: CastTime::Fixed(1.0),
            activation_fraction: 0.2,
            movement_lockout: 0.8,
            cooldown: Cooldown::Dedicated(1.5),
        },
        payload: AbilityPayload::Dodge(DodgePayload {
            speed: 7.0,
            acceleration: 15.0,
            length: 3.0,
            buffer_window: 0.1,
        }),
    }
}

/// Melee chaser. Zero reach keeps its swing centred on itself.
fn imp() -> MonsterSpec {
    MonsterSpec {
        name: "imp".into(),
        stats: StatsSpec {
            max_health: 40.0,
            movement_speed: 2.5,
            attacks_per_second: 1.0,
            attack_range: 2.0,
            attack_damage: 10.0,
        },
        abilities: vec![AbilityProfile {
            name: "claw".into(),
            kind: AbilityKind::MeleeStrike,
            cast: CastProfile {
                cast_time: CastTime::FromAttackSpeed,
                activation_fraction: 0.4,
                movement_lockout: 0.2,
                cooldown: Cooldown::SharedAttack,
            },
            payload: AbilityPayload::Strike(StrikePayload {
                reach: 0.0,
                spread: 1.0,
            }),
        }],
    }
}

/// Slow ranged caster; its bolt blasts a small area at the aim point.
fn hexer() -> MonsterSpec {
    MonsterSpec {
        name: "hexer".into(),
        stats: StatsSpec {
            max_health: 25.0,
            movement_speed: 2.0,
            attacks_per_second: 0.8,
            attack_range: 7.0,
            attack_damage: 8.0,
        },
        abilities: vec![AbilityProfile {
            name: "hex bolt".into(),
            kind: AbilityKind::RangedStrike,
            cast: CastProfile {
                cast_time: CastTime::FromAttackSpeed,
                activation_fraction: 0.8,
                movement_lockout: 0.2,
                cooldown: Cooldown::SharedAttack,
            },
            payload: AbilityPayload::Strike(StrikePayload {
                reach: 0.0,
                spread: 0.3,
            }),
        }],
    }
}

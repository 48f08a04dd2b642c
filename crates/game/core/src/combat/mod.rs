//! Damage intake and defeat handling.

mod damage;

pub(crate) use damage::apply_damage;

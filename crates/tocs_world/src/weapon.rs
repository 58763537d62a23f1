//! Weapon types and the per-node weapon state.

use std::sync::Arc;

use serde::Deserialize;

/// A kind of weapon offered by the equipment store, e.g. "AK-47".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeaponType {
    /// Display name, also used as the weapon node's identifier.
    pub name: String,
    /// Description given to weapon nodes of this type.
    pub description: String,
    /// Magazine capacity.
    pub capacity: u32,
    /// Rounds fired per shot.
    pub rate: u32,
    /// Damage dealt per round.
    pub damage: u32,
    /// Price in credits.
    pub price: u32,
}

/// Weapon capability of a node: its type and the rounds left in the magazine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponState {
    kind: Arc<WeaponType>,
    ammo: u32,
}

impl WeaponState {
    /// Creates an unloaded weapon of the given type.
    #[must_use]
    pub fn new(kind: Arc<WeaponType>) -> Self {
        Self { kind, ammo: 0 }
    }

    /// Creates a weapon with a full magazine.
    #[must_use]
    pub fn loaded(kind: Arc<WeaponType>) -> Self {
        let ammo = kind.capacity;
        Self { kind, ammo }
    }

    /// Returns the weapon type.
    #[must_use]
    pub fn kind(&self) -> &WeaponType {
        &self.kind
    }

    /// Returns the rounds left in the magazine.
    #[must_use]
    pub const fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Fires one shot and returns the damage dealt.
    ///
    /// A shot fires `rate` rounds, or whatever is left if the magazine
    /// holds fewer. Damage saturates at `u32::MAX`.
    pub fn fire(&mut self) -> u32 {
        let rounds = self.kind.rate.min(self.ammo);
        self.ammo -= rounds;
        rounds.saturating_mul(self.kind.damage)
    }

    /// Refills the magazine to capacity.
    pub fn reload(&mut self) {
        self.ammo = self.kind.capacity;
    }
}

//! Deterministic room-kind oracle.
//!
//! The oracle predicts the classification of any cell from the dungeon
//! seed, floor number, and coordinate alone, without a materialized grid.
//! It must agree with grid generation by construction: both sides derive
//! the kind from the same keyed hash, so a cell classified while carving
//! the grid and a cell predicted later from compressed history can never
//! disagree.
//!
//! # Determinism
//!
//! Same inputs always produce the same output. There is no internal
//! state, no call-order dependence, and no I/O, so implementations are
//! safe to share across threads.

use sha2::{Digest, Sha256};

use crate::state::{Position, RoomKind};

/// Oracle predicting the kind of a cell from seed, floor, and coordinate.
///
/// Implementations must be pure and total: any well-formed input yields a
/// kind, including coordinates far outside any real dungeon (bounds
/// belong to movement validation, not to classification).
pub trait RoomOracle: Send + Sync {
    fn room_kind(&self, seed: &str, floor: u32, position: Position) -> RoomKind;
}

// Probability bands over a 0..100 roll. The boundaries are a design
// constant shared with grid generation; changing them invalidates every
// previously generated dungeon.
const BOSS_BAND: u64 = 5;
const SHOP_BAND: u64 = 10;
const LOOT_BAND: u64 = 20;
const EVENT_BAND: u64 = 30;
const MONSTER_BAND: u64 = 50;
const TRAP_BAND: u64 = 70;

/// SHA-256 backed implementation of [`RoomOracle`].
///
/// Zero-sized and `Copy`: the original system kept a shared oracle
/// singleton, but with no internal state there is nothing to share.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashOracle;

impl HashOracle {
    /// Deterministic 64-bit hash of an arbitrary key string.
    ///
    /// SHA-256 of the UTF-8 bytes, first 8 bytes interpreted big-endian.
    /// Also used by the progress estimator so every seed-derived quantity
    /// flows through the same reduction.
    pub fn keyed_hash(key: &str) -> u64 {
        let digest = Sha256::digest(key.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(prefix)
    }

    /// The 0..100 roll backing a cell's classification.
    pub fn roll(seed: &str, floor: u32, position: Position) -> u8 {
        let key = format!("{seed}:{floor}:{}:{}", position.x, position.y);
        (Self::keyed_hash(&key) % 100) as u8
    }

    fn classify(roll: u64) -> RoomKind {
        match roll {
            r if r < BOSS_BAND => RoomKind::Boss,
            r if r < SHOP_BAND => RoomKind::Shop,
            r if r < LOOT_BAND => RoomKind::Loot,
            r if r < EVENT_BAND => RoomKind::Event,
            r if r < MONSTER_BAND => RoomKind::Monster,
            r if r < TRAP_BAND => RoomKind::Trap,
            _ => RoomKind::Empty,
        }
    }
}

impl RoomOracle for HashOracle {
    fn room_kind(&self, seed: &str, floor: u32, position: Position) -> RoomKind {
        Self::classify(Self::roll(seed, floor, position) as u64)
    }
}

//! Core game constants.

/// Maximum number of doors leading out of a single room
pub const MAX_NEIGHBORS: usize = 4;

/// Attack turns resolved per combat round, one random bit each
pub const COMBAT_ROUND_BITS: u32 = 16;

/// Smallest dungeon worth digging: an entrance plus a treasure room
pub const MIN_ROOMS: usize = 2;

/// Hit points a fresh player starts with
pub const PLAYER_START_HP: i32 = 20;

/// Damage a fresh player deals per landed attack
pub const PLAYER_START_DAMAGE: i32 = 5;

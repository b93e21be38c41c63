//! The dungeon: the room graph and its generation.

mod generation;
mod graph;

pub use generation::{assign_contents, generate};
pub use graph::{Dungeon, Room, RoomId};

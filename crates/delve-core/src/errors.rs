//! Error types for the game core.

use thiserror::Error;

use crate::consts::MAX_NEIGHBORS;
use crate::dungeon::RoomId;

/// Errors surfaced by session operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a dungeon needs at least 2 rooms, got {0}")]
    TooFewRooms(usize),

    #[error("no door leads from room {from} to room {target}")]
    NotAdjacent { from: RoomId, target: RoomId },
}

/// A structural invariant of the dungeon or session does not hold.
///
/// Checked after every restore, and under debug assertions right after
/// generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("room {0} is unreachable from the entrance")]
    Unreachable(RoomId),

    #[error("room {room} has {degree} doors, the limit is {MAX_NEIGHBORS}")]
    TooManyNeighbors { room: RoomId, degree: usize },

    #[error("room {room} has a door to nonexistent room {neighbor}")]
    NeighborOutOfBounds { room: RoomId, neighbor: RoomId },

    #[error("room {a} lists room {b} as a neighbor but not the other way round")]
    OneWayEdge { a: RoomId, b: RoomId },

    #[error("room {room} lists room {neighbor} more than once")]
    DuplicateNeighbor { room: RoomId, neighbor: RoomId },

    #[error("room {0} has a door to itself")]
    SelfEdge(RoomId),

    #[error("expected exactly one treasure room, found {0}")]
    TreasureCount(usize),

    #[error("the treasure cannot sit in the entrance room")]
    TreasureAtEntrance,

    #[error("visited room {0} still holds a monster or item")]
    StaleContent(RoomId),

    #[error("player is in room {room} but the dungeon only has {rooms} rooms")]
    PlayerOutOfBounds { room: RoomId, rooms: usize },
}

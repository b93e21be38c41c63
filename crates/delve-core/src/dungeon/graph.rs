//! The room graph.
//!
//! Rooms are stored densely, indexed by id. Edges live in per-room
//! neighbor lists that [`Dungeon::connect`] keeps symmetric.

use std::collections::VecDeque;
use std::fmt;

use crate::consts::MAX_NEIGHBORS;
use crate::content::{ContentKind, RoomContent};
use crate::errors::ValidationError;

/// Identity of a room: a dense index into the dungeon's room list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Index into [`Dungeon::rooms`]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single room: its doors, its payload, and whether the player has
/// already been here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    /// Adjacent room ids, in insertion order
    pub neighbors: Vec<RoomId>,
    pub content: RoomContent,
    pub visited: bool,
}

impl Room {
    fn new(id: RoomId) -> Self {
        Self {
            id,
            neighbors: Vec::new(),
            content: RoomContent::Empty,
            visited: false,
        }
    }
}

/// The dungeon: a connected graph of rooms with the entrance at room 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dungeon {
    pub rooms: Vec<Room>,
}

impl Dungeon {
    /// Allocate `room_count` rooms with no doors and empty content
    pub fn new(room_count: usize) -> Self {
        let rooms = (0..room_count)
            .map(|i| Room::new(RoomId(i as u32)))
            .collect();
        Self { rooms }
    }

    /// Number of rooms
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Add a door between `a` and `b`.
    ///
    /// Self-edges and doors that already exist are ignored rather than
    /// reported; generation leans on that policy.
    pub fn connect(&mut self, a: RoomId, b: RoomId) {
        debug_assert!(a.index() < self.rooms.len() && b.index() < self.rooms.len());
        if a == b || self.are_adjacent(a, b) {
            return;
        }
        self.rooms[a.index()].neighbors.push(b);
        self.rooms[b.index()].neighbors.push(a);
    }

    /// Whether a door connects `a` and `b`
    pub fn are_adjacent(&self, a: RoomId, b: RoomId) -> bool {
        self.rooms[a.index()].neighbors.contains(&b)
    }

    /// Number of doors out of `id`
    pub fn degree(&self, id: RoomId) -> usize {
        self.rooms[id.index()].neighbors.len()
    }

    /// Adjacent room ids, in insertion order
    pub fn neighbor_ids(&self, id: RoomId) -> &[RoomId] {
        &self.rooms[id.index()].neighbors
    }

    /// Check the structural invariants: neighbor ids in range, no self or
    /// duplicate edges, every edge symmetric, degree within bounds, and
    /// every room reachable from the entrance.
    pub fn validate_topology(&self) -> Result<(), ValidationError> {
        for room in &self.rooms {
            if room.neighbors.len() > MAX_NEIGHBORS {
                return Err(ValidationError::TooManyNeighbors {
                    room: room.id,
                    degree: room.neighbors.len(),
                });
            }
            for (i, &n) in room.neighbors.iter().enumerate() {
                if n.index() >= self.rooms.len() {
                    return Err(ValidationError::NeighborOutOfBounds {
                        room: room.id,
                        neighbor: n,
                    });
                }
                if n == room.id {
                    return Err(ValidationError::SelfEdge(room.id));
                }
                if room.neighbors[..i].contains(&n) {
                    return Err(ValidationError::DuplicateNeighbor {
                        room: room.id,
                        neighbor: n,
                    });
                }
                if !self.rooms[n.index()].neighbors.contains(&room.id) {
                    return Err(ValidationError::OneWayEdge { a: room.id, b: n });
                }
            }
        }
        if let Some(unreached) = self.first_unreachable() {
            return Err(ValidationError::Unreachable(unreached));
        }
        Ok(())
    }

    /// First room a breadth-first walk from the entrance cannot reach.
    /// Assumes neighbor ids are already known to be in range.
    fn first_unreachable(&self) -> Option<RoomId> {
        if self.rooms.is_empty() {
            return None;
        }
        let mut seen = vec![false; self.rooms.len()];
        seen[0] = true;
        let mut queue = VecDeque::from([RoomId(0)]);
        while let Some(id) = queue.pop_front() {
            for &n in &self.rooms[id.index()].neighbors {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    queue.push_back(n);
                }
            }
        }
        self.rooms.iter().find(|r| !seen[r.id.index()]).map(|r| r.id)
    }

    /// Check the content invariants: exactly one treasure, never in the
    /// entrance, and no visited room still holding a monster or item.
    pub fn validate_contents(&self) -> Result<(), ValidationError> {
        let mut treasures = 0usize;
        for room in &self.rooms {
            match room.content.kind() {
                ContentKind::Treasure => {
                    treasures += 1;
                    if room.id == RoomId(0) {
                        return Err(ValidationError::TreasureAtEntrance);
                    }
                }
                ContentKind::Monster | ContentKind::Item if room.visited => {
                    return Err(ValidationError::StaleContent(room.id));
                }
                _ => {}
            }
        }
        if treasures != 1 {
            return Err(ValidationError::TreasureCount(treasures));
        }
        Ok(())
    }

    /// All dungeon invariants
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_topology()?;
        self.validate_contents()
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{Monster, MonsterKind};

    use super::*;

    #[test]
    fn test_connect_is_symmetric() {
        let mut dungeon = Dungeon::new(3);
        dungeon.connect(RoomId(0), RoomId(2));
        assert!(dungeon.are_adjacent(RoomId(0), RoomId(2)));
        assert!(dungeon.are_adjacent(RoomId(2), RoomId(0)));
        assert_eq!(dungeon.degree(RoomId(0)), 1);
        assert_eq!(dungeon.degree(RoomId(2)), 1);
        assert_eq!(dungeon.degree(RoomId(1)), 0);
    }

    #[test]
    fn test_connect_ignores_self_and_duplicate_edges() {
        let mut dungeon = Dungeon::new(2);
        dungeon.connect(RoomId(1), RoomId(1));
        assert_eq!(dungeon.degree(RoomId(1)), 0);

        dungeon.connect(RoomId(0), RoomId(1));
        dungeon.connect(RoomId(0), RoomId(1));
        dungeon.connect(RoomId(1), RoomId(0));
        assert_eq!(dungeon.degree(RoomId(0)), 1);
        assert_eq!(dungeon.degree(RoomId(1)), 1);
    }

    #[test]
    fn test_neighbor_ids_keep_insertion_order() {
        let mut dungeon = Dungeon::new(4);
        dungeon.connect(RoomId(0), RoomId(2));
        dungeon.connect(RoomId(0), RoomId(1));
        dungeon.connect(RoomId(0), RoomId(3));
        assert_eq!(
            dungeon.neighbor_ids(RoomId(0)),
            &[RoomId(2), RoomId(1), RoomId(3)]
        );
    }

    #[test]
    fn test_validate_detects_unreachable_room() {
        let mut dungeon = Dungeon::new(4);
        dungeon.connect(RoomId(0), RoomId(1));
        dungeon.connect(RoomId(2), RoomId(3));
        assert_eq!(
            dungeon.validate_topology(),
            Err(ValidationError::Unreachable(RoomId(2)))
        );
    }

    #[test]
    fn test_validate_detects_degree_overflow() {
        let mut dungeon = Dungeon::new(6);
        for i in 1..6 {
            dungeon.connect(RoomId(0), RoomId(i));
        }
        assert_eq!(
            dungeon.validate_topology(),
            Err(ValidationError::TooManyNeighbors {
                room: RoomId(0),
                degree: 5,
            })
        );
    }

    #[test]
    fn test_validate_detects_one_way_edge() {
        let mut dungeon = Dungeon::new(2);
        dungeon.rooms[0].neighbors.push(RoomId(1));
        assert_eq!(
            dungeon.validate_topology(),
            Err(ValidationError::OneWayEdge {
                a: RoomId(0),
                b: RoomId(1),
            })
        );
    }

    #[test]
    fn test_validate_detects_out_of_range_neighbor() {
        let mut dungeon = Dungeon::new(2);
        dungeon.rooms[0].neighbors.push(RoomId(9));
        assert_eq!(
            dungeon.validate_topology(),
            Err(ValidationError::NeighborOutOfBounds {
                room: RoomId(0),
                neighbor: RoomId(9),
            })
        );
    }

    fn two_room_dungeon() -> Dungeon {
        let mut dungeon = Dungeon::new(2);
        dungeon.connect(RoomId(0), RoomId(1));
        dungeon.rooms[1].content = RoomContent::Treasure;
        dungeon
    }

    #[test]
    fn test_validate_contents_requires_one_treasure() {
        let mut dungeon = two_room_dungeon();
        assert_eq!(dungeon.validate(), Ok(()));

        dungeon.rooms[1].content = RoomContent::Empty;
        assert_eq!(
            dungeon.validate_contents(),
            Err(ValidationError::TreasureCount(0))
        );
    }

    #[test]
    fn test_validate_contents_rejects_treasure_at_entrance() {
        let mut dungeon = two_room_dungeon();
        dungeon.rooms[0].content = RoomContent::Treasure;
        assert_eq!(
            dungeon.validate_contents(),
            Err(ValidationError::TreasureAtEntrance)
        );
    }

    #[test]
    fn test_validate_contents_rejects_visited_monster_room() {
        let mut dungeon = two_room_dungeon();
        dungeon.rooms[0].content = RoomContent::Monster(Monster::spawn(MonsterKind::Goblin));
        dungeon.rooms[0].visited = true;
        assert_eq!(
            dungeon.validate_contents(),
            Err(ValidationError::StaleContent(RoomId(0)))
        );

        // an unvisited monster room is fine
        dungeon.rooms[0].visited = false;
        assert_eq!(dungeon.validate_contents(), Ok(()));
    }
}

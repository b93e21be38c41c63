//! Dungeon generation and content assignment.

use crate::consts::{MAX_NEIGHBORS, MIN_ROOMS};
use crate::content::{ItemKind, Monster, MonsterKind, RoomContent};
use crate::dungeon::{Dungeon, RoomId};
use crate::rng::GameRng;

/// Generate a connected dungeon of `room_count` rooms.
///
/// Every room i > 0 is first tied to an earlier room picked by one
/// uniform draw, which makes the graph connected by construction; a
/// draw that lands on a full room is walked forward to the next earlier
/// room with a free slot, so the degree bound holds during this pass
/// too. A second pass then sprinkles extra doors without pushing any
/// room past [`MAX_NEIGHBORS`].
pub fn generate(room_count: usize, rng: &mut GameRng) -> Dungeon {
    debug_assert!(room_count >= MIN_ROOMS);
    let mut dungeon = Dungeon::new(room_count);

    // spanning tree: room i gets a door to some room in [0, i); when
    // the drawn room has no slot left the edge goes to the next earlier
    // room that has one (the first i rooms carry 4i slots of which only
    // 2(i-1) are in use, so it exists)
    for i in 1..room_count {
        let mut j = rng.rn2(i as u32) as usize;
        while dungeon.degree(RoomId(j as u32)) >= MAX_NEIGHBORS {
            j = (j + 1) % i;
        }
        dungeon.connect(RoomId(i as u32), RoomId(j as u32));
    }

    // extra doors: up to one fewer than the free slots per room, each
    // candidate drawn uniformly and skipped when it lands on the room
    // itself, an existing neighbor, or a full room
    for i in 0..room_count {
        let id = RoomId(i as u32);
        let budget = MAX_NEIGHBORS.saturating_sub(dungeon.degree(id));
        let extras = rng.rn2(budget as u32);
        for _ in 0..extras {
            let candidate = RoomId(rng.rn2(room_count as u32));
            if candidate == id || dungeon.are_adjacent(id, candidate) {
                continue;
            }
            if dungeon.degree(id) >= MAX_NEIGHBORS || dungeon.degree(candidate) >= MAX_NEIGHBORS {
                continue;
            }
            dungeon.connect(id, candidate);
        }
    }

    dungeon
}

/// Decorate a freshly generated dungeon with content.
///
/// One room in [1, n) becomes the treasure room. Every other room except
/// the entrance draws empty, monster, or item with equal weight; the
/// entrance stays empty because the player starts there.
pub fn assign_contents(dungeon: &mut Dungeon, rng: &mut GameRng) {
    let n = dungeon.room_count();
    debug_assert!(n >= MIN_ROOMS);

    let treasure = RoomId(rng.rnd(n as u32 - 1));
    dungeon.rooms[treasure.index()].content = RoomContent::Treasure;

    for i in 1..n {
        if RoomId(i as u32) == treasure {
            continue;
        }
        dungeon.rooms[i].content = match rng.rn2(3) {
            0 => RoomContent::Empty,
            1 => {
                let kind = if rng.one_in(2) {
                    MonsterKind::Goblin
                } else {
                    MonsterKind::Troll
                };
                RoomContent::Monster(Monster::spawn(kind))
            }
            _ => {
                let kind = if rng.one_in(2) {
                    ItemKind::Potion
                } else {
                    ItemKind::Sword
                };
                RoomContent::Item(kind)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use crate::content::ContentKind;

    use super::*;

    #[test]
    fn test_scripted_spanning_tree() {
        // tree draws [0, 1, 0, 2], then zero extra doors per room
        let mut rng = GameRng::scripted([0, 1, 0, 2, 0, 0, 0, 0, 0]);
        let dungeon = generate(5, &mut rng);

        assert_eq!(dungeon.neighbor_ids(RoomId(0)), &[RoomId(1), RoomId(3)]);
        assert_eq!(dungeon.neighbor_ids(RoomId(1)), &[RoomId(0), RoomId(2)]);
        assert_eq!(dungeon.neighbor_ids(RoomId(2)), &[RoomId(1), RoomId(4)]);
        assert_eq!(dungeon.neighbor_ids(RoomId(3)), &[RoomId(0)]);
        assert_eq!(dungeon.neighbor_ids(RoomId(4)), &[RoomId(2)]);
        assert_eq!(dungeon.validate_topology(), Ok(()));
    }

    #[test]
    fn test_extra_door_pass_skips_bad_candidates() {
        let mut rng = GameRng::scripted([
            0, 0, 0, 0, // tree: rooms 1..=4 all hang off room 0, filling it
            // room 0 has no free slots, so no extras draw happens for it
            2, 0, 3, // room 1 asks for 2: room 0 already adjacent (skip), room 3 connects
            1, 2, // room 2 asks for 1: itself (skip)
            1, 1, // room 3 asks for 1: room 1 already adjacent (skip)
            0, // room 4 asks for 0
        ]);
        let dungeon = generate(5, &mut rng);

        // the lone extra door is 1-3
        assert!(dungeon.are_adjacent(RoomId(1), RoomId(3)));
        assert_eq!(dungeon.degree(RoomId(0)), 4);
        assert_eq!(dungeon.degree(RoomId(1)), 2);
        assert_eq!(dungeon.degree(RoomId(2)), 1);
        assert_eq!(dungeon.degree(RoomId(3)), 2);
        assert_eq!(dungeon.degree(RoomId(4)), 1);
        assert_eq!(dungeon.validate_topology(), Ok(()));
    }

    #[test]
    fn test_tree_pass_walks_draws_off_full_rooms() {
        // every draw lands on room 0; the first four tree edges fill
        // it, so room 5's draw walks forward and settles on room 1
        let mut rng = GameRng::scripted([0; 10]);
        let dungeon = generate(6, &mut rng);

        assert_eq!(
            dungeon.neighbor_ids(RoomId(0)),
            &[RoomId(1), RoomId(2), RoomId(3), RoomId(4)]
        );
        assert_eq!(dungeon.neighbor_ids(RoomId(5)), &[RoomId(1)]);
        assert_eq!(dungeon.validate_topology(), Ok(()));
    }

    #[test]
    fn test_extra_door_pass_skips_full_rooms() {
        let mut rng = GameRng::scripted([
            0, 0, 0, 0, 0, // tree: room 0 fills up, room 5 spills onto room 1
            1, 5, // room 1 asks for 1: room 5 already adjacent (skip)
            1, 2, // room 2 asks for 1: itself (skip)
            0, // room 3 asks for 0
            0, // room 4 asks for 0
            1, 0, // room 5 asks for 1: room 0 is full (skip)
        ]);
        let dungeon = generate(6, &mut rng);

        // none of the extra candidates made it in
        assert!(!dungeon.are_adjacent(RoomId(5), RoomId(0)));
        assert_eq!(dungeon.degree(RoomId(0)), 4);
        assert_eq!(dungeon.degree(RoomId(1)), 2);
        assert_eq!(dungeon.degree(RoomId(5)), 1);
        assert_eq!(dungeon.validate_topology(), Ok(()));
    }

    #[test]
    fn test_big_dungeons_respect_the_degree_bound() {
        for seed in 0..10 {
            let mut rng = GameRng::new(seed);
            let dungeon = generate(200, &mut rng);
            assert_eq!(dungeon.validate_topology(), Ok(()), "seed {seed}");
        }
    }

    #[test]
    fn test_generated_dungeons_validate() {
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let mut dungeon = generate(30, &mut rng);
            assign_contents(&mut dungeon, &mut rng);
            assert_eq!(dungeon.validate(), Ok(()), "seed {seed}");
        }
    }

    #[test]
    fn test_two_room_dungeon_puts_treasure_opposite_entrance() {
        for seed in 0..10 {
            let mut rng = GameRng::new(seed);
            let mut dungeon = generate(2, &mut rng);
            assign_contents(&mut dungeon, &mut rng);
            assert_eq!(dungeon.rooms[1].content, RoomContent::Treasure);
            assert_eq!(dungeon.rooms[0].content, RoomContent::Empty);
        }
    }

    #[test]
    fn test_scripted_content_assignment() {
        let mut dungeon = Dungeon::new(5);
        for i in 1..5 {
            dungeon.connect(RoomId(0), RoomId(i));
        }
        // treasure lands in room 4; rooms 1..=3 draw empty, goblin, sword
        let mut rng = GameRng::scripted([3, 0, 1, 0, 2, 1]);
        assign_contents(&mut dungeon, &mut rng);

        assert_eq!(dungeon.rooms[4].content, RoomContent::Treasure);
        assert_eq!(dungeon.rooms[1].content, RoomContent::Empty);
        assert_eq!(
            dungeon.rooms[2].content,
            RoomContent::Monster(Monster::spawn(MonsterKind::Goblin))
        );
        assert_eq!(dungeon.rooms[3].content, RoomContent::Item(ItemKind::Sword));
        assert_eq!(dungeon.rooms[0].content.kind(), ContentKind::Empty);
    }

    #[test]
    fn test_entrance_and_treasure_never_clash() {
        for seed in 0..50 {
            let mut rng = GameRng::new(seed);
            let mut dungeon = generate(10, &mut rng);
            assign_contents(&mut dungeon, &mut rng);
            let treasures: Vec<_> = dungeon
                .rooms
                .iter()
                .filter(|r| r.content.kind() == ContentKind::Treasure)
                .map(|r| r.id)
                .collect();
            assert_eq!(treasures.len(), 1);
            assert_ne!(treasures[0], RoomId(0));
        }
    }
}

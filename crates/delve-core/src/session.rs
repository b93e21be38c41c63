//! A game in progress, and the rules for entering rooms.

use crate::combat::{self, CombatOutcome};
use crate::consts::MIN_ROOMS;
use crate::content::{ContentKind, ItemKind, RoomContent};
use crate::dungeon::{Dungeon, RoomId, assign_contents, generate};
use crate::errors::{GameError, ValidationError};
use crate::player::Player;
use crate::rng::GameRng;

/// Result of driving the session one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// Keep playing
    Continue,
    /// The player reached the treasure
    PlayerWon,
    /// The player was killed; the string says how
    PlayerDied(String),
    /// The caller saved the game and is leaving
    SaveAndExit,
}

/// A caller-facing snapshot of the player's current room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub id: RoomId,
    /// Rooms behind this room's doors, in door order
    pub neighbors: Vec<RoomId>,
    /// What the room currently holds
    pub content: ContentKind,
}

/// A full game in progress: the dungeon, the player, and the RNG driving
/// every remaining random decision.
#[derive(Debug, Clone)]
pub struct Session {
    pub dungeon: Dungeon,
    pub player: Player,
    pub rng: GameRng,
    /// Narration lines not yet shown to the player
    pub messages: Vec<String>,
}

impl Session {
    /// Dig a fresh dungeon of `room_count` rooms and put the player in
    /// the entrance.
    pub fn new(room_count: usize, mut rng: GameRng) -> Result<Self, GameError> {
        if room_count < MIN_ROOMS {
            return Err(GameError::TooFewRooms(room_count));
        }
        let mut dungeon = generate(room_count, &mut rng);
        assign_contents(&mut dungeon, &mut rng);
        let session = Self {
            dungeon,
            player: Player::new(RoomId(0)),
            rng,
            messages: Vec::new(),
        };
        debug_assert_eq!(session.validate(), Ok(()));
        Ok(session)
    }

    /// Check the dungeon invariants plus the player's location.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.dungeon.validate()?;
        if self.player.room.index() >= self.dungeon.room_count() {
            return Err(ValidationError::PlayerOutOfBounds {
                room: self.player.room,
                rooms: self.dungeon.room_count(),
            });
        }
        Ok(())
    }

    /// Snapshot of the room the player is standing in
    pub fn current_room(&self) -> RoomView {
        let room = &self.dungeon.rooms[self.player.room.index()];
        RoomView {
            id: room.id,
            neighbors: room.neighbors.clone(),
            content: room.content.kind(),
        }
    }

    /// Walk through a door to `target`.
    ///
    /// Fails without side effects when no door connects the current room
    /// to `target`.
    pub fn choose_door(&mut self, target: RoomId) -> Result<(), GameError> {
        if target.index() >= self.dungeon.room_count()
            || !self.dungeon.are_adjacent(self.player.room, target)
        {
            return Err(GameError::NotAdjacent {
                from: self.player.room,
                target,
            });
        }
        self.player.room = target;
        Ok(())
    }

    /// Run the entry rules for the player's current room.
    ///
    /// The treasure room wins on the spot. An unvisited monster room
    /// resolves a full fight; an unvisited item room applies the item.
    /// Both leave the room empty and visited, so entering again does
    /// nothing more.
    pub fn enter_current_room(&mut self) -> TurnResult {
        let room = &mut self.dungeon.rooms[self.player.room.index()];
        match &mut room.content {
            RoomContent::Treasure => {
                self.messages.push("The treasure! You found it!".to_string());
                TurnResult::PlayerWon
            }
            _ if room.visited => {
                self.messages
                    .push("Nothing here but your own footprints.".to_string());
                TurnResult::Continue
            }
            RoomContent::Empty => {
                room.visited = true;
                self.messages.push("The room is empty.".to_string());
                TurnResult::Continue
            }
            RoomContent::Monster(monster) => {
                let name = monster.kind.name();
                self.messages.push(format!("A {name} lunges at you!"));
                match combat::fight(&mut self.player, monster, &mut self.rng) {
                    CombatOutcome::MonsterDied => {
                        room.content = RoomContent::Empty;
                        room.visited = true;
                        self.messages.push(format!("The {name} falls dead."));
                        TurnResult::Continue
                    }
                    CombatOutcome::PlayerDied => {
                        // the fight never finished, so the room keeps its monster
                        self.messages.push(format!("The {name} strikes you down."));
                        TurnResult::PlayerDied(format!("slain by a {name}"))
                    }
                }
            }
            RoomContent::Item(kind) => {
                let kind = *kind;
                room.content = RoomContent::Empty;
                room.visited = true;
                self.player.apply_item(kind);
                self.messages.push(match kind {
                    ItemKind::Potion => {
                        format!("You drink the potion and recover {} hp.", kind.hp_restore())
                    }
                    ItemKind::Sword => format!(
                        "You take the sword; your blows hit {} points harder.",
                        kind.damage_boost()
                    ),
                });
                TurnResult::Continue
            }
        }
    }

    /// Queue a narration line for the caller to print
    pub fn message(&mut self, text: impl Into<String>) {
        self.messages.push(text.into());
    }

    /// Drain the queued narration lines
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

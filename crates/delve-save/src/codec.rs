//! Binary session codec.
//!
//! A session body is a fixed-layout little-endian byte stream:
//!
//! ```text
//! room count: u32, player room: u32, player hp: i32, player damage: i32
//! then per room, in id order:
//!   visited: u8 (0 or 1)
//!   content tag: u8 (0 empty, 1 monster, 2 item, 3 treasure)
//!   monster payload: kind u8, hp i32, damage i32     (tag 1 only)
//!   item payload: kind u8                            (tag 2 only)
//!   door count: u32, neighbor ids: u32 each
//! ```
//!
//! Monster stats are stored verbatim; item effects are re-derived from
//! the kind on decode. Hp and damage fields must be strictly positive.
//! Neighbor lists are stored exactly as held in memory, insertion order
//! included, so a decoded dungeon is indistinguishable from the one
//! saved. Every read is bounds-checked and malformed input fails with a
//! [`FormatError`] instead of producing a half-built session.

use thiserror::Error;

use delve_core::content::{ContentKind, ItemKind, Monster, MonsterKind, RoomContent};
use delve_core::dungeon::{Dungeon, RoomId};
use delve_core::player::Player;
use delve_core::{GameRng, Session};

/// The byte stream does not describe a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("save data ends in the middle of {0}")]
    UnexpectedEof(&'static str),

    #[error("bad {field} tag {value:#04x}")]
    BadTag { field: &'static str, value: u8 },

    #[error("visited flag must be 0 or 1, got {0:#04x}")]
    BadFlag(u8),

    #[error("{field} must be positive, got {value}")]
    BadStat { field: &'static str, value: i32 },

    #[error("room id {id} out of range for a dungeon of {rooms} rooms")]
    RoomIdOutOfRange { id: u32, rooms: u32 },

    #[error("{0} trailing bytes after the last room")]
    TrailingBytes(usize),
}

/// Serialize a session body.
pub fn encode_session(session: &Session) -> Vec<u8> {
    let dungeon = &session.dungeon;
    let mut out = Vec::new();
    put_u32(&mut out, dungeon.room_count() as u32);
    put_u32(&mut out, session.player.room.0);
    put_i32(&mut out, session.player.hp);
    put_i32(&mut out, session.player.damage);
    for room in &dungeon.rooms {
        out.push(room.visited as u8);
        out.push(room.content.kind() as u8);
        match &room.content {
            RoomContent::Monster(monster) => {
                out.push(monster.kind as u8);
                put_i32(&mut out, monster.hp);
                put_i32(&mut out, monster.damage);
            }
            RoomContent::Item(kind) => out.push(*kind as u8),
            RoomContent::Empty | RoomContent::Treasure => {}
        }
        put_u32(&mut out, room.neighbors.len() as u32);
        for &n in &room.neighbors {
            put_u32(&mut out, n.0);
        }
    }
    out
}

/// Deserialize a session body.
///
/// The restored session gets a fresh entropy-seeded RNG; the random
/// stream is deliberately not part of the format. Only field-level
/// problems are reported here. Semantic invariants (connectivity,
/// treasure count and so on) are the caller's business, normally settled
/// by [`Session::validate`] via `load_game`.
pub fn decode_session(bytes: &[u8]) -> Result<Session, FormatError> {
    let mut r = Reader::new(bytes);

    let n = r.u32("room count")?;
    let player_room = r.u32("player room")?;
    if player_room >= n {
        return Err(FormatError::RoomIdOutOfRange {
            id: player_room,
            rooms: n,
        });
    }
    let player = Player {
        room: RoomId(player_room),
        hp: r.stat("player hp")?,
        damage: r.stat("player damage")?,
    };

    // an empty room still takes 6 bytes, so a corrupt count cannot make
    // us allocate more rooms than the stream could possibly describe
    if n as usize > r.remaining() / 6 {
        return Err(FormatError::UnexpectedEof("room list"));
    }
    let mut dungeon = Dungeon::new(n as usize);

    for i in 0..n as usize {
        let visited = match r.u8("visited flag")? {
            0 => false,
            1 => true,
            other => return Err(FormatError::BadFlag(other)),
        };

        let tag = r.u8("content tag")?;
        let kind = ContentKind::from_tag(tag).ok_or(FormatError::BadTag {
            field: "content",
            value: tag,
        })?;
        let content = match kind {
            ContentKind::Empty => RoomContent::Empty,
            ContentKind::Treasure => RoomContent::Treasure,
            ContentKind::Monster => {
                let mtag = r.u8("monster kind")?;
                let mkind = MonsterKind::from_tag(mtag).ok_or(FormatError::BadTag {
                    field: "monster",
                    value: mtag,
                })?;
                RoomContent::Monster(Monster {
                    kind: mkind,
                    hp: r.stat("monster hp")?,
                    damage: r.stat("monster damage")?,
                })
            }
            ContentKind::Item => {
                let itag = r.u8("item kind")?;
                let ikind = ItemKind::from_tag(itag).ok_or(FormatError::BadTag {
                    field: "item",
                    value: itag,
                })?;
                RoomContent::Item(ikind)
            }
        };

        let doors = r.u32("door count")?;
        if doors as usize > r.remaining() / 4 {
            return Err(FormatError::UnexpectedEof("neighbor list"));
        }
        let mut neighbors = Vec::with_capacity(doors as usize);
        for _ in 0..doors {
            let id = r.u32("neighbor id")?;
            if id >= n {
                return Err(FormatError::RoomIdOutOfRange { id, rooms: n });
            }
            neighbors.push(RoomId(id));
        }

        let room = &mut dungeon.rooms[i];
        room.visited = visited;
        room.content = content;
        room.neighbors = neighbors;
    }

    if r.remaining() > 0 {
        return Err(FormatError::TrailingBytes(r.remaining()));
    }

    Ok(Session {
        dungeon,
        player,
        rng: GameRng::from_entropy(),
        messages: Vec::new(),
    })
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// Cursor over the byte stream; every take checks the remaining length.
struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FormatError> {
        if self.buf.len() < len {
            return Err(FormatError::UnexpectedEof(field));
        }
        let (head, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(head)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, FormatError> {
        Ok(self.take(1, field)?[0])
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, FormatError> {
        let b = self.take(4, field)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self, field: &'static str) -> Result<i32, FormatError> {
        let b = self.take(4, field)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// An hp or damage field; anything below 1 is malformed.
    fn stat(&mut self, field: &'static str) -> Result<i32, FormatError> {
        let value = self.i32(field)?;
        if value < 1 {
            return Err(FormatError::BadStat { field, value });
        }
        Ok(value)
    }
}

//! Room contents: monsters, items, and the treasure.
//!
//! The numeric discriminants double as the on-disk tags, matching the
//! layout in `delve-save`.

use strum::{Display, EnumIter};

/// Content discriminant, also the on-disk content tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum ContentKind {
    #[default]
    Empty = 0,
    Monster = 1,
    Item = 2,
    Treasure = 3,
}

impl ContentKind {
    /// Decode an on-disk content tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Empty),
            1 => Some(Self::Monster),
            2 => Some(Self::Item),
            3 => Some(Self::Treasure),
            _ => None,
        }
    }
}

/// Monster species, with fixed base stats per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum MonsterKind {
    Goblin = 0,
    Troll = 1,
}

impl MonsterKind {
    /// Lowercase name for messages
    pub const fn name(&self) -> &'static str {
        match self {
            MonsterKind::Goblin => "goblin",
            MonsterKind::Troll => "troll",
        }
    }

    /// Hit points a freshly spawned monster of this kind has
    pub const fn base_hp(&self) -> i32 {
        match self {
            MonsterKind::Goblin => 8,
            MonsterKind::Troll => 12,
        }
    }

    /// Damage dealt per landed attack
    pub const fn base_damage(&self) -> i32 {
        match self {
            MonsterKind::Goblin => 5,
            MonsterKind::Troll => 3,
        }
    }

    /// Decode an on-disk monster tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Goblin),
            1 => Some(Self::Troll),
            _ => None,
        }
    }
}

/// Item kinds, each with a fixed effect applied on pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[repr(u8)]
pub enum ItemKind {
    Potion = 0,
    Sword = 1,
}

impl ItemKind {
    /// Lowercase name for messages
    pub const fn name(&self) -> &'static str {
        match self {
            ItemKind::Potion => "potion",
            ItemKind::Sword => "sword",
        }
    }

    /// Hit points restored on pickup
    pub const fn hp_restore(&self) -> i32 {
        match self {
            ItemKind::Potion => 10,
            ItemKind::Sword => 0,
        }
    }

    /// Permanent damage boost granted on pickup
    pub const fn damage_boost(&self) -> i32 {
        match self {
            ItemKind::Potion => 0,
            ItemKind::Sword => 2,
        }
    }

    /// Decode an on-disk item tag
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Potion),
            1 => Some(Self::Sword),
            _ => None,
        }
    }
}

/// A monster encounter instance.
///
/// `hp` falls during combat; `damage` is fixed for the encounter, copied
/// from the kind's base stats at spawn time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monster {
    pub kind: MonsterKind,
    pub hp: i32,
    pub damage: i32,
}

impl Monster {
    /// Spawn a monster with its kind's base stats
    pub fn spawn(kind: MonsterKind) -> Self {
        Self {
            kind,
            hp: kind.base_hp(),
            damage: kind.base_damage(),
        }
    }
}

/// What a room holds.
///
/// Consuming the content, by killing the monster or taking the item,
/// replaces it with `Empty` permanently.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomContent {
    #[default]
    Empty,
    Monster(Monster),
    Item(ItemKind),
    Treasure,
}

impl RoomContent {
    /// The discriminant, as shown to callers and written to saves
    pub const fn kind(&self) -> ContentKind {
        match self {
            RoomContent::Empty => ContentKind::Empty,
            RoomContent::Monster(_) => ContentKind::Monster,
            RoomContent::Item(_) => ContentKind::Item,
            RoomContent::Treasure => ContentKind::Treasure,
        }
    }
}

//! The player.

use crate::consts::{PLAYER_START_DAMAGE, PLAYER_START_HP};
use crate::content::ItemKind;
use crate::dungeon::RoomId;

/// The adventurer walking the dungeon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Room the player is standing in
    pub room: RoomId,
    /// Current hit points; the game ends when this drops to 0 or below
    pub hp: i32,
    /// Damage dealt per landed attack
    pub damage: i32,
}

impl Player {
    /// A fresh player standing in `room` with starting stats
    pub fn new(room: RoomId) -> Self {
        Self {
            room,
            hp: PLAYER_START_HP,
            damage: PLAYER_START_DAMAGE,
        }
    }

    /// Apply an item's effect on pickup
    pub fn apply_item(&mut self, kind: ItemKind) {
        self.hp += kind.hp_restore();
        self.damage += kind.damage_boost();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_stats() {
        let player = Player::new(RoomId(0));
        assert_eq!(player.hp, PLAYER_START_HP);
        assert_eq!(player.damage, PLAYER_START_DAMAGE);
        assert_eq!(player.room, RoomId(0));
    }

    #[test]
    fn test_apply_potion() {
        let mut player = Player::new(RoomId(0));
        player.hp = 7;
        player.apply_item(ItemKind::Potion);
        assert_eq!(player.hp, 17);
        assert_eq!(player.damage, PLAYER_START_DAMAGE);
    }

    #[test]
    fn test_apply_sword() {
        let mut player = Player::new(RoomId(0));
        player.apply_item(ItemKind::Sword);
        assert_eq!(player.hp, PLAYER_START_HP);
        assert_eq!(player.damage, PLAYER_START_DAMAGE + 2);
    }
}

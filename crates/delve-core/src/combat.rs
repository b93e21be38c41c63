//! Combat resolution.
//!
//! A fight is a sequence of rounds. Each round draws 16 random bits and
//! walks them from bit 0 upward: a set bit is a player attack, a clear
//! bit a monster attack. The fight stops the moment either side's hit
//! points reach 0 or less, mid-round included.

use crate::consts::COMBAT_ROUND_BITS;
use crate::content::Monster;
use crate::player::Player;
use crate::rng::GameRng;

/// How a fight ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The monster died; control returns to the room
    MonsterDied,
    /// The player died; the session is over
    PlayerDied,
}

/// Fight `monster` until one side dies.
///
/// Hit points may go negative on the final blow; only the sign matters.
/// The result is reproducible for a given RNG state.
pub fn fight(player: &mut Player, monster: &mut Monster, rng: &mut GameRng) -> CombatOutcome {
    loop {
        let round = rng.next_u16();
        for turn in 0..COMBAT_ROUND_BITS {
            if (round >> turn) & 1 == 1 {
                monster.hp -= player.damage;
                if monster.hp <= 0 {
                    return CombatOutcome::MonsterDied;
                }
            } else {
                player.hp -= monster.damage;
                if player.hp <= 0 {
                    return CombatOutcome::PlayerDied;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::content::MonsterKind;
    use crate::dungeon::RoomId;

    use super::*;

    #[test]
    fn test_alternating_round_against_goblin() {
        // bits 0101: monster, player, monster, player... the goblin takes
        // 5 on turns 0 and 2 and dies; the player eats one hit in between
        let mut player = Player::new(RoomId(0));
        let mut monster = Monster::spawn(MonsterKind::Goblin);
        let mut rng = GameRng::scripted([0b0101]);

        let outcome = fight(&mut player, &mut monster, &mut rng);

        assert_eq!(outcome, CombatOutcome::MonsterDied);
        assert_eq!(player.hp, 15);
        assert_eq!(monster.hp, -2);
    }

    #[test]
    fn test_all_zero_bits_kill_the_player() {
        let mut player = Player::new(RoomId(0));
        let mut monster = Monster::spawn(MonsterKind::Troll);
        let mut rng = GameRng::scripted([0]);

        let outcome = fight(&mut player, &mut monster, &mut rng);

        assert_eq!(outcome, CombatOutcome::PlayerDied);
        // 20 hp, 3 damage per hit: the seventh hit lands the killing blow
        assert_eq!(player.hp, -1);
        assert_eq!(monster.hp, 12);
    }

    #[test]
    fn test_fight_spans_multiple_rounds() {
        let mut player = Player::new(RoomId(0));
        player.damage = 1;
        let mut monster = Monster {
            kind: MonsterKind::Goblin,
            hp: 40,
            damage: 1,
        };
        // three all-ones rounds: 16 + 16 + 8 player hits
        let mut rng = GameRng::scripted([0xFFFF, 0xFFFF, 0xFFFF]);

        let outcome = fight(&mut player, &mut monster, &mut rng);

        assert_eq!(outcome, CombatOutcome::MonsterDied);
        assert_eq!(player.hp, 20);
        assert_eq!(monster.hp, 0);
    }

    #[test]
    fn test_seeded_fights_terminate() {
        for seed in 0..50 {
            let mut player = Player::new(RoomId(0));
            let mut monster = Monster::spawn(MonsterKind::Troll);
            let mut rng = GameRng::new(seed);
            let outcome = fight(&mut player, &mut monster, &mut rng);
            match outcome {
                CombatOutcome::MonsterDied => assert!(monster.hp <= 0),
                CombatOutcome::PlayerDied => assert!(player.hp <= 0),
            }
        }
    }
}

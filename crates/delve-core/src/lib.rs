//! delve-core: game logic for the Delve dungeon crawler.
//!
//! A [`Session`] owns a procedurally generated room graph, the player
//! walking it, and the RNG behind every remaining random decision. This
//! crate holds all of the game rules and none of the I/O; persistence
//! lives in `delve-save` and the terminal front end in `delve`.

pub mod combat;
pub mod content;
pub mod dungeon;
pub mod errors;
pub mod player;

mod consts;
mod rng;
mod session;

pub use consts::*;
pub use rng::GameRng;
pub use session::{RoomView, Session, TurnResult};

//! Turn-based maze chase: one player, four ghosts, pellets and power items
//! on a fixed 21x21 board, played in the terminal.

pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod player;
pub mod render;

pub use game::{run_session, Command, Game, Snapshot, Termination, TurnEvent, TurnOutcome};

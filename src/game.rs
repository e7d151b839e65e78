//! Turn sequencing, collision resolution and the read-only frame snapshot.
//!
//! One turn runs, in order:
//!   1. player move + pickup
//!   2. contact check (before ghosts move)
//!   3. ghost movement, skipped on odd power ticks
//!   4. contact check (after ghosts move)
//!   5. pen release schedule
//!   6. power countdown

use rand::Rng;
use tracing::{debug, info};

use crate::components::{Dir, Facing, Ghost, GhostFace, Player, Pos, ScorePopup};
use crate::error::Result;
use crate::ghost::{spawn_ghosts, GHOST_COUNT};
use crate::level::Maze;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_SCORE: u32 = 50;
pub const POWER_TICKS: u32 = 30;
pub const BONUS_BASE: u32 = 200;
pub const RELEASE_INTERVAL: u32 = 20;

const PLAYER_START: Pos = Pos::new(15, 10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// An unpowered ghost reached the player.
    Caught,
    Quit,
}

/// Things that happened during one turn, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnEvent {
    MoveBlocked { dir: Dir },
    PelletEaten { pos: Pos },
    PowerEaten { pos: Pos },
    GhostCaptured { ghost: usize, pos: Pos, bonus: u32 },
    GhostReleased { ghost: usize, pos: Pos },
    PowerExpired,
    PlayerCaught { ghost: usize, pos: Pos },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub events: Vec<TurnEvent>,
    pub termination: Option<Termination>,
}

pub struct Game {
    pub(crate) maze: Maze,
    pub(crate) player: Player,
    pub(crate) ghosts: [Ghost; GHOST_COUNT],
    pub(crate) score: u32,
    pub(crate) power_timer: u32,
    pub(crate) ghost_bonus: u32,
    pub(crate) release_clock: u32,
    pub(crate) popup: Option<ScorePopup>,
    pub(crate) turn: u32,
    pub(crate) termination: Option<Termination>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            maze: Maze::new(),
            player: Player {
                pos: PLAYER_START,
                facing: Facing::Neutral,
            },
            ghosts: spawn_ghosts(),
            score: 0,
            power_timer: 0,
            ghost_bonus: BONUS_BASE,
            release_clock: 1,
            popup: None,
            turn: 0,
            termination: None,
        }
    }

    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.termination.is_some()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_consumables(&self) -> usize {
        self.maze.remaining()
    }

    /// Advances one turn. A terminated game ignores further commands.
    pub fn step(&mut self, command: Command, rng: &mut impl Rng) -> TurnOutcome {
        let mut events = Vec::new();
        if self.termination.is_some() {
            return TurnOutcome {
                events,
                termination: self.termination,
            };
        }
        self.popup = None;

        let dir = match command {
            Command::Quit => {
                info!(score = self.score, turn = self.turn, "quit");
                self.termination = Some(Termination::Quit);
                return TurnOutcome {
                    events,
                    termination: self.termination,
                };
            }
            Command::Move(dir) => dir,
        };

        self.turn += 1;
        debug!(turn = self.turn, ?dir, power = self.power_timer, "turn start");

        if self.try_move_player(dir) {
            self.consume_tile(&mut events);
        } else {
            events.push(TurnEvent::MoveBlocked { dir });
        }

        if !self.resolve_contacts(&mut events) {
            self.update_ghosts(rng);
            if !self.resolve_contacts(&mut events) {
                self.release_ghosts(&mut events);
                self.tick_power_timer(&mut events);
                self.release_clock += 1;
            }
        }

        TurnOutcome {
            events,
            termination: self.termination,
        }
    }

    /// Resolves every ghost sharing the player's cell. Returns true when
    /// the run ended.
    pub(crate) fn resolve_contacts(&mut self, events: &mut Vec<TurnEvent>) -> bool {
        let pos = self.player.pos;
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].pos != pos {
                continue;
            }
            if self.power_timer == 0 {
                self.ghosts[idx].face = GhostFace::Caught;
                self.termination = Some(Termination::Caught);
                info!(ghost = idx, ?pos, score = self.score, "player caught");
                events.push(TurnEvent::PlayerCaught { ghost: idx, pos });
                return true;
            }
            self.capture_ghost(idx, events);
        }
        false
    }

    fn capture_ghost(&mut self, idx: usize, events: &mut Vec<TurnEvent>) {
        let pos = self.player.pos;
        let bonus = self.ghost_bonus;
        self.score += bonus;
        self.popup = Some(ScorePopup { pos, amount: bonus });
        self.ghost_bonus = self.ghost_bonus.saturating_mul(2);
        self.release_clock = 1;
        self.send_to_pen(idx);
        info!(ghost = idx, ?pos, bonus, score = self.score, "ghost captured");
        events.push(TurnEvent::GhostCaptured {
            ghost: idx,
            pos,
            bonus,
        });
    }

    fn tick_power_timer(&mut self, events: &mut Vec<TurnEvent>) {
        if self.power_timer > 0 {
            self.power_timer -= 1;
            if self.power_timer == 0 {
                info!("power mode expired");
                events.push(TurnEvent::PowerExpired);
            }
        }
        if self.power_timer == 0 {
            self.ghost_bonus = BONUS_BASE;
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: self.player,
            ghosts: &self.ghosts,
            score: self.score,
            power_timer: self.power_timer,
            popup: self.popup,
            turn: self.turn,
            termination: self.termination,
        }
    }
}

/// Everything a frame needs, borrowed from the game for one render.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: Player,
    pub ghosts: &'a [Ghost; GHOST_COUNT],
    pub score: u32,
    pub power_timer: u32,
    pub popup: Option<ScorePopup>,
    pub turn: u32,
    pub termination: Option<Termination>,
}

impl Snapshot<'_> {
    /// Ghosts can be captured instead of catching the player.
    pub fn vulnerable(&self) -> bool {
        self.power_timer > 0
    }

    pub fn remaining(&self) -> usize {
        self.maze.remaining()
    }
}

/// Yields one already-validated command per turn.
pub trait CommandSource {
    fn next_command(&mut self) -> Result<Command>;
}

/// Receives one snapshot per turn. Must not hold on to it.
pub trait FrameSink {
    fn frame(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}

/// Pulls commands and pushes frames until the game terminates.
/// The final frame after a loss shows the catching ghost; quitting
/// draws nothing further.
pub fn run_session(
    game: &mut Game,
    source: &mut impl CommandSource,
    sink: &mut impl FrameSink,
    rng: &mut impl Rng,
) -> Result<Termination> {
    sink.frame(&game.snapshot())?;
    loop {
        let command = source.next_command()?;
        let outcome = game.step(command, rng);
        match outcome.termination {
            Some(Termination::Quit) => return Ok(Termination::Quit),
            Some(Termination::Caught) => {
                sink.frame(&game.snapshot())?;
                return Ok(Termination::Caught);
            }
            None => sink.frame(&game.snapshot())?,
        }
    }
}

use tracing::{debug, info};

use crate::components::{Dir, Pos};
use crate::game::{Game, TurnEvent, BONUS_BASE, PELLET_SCORE, POWER_SCORE, POWER_TICKS};
use crate::level::{Maze, Pickup, GRID_H, GRID_W};

/// One cell in `dir`, wrapping columns 0 and 20 onto each other.
/// Returns `None` when a vertical step would leave the grid.
pub fn step_wrapped(pos: Pos, dir: Dir) -> Option<Pos> {
    match dir {
        Dir::Left if pos.x == 0 => Some(Pos { x: GRID_W - 1, ..pos }),
        Dir::Right if pos.x == GRID_W - 1 => Some(Pos { x: 0, ..pos }),
        _ => {
            let (dx, dy) = dir.delta();
            let x = pos.x.checked_add_signed(dx)?;
            let y = pos.y.checked_add_signed(dy)?;
            if y >= GRID_H {
                return None;
            }
            Some(Pos { x, y })
        }
    }
}

/// Destination of a step from `pos`, if it is not a wall.
pub fn open_step(maze: &Maze, pos: Pos, dir: Dir) -> Option<Pos> {
    step_wrapped(pos, dir).filter(|next| !maze.is_wall(next.y, next.x))
}

impl Game {
    /// Moves the player one cell if the target is open. A rejected move
    /// leaves position and facing untouched.
    pub fn try_move_player(&mut self, dir: Dir) -> bool {
        match open_step(&self.maze, self.player.pos, dir) {
            Some(next) => {
                self.player.pos = next;
                self.player.facing = dir.into();
                true
            }
            None => {
                debug!(?dir, pos = ?self.player.pos, "player move blocked");
                false
            }
        }
    }

    pub(crate) fn consume_tile(&mut self, events: &mut Vec<TurnEvent>) {
        let pos = self.player.pos;
        match self.maze.consume(pos) {
            Some(Pickup::Pellet) => {
                self.score += PELLET_SCORE;
                events.push(TurnEvent::PelletEaten { pos });
            }
            Some(Pickup::Power) => {
                self.score += POWER_SCORE;
                self.power_timer = POWER_TICKS;
                self.ghost_bonus = BONUS_BASE;
                self.release_clock = 1;
                info!(?pos, score = self.score, "power mode activated");
                events.push(TurnEvent::PowerEaten { pos });
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Facing;
    use crate::level::{Tile, PEN};

    #[test]
    fn wraps_on_corridor_row() {
        let maze = Maze::new();
        let west = Pos::new(PEN.row, 0);
        let east = Pos::new(PEN.row, GRID_W - 1);
        assert_eq!(open_step(&maze, west, Dir::Left), Some(east));
        assert_eq!(open_step(&maze, east, Dir::Right), Some(west));
    }

    #[test]
    fn vertical_steps_do_not_leave_the_grid() {
        assert_eq!(step_wrapped(Pos::new(0, 5), Dir::Up), None);
        assert_eq!(step_wrapped(Pos::new(GRID_H - 1, 5), Dir::Down), None);
        assert_eq!(step_wrapped(Pos::new(3, 5), Dir::Up), Some(Pos::new(2, 5)));
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut game = Game::new();
        let start = game.player.pos;
        // Row 16 below the start cell is a wall.
        assert!(!game.try_move_player(Dir::Down));
        assert_eq!(game.player.pos, start);
        assert_eq!(game.player.facing, Facing::Neutral);
    }

    #[test]
    fn accepted_move_updates_facing() {
        let mut game = Game::new();
        assert!(game.try_move_player(Dir::Left));
        assert_eq!(game.player.pos, Pos::new(15, 9));
        assert_eq!(game.player.facing, Facing::Left);
    }

    #[test]
    fn pellet_scores_once() {
        let mut game = Game::new();
        let mut events = Vec::new();
        game.try_move_player(Dir::Left);
        game.consume_tile(&mut events);
        game.consume_tile(&mut events);
        assert_eq!(game.score, PELLET_SCORE);
        assert_eq!(events.len(), 1);
        assert_eq!(game.maze.tile(game.player.pos), Tile::Consumed);
    }

    #[test]
    fn power_item_resets_timers() {
        let mut game = Game::new();
        game.player.pos = Pos::new(15, 2);
        game.power_timer = 3;
        game.ghost_bonus = 800;
        game.release_clock = 17;
        let mut events = Vec::new();
        game.consume_tile(&mut events);
        assert_eq!(game.score, POWER_SCORE);
        assert_eq!(game.power_timer, POWER_TICKS);
        assert_eq!(game.ghost_bonus, BONUS_BASE);
        assert_eq!(game.release_clock, 1);
        assert_eq!(events, vec![TurnEvent::PowerEaten { pos: Pos::new(15, 2) }]);
    }
}

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::components::{Dir, Ghost, GhostColor, GhostFace, Pos};
use crate::game::{Game, TurnEvent, RELEASE_INTERVAL};
use crate::level::{Maze, PenBounds, PEN};
use crate::player::open_step;

pub const GHOST_COUNT: usize = 4;

const GHOST_STARTS: [Pos; GHOST_COUNT] = [
    Pos::new(7, 10),
    Pos::new(9, 9),
    Pos::new(9, 10),
    Pos::new(9, 11),
];

pub fn spawn_ghosts() -> [Ghost; GHOST_COUNT] {
    std::array::from_fn(|i| Ghost::new(GHOST_STARTS[i], GhostColor::ALL[i]))
}

pub fn in_pen(ghost: &Ghost) -> bool {
    PEN.contains(ghost.pos)
}

/// Non-wall neighbours of `pos`, in scan order.
pub fn open_dirs(maze: &Maze, pos: Pos) -> Vec<Dir> {
    Dir::ALL
        .into_iter()
        .filter(|dir| open_step(maze, pos, *dir).is_some())
        .collect()
}

/// Corridors and dead ends follow straight, clockwise, counter-clockwise,
/// then reverse. Intersections pick uniformly among the open exits other
/// than the way back.
pub fn ghost_next_dir(maze: &Maze, ghost: &Ghost, rng: &mut impl Rng) -> Option<Dir> {
    let open = open_dirs(maze, ghost.pos);
    let heading = ghost.direction;
    if open.len() < 3 {
        [
            heading,
            heading.clockwise(),
            heading.counter_clockwise(),
            heading.reverse(),
        ]
        .into_iter()
        .find(|dir| open.contains(dir))
    } else {
        let back = heading.reverse();
        let options: Vec<Dir> = open.into_iter().filter(|dir| *dir != back).collect();
        options.choose(rng).copied()
    }
}

/// First free pen cell from the left, or the exit cell when all are taken.
pub fn pen_slot(ghosts: &[Ghost], pen: &PenBounds) -> Pos {
    pen.cells()
        .find(|cell| !ghosts.iter().any(|g| g.pos == *cell))
        .unwrap_or(pen.exit)
}

impl Game {
    /// Moves every ghost outside the pen one cell. Nobody moves on odd
    /// power ticks, which halves speed while power mode is active.
    pub(crate) fn update_ghosts(&mut self, rng: &mut impl Rng) {
        if self.power_timer % 2 == 1 {
            return;
        }
        for idx in 0..self.ghosts.len() {
            let ghost = &self.ghosts[idx];
            if in_pen(ghost) {
                continue;
            }
            let Some(dir) = ghost_next_dir(&self.maze, ghost, rng) else {
                warn!(%ghost, "ghost has no open neighbour");
                continue;
            };
            let Some(next) = open_step(&self.maze, ghost.pos, dir) else {
                continue;
            };
            let ghost = &mut self.ghosts[idx];
            ghost.pos = next;
            ghost.set_direction(dir);
            debug!(%ghost, "ghost moved");
        }
    }

    /// Returns a captured ghost to the pen with its entry heading.
    pub(crate) fn send_to_pen(&mut self, idx: usize) {
        let slot = pen_slot(&self.ghosts, &PEN);
        let ghost = &mut self.ghosts[idx];
        ghost.pos = slot;
        ghost.direction = Dir::Left;
        ghost.face = GhostFace::Left;
    }

    /// Every `RELEASE_INTERVAL` turns the first penned ghost steps out to
    /// the exit row.
    pub(crate) fn release_ghosts(&mut self, events: &mut Vec<TurnEvent>) {
        if self.release_clock % RELEASE_INTERVAL != 0 {
            return;
        }
        if let Some(idx) = self.ghosts.iter().position(in_pen) {
            let ghost = &mut self.ghosts[idx];
            ghost.pos.y = PEN.exit_row;
            info!(%ghost, "ghost released");
            events.push(TurnEvent::GhostReleased {
                ghost: idx,
                pos: ghost.pos,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ghost_at(y: usize, x: usize, direction: Dir) -> Ghost {
        let mut g = Ghost::new(Pos::new(y, x), GhostColor::Red);
        g.direction = direction;
        g
    }

    #[test]
    fn spawn_positions_and_colors() {
        let ghosts = spawn_ghosts();
        assert_eq!(ghosts[0].pos, Pos::new(7, 10));
        assert_eq!(ghosts[3].pos, Pos::new(9, 11));
        assert_eq!(ghosts[2].color, GhostColor::Magenta);
        assert!(!in_pen(&ghosts[0]));
        assert!(ghosts[1..].iter().all(in_pen));
        assert!(ghosts.iter().all(|g| g.direction == Dir::Left));
    }

    #[test]
    fn corridor_goes_straight() {
        let maze = Maze::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Above the pen, column 11 also opens upward; column 12 does not.
        let g = ghost_at(7, 11, Dir::Left);
        assert_eq!(open_dirs(&maze, g.pos).len(), 3);
        let g = ghost_at(7, 12, Dir::Left);
        assert_eq!(open_dirs(&maze, g.pos), vec![Dir::Left, Dir::Right]);
        assert_eq!(ghost_next_dir(&maze, &g, &mut rng), Some(Dir::Left));
    }

    #[test]
    fn corner_turns_clockwise_first() {
        let maze = Maze::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Top-left corner of the board: open right and down only.
        let g = ghost_at(1, 2, Dir::Up);
        assert_eq!(ghost_next_dir(&maze, &g, &mut rng), Some(Dir::Right));
        let g = ghost_at(1, 2, Dir::Left);
        assert_eq!(ghost_next_dir(&maze, &g, &mut rng), Some(Dir::Down));
    }

    #[test]
    fn dead_end_reverses() {
        let maze = Maze::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Left pen cell: only the right neighbour is open.
        let g = ghost_at(9, 9, Dir::Left);
        assert_eq!(open_dirs(&maze, g.pos), vec![Dir::Right]);
        assert_eq!(ghost_next_dir(&maze, &g, &mut rng), Some(Dir::Right));
    }

    #[test]
    fn intersection_never_reverses() {
        let maze = Maze::new();
        let mut rng = StdRng::seed_from_u64(7);
        // Row 3 column 5 opens in all four directions.
        for heading in Dir::ALL {
            let g = ghost_at(3, 5, heading);
            assert_eq!(open_dirs(&maze, g.pos).len(), 4);
            for _ in 0..50 {
                let dir = ghost_next_dir(&maze, &g, &mut rng).unwrap();
                assert_ne!(dir, heading.reverse());
            }
        }
    }

    #[test]
    fn intersection_reaches_every_other_exit() {
        let maze = Maze::new();
        let mut rng = StdRng::seed_from_u64(11);
        let g = ghost_at(3, 5, Dir::Up);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let dir = ghost_next_dir(&maze, &g, &mut rng).unwrap();
            if !seen.contains(&dir) {
                seen.push(dir);
            }
        }
        seen.sort_by_key(|d| Dir::ALL.iter().position(|x| x == d));
        assert_eq!(seen, vec![Dir::Up, Dir::Left, Dir::Right]);
    }

    #[test]
    fn pen_slot_fills_left_to_right() {
        let mut ghosts = spawn_ghosts();
        ghosts[1].pos = Pos::new(1, 1);
        assert_eq!(pen_slot(&ghosts, &PEN), Pos::new(9, 9));
        let ghosts = spawn_ghosts();
        assert_eq!(pen_slot(&ghosts, &PEN), PEN.exit);
    }

    #[test]
    fn penned_ghosts_stay_put() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(3);
        let penned: Vec<Pos> = game.ghosts[1..].iter().map(|g| g.pos).collect();
        game.update_ghosts(&mut rng);
        let after: Vec<Pos> = game.ghosts[1..].iter().map(|g| g.pos).collect();
        assert_eq!(penned, after);
        assert_eq!(game.ghosts[0].pos, Pos::new(7, 9));
    }

    #[test]
    fn odd_power_tick_freezes_ghosts() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(3);
        game.power_timer = 29;
        game.update_ghosts(&mut rng);
        assert_eq!(game.ghosts[0].pos, Pos::new(7, 10));
        game.power_timer = 28;
        game.update_ghosts(&mut rng);
        assert_eq!(game.ghosts[0].pos, Pos::new(7, 9));
    }

    #[test]
    fn ghost_wraps_on_corridor_row() {
        let mut game = Game::new();
        let mut rng = StdRng::seed_from_u64(5);
        game.ghosts[0].pos = Pos::new(9, 0);
        game.ghosts[0].set_direction(Dir::Left);
        game.update_ghosts(&mut rng);
        assert_eq!(game.ghosts[0].pos, Pos::new(9, 20));
        assert_eq!(game.ghosts[0].direction, Dir::Left);

        game.ghosts[0].set_direction(Dir::Right);
        game.update_ghosts(&mut rng);
        assert_eq!(game.ghosts[0].pos, Pos::new(9, 0));
        assert_eq!(game.ghosts[0].face, GhostFace::Right);
    }

    #[test]
    fn release_waits_for_interval() {
        let mut game = Game::new();
        let mut events = Vec::new();
        game.release_clock = RELEASE_INTERVAL - 1;
        game.release_ghosts(&mut events);
        assert!(events.is_empty());
        game.release_clock = RELEASE_INTERVAL;
        game.release_ghosts(&mut events);
        assert_eq!(game.ghosts[1].pos, Pos::new(7, 9));
        assert_eq!(
            events,
            vec![TurnEvent::GhostReleased {
                ghost: 1,
                pos: Pos::new(7, 9)
            }]
        );
    }

    #[test]
    fn captured_ghost_gets_entry_heading() {
        let mut game = Game::new();
        game.ghosts[2].pos = Pos::new(3, 5);
        game.ghosts[2].set_direction(Dir::Right);
        game.send_to_pen(2);
        assert_eq!(game.ghosts[2].pos, Pos::new(9, 10));
        assert_eq!(game.ghosts[2].direction, Dir::Left);
        assert_eq!(game.ghosts[2].face, GhostFace::Left);
    }
}

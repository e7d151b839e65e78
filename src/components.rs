use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(y: usize, x: usize) -> Self {
        Pos { x, y }
    }
}

/// Cardinal directions, in the order neighbours are scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Left,
    Down,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Left, Dir::Down, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn reverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    pub fn clockwise(self) -> Dir {
        match self {
            Dir::Up => Dir::Right,
            Dir::Right => Dir::Down,
            Dir::Down => Dir::Left,
            Dir::Left => Dir::Up,
        }
    }

    pub fn counter_clockwise(self) -> Dir {
        match self {
            Dir::Up => Dir::Left,
            Dir::Left => Dir::Down,
            Dir::Down => Dir::Right,
            Dir::Right => Dir::Up,
        }
    }
}

/// Which way the player's mouth points. `Neutral` until the first accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Neutral,
    Up,
    Left,
    Down,
    Right,
}

impl From<Dir> for Facing {
    fn from(dir: Dir) -> Self {
        match dir {
            Dir::Up => Facing::Up,
            Dir::Left => Facing::Left,
            Dir::Down => Facing::Down,
            Dir::Right => Facing::Right,
        }
    }
}

/// Display state of a ghost. `Caught` overrides colour on the final frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostFace {
    Left,
    Right,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostColor {
    Red,
    Cyan,
    Magenta,
    Green,
}

impl GhostColor {
    pub const ALL: [GhostColor; 4] = [
        GhostColor::Red,
        GhostColor::Cyan,
        GhostColor::Magenta,
        GhostColor::Green,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub facing: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub pos: Pos,
    pub color: GhostColor,
    pub face: GhostFace,
    pub direction: Dir,
}

impl Ghost {
    pub fn new(pos: Pos, color: GhostColor) -> Self {
        Ghost {
            pos,
            color,
            face: GhostFace::Left,
            direction: Dir::Left,
        }
    }

    /// Travel left/right updates the display face; up/down keeps the last one.
    pub fn set_direction(&mut self, dir: Dir) {
        self.direction = dir;
        match dir {
            Dir::Left => self.face = GhostFace::Left,
            Dir::Right => self.face = GhostFace::Right,
            Dir::Up | Dir::Down => {}
        }
    }
}

impl fmt::Display for Ghost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} y:{} x:{} face:{:?} dir:{:?}",
            self.color, self.pos.y, self.pos.x, self.face, self.direction
        )
    }
}

/// `+amount` hint shown for one frame where a ghost was captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScorePopup {
    pub pos: Pos,
    pub amount: u32,
}

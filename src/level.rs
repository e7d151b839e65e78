use crate::components::Pos;

pub const GRID_W: usize = 21;
pub const GRID_H: usize = 21;

/// Compiled-in board. `*` wall, `.` pellet, `o` power item, space empty.
const LAYOUT: [&str; GRID_H] = [
    " ******************* ",
    " *........*........* ",
    " *o**.***.*.***.**o* ",
    " *.................* ",
    " *.**.*.*****.*.**.* ",
    " *....*...*...*....* ",
    " ****.*** * ***.**** ",
    "    *.*       *.*    ",
    "*****.* ***** *.*****",
    "     .  *   *  .     ",
    "*****.* ***** *.*****",
    "    *.*       *.*    ",
    " ****.* ***** *.**** ",
    " *........*........* ",
    " *.**.***.*.***.**.* ",
    " *o.*..... .....*.o* ",
    " **.*.*.*****.*.*.** ",
    " *....*...*...*....* ",
    " *.******.*.******.* ",
    " *.................* ",
    " ******************* ",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
    Consumed,
}

impl Tile {
    fn from_char(c: char) -> Tile {
        match c {
            '*' => Tile::Wall,
            '.' => Tile::Pellet,
            'o' => Tile::Power,
            _ => Tile::Empty,
        }
    }
}

/// What a consumed cell held before it was eaten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Pellet,
    Power,
}

/// Holding pen: the interior is the cells of `row` strictly between
/// `left` and `right`. Ghosts leave through `exit_row`.
#[derive(Clone, Copy, Debug)]
pub struct PenBounds {
    pub row: usize,
    pub left: usize,
    pub right: usize,
    pub exit_row: usize,
    pub exit: Pos,
}

pub const PEN: PenBounds = PenBounds {
    row: 9,
    left: 8,
    right: 12,
    exit_row: 7,
    exit: Pos::new(7, 10),
};

impl PenBounds {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.y == self.row && pos.x > self.left && pos.x < self.right
    }

    /// Interior cells, left to right.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.left + 1..self.right).map(move |x| Pos::new(self.row, x))
    }
}

#[derive(Clone, Debug)]
pub struct Maze {
    grid: [[Tile; GRID_W]; GRID_H],
    remaining: usize,
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Maze {
    pub fn new() -> Self {
        let mut grid = [[Tile::Empty; GRID_W]; GRID_H];
        let mut remaining = 0;
        for (y, line) in LAYOUT.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let tile = Tile::from_char(c);
                if matches!(tile, Tile::Pellet | Tile::Power) {
                    remaining += 1;
                }
                grid[y][x] = tile;
            }
        }
        Maze { grid, remaining }
    }

    /// Cells outside the grid read as walls.
    pub fn cell_kind(&self, row: usize, col: usize) -> Tile {
        if row >= GRID_H || col >= GRID_W {
            return Tile::Wall;
        }
        self.grid[row][col]
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.cell_kind(pos.y, pos.x)
    }

    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.cell_kind(row, col) == Tile::Wall
    }

    /// Marks a pellet or power item as consumed, returning what it was.
    /// Returns `None` for every other cell, including already consumed ones.
    pub fn consume(&mut self, pos: Pos) -> Option<Pickup> {
        let pickup = match self.tile(pos) {
            Tile::Pellet => Pickup::Pellet,
            Tile::Power => Pickup::Power,
            _ => return None,
        };
        self.grid[pos.y][pos.x] = Tile::Consumed;
        self.remaining -= 1;
        Some(pickup)
    }

    /// Pellets and power items not yet eaten.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile; GRID_W]> {
        self.grid.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_square() {
        for line in LAYOUT {
            assert_eq!(line.chars().count(), GRID_W);
        }
    }

    #[test]
    fn counts_consumables() {
        let maze = Maze::new();
        let counted = maze
            .rows()
            .flat_map(|row| row.iter())
            .filter(|t| matches!(t, Tile::Pellet | Tile::Power))
            .count();
        assert_eq!(maze.remaining(), counted);
        assert_eq!(maze.tile(Pos::new(2, 2)), Tile::Power);
        assert_eq!(maze.tile(Pos::new(15, 18)), Tile::Power);
    }

    #[test]
    fn consume_is_idempotent() {
        let mut maze = Maze::new();
        let before = maze.remaining();
        let pos = Pos::new(1, 2);
        assert_eq!(maze.consume(pos), Some(Pickup::Pellet));
        assert_eq!(maze.tile(pos), Tile::Consumed);
        assert_eq!(maze.consume(pos), None);
        assert_eq!(maze.remaining(), before - 1);
    }

    #[test]
    fn consume_ignores_walls_and_empty() {
        let mut maze = Maze::new();
        assert_eq!(maze.consume(Pos::new(0, 1)), None);
        assert_eq!(maze.consume(Pos::new(15, 10)), None);
        assert!(maze.is_wall(0, 1));
        assert!(maze.is_wall(0, 21));
    }

    #[test]
    fn corridor_row_is_open_at_both_edges() {
        let maze = Maze::new();
        assert!(!maze.is_wall(PEN.row, 0));
        assert!(!maze.is_wall(PEN.row, GRID_W - 1));
        assert!(maze.is_wall(PEN.row - 1, 0));
        assert!(maze.is_wall(PEN.row + 1, 0));
    }

    #[test]
    fn pen_interior_is_three_wide() {
        let cells: Vec<_> = PEN.cells().collect();
        assert_eq!(cells, vec![Pos::new(9, 9), Pos::new(9, 10), Pos::new(9, 11)]);
        assert!(!PEN.contains(Pos::new(9, 8)));
        assert!(!PEN.contains(Pos::new(9, 12)));
        let maze = Maze::new();
        assert!(cells.iter().all(|p| maze.tile(*p) == Tile::Empty));
        assert!(!maze.is_wall(PEN.exit.y, PEN.exit.x));
    }
}

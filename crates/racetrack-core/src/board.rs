use crate::geom::Point;
use crate::line::rasterize;

/// Classification of a single track cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellType {
    Wall,
    Open,
    /// Finish line crossed by moving up (decreasing row).
    FinishUp,
    FinishDown,
    FinishLeft,
    FinishRight,
}

impl CellType {
    /// Character used for this cell in a track file. Walls use `#` here,
    /// although a track file may pick any wall character.
    pub const fn rune(self) -> char {
        match self {
            CellType::Wall => '#',
            CellType::Open => ' ',
            CellType::FinishUp => '^',
            CellType::FinishDown => 'v',
            CellType::FinishLeft => '<',
            CellType::FinishRight => '>',
        }
    }

    /// Parse a non-wall track rune. Returns `None` for anything else.
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(CellType::Open),
            '^' => Some(CellType::FinishUp),
            'v' => Some(CellType::FinishDown),
            '<' => Some(CellType::FinishLeft),
            '>' => Some(CellType::FinishRight),
            _ => None,
        }
    }

    /// Whether this is any of the four finish types.
    pub const fn is_finish(self) -> bool {
        self.finish_direction().is_some()
    }

    /// The unit displacement a car must have to cross this finish cell.
    pub const fn finish_direction(self) -> Option<Point> {
        match self {
            CellType::FinishUp => Some(Point::new(-1, 0)),
            CellType::FinishDown => Some(Point::new(1, 0)),
            CellType::FinishLeft => Some(Point::new(0, -1)),
            CellType::FinishRight => Some(Point::new(0, 1)),
            CellType::Wall | CellType::Open => None,
        }
    }
}

/// Read access to a grid of classified cells.
///
/// Positions outside the grid must classify as [`CellType::Wall`].
pub trait Board {
    /// Classification of the cell at `p`.
    fn classify(&self, p: Point) -> CellType;

    /// Whether the cell at `p` is a wall.
    fn is_wall(&self, p: Point) -> bool {
        self.classify(p) == CellType::Wall
    }

    /// Whether any of the eight neighbours of `p` is a wall.
    fn is_near_wall(&self, p: Point) -> bool {
        p.neighbors_8().into_iter().any(|n| self.is_wall(n))
    }

    /// Whether a straight move from `from` to `to` crosses no wall cell.
    fn has_line_of_sight(&self, from: Point, to: Point) -> bool {
        rasterize(from, to).into_iter().all(|p| !self.is_wall(p))
    }
}

impl<B: Board + ?Sized> Board for &B {
    fn classify(&self, p: Point) -> CellType {
        (**self).classify(p)
    }
}

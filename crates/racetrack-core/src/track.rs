//! Racetracks parsed from text.
//!
//! A track file is a rectangle of characters:
//!
//! ```text
//! #########
//! #1    >>#
//! #2    >>#
//! #########
//! ```
//!
//! Leading empty lines are ignored, and parsing stops at the first empty
//! line after the grid (or at the end of input). The first character of
//! the first line is the wall character for the whole track. A space is
//! open track, and `^`, `v`, `<` and `>` are finish cells crossed in the
//! direction they point. Any other character marks a car's start
//! position (an open cell); there must be between 1 and [`MAX_CARS`].

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, CellType};
use crate::geom::Point;

/// Maximum number of start positions on a track.
pub const MAX_CARS: usize = 9;

/// A rectangular grid of [`CellType`] values plus the car start positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    cells: Vec<CellType>,
    width: i32,
    height: i32,
    starts: Vec<Point>,
}

impl Track {
    /// Create a track of the given size with every cell set to `cell` and
    /// no start positions.
    pub fn filled(width: i32, height: i32, cell: CellType) -> Self {
        let len = (width.max(0) * height.max(0)) as usize;
        Self {
            cells: vec![cell; len],
            width: width.max(0),
            height: height.max(0),
            starts: Vec::new(),
        }
    }

    /// Parse a track from its textual form. See the module docs for the
    /// format.
    pub fn parse(s: &str) -> Result<Self, TrackError> {
        let mut track = Self::filled(0, 0, CellType::Open);
        let mut wall = None;

        for line in s.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                if track.height == 0 {
                    continue;
                }
                break;
            }

            let row = track.height;
            let width = line.chars().count() as i32;
            if row == 0 {
                track.width = width;
            } else if width != track.width {
                return Err(TrackError::InconsistentWidth {
                    row,
                    expected: track.width,
                    found: width,
                });
            }
            let wall_rune = *wall.get_or_insert_with(|| line.chars().next().unwrap_or('#'));

            for (col, ch) in line.chars().enumerate() {
                let col = col as i32;
                let cell = if ch == wall_rune {
                    CellType::Wall
                } else if let Some(cell) = CellType::from_rune(ch) {
                    cell
                } else {
                    if track.starts.len() == MAX_CARS {
                        return Err(TrackError::TooManyStarts { row, col, ch });
                    }
                    track.starts.push(Point::new(row, col));
                    CellType::Open
                };
                track.cells.push(cell);
            }
            track.height += 1;
        }

        if track.height == 0 {
            return Err(TrackError::Empty);
        }
        if track.starts.is_empty() {
            return Err(TrackError::NoStarts);
        }
        Ok(track)
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Car start positions, in reading order.
    pub fn starts(&self) -> &[Point] {
        &self.starts
    }

    /// Whether `p` lies inside the grid.
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.row < self.height && p.col >= 0 && p.col < self.width
    }

    fn index(&self, p: Point) -> usize {
        (p.row * self.width + p.col) as usize
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<CellType> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    pub fn set(&mut self, p: Point, cell: CellType) {
        if !self.contains(p) {
            return;
        }
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// Iterate over `(Point, CellType)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellType)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Point::new(i as i32 / width, i as i32 % width), cell))
    }
}

impl Board for Track {
    fn classify(&self, p: Point) -> CellType {
        self.at(p).unwrap_or(CellType::Wall)
    }
}

impl FromStr for Track {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.classify(Point::new(row, col)).rune())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// The input holds no grid lines.
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth { row: i32, expected: i32, found: i32 },
    /// No start position was marked.
    NoStarts,
    /// More than [`MAX_CARS`] start positions were marked.
    TooManyStarts { row: i32, col: i32, ch: char },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "track: no track data supplied"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "track: row {row} has width {found}, expected {expected}"
            ),
            Self::NoStarts => write!(f, "track: no start positions"),
            Self::TooManyStarts { row, col, ch } => write!(
                f,
                "track: unexpected character \u{201c}{ch}\u{201d} at row {row}, column {col} \
                 (at most {MAX_CARS} start positions)"
            ),
        }
    }
}

impl std::error::Error for TrackError {}

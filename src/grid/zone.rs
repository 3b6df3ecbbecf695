use std::fmt;

/// Number of grid rows (0-15)
pub const GRID_ROWS: usize = 16;
/// Number of grid columns (A-Z)
pub const GRID_COLS: usize = 26;

/// A validated grid cell code: column letter A-Z plus row index 0-15.
///
/// Animal locations arrive as free text; `Zone` can only be constructed for
/// codes that name a real cell, so a held `Zone` is always on the grid.
/// Locations that don't parse canonically ("a1", "A01", "LAB") map to no
/// cell and stay invisible to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zone {
    col: u8,
    row: u8,
}

impl Zone {
    /// Construct from grid indices; None if out of range
    pub fn new(col: usize, row: usize) -> Option<Self> {
        if col < GRID_COLS && row < GRID_ROWS {
            Some(Self {
                col: col as u8,
                row: row as u8,
            })
        } else {
            None
        }
    }

    /// Parse a location code, accepting only the canonical form the grid
    /// itself generates: one uppercase letter followed by the row index
    /// with no leading zero (e.g. "A0", "Z15").
    pub fn parse(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_uppercase() {
            return None;
        }

        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || (digits.len() == 2 && digits.starts_with('0'))
        {
            return None;
        }
        let row: usize = digits.parse().ok()?;

        Self::new((letter as u8 - b'A') as usize, row)
    }

    /// Column index, 0-25
    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Row index, 0-15
    pub fn row(&self) -> usize {
        self.row as usize
    }

    /// Column letter, A-Z
    pub fn column_letter(&self) -> char {
        (b'A' + self.col) as char
    }

    /// Canonical cell code, e.g. "B4"
    pub fn code(&self) -> String {
        format!("{}{}", self.column_letter(), self.row)
    }

    /// All cells in row-major order (row 0 first, columns A-Z within a row)
    pub fn all() -> impl Iterator<Item = Zone> {
        (0..GRID_ROWS).flat_map(|row| {
            (0..GRID_COLS).map(move |col| Zone {
                col: col as u8,
                row: row as u8,
            })
        })
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row)
    }
}

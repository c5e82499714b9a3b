//! Pieces module - tetromino shape matrices and the rotation transform
//!
//! A shape is an N×N matrix (N = 2 for O, 4 for I, 3 otherwise) stored in a fixed
//! 4×4 array so it stays `Copy`. Zero entries are transparent; nonzero entries all carry
//! the piece's color id. Rotation is plain matrix math with no kick offsets.

use blockfall_types::{Cell, PieceKind, BOARD_WIDTH, EMPTY_CELL, MAX_SHAPE_SIZE};

type Matrix = [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];

/// Square cell matrix of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: Matrix,
}

impl Shape {
    const fn template(size: u8, cells: Matrix) -> Self {
        assert!(size as usize <= MAX_SHAPE_SIZE);
        Self { size, cells }
    }

    /// Build a shape from square rows.
    ///
    /// Returns `None` unless `rows` is non-empty, square, and at most 4×4.
    ///
    /// ```
    /// use blockfall_core::Shape;
    ///
    /// let bar = Shape::from_rows(&[&[0, 0], &[2, 2]]).unwrap();
    /// assert_eq!(bar.size(), 2);
    /// assert!(Shape::from_rows(&[&[1, 1, 1]]).is_none());
    /// ```
    pub fn from_rows(rows: &[&[Cell]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_SHAPE_SIZE || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row);
        }
        Some(Self {
            size: size as u8,
            cells,
        })
    }

    /// Side length N of the matrix.
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at column `x`, row `y` of the matrix (`0` outside it).
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return EMPTY_CELL;
        }
        self.cells[y][x]
    }

    /// Rows of the matrix, each `size()` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    /// Nonzero cells as `(dx, dy, color)` offsets from the matrix's top-left corner.
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8, Cell)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != EMPTY_CELL).then_some((x as i8, y as i8, v))
            })
        })
    }

    /// Color id of the shape (first nonzero cell), `0` for a blank matrix.
    pub fn color(&self) -> Cell {
        self.minos().next().map(|(_, _, c)| c).unwrap_or(EMPTY_CELL)
    }

    /// 90° clockwise rotation: `new[x][N-1-y] = old[y][x]`.
    ///
    /// Four rotations return the original matrix; O maps onto itself.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut cells = [[EMPTY_CELL; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                cells[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

const T_SHAPE: Shape = Shape::template(
    3,
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const I_SHAPE: Shape = Shape::template(
    4,
    [[0, 0, 0, 0], [2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const O_SHAPE: Shape = Shape::template(
    2,
    [[3, 3, 0, 0], [3, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const L_SHAPE: Shape = Shape::template(
    3,
    [[0, 4, 0, 0], [0, 4, 0, 0], [0, 4, 4, 0], [0, 0, 0, 0]],
);

const J_SHAPE: Shape = Shape::template(
    3,
    [[0, 5, 0, 0], [0, 5, 0, 0], [5, 5, 0, 0], [0, 0, 0, 0]],
);

const S_SHAPE: Shape = Shape::template(
    3,
    [[0, 6, 6, 0], [6, 6, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

const Z_SHAPE: Shape = Shape::template(
    3,
    [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

/// Get the immutable template for a piece kind (spawn orientation)
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::T => T_SHAPE,
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// Spawn row for every piece.
pub const SPAWN_Y: i8 = 0;

/// Spawn column for a matrix of side `size`: centered, left-biased on odd widths.
pub fn spawn_x(size: usize) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (size / 2) as i8
}

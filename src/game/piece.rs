use rand::Rng;
use ratatui::style::Color;

use crate::constants::{SPAWN_X, SPAWN_Y};

/// Row-major occupancy matrix of a piece's bounding box.
pub type Shape = Vec<Vec<bool>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceType {
    I, O, T, S, Z, L, J
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I, PieceType::O, PieceType::T,
        PieceType::S, PieceType::Z, PieceType::L, PieceType::J,
    ];

    fn template(self) -> (&'static [&'static [u8]], Color) {
        match self {
            PieceType::I => (SHAPE_I, Color::Rgb(0, 255, 255)),
            PieceType::O => (SHAPE_O, Color::Rgb(255, 255, 0)),
            PieceType::T => (SHAPE_T, Color::Rgb(128, 0, 128)),
            PieceType::S => (SHAPE_S, Color::Rgb(0, 255, 0)),
            PieceType::Z => (SHAPE_Z, Color::Rgb(255, 0, 0)),
            PieceType::L => (SHAPE_L, Color::Rgb(255, 165, 0)),
            PieceType::J => (SHAPE_J, Color::Rgb(0, 0, 255)),
        }
    }
}

const SHAPE_I: &[&[u8]] = &[&[1, 1, 1, 1]];
const SHAPE_O: &[&[u8]] = &[&[1, 1], &[1, 1]];
const SHAPE_T: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const SHAPE_S: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const SHAPE_Z: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const SHAPE_L: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const SHAPE_J: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];

pub fn piece_count() -> usize {
    PieceType::ALL.len()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub piece_type: PieceType,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// Builds an owned copy of the catalog entry for `piece_type`.
    pub fn new(piece_type: PieceType) -> Self {
        let (rows, color) = piece_type.template();
        let shape = rows
            .iter()
            .map(|row| row.iter().map(|&v| v != 0).collect())
            .collect();

        Self { piece_type, shape, color }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let index = rng.gen_range(0..piece_count());
        Self::new(PieceType::ALL[index])
    }
}

/// Clockwise quarter turn: the transpose of the row-reversed matrix.
pub fn rotate(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape.first().map_or(0, |row| row.len());
    let mut rotated = vec![vec![false; rows]; cols];

    for (i, row) in shape.iter().rev().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            rotated[j][i] = cell;
        }
    }

    rotated
}

/// The falling piece and the top-left offset of its bounding box on the board.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivePiece {
    pub piece: Piece,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    pub fn spawn(piece: Piece) -> Self {
        Self { piece, x: SPAWN_X, y: SPAWN_Y }
    }

    pub fn get_blocks(&self) -> Vec<(i32, i32)> {
        let mut blocks = Vec::new();
        for (i, row) in self.piece.shape.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell {
                    blocks.push((self.x + j as i32, self.y + i as i32));
                }
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn catalog_has_seven_pieces() {
        assert_eq!(piece_count(), 7);
    }

    #[test]
    fn copies_are_independent_of_catalog() {
        let mut piece = Piece::new(PieceType::T);
        piece.shape[0][0] = true;
        piece.shape.push(vec![true; 3]);

        let fresh = Piece::new(PieceType::T);
        assert_eq!(fresh.shape, vec![vec![false, true, false], vec![true, true, true]]);
    }

    #[test]
    fn random_selection_covers_every_kind() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = Vec::new();
        for _ in 0..500 {
            let piece = Piece::random(&mut rng);
            assert_eq!(piece, Piece::new(piece.piece_type));
            if !seen.contains(&piece.piece_type) {
                seen.push(piece.piece_type);
            }
        }
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn rotate_turns_clockwise() {
        let t = Piece::new(PieceType::T).shape;
        assert_eq!(
            rotate(&t),
            vec![vec![true, false], vec![true, true], vec![true, false]]
        );

        let i = Piece::new(PieceType::I).shape;
        assert_eq!(rotate(&i), vec![vec![true]; 4]);
    }

    #[test]
    fn four_rotations_restore_every_shape() {
        for piece_type in PieceType::ALL {
            let shape = Piece::new(piece_type).shape;
            let turned = rotate(&rotate(&rotate(&rotate(&shape))));
            assert_eq!(turned, shape, "{:?}", piece_type);
        }
    }

    #[test]
    fn spawn_uses_centered_top_offset() {
        let active = ActivePiece::spawn(Piece::new(PieceType::I));
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(active.get_blocks(), vec![(3, 0), (4, 0), (5, 0), (6, 0)]);
    }
}

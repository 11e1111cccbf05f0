use shakmaty::Role;

use crate::types::Score;

/// Material values in centipawns. The king carries no material value;
/// losing it is handled by mate scores, not evaluation.
pub fn piece_value(role: Role) -> Score {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 0,
    }
}

pub const BISHOP_PAIR_BONUS: Score = 30;

// Tables are indexed a1=0 .. h8=63 from White's point of view; Black reads
// the vertically mirrored square (63 - sq).

#[rustfmt::skip]
pub const PAWN_PST: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_PST: [Score; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOP_PST: [Score; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const ROOK_PST: [Score; 64] = [
     0,  0,  5, 10, 10,  5,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  5, 10, 10,  5,  0,  0,
];

#[rustfmt::skip]
pub const QUEEN_PST: [Score; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

/// Positional bonus for `role` standing on the raster square index
/// (a1=0). The king has no table.
pub fn pst_bonus(role: Role, square_index: usize, is_white: bool) -> Score {
    let idx = if is_white {
        square_index
    } else {
        63 - square_index
    };
    match role {
        Role::Pawn => PAWN_PST[idx],
        Role::Knight => KNIGHT_PST[idx],
        Role::Bishop => BISHOP_PST[idx],
        Role::Rook => ROOK_PST[idx],
        Role::Queen => QUEEN_PST[idx],
        Role::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_values() {
        assert_eq!(piece_value(Role::Pawn), 100);
        assert_eq!(piece_value(Role::Queen), 900);
        assert_eq!(piece_value(Role::King), 0);
    }

    #[test]
    fn test_pst_mirroring() {
        // A white knight on g1 (idx 6) and a black knight on g8 (idx 62)
        // read the same table cell.
        assert_eq!(
            pst_bonus(Role::Knight, 6, true),
            pst_bonus(Role::Knight, 63 - 6, false)
        );
        // d4 (idx 27) is a strong knight square for White
        assert_eq!(pst_bonus(Role::Knight, 27, true), 20);
    }

    #[test]
    fn test_pawn_seventh_rank() {
        // White pawn on e7 (idx 52) is one step from promotion
        assert_eq!(pst_bonus(Role::Pawn, 52, true), 50);
    }
}

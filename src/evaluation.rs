use shakmaty::{Chess, Color, Piece, Position, Role, Square};

use crate::position;
use crate::pst::{BISHOP_PAIR_BONUS, piece_value, pst_bonus};
use crate::types::Score;

const WHITE_PAWN: Piece = Piece {
    color: Color::White,
    role: Role::Pawn,
};
const BLACK_PAWN: Piece = Piece {
    color: Color::Black,
    role: Role::Pawn,
};

/// Static evaluation from the perspective of the side to move
/// (positive = side to move is better). Every term is computed from
/// White's point of view; the sum is negated when Black is to move.
pub fn evaluate(pos: &Chess) -> Score {
    let score = material(pos)
        + pawn_structure(pos)
        + mobility(pos)
        + king_safety(pos)
        + piece_squares(pos)
        + development(pos)
        + center_control(pos);

    if pos.turn() == Color::White { score } else { -score }
}

fn material(pos: &Chess) -> Score {
    let mut score = 0;
    for sq in Square::ALL {
        if let Some(piece) = pos.board().piece_at(sq) {
            let value = piece_value(piece.role);
            if piece.color == Color::White {
                score += value;
            } else {
                score -= value;
            }
        }
    }
    score
}

/// Legal-move-count difference, weighted by 2. Each count is gated on the
/// actual turn, so only the mover's side of the null-move boundary ever
/// contributes: with Black to move both counts are zero. This mirrors the
/// engine's historical behavior and is kept intentionally.
fn mobility(pos: &Chess) -> Score {
    let white_mobility = if pos.turn() == Color::White {
        pos.legal_moves().len() as Score
    } else {
        0
    };

    let black_mobility = match position::null_move(pos) {
        Some(flipped) if flipped.turn() == Color::Black => flipped.legal_moves().len() as Score,
        _ => 0,
    };

    (white_mobility - black_mobility) * 2
}

/// +15 per friendly pawn shielding the king from the three squares
/// directly ahead (file-1..file+1, one rank toward the enemy).
fn king_safety(pos: &Chess) -> Score {
    let mut score = 0;

    if let Some(king) = pos.board().king_of(Color::White) {
        let file = usize::from(king) as i32 % 8;
        let rank = usize::from(king) as i32 / 8;
        for df in -1..=1 {
            let f = file + df;
            let r = rank + 1;
            if (0..8).contains(&f) && r < 8 {
                let sq = Square::new((r * 8 + f) as u32);
                if pos.board().piece_at(sq) == Some(WHITE_PAWN) {
                    score += 15;
                }
            }
        }
    }

    if let Some(king) = pos.board().king_of(Color::Black) {
        let file = usize::from(king) as i32 % 8;
        let rank = usize::from(king) as i32 / 8;
        for df in -1..=1 {
            let f = file + df;
            let r = rank - 1;
            if (0..8).contains(&f) && r >= 0 {
                let sq = Square::new((r * 8 + f) as u32);
                if pos.board().piece_at(sq) == Some(BLACK_PAWN) {
                    score -= 15;
                }
            }
        }
    }

    score
}

/// Doubled-pawn penalty and passed-pawn bonus.
fn pawn_structure(pos: &Chess) -> Score {
    let mut score = 0;
    let board = pos.board();

    // -15 per extra pawn stacked on a file
    for file in 0..8 {
        let mut white_count = 0;
        let mut black_count = 0;
        for rank in 0..8 {
            let sq = Square::new(rank * 8 + file);
            match board.piece_at(sq) {
                Some(p) if p == WHITE_PAWN => white_count += 1,
                Some(p) if p == BLACK_PAWN => black_count += 1,
                _ => {}
            }
        }
        if white_count > 1 {
            score -= 15 * (white_count - 1);
        }
        if black_count > 1 {
            score += 15 * (black_count - 1);
        }
    }

    // Passed pawn: no enemy pawn on the same or adjacent file anywhere
    // ahead. Bonus grows with advancement.
    for sq in Square::ALL {
        let i = usize::from(sq) as i32;
        let file = i % 8;
        let rank = i / 8;

        match board.piece_at(sq) {
            Some(p) if p == WHITE_PAWN => {
                let mut passed = true;
                'outer_w: for r in (rank + 1)..8 {
                    for f in (file - 1)..=(file + 1) {
                        if (0..8).contains(&f) {
                            let ahead = Square::new((r * 8 + f) as u32);
                            if board.piece_at(ahead) == Some(BLACK_PAWN) {
                                passed = false;
                                break 'outer_w;
                            }
                        }
                    }
                }
                if passed {
                    score += rank * 10;
                }
            }
            Some(p) if p == BLACK_PAWN => {
                let mut passed = true;
                'outer_b: for r in (0..rank).rev() {
                    for f in (file - 1)..=(file + 1) {
                        if (0..8).contains(&f) {
                            let ahead = Square::new((r * 8 + f) as u32);
                            if board.piece_at(ahead) == Some(WHITE_PAWN) {
                                passed = false;
                                break 'outer_b;
                            }
                        }
                    }
                }
                if passed {
                    score -= (7 - rank) * 10;
                }
            }
            _ => {}
        }
    }

    score
}

/// Piece-square tables plus the bishop-pair bonus.
fn piece_squares(pos: &Chess) -> Score {
    let mut score = 0;
    let mut white_bishops = 0;
    let mut black_bishops = 0;

    for sq in Square::ALL {
        if let Some(piece) = pos.board().piece_at(sq) {
            let is_white = piece.color == Color::White;
            if piece.role == Role::Bishop {
                if is_white {
                    white_bishops += 1;
                } else {
                    black_bishops += 1;
                }
            }
            let bonus = pst_bonus(piece.role, usize::from(sq), is_white);
            if is_white {
                score += bonus;
            } else {
                score -= bonus;
            }
        }
    }

    if white_bishops >= 2 {
        score += BISHOP_PAIR_BONUS;
    }
    if black_bishops >= 2 {
        score -= BISHOP_PAIR_BONUS;
    }

    score
}

/// -15 per minor piece still sitting on its home square.
fn development(pos: &Chess) -> Score {
    let board = pos.board();
    let mut score = 0;

    let home = |sq: Square, color: Color, role: Role| board.piece_at(sq) == Some(Piece { color, role });

    if home(Square::B1, Color::White, Role::Knight) {
        score -= 15;
    }
    if home(Square::G1, Color::White, Role::Knight) {
        score -= 15;
    }
    if home(Square::B8, Color::Black, Role::Knight) {
        score += 15;
    }
    if home(Square::G8, Color::Black, Role::Knight) {
        score += 15;
    }
    if home(Square::C1, Color::White, Role::Bishop) {
        score -= 15;
    }
    if home(Square::F1, Color::White, Role::Bishop) {
        score -= 15;
    }
    if home(Square::C8, Color::Black, Role::Bishop) {
        score += 15;
    }
    if home(Square::F8, Color::Black, Role::Bishop) {
        score += 15;
    }

    score
}

/// +-20 per pawn occupying one of the four central squares.
fn center_control(pos: &Chess) -> Score {
    let mut score = 0;
    for sq in [Square::D4, Square::E4, Square::D5, Square::E5] {
        match pos.board().piece_at(sq) {
            Some(p) if p == WHITE_PAWN => score += 20,
            Some(p) if p == BLACK_PAWN => score -= 20,
            _ => {}
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::parse_fen;

    #[test]
    fn test_startpos_symmetric() {
        // Both sides undeveloped and mirrored; only mobility's asymmetric
        // gating distinguishes them. White to move sees its own 20 moves
        // against Black's 20.
        let pos = Chess::default();
        let score = evaluate(&pos);
        assert_eq!(score, 0, "startpos should evaluate to 0, got {score}");
    }

    #[test]
    fn test_white_up_a_queen() {
        let pos = parse_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let score = evaluate(&pos);
        assert!(score > 800, "white up a queen should score high, got {score}");
    }

    #[test]
    fn test_side_to_move_relative() {
        // Same material imbalance seen from the losing side must be negative
        let pos = parse_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        let score = evaluate(&pos);
        assert!(score < -800, "black facing an extra queen should be negative, got {score}");
    }

    #[test]
    fn test_center_pawn_bonus() {
        // After 1.e4 the pawn stands on a center square (Black to move,
        // so White's +20 flips negative), and White's mobility term is
        // gated to zero.
        let with_center =
            parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        let without_center =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/4P3/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert!(evaluate(&with_center) < evaluate(&without_center));
    }

    #[test]
    fn test_doubled_pawns_penalized() {
        // Doubled c-pawns: -15, both passed (+10 rank 1, +20 rank 2)
        let doubled = parse_fen("k7/8/8/8/8/2P5/2P5/K7 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&doubled), 15);
        // Clean structure, same passed bonuses, no penalty
        let clean = parse_fen("k7/8/8/8/8/2P5/3P4/K7 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&clean), 30);
    }

    #[test]
    fn test_passed_pawn_bonus_grows_with_rank() {
        let far = parse_fen("k7/8/4P3/8/8/8/8/K7 w - - 0 1").unwrap();
        let near = parse_fen("k7/8/8/8/4P3/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&far), 50);
        assert_eq!(pawn_structure(&near), 30);
    }

    #[test]
    fn test_blocked_pawn_not_passed() {
        // The pawns block each other across adjacent files: neither passes
        let blocked = parse_fen("k7/3p4/8/8/4P3/8/8/K7 w - - 0 1").unwrap();
        assert_eq!(pawn_structure(&blocked), 0);
    }

    #[test]
    fn test_development_penalty() {
        // Knight developed to f3 vs still on g1 (White to move in both)
        let developed =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R w KQkq - 0 1").unwrap();
        let undeveloped = Chess::default();
        assert!(evaluate(&developed) > evaluate(&undeveloped));
    }

    #[test]
    fn test_mobility_gated_by_turn() {
        // With Black to move, neither gate opens: White's count is taken
        // only when White is to move, Black's only after the null move.
        let pos = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(mobility(&pos), 0);

        let white_to_move = Chess::default();
        assert_eq!(mobility(&white_to_move), 0); // 20 - 20, symmetric start
    }
}

use arrayvec::ArrayVec;
use shakmaty::{Chess, Color, Move, Position};

use crate::pst::piece_value;
use crate::types::{MAX_PLY, Score};

pub const CAPTURE_BASE: Score = 100_000;
pub const KILLER_PRIMARY: Score = 90_000;
pub const KILLER_SECONDARY: Score = 80_000;

/// Accumulated quiet-move bonus, indexed `[side][from][to]`.
pub type HistoryTable = [[[Score; 64]; 64]; 2];

/// Two most recent quiet cutoff moves per ply, newest in slot 0.
pub type KillerTable = [[Option<Move>; 2]; MAX_PLY];

pub struct ScoredMove {
    pub mv: Move,
    pub score: Score,
}

/// Victim value minus attacker value, read from the board (the en-passant
/// destination square is empty, so its victim counts 0 like the original).
pub fn capture_score(pos: &Chess, mv: &Move) -> Score {
    let board = pos.board();
    let victim = board
        .piece_at(mv.to())
        .map(|p| piece_value(p.role))
        .unwrap_or(0);
    let attacker = mv
        .from()
        .and_then(|sq| board.piece_at(sq))
        .map(|p| piece_value(p.role))
        .unwrap_or(0);
    victim - attacker
}

/// History table coordinates for the mover of `mv`. `None` only for moves
/// without a source square, which legal chess never produces.
pub fn history_index(pos: &Chess, mv: &Move) -> Option<(usize, usize, usize)> {
    let side = if pos.turn() == Color::White { 0 } else { 1 };
    let from = mv.from()?;
    Some((side, usize::from(from), usize::from(mv.to())))
}

/// Priority of a move at the current node, highest explored first:
/// captures by MVV-LVA, then the ply's killers, then history.
pub fn score_move(
    pos: &Chess,
    mv: &Move,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) -> Score {
    if mv.is_capture() {
        return CAPTURE_BASE + capture_score(pos, mv);
    }

    if killers[0].as_ref() == Some(mv) {
        return KILLER_PRIMARY;
    }
    if killers[1].as_ref() == Some(mv) {
        return KILLER_SECONDARY;
    }

    match history_index(pos, mv) {
        Some((side, from, to)) => history[side][from][to],
        None => 0,
    }
}

/// Generates the legal moves and sorts them by descending priority.
/// The sort is stable: equal scores keep generation order.
pub fn order_moves(
    pos: &Chess,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) -> ArrayVec<ScoredMove, 256> {
    let mut scored: ArrayVec<ScoredMove, 256> = ArrayVec::new();

    for mv in pos.legal_moves() {
        let score = score_move(pos, &mv, killers, history);
        scored.push(ScoredMove { mv, score });
    }

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{parse_fen, to_uci};
    use shakmaty::Chess;

    fn no_killers() -> [Option<Move>; 2] {
        [None, None]
    }

    fn empty_history() -> HistoryTable {
        [[[0; 64]; 64]; 2]
    }

    #[test]
    fn test_capture_sorts_first() {
        // After 1.e4 d5 the only capture is exd5
        let pos = parse_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
        let moves = order_moves(&pos, &no_killers(), &empty_history());
        assert_eq!(to_uci(&moves[0].mv), "e4d5");
        assert_eq!(moves[0].score, CAPTURE_BASE); // pawn takes pawn: 100 - 100
    }

    #[test]
    fn test_killer_sorts_after_captures() {
        let pos = parse_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
        let killer = pos
            .legal_moves()
            .into_iter()
            .find(|m| to_uci(m) == "b1c3")
            .unwrap();

        let moves = order_moves(&pos, &[Some(killer), None], &empty_history());
        assert_eq!(to_uci(&moves[0].mv), "e4d5", "capture stays first");
        assert_eq!(to_uci(&moves[1].mv), "b1c3", "killer second");
        assert_eq!(moves[1].score, KILLER_PRIMARY);
    }

    #[test]
    fn test_history_orders_quiet_moves() {
        let pos = parse_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .unwrap();
        let mut history = empty_history();
        // Reward g1f3 for white (side 0): g1 = 6, f3 = 21
        history[0][6][21] = 500;

        let boosted = order_moves(&pos, &no_killers(), &history);

        // The capture still leads; the history move heads the quiets
        assert_eq!(to_uci(&boosted[0].mv), "e4d5");
        assert_eq!(to_uci(&boosted[1].mv), "g1f3");
        assert_eq!(boosted[1].score, 500);
    }

    #[test]
    fn test_mvv_lva_prefers_cheap_attacker() {
        // Both the pawn and the knight can take the d5 pawn; the pawn
        // capture scores higher (same victim, cheaper attacker).
        let pos = parse_fen("rnbqkb1r/ppp1pppp/5n2/3p4/4P3/2N5/PPPP1PPP/R1BQKBNR w KQkq - 2 3")
            .unwrap();
        let moves = order_moves(&pos, &no_killers(), &empty_history());
        assert_eq!(to_uci(&moves[0].mv), "e4d5");
        assert_eq!(to_uci(&moves[1].mv), "c3d5");
        assert_eq!(moves[1].score, CAPTURE_BASE + 100 - 320);
    }

    #[test]
    fn test_second_killer_below_first() {
        let pos = Chess::default();
        let mut legal = pos.legal_moves().into_iter();
        let first = legal.next().unwrap();
        let second = legal.next().unwrap();

        let moves = order_moves(&pos, &[Some(first.clone()), Some(second.clone())], &empty_history());
        assert_eq!(moves[0].mv, first);
        assert_eq!(moves[0].score, KILLER_PRIMARY);
        assert_eq!(moves[1].mv, second);
        assert_eq!(moves[1].score, KILLER_SECONDARY);
    }
}

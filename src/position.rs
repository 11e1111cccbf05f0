use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use crate::error::EngineError;

/// Terminal classification from the side to move's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Draw,
    /// Decisive against the side to move (the mover never wins a position
    /// in which it is their turn).
    Loss,
}

/// Parse a FEN string into a playable position.
pub fn parse_fen(fen: &str) -> Result<Chess, EngineError> {
    let parsed: Fen = fen.parse().map_err(|_| EngineError::InvalidFen {
        fen: fen.to_string(),
    })?;
    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|err| EngineError::IllegalPosition {
            reason: err.to_string(),
        })
}

/// 64-bit zobrist key used to index the transposition table.
pub fn zobrist(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

/// Game-over test: checkmate, stalemate, insufficient material, and the
/// fifty-move rule. Returns `None` while the game is live.
pub fn outcome(pos: &Chess) -> Option<GameOutcome> {
    if pos.is_checkmate() {
        return Some(GameOutcome::Loss);
    }
    if pos.is_stalemate() || pos.is_insufficient_material() || pos.halfmoves() >= 100 {
        return Some(GameOutcome::Draw);
    }
    None
}

/// Pass the turn without moving a piece. Fails (returns `None`) when the
/// resulting position would be impossible, e.g. the mover is in check.
pub fn null_move(pos: &Chess) -> Option<Chess> {
    pos.clone().swap_turn().ok()
}

/// Short move notation: source square + destination square + optional
/// promotion letter ("e2e4", "e7e8q").
pub fn to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

//! Time-bounded adversarial search for chess positions.
//!
//! Given a position in FEN and a wall-clock budget in milliseconds, the
//! engine runs an iterative-deepening principal-variation search (with a
//! transposition table, killer moves, history heuristic, and quiescence)
//! and returns the best move it found in UCI notation. Board rules, move
//! generation, and legality all come from `shakmaty`; this crate only
//! decides which legal move to play.
//!
//! Hosts drive the engine one ply at a time:
//!
//! ```
//! let mv = tempo::best_move("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 100)
//!     .unwrap();
//! assert_eq!(mv.len(), 4); // e.g. "e2e4"
//! ```

pub mod error;
pub mod evaluation;
pub mod movegen;
pub mod position;
pub mod pst;
pub mod search;
pub mod tt;
pub mod types;

pub use error::EngineError;
pub use search::{SearchContext, find_best_move};
pub use types::{EngineConfig, SearchResult};

/// The single host-facing operation: position notation in, move notation
/// out. Returns the empty string when the side to move has no legal move.
pub fn best_move(fen: &str, time_limit_ms: u64) -> Result<String, EngineError> {
    best_move_with_config(fen, time_limit_ms, &EngineConfig::default())
}

/// [`best_move`] with explicit search depth and table sizing.
pub fn best_move_with_config(
    fen: &str,
    time_limit_ms: u64,
    config: &EngineConfig,
) -> Result<String, EngineError> {
    let pos = position::parse_fen(fen)?;

    let mut ctx = SearchContext::with_config(config);
    ctx.time_limit_ms = time_limit_ms;

    let result = find_best_move(&pos, &mut ctx, config.max_depth);
    Ok(result
        .best_move
        .map(|mv| position::to_uci(&mv))
        .unwrap_or_default())
}

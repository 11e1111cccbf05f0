use thiserror::Error;

/// Errors surfaced to hosts. The search itself never fails: no legal move
/// is signaled by an empty move, and time exhaustion degrades to a static
/// evaluation. Only malformed position input is rejected.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The position string could not be parsed as FEN.
    #[error("invalid FEN: {fen}")]
    InvalidFen { fen: String },

    /// The FEN parsed but does not describe a legal chess position.
    #[error("illegal position: {reason}")]
    IllegalPosition { reason: String },
}

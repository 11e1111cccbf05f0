pub type Score = i32;

pub const SCORE_INFINITY: Score = 1_000_000;
pub const SCORE_MATE: Score = 100_000;
pub const MAX_PLY: usize = 128;
pub const DEFAULT_DEPTH: u8 = 5;
/// 2^22 transposition-table slots (~64MB of entries)
pub const DEFAULT_TT_ENTRIES: usize = 1 << 22;
pub const HISTORY_MAX: Score = 16_384;

/// Tunable knobs for one engine instance.
pub struct EngineConfig {
    pub max_depth: u8,
    pub tt_entries: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH,
            tt_entries: DEFAULT_TT_ENTRIES,
        }
    }
}

pub struct SearchResult {
    pub best_move: Option<shakmaty::Move>,
    pub score: Score,
    /// Deepest fully completed iteration (0 if time ran out inside depth 1).
    pub depth: u8,
    pub nodes: u64,
}

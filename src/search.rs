use std::cmp::Reverse;
use std::time::Instant;

use shakmaty::{Chess, Move, Position};
use tracing::debug;

use crate::evaluation::evaluate;
use crate::movegen::{self, HistoryTable, KillerTable, order_moves, score_move};
use crate::position::{self, GameOutcome};
use crate::tt::{TTFlag, TranspositionTable};
use crate::types::{
    EngineConfig, HISTORY_MAX, MAX_PLY, SCORE_INFINITY, SCORE_MATE, Score, SearchResult,
};

/// All mutable state of one search request: the transposition table, the
/// killer and history tables and the clock. Owned by the caller, so
/// independent searches never share anything.
pub struct SearchContext {
    pub nodes: u64,
    pub start_time: Instant,
    pub time_limit_ms: u64,
    stop: bool,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub tt: TranspositionTable,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            nodes: 0,
            start_time: Instant::now(),
            time_limit_ms: 0,
            stop: false,
            killers: [const { [None, None] }; MAX_PLY],
            history: [[[0; 64]; 64]; 2],
            tt: TranspositionTable::new(config.tt_entries),
        }
    }

    /// Restart the clock and drop all cached state. Runs at the start of
    /// every top-level request; killers and history never outlive one.
    pub fn reset(&mut self) {
        self.nodes = 0;
        self.stop = false;
        self.killers = [const { [None, None] }; MAX_PLY];
        self.history = [[[0; 64]; 64]; 2];
        self.start_time = Instant::now();
        self.tt.clear();
    }

    fn check_time(&mut self) {
        if self.start_time.elapsed().as_millis() as u64 >= self.time_limit_ms {
            self.stop = true;
        }
    }

    fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Node bookkeeping at every recursive entry point, main search and
    /// quiescence alike. The wall clock is polled every 2048 nodes.
    fn tick(&mut self) {
        self.nodes += 1;
        if self.nodes & 2047 == 0 {
            self.check_time();
        }
    }
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterative deepening driver. Deepens 1..=max_depth under the context's
/// time budget and returns the best root move seen so far; falls back to
/// the first legal move if even depth 1 cannot finish.
pub fn find_best_move(pos: &Chess, ctx: &mut SearchContext, max_depth: u8) -> SearchResult {
    ctx.reset();

    let legal = pos.legal_moves();
    if legal.is_empty() {
        return SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
        };
    }

    let mut root_moves: Vec<Move> = legal.into_iter().collect();
    let mut best_move = root_moves[0].clone();
    let mut best_score: Score = -SCORE_INFINITY;
    let mut completed_depth: u8 = 0;

    for depth in 1..=max_depth {
        ctx.check_time();
        if ctx.is_stopped() {
            break;
        }

        // Deeper iterations reuse the TT, killers and history built by the
        // shallower ones; the root order reflects that as well.
        let killers = ctx.killers[0].clone();
        let history = &ctx.history;
        root_moves.sort_by_cached_key(|mv| Reverse(score_move(pos, mv, &killers, history)));

        let mut alpha = -SCORE_INFINITY;
        let beta = SCORE_INFINITY;
        let mut depth_best = -SCORE_INFINITY;
        let mut first = true;
        let mut interrupted = false;

        for mv in &root_moves {
            let mut child = pos.clone();
            child.play_unchecked(mv);

            let score = if first {
                first = false;
                -alpha_beta(&child, ctx, depth - 1, -beta, -alpha, 1)
            } else {
                let scout = -alpha_beta(&child, ctx, depth - 1, -alpha - 1, -alpha, 1);
                if scout > alpha {
                    -alpha_beta(&child, ctx, depth - 1, -beta, -alpha, 1)
                } else {
                    scout
                }
            };

            // A move cut short by the clock returned a truncated score;
            // keep what the finished moves of this depth already found.
            ctx.check_time();
            if ctx.is_stopped() {
                interrupted = true;
                break;
            }

            if score > depth_best {
                depth_best = score;
                best_move = mv.clone();
                best_score = score;
            }
            if score > alpha {
                alpha = score;
            }
        }

        if !interrupted {
            completed_depth = depth;
            debug!(
                depth,
                score = best_score,
                nodes = ctx.nodes,
                elapsed_ms = ctx.start_time.elapsed().as_millis() as u64,
                "iteration complete"
            );
        }
    }

    SearchResult {
        best_move: Some(best_move),
        score: best_score,
        depth: completed_depth,
        nodes: ctx.nodes,
    }
}

/// Negamax alpha-beta with principal-variation (scout window) searching.
/// `depth` counts remaining plies to the horizon, `ply` the distance from
/// the root (for mate scores and killer slots).
pub fn alpha_beta(
    pos: &Chess,
    ctx: &mut SearchContext,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    ply: usize,
) -> Score {
    ctx.tick();
    if ctx.is_stopped() {
        // Out of time: approximate the subtree with a static evaluation
        return evaluate(pos);
    }

    if depth == 0 {
        return quiescence(pos, ctx, alpha, beta);
    }

    match position::outcome(pos) {
        Some(GameOutcome::Draw) => return 0,
        // Ply-adjusted so nearer mates compare as more extreme
        Some(GameOutcome::Loss) => return -SCORE_MATE + ply as Score,
        None => {}
    }

    let hash = position::zobrist(pos);
    if let Some(entry) = ctx.tt.probe(hash) {
        if entry.depth >= depth {
            let score = TranspositionTable::score_from_tt(entry, ply);
            match entry.flag {
                TTFlag::Exact => return score,
                TTFlag::LowerBound => alpha = alpha.max(score),
                TTFlag::UpperBound => beta = beta.min(score),
            }
            if alpha >= beta {
                return score;
            }
        }
    }

    let killers = if ply < MAX_PLY {
        ctx.killers[ply].clone()
    } else {
        [const { None }; 2]
    };
    let moves = order_moves(pos, &killers, &ctx.history);

    let original_alpha = alpha;
    let mut best_score = -SCORE_INFINITY;
    let mut first = true;

    for scored in &moves {
        let mv = &scored.mv;
        let mut child = pos.clone();
        child.play_unchecked(mv);

        let score = if first {
            first = false;
            -alpha_beta(&child, ctx, depth - 1, -beta, -alpha, ply + 1)
        } else {
            // Scout with a null window; re-search on a fail-high inside
            // the full window
            let scout = -alpha_beta(&child, ctx, depth - 1, -alpha - 1, -alpha, ply + 1);
            if scout > alpha && scout < beta {
                -alpha_beta(&child, ctx, depth - 1, -beta, -alpha, ply + 1)
            } else {
                scout
            }
        };

        if score > best_score {
            best_score = score;
        }

        if score > alpha {
            alpha = score;

            if !mv.is_capture() && ply < MAX_PLY {
                ctx.killers[ply][1] = ctx.killers[ply][0].take();
                ctx.killers[ply][0] = Some(mv.clone());

                if let Some((side, from, to)) = movegen::history_index(pos, mv) {
                    let slot = &mut ctx.history[side][from][to];
                    *slot = (*slot + (depth as Score) * (depth as Score)).min(HISTORY_MAX);
                }
            }
        }

        if alpha >= beta {
            break;
        }
    }

    let flag = if best_score <= original_alpha {
        TTFlag::UpperBound
    } else if best_score >= beta {
        TTFlag::LowerBound
    } else {
        TTFlag::Exact
    };
    ctx.tt.store(hash, depth, best_score, flag, ply);

    best_score
}

/// Capture-only extension of the horizon. Fail-hard: the side to move may
/// always stand pat, so a position already at or above beta returns beta.
/// Terminates when captures run out; the clock is still polled so a
/// runaway exchange cannot overshoot the budget.
pub fn quiescence(pos: &Chess, ctx: &mut SearchContext, mut alpha: Score, beta: Score) -> Score {
    ctx.tick();

    let stand_pat = evaluate(pos);
    if ctx.is_stopped() {
        return stand_pat;
    }

    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    for mv in pos.legal_moves() {
        if !mv.is_capture() {
            continue;
        }

        let mut child = pos.clone();
        child.play_unchecked(&mv);
        let score = -quiescence(&child, ctx, -beta, -alpha);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

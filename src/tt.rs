use crate::types::{SCORE_MATE, Score};

/// How the stored score bounds the true value of the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    /// Beta cutoff (score >= beta)
    LowerBound,
    /// Failed low (score <= original alpha)
    UpperBound,
}

#[derive(Clone, Copy)]
pub struct TTEntry {
    /// Full zobrist key; a slot whose key differs from the probe is a miss
    pub key: u64,
    pub depth: u8,
    pub score: Score,
    pub flag: TTFlag,
}

impl Default for TTEntry {
    fn default() -> Self {
        Self {
            key: 0,
            depth: 0,
            score: 0,
            flag: TTFlag::Exact,
        }
    }
}

// Scores beyond this are mates and get ply-adjusted on store/probe
const MATE_THRESHOLD: Score = SCORE_MATE - 1000;

/// Fixed-capacity cache of search results, indexed by `hash & (size - 1)`.
/// Depth-preferred replacement; cleared once per top-level move request.
pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a table with (at least) the given number of slots, rounded
    /// up to a power of two.
    pub fn new(capacity: usize) -> Self {
        let size = capacity.next_power_of_two().max(1024);
        Self {
            entries: vec![TTEntry::default(); size],
            mask: size - 1,
        }
    }

    pub fn probe(&self, hash: u64) -> Option<&TTEntry> {
        let entry = &self.entries[hash as usize & self.mask];
        if entry.key == hash { Some(entry) } else { None }
    }

    /// Depth-preferred store: an incoming result only overwrites an
    /// occupied slot searched at least as deep.
    pub fn store(&mut self, hash: u64, depth: u8, mut score: Score, flag: TTFlag, ply: usize) {
        let idx = hash as usize & self.mask;
        let entry = &self.entries[idx];

        if entry.key != 0 && depth < entry.depth {
            return;
        }

        // Mate scores are stored relative to the root so they stay
        // comparable when probed from a different ply
        if score > MATE_THRESHOLD {
            score += ply as Score;
        } else if score < -MATE_THRESHOLD {
            score -= ply as Score;
        }

        self.entries[idx] = TTEntry {
            key: hash,
            depth,
            score,
            flag,
        };
    }

    /// Entry score re-expressed relative to the probing ply.
    pub fn score_from_tt(entry: &TTEntry, ply: usize) -> Score {
        let mut score = entry.score;
        if score > MATE_THRESHOLD {
            score -= ply as Score;
        } else if score < -MATE_THRESHOLD {
            score += ply as Score;
        }
        score
    }

    /// Reset every slot to empty. Called at the start of each request.
    pub fn clear(&mut self) {
        for entry in self.entries.iter_mut() {
            *entry = TTEntry::default();
        }
    }
}


// The table deliberately keeps one entry per slot with no buckets. Two
// positions whose hashes share the low bits compete for the slot; the full
// key comparison turns the loser into a miss instead of returning a score
// from the wrong position.

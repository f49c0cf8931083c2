use serde::{Deserialize, Serialize};

/// Engine evaluation for one line. Exactly one unit applies per score;
/// `normalize` is the single conversion boundary between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Score {
    /// Centipawns from the side to move's point of view.
    Cp(i64),
    /// Mate in N plies-to-move pairs; negative N is mate against the side to move.
    MateIn(i32),
}

/// Collapse centipawn and mate evaluations into one signed scale.
///
/// `mate_boost` must exceed any realistic centipawn magnitude so that a mate
/// for the side to move outranks every centipawn score, and a mate against it
/// ranks below every centipawn score. Shorter mates rank better than longer
/// ones on both sides of zero.
pub fn normalize(score: Score, mate_boost: i64) -> i64 {
    match score {
        Score::Cp(cp) => cp,
        Score::MateIn(n) if n > 0 => mate_boost - n as i64,
        Score::MateIn(n) => -mate_boost - n as i64,
    }
}

/// Ordering key for ranked candidates. `rank_from_worst` stands in for a
/// sub-centipawn tie-break: lines with equal normalized scores stay
/// distinguishable keys in an ordered collection, while materially different
/// scores are never reordered. Band comparisons must use `normalized` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScoreKey {
    pub normalized: i64,
    pub rank_from_worst: u32,
}

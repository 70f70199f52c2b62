//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::rank::{DEFAULT_MIN_SIMILARITY, Ranker, SimilarityRanker, SubsequenceRanker};
use crate::selection::SelectionKind;

/// Default maximum number of rendered results.
pub const DEFAULT_LIMIT: usize = 50;

fn default_min_score() -> f64 {
    DEFAULT_MIN_SIMILARITY
}

/// Which ranker an engine builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatcherKind {
    /// Subsequence scoring (see [`SubsequenceRanker`]).
    #[default]
    Subsequence,
    /// Jaro-Winkler similarity with a cut-off (see [`SimilarityRanker`]).
    Similarity {
        #[serde(default = "default_min_score")]
        min_score: f64,
    },
}

impl MatcherKind {
    pub fn similarity() -> Self {
        Self::Similarity {
            min_score: DEFAULT_MIN_SIMILARITY,
        }
    }

    pub fn build(&self) -> Box<dyn Ranker> {
        match *self {
            Self::Subsequence => Box::new(SubsequenceRanker),
            Self::Similarity { min_score } => Box::new(SimilarityRanker::new(min_score)),
        }
    }
}

/// Settings an engine is created with.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// single-select configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of rendered results.
    pub limit: usize,
    pub matcher: MatcherKind,
    pub mode: SelectionKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            matcher: MatcherKind::default(),
            mode: SelectionKind::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tagged() -> Self {
        Self {
            mode: SelectionKind::Tagged,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: MatcherKind) -> Self {
        self.matcher = matcher;
        self
    }
}

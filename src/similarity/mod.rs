//! Content similarity between skills.
//!
//! A [`Matcher`] scores two texts in `[0, 1]` with one of three
//! [`Algorithm`]s and finds near-duplicate pairs in a skill list.
//!
//! | Algorithm | Score |
//! |-----------|-------|
//! | `lcs` | LCS length over the longer token sequence |
//! | `jaccard` | Jaccard index of token sets |
//! | `combined` | the larger of the two |
//!
//! In line mode tokens are lines; otherwise LCS works on characters and
//! Jaccard on character n-grams.
//!
//! ```
//! use skillsync::similarity::{Algorithm, Matcher, SimilarityConfig};
//!
//! let matcher = Matcher::new(SimilarityConfig {
//!     algorithm: Algorithm::Lcs,
//!     ..SimilarityConfig::default()
//! });
//! assert_eq!(matcher.compare("same", "same"), 1.0);
//! assert_eq!(matcher.compare("text", ""), 0.0);
//! ```

mod jaccard;
mod lcs;

pub use jaccard::{char_ngrams, jaccard_score, line_tokens};
pub use lcs::{lcs_length, lcs_score};

use std::fmt;

use rayon::prelude::*;

use crate::skill::Skill;

pub const DEFAULT_THRESHOLD: f64 = 0.6;
pub const DEFAULT_NGRAM_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Lcs,
    Jaccard,
    #[default]
    Combined,
}

impl Algorithm {
    /// Parses an algorithm name; anything unrecognised is `lcs`.
    pub fn from_name(name: &str) -> Algorithm {
        match name.trim().to_lowercase().as_str() {
            "jaccard" => Algorithm::Jaccard,
            "combined" => Algorithm::Combined,
            _ => Algorithm::Lcs,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lcs => "lcs",
            Algorithm::Jaccard => "jaccard",
            Algorithm::Combined => "combined",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SimilarityConfig {
    /// Minimum score for a pair to be reported; must lie in `(0, 1]`.
    pub threshold: f64,
    pub algorithm: Algorithm,
    /// Character n-gram size for Jaccard outside line mode; `0` means default.
    pub ngram_size: usize,
    pub line_mode: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        SimilarityConfig {
            threshold: DEFAULT_THRESHOLD,
            algorithm: Algorithm::Combined,
            ngram_size: DEFAULT_NGRAM_SIZE,
            line_mode: true,
        }
    }
}

impl SimilarityConfig {
    /// Replaces out-of-range values with their defaults.
    pub fn normalized(mut self) -> Self {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            self.threshold = DEFAULT_THRESHOLD;
        }
        if self.ngram_size == 0 {
            self.ngram_size = DEFAULT_NGRAM_SIZE;
        }
        self
    }
}

/// A pair of skills whose similarity reached the threshold.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContentMatch {
    pub skill_a: Skill,
    pub skill_b: Skill,
    pub score: f64,
    pub algorithm: String,
}

/// Stateless similarity scorer.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    config: SimilarityConfig,
}

impl Matcher {
    pub fn new(config: SimilarityConfig) -> Self {
        Matcher {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Similarity of `a` and `b` in `[0, 1]`.
    ///
    /// Identical inputs score 1.0; otherwise an empty input scores 0.0.
    pub fn compare(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        match self.config.algorithm {
            Algorithm::Lcs => self.lcs(a, b),
            Algorithm::Jaccard => self.jaccard(a, b),
            Algorithm::Combined => self.lcs(a, b).max(self.jaccard(a, b)),
        }
    }

    fn lcs(&self, a: &str, b: &str) -> f64 {
        if self.config.line_mode {
            let a: Vec<&str> = a.split('\n').collect();
            let b: Vec<&str> = b.split('\n').collect();
            lcs_score(&a, &b)
        } else {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            lcs_score(&a, &b)
        }
    }

    fn jaccard(&self, a: &str, b: &str) -> f64 {
        if self.config.line_mode {
            jaccard_score(&line_tokens(a), &line_tokens(b))
        } else {
            let n = self.config.ngram_size;
            jaccard_score(&char_ngrams(a, n), &char_ngrams(b, n))
        }
    }

    /// Every pair `(i, j)` with `i < j` whose content scores at least the
    /// threshold, in `(i, j)` order.
    pub fn find_similar(&self, skills: &[Skill]) -> Vec<ContentMatch> {
        let pairs: Vec<(usize, usize)> = (0..skills.len())
            .flat_map(|i| ((i + 1)..skills.len()).map(move |j| (i, j)))
            .collect();

        pairs
            .par_iter()
            .filter_map(|&(i, j)| {
                let score = self.compare(&skills[i].content, &skills[j].content);
                (score >= self.config.threshold).then(|| ContentMatch {
                    skill_a: skills[i].clone(),
                    skill_b: skills[j].clone(),
                    score,
                    algorithm: self.config.algorithm.name().to_string(),
                })
            })
            .collect()
    }
}

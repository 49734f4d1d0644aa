/*!
 * Word alignment between a source and a target sentence.
 */

use std::fmt;

use anyhow::{Result, anyhow};

use crate::errors::ProjectionError;

/// A set of `(source_index, target_index)` word correspondences.
///
/// The relation is many-to-many: neither side needs to be a function of the
/// other. Insertion order is preserved because the self-closing placement
/// scoring resolves left/right conflicts by first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    points: Vec<(usize, usize)>,
}

impl Alignment {
    /// Alignment over the given correspondence pairs
    pub fn from_pairs(points: Vec<(usize, usize)>) -> Self {
        Alignment { points }
    }

    /// Identity alignment `i <-> i` over `len` words
    pub fn identity(len: usize) -> Self {
        Alignment {
            points: (0..len).map(|i| (i, i)).collect(),
        }
    }

    /// Parse the Pharaoh text format: whitespace-separated `src-tgt` pairs,
    /// e.g. `"0-0 1-2 2-1"`
    pub fn from_pharaoh(text: &str) -> Result<Self> {
        let mut points = Vec::new();
        for pair in text.split_whitespace() {
            let (src, tgt) = pair
                .split_once('-')
                .ok_or_else(|| anyhow!("Malformed alignment pair: {}", pair))?;
            let src = src
                .parse::<usize>()
                .map_err(|_| anyhow!("Malformed source index in pair: {}", pair))?;
            let tgt = tgt
                .parse::<usize>()
                .map_err(|_| anyhow!("Malformed target index in pair: {}", pair))?;
            points.push((src, tgt));
        }
        Ok(Alignment { points })
    }

    /// Render in the Pharaoh text format
    pub fn to_pharaoh(&self) -> String {
        self.points
            .iter()
            .map(|(s, t)| format!("{}-{}", s, t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Correspondence pairs in insertion order
    pub fn points(&self) -> &[(usize, usize)] {
        &self.points
    }

    /// Number of correspondence pairs
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the alignment holds no pairs
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the pair `(source, target)` is present
    pub fn contains(&self, source: usize, target: usize) -> bool {
        self.points.contains(&(source, target))
    }

    /// Alignment with both sides swapped
    pub fn inverted(&self) -> Self {
        Alignment {
            points: self.points.iter().map(|&(s, t)| (t, s)).collect(),
        }
    }

    /// Check that every pair references valid word indices
    pub fn validate(&self, source_len: usize, target_len: usize) -> Result<(), ProjectionError> {
        for &(source, target) in &self.points {
            if source >= source_len || target >= target_len {
                return Err(ProjectionError::InvalidAlignmentPoint {
                    source_index: source,
                    target_index: target,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pharaoh())
    }
}

impl<'a> IntoIterator for &'a Alignment {
    type Item = &'a (usize, usize);
    type IntoIter = std::slice::Iter<'a, (usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

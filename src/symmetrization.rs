/*!
 * Alignment symmetrization strategies.
 *
 * A decoder produces two directional word alignments (source-to-target and
 * target-to-source); a symmetrization strategy merges them into one. The
 * available strategies form a closed registry resolved by name at
 * configuration time; an unknown name is a configuration error, never a
 * silent fallback.
 */

use std::collections::HashSet;
use std::str::FromStr;

use crate::errors::ConfigError;
use crate::model::Alignment;

/// Neighbourhood used by the grow-diag step: adjacent and diagonal points
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Strategy for merging two directional alignments into one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetrizationStrategy {
    /// Keep every pair present in either direction
    Union,
    /// Keep only pairs present in both directions
    Intersection,
    /// Intersection grown towards the union along neighbouring points, then
    /// completed with union pairs whose both sides are still unaligned
    GrowDiagFinalAnd,
}

impl SymmetrizationStrategy {
    /// Canonical identifier of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::GrowDiagFinalAnd => "grow-diag-final-and",
        }
    }

    /// All registered strategies
    pub fn all() -> &'static [SymmetrizationStrategy] {
        &[
            Self::Union,
            Self::Intersection,
            Self::GrowDiagFinalAnd,
        ]
    }

    /// Merge the forward (source-to-target) and backward (target-to-source,
    /// already expressed in source-to-target coordinates) alignments.
    ///
    /// Pure and stateless: the result depends only on the two inputs.
    pub fn merge(&self, forward: &Alignment, backward: &Alignment) -> Alignment {
        match self {
            Self::Union => union(forward, backward),
            Self::Intersection => intersection(forward, backward),
            Self::GrowDiagFinalAnd => grow_diag_final_and(forward, backward),
        }
    }
}

impl FromStr for SymmetrizationStrategy {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "union" => Ok(Self::Union),
            "intersection" => Ok(Self::Intersection),
            "grow-diag-final-and" | "growdiagfinaland" => Ok(Self::GrowDiagFinalAnd),
            _ => Err(ConfigError::InvalidStrategy(name.to_string())),
        }
    }
}

fn union(forward: &Alignment, backward: &Alignment) -> Alignment {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut points = Vec::new();
    for &point in forward.points().iter().chain(backward.points()) {
        if seen.insert(point) {
            points.push(point);
        }
    }
    Alignment::from_pairs(points)
}

fn intersection(forward: &Alignment, backward: &Alignment) -> Alignment {
    let backward_set: HashSet<(usize, usize)> = backward.points().iter().copied().collect();
    let points = forward
        .points()
        .iter()
        .copied()
        .filter(|point| backward_set.contains(point))
        .collect();
    Alignment::from_pairs(points)
}

fn grow_diag_final_and(forward: &Alignment, backward: &Alignment) -> Alignment {
    let union_set: HashSet<(usize, usize)> = forward
        .points()
        .iter()
        .chain(backward.points())
        .copied()
        .collect();

    let mut merged: Vec<(usize, usize)> = intersection(forward, backward).points().to_vec();
    let mut merged_set: HashSet<(usize, usize)> = merged.iter().copied().collect();
    let mut aligned_source: HashSet<usize> = merged.iter().map(|&(s, _)| s).collect();
    let mut aligned_target: HashSet<usize> = merged.iter().map(|&(_, t)| t).collect();

    // Grow the intersection towards the union: a neighbour of an already
    // merged point is adopted when it brings in an unaligned word on either
    // side. Repeats until a full pass adds nothing.
    loop {
        let mut grown = false;
        let current: Vec<(usize, usize)> = merged.clone();
        for (source, target) in current {
            for (ds, dt) in NEIGHBOURS {
                let Some(s) = source.checked_add_signed(ds) else {
                    continue;
                };
                let Some(t) = target.checked_add_signed(dt) else {
                    continue;
                };
                let candidate = (s, t);
                if !union_set.contains(&candidate) || merged_set.contains(&candidate) {
                    continue;
                }
                if !aligned_source.contains(&s) || !aligned_target.contains(&t) {
                    merged.push(candidate);
                    merged_set.insert(candidate);
                    aligned_source.insert(s);
                    aligned_target.insert(t);
                    grown = true;
                }
            }
        }
        if !grown {
            break;
        }
    }

    // Final-and: union pairs whose source and target are both still
    // unaligned are adopted as-is.
    for &(source, target) in forward.points().iter().chain(backward.points()) {
        if !aligned_source.contains(&source) && !aligned_target.contains(&target) {
            merged.push((source, target));
            merged_set.insert((source, target));
            aligned_source.insert(source);
            aligned_target.insert(target);
        }
    }

    merged.sort_unstable();
    Alignment::from_pairs(merged)
}

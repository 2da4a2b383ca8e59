//! Fold engine
//!
//! Merges every pair of conversations whose identifier sets intersect,
//! transitively, until the collection is a partition of all identifiers
//! into disjoint, maximal groups.
//!
//! ## Main Entry Points
//!
//! - `fold()`: union-find fold, returns a new collection
//! - `fold_with()`: fold with an explicit [`FoldStrategy`]
//! - `fold_in_place()`: replaces the caller's collection with the folded one
//!
//! Both strategies produce the same partition, with survivors ordered by
//! their first member in the input. Identifiers reused across unrelated
//! threads will glue those threads together; folding has no way to tell
//! them apart.

mod disjoint_set;
mod pairwise;
mod union_find;

use std::fmt;
use std::str::FromStr;

use super::conversation::Conversation;
use crate::error::FoldError;

pub use disjoint_set::DisjointSet;
pub use pairwise::fold_pairwise;
pub use union_find::fold_union_find;

/// Which algorithm computes the fold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldStrategy {
    /// Disjoint-set keyed by message identifier, near-linear
    #[default]
    UnionFind,
    /// Repeated pairwise scan until fixpoint, quadratic
    Pairwise,
}

impl fmt::Display for FoldStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FoldStrategy::UnionFind => "union-find",
            FoldStrategy::Pairwise => "pairwise",
        })
    }
}

impl FromStr for FoldStrategy {
    type Err = FoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union-find" | "unionfind" | "union_find" => Ok(FoldStrategy::UnionFind),
            "pairwise" | "naive" => Ok(FoldStrategy::Pairwise),
            _ => Err(FoldError::InvalidStrategy(s.to_string())),
        }
    }
}

/// Fold conversations using the default union-find strategy
pub fn fold(conversations: Vec<Conversation>) -> Vec<Conversation> {
    fold_union_find(conversations)
}

pub fn fold_with(strategy: FoldStrategy, conversations: Vec<Conversation>) -> Vec<Conversation> {
    match strategy {
        FoldStrategy::UnionFind => fold_union_find(conversations),
        FoldStrategy::Pairwise => fold_pairwise(conversations),
    }
}

/// Fold a collection the caller keeps ownership of
pub fn fold_in_place(conversations: &mut Vec<Conversation>) {
    let taken = std::mem::take(conversations);
    *conversations = fold(taken);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("union-find".parse::<FoldStrategy>().unwrap(), FoldStrategy::UnionFind);
        assert_eq!("UnionFind".parse::<FoldStrategy>().unwrap(), FoldStrategy::UnionFind);
        assert_eq!(" pairwise ".parse::<FoldStrategy>().unwrap(), FoldStrategy::Pairwise);
        assert_eq!("naive".parse::<FoldStrategy>().unwrap(), FoldStrategy::Pairwise);
        assert!("".parse::<FoldStrategy>().is_err());
        assert!(matches!(
            "jwz".parse::<FoldStrategy>(),
            Err(FoldError::InvalidStrategy(value)) if value == "jwz"
        ));
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in [FoldStrategy::UnionFind, FoldStrategy::Pairwise] {
            assert_eq!(strategy.to_string().parse::<FoldStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_fold_in_place() {
        let mut conversations = vec![
            Conversation::from_ids(["A", "B"]),
            Conversation::from_ids(["B", "C"]),
        ];

        fold_in_place(&mut conversations);

        assert_eq!(conversations, vec![Conversation::from_ids(["A", "B", "C"])]);
    }

    #[test]
    fn test_fold_with_single_singleton() {
        for strategy in [FoldStrategy::UnionFind, FoldStrategy::Pairwise] {
            let folded = fold_with(strategy, vec![Conversation::from_ids(["X"])]);
            assert_eq!(folded, vec![Conversation::from_ids(["X"])]);
        }
    }
}

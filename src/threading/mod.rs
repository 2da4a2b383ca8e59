//! Conversation folding
//!
//! This module groups mail messages into conversations by merging the sets of
//! message identifiers they share. Each message seeds one [`Conversation`]
//! holding its own Message-ID plus every identifier in its References chain;
//! the fold then merges any two conversations whose sets intersect until no
//! two survivors overlap.
//!
//! ## Folding Strategy
//!
//! Folding is connected components over a graph whose nodes are message
//! identifiers and whose edges join ids that appear in the same conversation:
//!
//! 1. **Union-find** (default): disjoint-set keyed by identifier, near-linear
//! 2. **Pairwise**: repeated scan for intersecting pairs until fixpoint
//!
//! Both give the same partition regardless of input order. This is not a JWZ
//! threader: there is no subject matching and no parent/child tree.
//!
//! ## Module Structure
//!
//! - `conversation`: the identifier-set container and its input contract
//! - `fold`: the fold engine and its two strategies
//! - `batch`: folding many independent collections, with statistics

pub mod batch;
pub mod conversation;
pub mod fold;

// Re-export main types and functions
pub use batch::{FoldOutcome, FoldStats, fold_batches, fold_with_stats};
pub use conversation::{Conversation, ThreadableMessage};
pub use fold::{FoldStrategy, fold, fold_in_place, fold_with};

//! Folding many independent collections at once
//!
//! Each batch (typically one folder or mailbox page) is folded on its own
//! private collection, so batches can run on the rayon pool without any
//! shared state. A single fold is never split across threads.

use std::time::Instant;

use rayon::prelude::*;

use super::conversation::Conversation;
use super::fold::{FoldStrategy, fold_with};
use crate::config::FoldConfig;

/// Statistics for one or more folds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Conversations handed to the fold
    pub conversations_in: usize,
    /// Conversations left after folding
    pub conversations_out: usize,
    /// Number of conversations absorbed into another
    pub merges: usize,
    /// Distinct message identifiers across the output
    pub message_ids: usize,
    /// Size of the largest output conversation
    pub largest: usize,
}

impl FoldStats {
    fn collect(conversations_in: usize, folded: &[Conversation]) -> Self {
        FoldStats {
            conversations_in,
            conversations_out: folded.len(),
            merges: conversations_in - folded.len(),
            // Output sets are disjoint, so plain summing counts distinct ids
            message_ids: folded.iter().map(Conversation::len).sum(),
            largest: folded.iter().map(Conversation::len).max().unwrap_or(0),
        }
    }

    /// Merge another FoldStats into this one by summing all counts.
    pub fn merge(&mut self, other: &FoldStats) {
        self.conversations_in += other.conversations_in;
        self.conversations_out += other.conversations_out;
        self.merges += other.merges;
        self.message_ids += other.message_ids;
        self.largest = self.largest.max(other.largest);
    }
}

/// Result of folding one batch
#[derive(Debug, Clone)]
pub struct FoldOutcome {
    pub conversations: Vec<Conversation>,
    pub stats: FoldStats,
}

/// Fold one collection and report what happened
pub fn fold_with_stats(strategy: FoldStrategy, conversations: Vec<Conversation>) -> FoldOutcome {
    let start_time = Instant::now();
    let conversations_in = conversations.len();

    let folded = fold_with(strategy, conversations);
    let stats = FoldStats::collect(conversations_in, &folded);

    log::debug!(
        "{} fold: {} conversations -> {} ({} merges) in {:.2}ms",
        strategy,
        stats.conversations_in,
        stats.conversations_out,
        stats.merges,
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    FoldOutcome {
        conversations: folded,
        stats,
    }
}

/// Fold every batch independently.
///
/// Runs on the rayon pool once there are at least
/// `config.parallel_threshold` batches. Output order matches input order.
pub fn fold_batches(config: &FoldConfig, batches: Vec<Vec<Conversation>>) -> Vec<FoldOutcome> {
    let start_time = Instant::now();
    let batch_count = batches.len();
    let strategy = config.strategy;

    let outcomes: Vec<FoldOutcome> = if batch_count >= config.parallel_threshold.max(1) {
        batches
            .into_par_iter()
            .map(|batch| fold_with_stats(strategy, batch))
            .collect()
    } else {
        batches
            .into_iter()
            .map(|batch| fold_with_stats(strategy, batch))
            .collect()
    };

    let mut totals = FoldStats::default();
    for outcome in &outcomes {
        totals.merge(&outcome.stats);
    }

    log::info!(
        "folded {} batches: {} conversations -> {} in {:.2}ms",
        batch_count,
        totals.conversations_in,
        totals.conversations_out,
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    outcomes
}

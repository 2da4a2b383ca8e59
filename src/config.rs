use std::env;

use crate::threading::FoldStrategy;

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_strategy(key: &str, default: FoldStrategy) -> FoldStrategy {
    match env::var(key) {
        Ok(value) => value.parse::<FoldStrategy>().unwrap_or_else(|err| {
            log::warn!("{}: {}. Falling back to {}.", key, err, default);
            default
        }),
        Err(_) => default,
    }
}

/// Runtime configuration for folding.
#[derive(Debug, Clone)]
pub struct FoldConfig {
    /// Algorithm used for every fold
    pub strategy: FoldStrategy,
    /// Minimum number of batches before batch folding goes parallel
    pub parallel_threshold: usize,
}

impl FoldConfig {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4;

    pub fn from_env() -> Self {
        Self {
            strategy: env_strategy("FOLD_STRATEGY", FoldStrategy::default()),
            parallel_threshold: env_usize(
                "FOLD_PARALLEL_THRESHOLD",
                Self::DEFAULT_PARALLEL_THRESHOLD,
            ),
        }
    }

    pub fn with_strategy(mut self, strategy: FoldStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use conversation_fold::config::FoldConfig;
use conversation_fold::models::{
    ConversationSummary, MessageRecord, conversations_from_records, load_records,
    load_records_from_path,
};
use conversation_fold::threading::{FoldStrategy, fold_with_stats};

#[derive(Parser, Debug)]
#[command(
    name = "fold_conversations",
    about = "Fold message records into conversations by shared Message-IDs"
)]
struct Args {
    /// JSON file holding an array of message records (stdin when omitted).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Fold strategy (`union-find` or `pairwise`); overrides FOLD_STRATEGY.
    #[arg(long)]
    strategy: Option<FoldStrategy>,

    /// Pretty-print the resulting JSON.
    #[arg(long)]
    pretty: bool,

    /// Log fold statistics.
    #[arg(long)]
    stats: bool,
}

fn read_records(args: &Args) -> Result<Vec<MessageRecord>, conversation_fold::FoldError> {
    match &args.input {
        Some(path) => load_records_from_path(path),
        None => load_records(io::stdin().lock()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    let mut config = FoldConfig::from_env();
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy);
    }

    let records = match read_records(&args) {
        Ok(records) => records,
        Err(err) => {
            writeln!(io::stderr(), "error: {err}")?;
            std::process::exit(1);
        }
    };

    let outcome = fold_with_stats(config.strategy, conversations_from_records(&records));

    if args.stats {
        log::info!(
            "{} fold: {} messages -> {} conversations, {} message ids, largest {}",
            config.strategy,
            outcome.stats.conversations_in,
            outcome.stats.conversations_out,
            outcome.stats.message_ids,
            outcome.stats.largest
        );
    }

    let summaries: Vec<ConversationSummary> = outcome
        .conversations
        .iter()
        .map(ConversationSummary::from)
        .collect();

    let json = if args.pretty {
        serde_json::to_string_pretty(&summaries)?
    } else {
        serde_json::to_string(&summaries)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

//! Knowledge search command for CLI.

use clap::Args;
use cyclewise_core::PhaseLabel;

use super::knowledge_engine;

#[derive(Args)]
pub struct SearchArgs {
    /// Search terms
    query: String,
    /// Restrict to one phase (default: all phases)
    #[arg(long)]
    phase: Option<String>,
    /// Maximum number of results (default: from config)
    #[arg(long)]
    limit: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SearchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = knowledge_engine()?;
    let limit = args.limit.unwrap_or(config.advice.retrieval_limit);

    let hits = match &args.phase {
        Some(phase) => engine.search_phase(&args.query, &PhaseLabel::parse(phase), limit),
        None => engine.search(&args.query, limit),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No matches.");
        return Ok(());
    }
    for hit in &hits {
        println!(
            "[{:.1}] {}/{}.{}: {}",
            hit.relevance_score,
            hit.phase,
            hit.section.as_str(),
            hit.key,
            hit.content
        );
    }
    Ok(())
}

//! Task advice command for CLI.

use clap::Args;
use cyclewise_core::{AdviceEngine, AdviceRequest, AdviceSource, Config};

#[derive(Args)]
pub struct AdviseArgs {
    /// Task description
    task: String,
    /// Cycle phase (menstruation, follicular, ovulation, luteal)
    #[arg(long)]
    phase: String,
    /// Response language: ru or en (default: from config)
    #[arg(long)]
    locale: Option<String>,
    /// Skip the generator and answer from the fallback rules
    #[arg(long)]
    offline: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: AdviseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if args.offline {
        config.generator.enabled = false;
    }

    let locale = args
        .locale
        .unwrap_or_else(|| config.advice.default_locale.as_str().to_string());
    let request = AdviceRequest::new(args.task, &args.phase, &locale)?;

    let engine = AdviceEngine::from_config(&config)?;
    let advice = engine.advise(&request).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&advice)?);
        return Ok(());
    }

    let source = match advice.source {
        AdviceSource::Generated => "generated",
        AdviceSource::Fallback => "fallback",
    };
    println!("Phase:      {}", request.phase());
    println!("Verdict:    {}", advice.verdict);
    println!("Reason:     {}", advice.reason);
    println!("Suggestion: {}", advice.suggestion);
    println!("Confidence: {:.2} ({source})", advice.confidence);
    Ok(())
}

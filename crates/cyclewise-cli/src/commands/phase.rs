//! Phase metadata commands for CLI.

use clap::Subcommand;
use cyclewise_core::PhaseProfile;

use super::knowledge_engine;

#[derive(Subcommand)]
pub enum PhaseAction {
    /// List all phases
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one phase's profile
    Show {
        /// Phase key (e.g. "ovulation")
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PhaseAction) -> Result<(), Box<dyn std::error::Error>> {
    let (engine, _) = knowledge_engine()?;

    match action {
        PhaseAction::List { json } => {
            if json {
                let phases: serde_json::Map<String, serde_json::Value> = engine
                    .phases()
                    .map(|(phase, profile)| {
                        Ok((phase.as_str().to_string(), serde_json::to_value(profile)?))
                    })
                    .collect::<Result<_, serde_json::Error>>()?;
                println!("{}", serde_json::to_string_pretty(&phases)?);
            } else {
                for (phase, profile) in engine.phases() {
                    println!("{:<14} days {:<6} {}", phase.as_str(), profile.days, profile.description);
                }
            }
        }
        PhaseAction::Show { key, json } => {
            let profile = engine
                .phase_details(&key)
                .ok_or_else(|| format!("phase not found: {key}"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(profile)?);
            } else {
                print_profile(profile);
            }
        }
    }
    Ok(())
}

fn print_profile(profile: &PhaseProfile) {
    println!("{}", profile.description);
    println!("Days:     {}", profile.days);
    println!("Hormones: {}", profile.hormones);

    let print_list = |title: &str, items: &[String]| {
        if !items.is_empty() {
            println!("\n{title}:");
            for item in items {
                println!("  - {item}");
            }
        }
    };
    print_list("Physical effects", &profile.physical_effects);
    print_list("Cognitive effects", &profile.cognitive_effects);
    print_list("Productivity tips", &profile.productivity_tips);

    let recs = &profile.task_recommendations;
    print_list("Good for", &recs.good);
    print_list("Fine for", &recs.ok);
    print_list("Avoid", &recs.avoid);
}

pub mod advise;
pub mod config;
pub mod health;
pub mod phase;
pub mod search;

use cyclewise_core::{AdviceEngine, Config};

/// Engine for knowledge-only commands: configured knowledge, no generator.
pub fn knowledge_engine() -> Result<(AdviceEngine, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut offline = config.clone();
    offline.generator.enabled = false;
    let engine = AdviceEngine::from_config(&offline)?;
    Ok((engine, config))
}

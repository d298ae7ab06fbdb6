use cyclewise_core::{AdviceEngine, Config};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = AdviceEngine::from_config(&config)?;
    let health = engine.health();

    if json {
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    println!("Status:    {}", health.status);
    println!(
        "Generator: {}",
        health.generator.as_deref().unwrap_or("not configured (fallback only)")
    );
    println!("Fallback:  {}", health.fallback_strategy.as_str());
    println!("Phases:    {}", health.knowledge_phases);
    Ok(())
}

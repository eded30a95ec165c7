use statedge_core::{resolve, AccessTier, Config};
use std::path::Path;

fn build_resolution(config: &Config, tier: AccessTier) -> anyhow::Result<serde_json::Value> {
    let destination = resolve(tier, &config.destinations)?;

    Ok(serde_json::json!({
        "tier": tier,
        "kind": destination.kind(),
        "url": destination.url(),
        "message": destination.message(),
    }))
}

pub fn run(tier: AccessTier, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let resolution = build_resolution(&config, tier)?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

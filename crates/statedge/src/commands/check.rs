use statedge_core::{resolve, AccessTier, Config, DestinationConfig, Target};
use std::path::Path;
use url::Url;

fn check_tier(config: &Config, tier: AccessTier) -> String {
    let destination = match resolve(tier, &config.destinations) {
        Ok(destination) => destination,
        Err(_) => return format!("MISS (set {})", DestinationConfig::env_key(tier)),
    };

    match &destination.target {
        Target::DirectUrl(value) => match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                format!("OK   {}", destination.url())
            }
            _ => format!("WARN (not an absolute http(s) URL: {})", value),
        },
        Target::ExperienceId(id) if id.contains("://") => format!(
            "WARN (looks like a URL, will be composed as {})",
            destination.url()
        ),
        Target::ExperienceId(_) => format!("OK   {}", destination.url()),
    }
}

fn build_check(config: &Config) -> (String, usize) {
    let mut sections = Vec::new();
    sections.push("Destination Check\n=================".to_string());
    sections.push(format!("  build mode: {:?}\n", config.build_mode));

    let mut missing = 0;
    for tier in AccessTier::ALL {
        let status = check_tier(config, tier);
        if status.starts_with("MISS") {
            missing += 1;
        }
        sections.push(format!("  {:<8} {}", tier.as_str(), status));
    }

    sections.push(format!("\n{} tiers missing a destination", missing));
    (sections.join("\n"), missing)
}

pub fn run(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let (report, missing) = build_check(&config);
    println!("{}", report);

    if missing > 0 {
        anyhow::bail!("{} tier(s) have no destination configured", missing);
    }
    Ok(())
}

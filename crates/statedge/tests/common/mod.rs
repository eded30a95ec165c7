use statedge_core::{AccessTier, BuildMode, Config, DestinationConfig, SessionSignal};

pub fn sample_config() -> Config {
    Config {
        destinations: DestinationConfig::new()
            .with(AccessTier::Free, "exp_0BlnluOzcChVAc")
            .with(AccessTier::Premium, "exp_tqUVHEr2J7Cp5C")
            .with(AccessTier::Plus, "https://whop.com/win-now/statedge/"),
        build_mode: BuildMode::Development,
    }
}

pub fn signed_in() -> SessionSignal {
    SessionSignal::ready(Some("user_42".to_string()))
}

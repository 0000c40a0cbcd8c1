use engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, GameConfig, CONFIG_ENV_VAR};

use super::scene::GameplayScene;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    init_tracing();
    info!("=== Above the Clouds Startup ===");

    let game_config = GameConfig::from_env()?;
    info!(
        config_env = CONFIG_ENV_VAR,
        world_width = game_config.world_width,
        world_height = game_config.world_height,
        items = game_config.item_count,
        seed = ?game_config.seed,
        "config_loaded"
    );

    Ok(AppWiring {
        config: LoopConfig::default(),
        scene: Box::new(GameplayScene::new(game_config.world_settings())),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

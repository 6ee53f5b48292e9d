mod leaderboard_config;
mod main_config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use leaderboard_config::LeaderboardConfig;
pub use main_config::{get_config_manager, resolve_next_to_executable, Config};

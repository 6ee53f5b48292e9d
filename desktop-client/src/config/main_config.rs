use common::config::Validate;
use common::games::snake::SnakeSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ConfigManager, FileContentConfigProvider, LeaderboardConfig, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "neon_snake_config.yaml";

/// Relative paths resolve against the executable's directory.
pub fn resolve_next_to_executable(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(path);
    }
    path.to_path_buf()
}

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    let path = path_override.unwrap_or(CONFIG_FILE_NAME);
    ConfigManager::from_yaml_file(resolve_next_to_executable(path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub game: SnakeSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.leaderboard.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_neon_snake_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_with_manager() {
        let config = Config {
            player_name: Some("Ayse".to_string()),
            ..Config::default()
        };
        let file_path = get_temp_file_path();
        let manager: ConfigManager<_, Config, _> = ConfigManager::from_yaml_file(&file_path);

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        manager.invalidate();
        assert_eq!(manager.get_config().unwrap(), config);

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager: ConfigManager<_, Config, _> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(&file_path);
        content_provider
            .set_config_content("player_name: Mehmet\ngame:\n  tick_interval_ms: 80\n")
            .unwrap();

        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        let config = manager.get_config().unwrap();
        assert_eq!(config.player_name.as_deref(), Some("Mehmet"));
        assert_eq!(config.game.tick_interval_ms, 80);
        assert_eq!(config.game.field_width, 40);
        assert_eq!(config.leaderboard, LeaderboardConfig::default());

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            game:
              field_width: 3
              field_height: 3
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(&file_path);
        content_provider
            .set_config_content(invalid_config_content)
            .unwrap();

        let manager: ConfigManager<_, Config, _> =
            ConfigManager::new(content_provider, YamlConfigSerializer::new());
        assert!(manager.get_config().is_err());

        std::fs::remove_file(&file_path).unwrap();
    }

    #[test]
    fn test_empty_leaderboard_location_is_rejected() {
        let config = Config {
            leaderboard: LeaderboardConfig { location: "  ".to_string() },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_absolute_path_is_kept() {
        let absolute = std::env::temp_dir().join("neon.yaml");
        let resolved = resolve_next_to_executable(absolute.to_str().unwrap());
        assert_eq!(resolved, absolute);
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_common::games::tictactoe::BotType;

const CONFIG_FILE_NAME: &str = "tictactoe_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 5000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<&Path>,
) -> ConfigManager<FileContentConfigProvider, CliConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    VsBot,
    PvP,
}

/// Who takes X (and so moves first) in a game against the bot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstPlayerMode {
    #[default]
    Human,
    Bot,
    Random,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub mode: GameMode,
    pub bot_type: BotType,
    pub first_player: FirstPlayerMode,
    #[serde(default)]
    pub bot_delay_ms: u64,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_ms must not exceed {} (got {})",
                MAX_BOT_DELAY_MS, self.bot_delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::VsBot,
            bot_type: BotType::Minimax,
            first_player: FirstPlayerMode::Human,
            bot_delay_ms: 250,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct CliConfig {
    pub game: GameConfig,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        Ok(())
    }
}

//! Application configuration.
//!
//! Preferences load from an optional TOML file; anything missing falls
//! back to compiled-in defaults. Key bindings are fixed at the defaults
//! below (configurable bindings are a separate concern handled outside
//! this crate's core).

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::model::{ItemKind, DEFAULT_PAGE_SIZE};

pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 220;
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub mouse_enabled: bool,
    pub double_click_ms: u64,
    pub page_size: usize,
    /// Item types queried on search, one fetch per type.
    pub search_types: Vec<String>,
    pub history_limit: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_enabled: true,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
            page_size: DEFAULT_PAGE_SIZE,
            search_types: vec![
                "artists".to_string(),
                "albums".to_string(),
                "songs".to_string(),
                "playlists".to_string(),
            ],
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl PlayerConfig {
    /// Parsed searchable item types; unknown names are logged and skipped.
    /// An empty result falls back to the default set.
    pub fn search_kinds(&self) -> Vec<ItemKind> {
        let mut kinds: Vec<ItemKind> = Vec::new();
        for name in &self.search_types {
            match ItemKind::parse(name) {
                Some(kind) if !kinds.contains(&kind) => kinds.push(kind),
                Some(_) => {}
                None => tracing::warn!(name, "unknown search type in config"),
            }
        }
        if kinds.is_empty() {
            kinds = vec![
                ItemKind::Artist,
                ItemKind::Album,
                ItemKind::Song,
                ItemKind::Playlist,
            ];
        }
        kinds
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mellow").join("config.toml"))
    }

    /// Load from the config file if present, otherwise defaults.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Fixed key bindings. Playback keys are deliberately non-character keys
/// so they can be intercepted in every state, including while typing a
/// search query.
pub struct KeyBinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub search: KeyCode,
    pub queue: KeyCode,
    pub history: KeyCode,
    pub toggle_focus: KeyCode,

    pub play_pause: KeyCode,
    pub stop: KeyCode,
    pub previous: KeyCode,
    pub next: KeyCode,
    pub seek_backward: KeyCode,
    pub seek_forward: KeyCode,
    pub volume_down: KeyCode,
    pub volume_up: KeyCode,
}

impl Default for KeyBinds {
    fn default() -> Self {
        Self {
            quit: KeyCode::Char('q'),
            help: KeyCode::F(1),
            search: KeyCode::F(2),
            queue: KeyCode::F(3),
            history: KeyCode::F(4),
            toggle_focus: KeyCode::Tab,

            play_pause: KeyCode::F(5),
            stop: KeyCode::F(6),
            previous: KeyCode::F(7),
            next: KeyCode::F(8),
            seek_backward: KeyCode::F(9),
            seek_forward: KeyCode::F(10),
            volume_down: KeyCode::F(11),
            volume_up: KeyCode::F(12),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_survive_a_toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.player.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(parsed.player.double_click_ms, DEFAULT_DOUBLE_CLICK_MS);
        assert!(parsed.player.mouse_enabled);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let parsed: Config = toml::from_str("[player]\npage_size = 25\n").unwrap();
        assert_eq!(parsed.player.page_size, 25);
        assert_eq!(parsed.player.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn missing_file_yields_defaults_and_a_file_is_honoured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(config.player.mouse_enabled);

        std::fs::write(&path, "[player]\nmouse_enabled = false\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(!config.player.mouse_enabled);
    }

    #[test]
    fn unknown_search_types_are_skipped() {
        let player = PlayerConfig {
            search_types: vec!["songs".into(), "videos".into(), "artists".into()],
            ..Default::default()
        };
        assert_eq!(player.search_kinds(), vec![ItemKind::Song, ItemKind::Artist]);
    }

    #[test]
    fn empty_search_types_fall_back_to_defaults() {
        let player = PlayerConfig {
            search_types: vec!["videos".into()],
            ..Default::default()
        };
        assert_eq!(player.search_kinds().len(), 4);
    }
}

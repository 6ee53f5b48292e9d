use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};
use super::board::{Leaderboard, SubmitOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    Storage(String),
    Format(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::Storage(e) => write!(f, "Leaderboard storage error: {}", e),
            LeaderboardError::Format(e) => write!(f, "Leaderboard format error: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {}

pub trait LeaderboardStore {
    fn load(&self) -> Result<Leaderboard, LeaderboardError>;
    fn save(&self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError>;

    /// Loads, submits and saves in one go.
    fn record(
        &self,
        name: &str,
        score: u32,
        achieved_at: DateTime<Utc>,
    ) -> Result<(SubmitOutcome, Leaderboard), LeaderboardError> {
        let mut leaderboard = self.load()?;
        let outcome = leaderboard.submit(name, score, achieved_at);
        self.save(&leaderboard)?;
        Ok((outcome, leaderboard))
    }
}

/// Stores the table as one serialized document.
pub struct DocumentLeaderboardStore<TContentProvider, TSerializer = YamlConfigSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<Leaderboard>,
{
    content_provider: TContentProvider,
    serializer: TSerializer,
}

pub type FileLeaderboardStore = DocumentLeaderboardStore<FileContentConfigProvider>;

impl FileLeaderboardStore {
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TContentProvider, TSerializer> DocumentLeaderboardStore<TContentProvider, TSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<Leaderboard>,
{
    pub fn new(content_provider: TContentProvider, serializer: TSerializer) -> Self {
        Self {
            content_provider,
            serializer,
        }
    }
}

impl<TContentProvider, TSerializer> LeaderboardStore
    for DocumentLeaderboardStore<TContentProvider, TSerializer>
where
    TContentProvider: ConfigContentProvider,
    TSerializer: ConfigSerializer<Leaderboard>,
{
    fn load(&self) -> Result<Leaderboard, LeaderboardError> {
        let content = self
            .content_provider
            .get_config_content()
            .map_err(LeaderboardError::Storage)?;

        let Some(content) = content else {
            return Ok(Leaderboard::new());
        };
        if content.trim().is_empty() {
            return Ok(Leaderboard::new());
        }

        let stored: Leaderboard = self
            .serializer
            .deserialize(&content)
            .map_err(LeaderboardError::Format)?;
        Ok(Leaderboard::from_entries(stored.entries().to_vec()))
    }

    fn save(&self, leaderboard: &Leaderboard) -> Result<(), LeaderboardError> {
        let content = self
            .serializer
            .serialize(leaderboard)
            .map_err(LeaderboardError::Format)?;
        self.content_provider
            .set_config_content(&content)
            .map_err(LeaderboardError::Storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;
    use chrono::TimeZone;

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_neon_snake_leaderboard_{}.yaml", random_number));
        path
    }

    fn memory_store() -> DocumentLeaderboardStore<MemoryContentProvider> {
        DocumentLeaderboardStore::new(MemoryContentProvider::new(), YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_file_loads_empty_board() {
        let store = FileLeaderboardStore::from_yaml_file("this_leaderboard_does_not_exist.yaml");
        let board = store.load().unwrap();
        assert!(board.is_empty());
    }

    #[test]
    fn test_record_persists_between_loads() {
        let store = memory_store();
        let when = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let (outcome, _) = store.record("Ayse", 120, when).unwrap();
        assert!(outcome.new_record);
        store.record("Mehmet", 340, when).unwrap();

        let board = store.load().unwrap();
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Mehmet", "Ayse"]);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = get_temp_file_path();
        let store = FileLeaderboardStore::from_yaml_file(path.clone());
        let when = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        store.record("Ayse", 90, when).unwrap();

        let reopened = FileLeaderboardStore::from_yaml_file(path.clone());
        let board = reopened.load().unwrap();
        assert_eq!(board.entries().len(), 1);
        assert_eq!(board.entries()[0].score, 90);
        assert_eq!(board.entries()[0].timestamp, "2026-03-01T12:00:00.000Z");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_stored_document_is_a_plain_list() {
        let store = memory_store();
        let when = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        store.record("Ayse", 10, when).unwrap();
        let content = store.content_provider.get_config_content().unwrap().unwrap();
        assert!(content.starts_with("- name: Ayse"));
    }

    #[test]
    fn test_unsorted_file_is_normalized_on_load() {
        let content = "- name: low\n  score: 10\n  timestamp: ''\n- name: high\n  score: 90\n  timestamp: ''\n";
        let store = DocumentLeaderboardStore::new(
            MemoryContentProvider::with_content(content),
            YamlConfigSerializer::new(),
        );
        let board = store.load().unwrap();
        assert_eq!(board.entries()[0].name, "high");
    }

    #[test]
    fn test_corrupt_document_is_format_error() {
        let store = DocumentLeaderboardStore::new(
            MemoryContentProvider::with_content("not: [a, list"),
            YamlConfigSerializer::new(),
        );
        assert!(matches!(store.load(), Err(LeaderboardError::Format(_))));
    }
}

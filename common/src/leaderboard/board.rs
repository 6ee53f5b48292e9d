use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The score made it into the table as it was before submitting.
    pub new_record: bool,
    /// 1-based position after submitting, if the entry was kept.
    pub rank: Option<usize>,
}

/// Top scores, highest first. Equal scores keep submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts and truncates entries that may come from an edited file.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().is_none_or(|last| score > last.score)
    }

    pub fn submit(&mut self, name: &str, score: u32, achieved_at: DateTime<Utc>) -> SubmitOutcome {
        let new_record = self.qualifies(score);

        let entry = LeaderboardEntry {
            name: name.to_string(),
            score,
            timestamp: achieved_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let position = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(position, entry);
        self.entries.truncate(MAX_ENTRIES);

        SubmitOutcome {
            new_record,
            rank: (position < MAX_ENTRIES).then_some(position + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, second).unwrap()
    }

    fn full_board() -> Leaderboard {
        let mut board = Leaderboard::new();
        for i in 0..MAX_ENTRIES as u32 {
            board.submit(&format!("p{}", i), (i + 1) * 100, at(i));
        }
        board
    }

    #[test]
    fn test_entries_sorted_descending() {
        let board = full_board();
        let scores: Vec<u32> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![1000, 900, 800, 700, 600, 500, 400, 300, 200, 100]);
        assert_eq!(board.top_score(), Some(1000));
    }

    #[test]
    fn test_partial_board_always_qualifies() {
        let mut board = Leaderboard::new();
        let outcome = board.submit("Ayse", 0, at(0));
        assert!(outcome.new_record);
        assert_eq!(outcome.rank, Some(1));
    }

    #[test]
    fn test_full_board_requires_beating_last() {
        let mut board = full_board();
        let outcome = board.submit("Tie", 100, at(30));
        assert!(!outcome.new_record);
        assert_eq!(outcome.rank, None);
        assert_eq!(board.entries().len(), MAX_ENTRIES);
        assert!(board.entries().iter().all(|e| e.name != "Tie"));

        let outcome = board.submit("Better", 150, at(31));
        assert!(outcome.new_record);
        assert_eq!(outcome.rank, Some(10));
        assert_eq!(board.entries().last().unwrap().name, "Better");
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut board = Leaderboard::new();
        board.submit("first", 50, at(0));
        board.submit("second", 50, at(1));
        let outcome = board.submit("third", 50, at(2));
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(outcome.rank, Some(3));
    }

    #[test]
    fn test_timestamp_is_iso8601() {
        let mut board = Leaderboard::new();
        board.submit("Ayse", 10, at(5));
        assert_eq!(board.entries()[0].timestamp, "2026-03-01T12:00:05.000Z");
    }

    #[test]
    fn test_from_entries_normalizes() {
        let entries = (0..15)
            .map(|i| LeaderboardEntry {
                name: format!("p{}", i),
                score: i * 10,
                timestamp: String::new(),
            })
            .collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(board.entries().len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(140));
    }
}

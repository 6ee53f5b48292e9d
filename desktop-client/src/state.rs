use common::games::snake::{Direction, GameOverSummary, SnakeSnapshot};
use common::leaderboard::LeaderboardEntry;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum ClientCommand {
    Start { player_name: String },
    Turn { direction: Direction },
    Restart,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum AppState {
    Ready {
        leaderboard: Vec<LeaderboardEntry>,
    },
    InGame {
        snapshot: Option<SnakeSnapshot>,
    },
    GameOver {
        summary: GameOverSummary,
        new_record: bool,
        leaderboard: Vec<LeaderboardEntry>,
        last_snapshot: Option<SnakeSnapshot>,
    },
}

#[derive(Clone)]
pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    error: Arc<Mutex<Option<String>>>,
    context: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(leaderboard: Vec<LeaderboardEntry>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::Ready { leaderboard })),
            error: Arc::new(Mutex::new(None)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_state(&self, state: AppState) {
        *self.state.lock().unwrap() = state;
        self.request_repaint();
    }

    pub fn get_state(&self) -> AppState {
        self.state.lock().unwrap().clone()
    }

    /// Dropped unless a game is on screen, so a frame from an aborted
    /// session cannot overwrite the menu.
    pub fn update_snapshot(&self, snapshot: SnakeSnapshot) {
        {
            let mut state = self.state.lock().unwrap();
            if let AppState::InGame { snapshot: current } = &mut *state {
                *current = Some(snapshot);
            }
        }
        self.request_repaint();
    }

    pub fn last_snapshot(&self) -> Option<SnakeSnapshot> {
        match &*self.state.lock().unwrap() {
            AppState::InGame { snapshot } => snapshot.clone(),
            AppState::GameOver { last_snapshot, .. } => last_snapshot.clone(),
            AppState::Ready { .. } => None,
        }
    }

    pub fn set_error(&self, error: String) {
        *self.error.lock().unwrap() = Some(error);
        self.request_repaint();
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.lock().unwrap().clone()
    }

    pub fn clear_error(&self) {
        *self.error.lock().unwrap() = None;
    }

    pub fn has_context(&self) -> bool {
        self.context.lock().unwrap().is_some()
    }

    pub fn set_context(&self, context: egui::Context) {
        *self.context.lock().unwrap() = Some(context);
    }

    fn request_repaint(&self) {
        if let Some(ctx) = self.context.lock().unwrap().as_ref() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::{GameEndReason, SnakeGameState, SnakeSettings};

    fn snapshot() -> SnakeSnapshot {
        SnakeGameState::new(SnakeSettings::default()).snapshot()
    }

    #[test]
    fn test_snapshot_ignored_outside_game() {
        let shared_state = SharedState::new(vec![]);
        shared_state.update_snapshot(snapshot());
        assert!(matches!(shared_state.get_state(), AppState::Ready { .. }));
        assert!(shared_state.last_snapshot().is_none());
    }

    #[test]
    fn test_snapshot_stored_in_game() {
        let shared_state = SharedState::new(vec![]);
        shared_state.set_state(AppState::InGame { snapshot: None });
        shared_state.update_snapshot(snapshot());
        assert!(shared_state.last_snapshot().is_some());

        let last_snapshot = shared_state.last_snapshot();
        shared_state.set_state(AppState::GameOver {
            summary: GameOverSummary {
                player_name: "Player".to_string(),
                score: 0,
                level: 1,
                reason: GameEndReason::SelfCollision,
            },
            new_record: true,
            leaderboard: vec![],
            last_snapshot,
        });
        assert!(shared_state.last_snapshot().is_some());
    }

    #[test]
    fn test_error_roundtrip() {
        let shared_state = SharedState::new(vec![]);
        shared_state.set_error("boom".to_string());
        assert_eq!(shared_state.get_error().as_deref(), Some("boom"));
        shared_state.clear_error();
        assert!(shared_state.get_error().is_none());
    }
}

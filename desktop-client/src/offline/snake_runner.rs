use chrono::Utc;
use common::games::SessionRng;
use common::games::snake::{GameOverSummary, SnakeSession, SnakeSessionState, SnakeSettings};
use common::leaderboard::{LeaderboardEntry, LeaderboardStore};
use common::log;
use std::future::pending;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::state::{AppState, ClientCommand, SharedState};
use super::LocalBroadcaster;

pub struct RunnerSetup<TStore: LeaderboardStore> {
    pub settings: SnakeSettings,
    pub store: TStore,
    /// Fixed seed for every run; a fresh random seed per run when absent.
    pub seed: Option<u64>,
}

struct ActiveRun {
    session: SnakeSessionState,
    handle: JoinHandle<GameOverSummary>,
}

enum RunnerEvent {
    Finished(Result<GameOverSummary, JoinError>),
    Command(Option<ClientCommand>),
}

async fn wait_for_game_over(active_run: &mut Option<ActiveRun>) -> Result<GameOverSummary, JoinError> {
    match active_run {
        Some(run) => (&mut run.handle).await,
        None => pending().await,
    }
}

fn load_entries<TStore: LeaderboardStore>(shared_state: &SharedState, store: &TStore) -> Vec<LeaderboardEntry> {
    match store.load() {
        Ok(leaderboard) => leaderboard.entries().to_vec(),
        Err(e) => {
            log!("Failed to load leaderboard: {}", e);
            shared_state.set_error(e.to_string());
            vec![]
        }
    }
}

/// Owns the session task. A new run aborts whatever is still running.
pub async fn run_client_loop<TStore: LeaderboardStore>(
    shared_state: SharedState,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
    setup: RunnerSetup<TStore>,
) {
    let mut active_run: Option<ActiveRun> = None;

    loop {
        let event = tokio::select! {
            result = wait_for_game_over(&mut active_run) => RunnerEvent::Finished(result),
            command = command_rx.recv() => RunnerEvent::Command(command),
        };

        match event {
            RunnerEvent::Finished(result) => {
                active_run = None;
                let summary = match result {
                    Ok(summary) => summary,
                    Err(e) => {
                        log!("Snake session failed: {}", e);
                        shared_state.set_error(format!("Game session failed: {}", e));
                        let leaderboard = load_entries(&shared_state, &setup.store);
                        shared_state.set_state(AppState::Ready { leaderboard });
                        continue;
                    }
                };

                let last_snapshot = shared_state.last_snapshot();
                let (new_record, leaderboard) =
                    match setup.store.record(&summary.player_name, summary.score, Utc::now()) {
                        Ok((outcome, leaderboard)) => {
                            if outcome.new_record {
                                log!("[{}] new record: {} points", summary.player_name, summary.score);
                            }
                            (outcome.new_record, leaderboard.entries().to_vec())
                        }
                        Err(e) => {
                            log!("Failed to save leaderboard: {}", e);
                            shared_state.set_error(e.to_string());
                            (false, vec![])
                        }
                    };

                shared_state.set_state(AppState::GameOver {
                    summary,
                    new_record,
                    leaderboard,
                    last_snapshot,
                });
            }

            RunnerEvent::Command(Some(ClientCommand::Start { player_name })) => {
                if !matches!(shared_state.get_state(), AppState::Ready { .. }) {
                    continue;
                }
                if let Some(run) = active_run.take() {
                    run.handle.abort();
                }

                let seed = setup.seed.unwrap_or_else(|| SessionRng::from_random().seed());
                let session = match SnakeSessionState::create(&setup.settings, &player_name, seed) {
                    Ok(session) => session,
                    Err(e) => {
                        log!("Failed to start game: {}", e);
                        shared_state.set_error(e);
                        continue;
                    }
                };
                log!("Starting run with seed {}", seed);

                shared_state.set_state(AppState::InGame { snapshot: None });
                let broadcaster = LocalBroadcaster::new(shared_state.clone());
                let session_for_task = session.clone();
                let handle = tokio::spawn(async move {
                    SnakeSession::run(session_for_task, broadcaster).await
                });
                active_run = Some(ActiveRun { session, handle });
            }

            RunnerEvent::Command(Some(ClientCommand::Turn { direction })) => {
                if let Some(run) = &active_run {
                    SnakeSession::handle_direction(&run.session, direction).await;
                }
            }

            RunnerEvent::Command(Some(ClientCommand::Restart)) => {
                if !matches!(shared_state.get_state(), AppState::GameOver { .. }) {
                    continue;
                }
                let leaderboard = load_entries(&shared_state, &setup.store);
                shared_state.set_state(AppState::Ready { leaderboard });
            }

            RunnerEvent::Command(Some(ClientCommand::Shutdown)) | RunnerEvent::Command(None) => {
                if let Some(run) = active_run.take() {
                    run.handle.abort();
                }
                break;
            }
        }
    }
}

mod command_sender;
mod config;
mod offline;
mod state;
mod ui;

use clap::Parser;
use common::leaderboard::{FileLeaderboardStore, LeaderboardStore};
use common::logger::init_logger;
use common::log;
use eframe::egui;
use tokio::sync::mpsc;

use command_sender::CommandSender;
use config::{get_config_manager, resolve_next_to_executable, Config};
use offline::{run_client_loop, RunnerSetup};
use state::{ClientCommand, SharedState};
use ui::MenuApp;

#[derive(Parser, Debug)]
#[command(name = "neon_snake", about = "Neon snake arcade")]
struct Args {
    /// Config file, relative to the executable unless absolute
    #[arg(long)]
    config: Option<String>,

    /// Seed every run with this value instead of a random one
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file, overrides the configured location
    #[arg(long)]
    leaderboard: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(Some("neon_snake".to_string()));

    let config_manager = get_config_manager(args.config.as_deref());
    let config = match config_manager.get_config() {
        Ok(config) => config,
        Err(e) => {
            log!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let leaderboard_location = args
        .leaderboard
        .unwrap_or_else(|| config.leaderboard.location.clone());
    let store = FileLeaderboardStore::from_yaml_file(resolve_next_to_executable(&leaderboard_location));
    let initial_entries = match store.load() {
        Ok(leaderboard) => leaderboard.entries().to_vec(),
        Err(e) => {
            log!("Failed to load leaderboard: {}", e);
            vec![]
        }
    };

    let shared_state = SharedState::new(initial_entries);
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let command_sender = CommandSender::new(command_tx);

    let setup = RunnerSetup {
        settings: config.game.clone(),
        store,
        seed: args.seed,
    };
    let shared_state_clone = shared_state.clone();
    let runner_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to start runtime: {}", e);
                shared_state_clone.set_error(format!("Failed to start runtime: {}", e));
                return;
            }
        };
        rt.block_on(run_client_loop(shared_state_clone, command_rx, setup));
    });

    let field_size = config.game.field_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                field_size.width as f32 * ui::CELL_SIZE + 40.0,
                field_size.height as f32 * ui::CELL_SIZE + 120.0,
            ])
            .with_title("Neon Snake"),
        ..Default::default()
    };

    let app_sender = command_sender.clone();
    let result = eframe::run_native(
        "Neon Snake",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(MenuApp::new(
                shared_state,
                app_sender,
                config_manager,
                config,
            )))
        }),
    );

    command_sender.send(ClientCommand::Shutdown);
    if runner_thread.join().is_err() {
        log!("Game runner thread panicked");
    }

    result?;
    Ok(())
}

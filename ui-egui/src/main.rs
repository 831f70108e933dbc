// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main entry point for the egui UI

mod app;
mod board_widget;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use yesno_core::{delivery_channel, Game, GameConfig, OpponentMode};
use yesno_network::gateway::{AnswerClient, DEFAULT_ENDPOINT};
use yesno_network::worker;

use crate::app::App;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Two humans share the mouse
    Human,
    /// Computer opponent picking random legal moves
    Random,
    /// Computer opponent maximizing its stone count one ply deep
    Greedy,
}

impl From<Mode> for OpponentMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Human => OpponentMode::Human,
            Mode::Random => OpponentMode::Random,
            Mode::Greedy => OpponentMode::Greedy,
        }
    }
}

#[derive(Parser)]
#[command(name = "yesno-othello")]
#[command(about = "Othello where a remote yes/no service decides which stone you place")]
struct Args {
    /// Opponent driving the NO side
    #[arg(long, value_enum, default_value_t = Mode::Human)]
    mode: Mode,

    /// Download and show the animated answer overlay after each fetch
    #[arg(long)]
    gifs: bool,

    /// Answer service endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seed the game RNG for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let client = AnswerClient::new(args.endpoint.clone())?;
    let (sink, source) = delivery_channel();
    let (backend, _worker_handle) = worker::spawn_worker(client, sink, args.gifs)?;

    let config = GameConfig {
        opponent: args.mode.into(),
        overlays: args.gifs,
        banners: true,
        seed: args.seed,
    };
    let game = Game::new(config, Box::new(backend.clone()), source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(880.0, 640.0)),
        centered: true,
        ..Default::default()
    };
    eframe::run_native(
        "Yes/No Othello",
        options,
        Box::new(move |_cc| Box::new(App::new(game, backend))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run eframe: {e}"))
}

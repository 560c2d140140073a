//! Tile Match Server
//!
//! Authoritative scoring engine for the tile-match game.
//! Runs a demo session end to end and verifies it by replay.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tile_match::{
    VERSION, DEFAULT_MAX_MOVES,
    config::{env_or, EngineConfig},
    core::hash::short_hex,
    economy::RewardDelta,
    game::{hint::legal_swaps, simulate_with, LevelSpec, Move},
    network::protocol::{issue_level, issue_seed, LevelRequest},
    proof::{verify_transcript, SessionTranscript},
};

/// Demo session parameters, overridable through the environment.
struct DemoConfig {
    seed: String,
    rows: usize,
    cols: usize,
    color_count: u8,
}

impl DemoConfig {
    fn from_env() -> Self {
        Self {
            seed: std::env::var("TILE_MATCH_DEMO_SEED").unwrap_or_else(|_| issue_seed()),
            rows: env_or("TILE_MATCH_DEMO_ROWS", 8),
            cols: env_or("TILE_MATCH_DEMO_COLS", 8),
            color_count: env_or("TILE_MATCH_DEMO_COLORS", 5),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let engine = EngineConfig::from_env();
    info!("Tile Match Server v{}", VERSION);
    info!(
        "Move cap: {} (default {}), cascade ceiling: {}",
        engine.max_moves, DEFAULT_MAX_MOVES, engine.max_cascade_passes
    );

    demo_session(&DemoConfig::from_env(), &engine)
}

/// Play a greedy session, then verify it the way a rewards service would.
fn demo_session(demo: &DemoConfig, engine: &EngineConfig) -> anyhow::Result<()> {
    info!("=== Issuing Level ===");
    let request = LevelRequest {
        level_id: "demo".to_string(),
        rows: demo.rows,
        cols: demo.cols,
        color_count: demo.color_count,
    };
    let issued = issue_level(&request, demo.seed.clone()).context("issuing demo level")?;
    let spec = LevelSpec::new(issued.level_id, issued.seed, issued.rows, issued.cols, issued.color_count)
        .context("rebuilding issued level")?;
    info!("Seed: {}", spec.seed());

    // Greedy player: always take the first scoring swap on the current board
    let mut moves: Vec<Move> = Vec::new();
    while moves.len() < engine.max_moves {
        let report = simulate_with(&spec, &moves, engine);
        match legal_swaps(&report.final_board).into_iter().next() {
            Some(mv) => moves.push(mv),
            None => {
                info!("No scoring swap left after {} moves", moves.len());
                break;
            }
        }
    }

    info!("=== Simulating {} Moves ===", moves.len());
    let report = simulate_with(&spec, &moves, engine);
    for line in report.final_board.to_string().lines() {
        info!("  {}", line);
    }
    info!(
        "Score: {}  Combos: {}  Moves applied: {}",
        report.result.score, report.result.total_combos, report.result.moves_applied
    );
    info!("Final board: {}", short_hex(&report.final_board_hash));

    let rewards = RewardDelta::from_score(report.result.score);
    info!("Rewards: {} XP, {} currency", rewards.experience, rewards.currency);

    info!("=== Verifying Determinism ===");
    let mut transcript = SessionTranscript::new(spec, moves, engine);
    transcript.finalize(&report);
    let bytes = transcript.to_bytes()?;
    info!(
        "Transcript: {} bytes, inputs {}",
        bytes.len(),
        short_hex(&transcript.input_fingerprint())
    );

    let decoded = SessionTranscript::from_bytes(&bytes)?;
    let verification = verify_transcript(&decoded);
    match verification.error {
        None => info!("DETERMINISM VERIFIED: replay matches"),
        Some(e) => warn!("DETERMINISM FAILURE: {}", e),
    }

    Ok(())
}

//! Protocol Messages
//!
//! Wire format between the request layer and the engine. All messages are
//! JSON. The handlers here are pure functions; any HTTP or WebSocket
//! transport can call them.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::core::hash::short_hex;
use crate::economy::RewardDelta;
use crate::game::board::{generate_board, Tile};
use crate::game::engine::{simulate_with, SimulationResult};
use crate::game::level::{LevelError, LevelSpec};
use crate::game::moves::{Coord, Move};

/// Protocol errors.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The message is not valid JSON for its type.
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The requested level cannot be built.
    #[error("Invalid level: {0}")]
    InvalidLevel(#[from] LevelError),
}

/// Issue a fresh random session seed (128 bits, hex).
///
/// The engine never creates seeds; this is for the request layer.
pub fn issue_seed() -> String {
    hex::encode(uuid::Uuid::new_v4().as_bytes())
}

// =============================================================================
// CLIENT MOVES
// =============================================================================

/// Move variants understood on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMove {
    Swap { from: Coord, to: Coord },
}

/// Decode one untrusted move entry.
///
/// Unknown types and malformed entries become [`Move::Unsupported`] so the
/// entry keeps its position in the list.
pub fn decode_move(value: &serde_json::Value) -> Move {
    match ClientMove::deserialize(value) {
        Ok(ClientMove::Swap { from, to }) => Move::Swap { from, to },
        Err(_) => Move::Unsupported {
            kind: value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
    }
}

/// Decode a whole move list, one entry per submitted value.
pub fn decode_moves(values: &[serde_json::Value]) -> Vec<Move> {
    values.iter().map(decode_move).collect()
}

// =============================================================================
// LEVEL REQUEST
// =============================================================================

/// Request for a new level instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRequest {
    /// Level identifier.
    pub level_id: String,
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Number of tile colours.
    pub color_count: u8,
}

/// Issued level, with its initial board for the client to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    /// Level identifier.
    pub level_id: String,
    /// Issued session seed.
    pub seed: String,
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Number of tile colours.
    pub color_count: u8,
    /// Initial board, row by row.
    pub board: Vec<Vec<Tile>>,
    /// Hex fingerprint of the initial board.
    pub board_hash: String,
}

/// Issue a level with a fresh seed.
pub fn handle_level_request(req: &LevelRequest) -> Result<LevelResponse, ProtocolError> {
    issue_level(req, issue_seed())
}

/// Issue a level with a caller-chosen seed.
pub fn issue_level(req: &LevelRequest, seed: String) -> Result<LevelResponse, ProtocolError> {
    let spec = LevelSpec::new(req.level_id.clone(), seed, req.rows, req.cols, req.color_count)?;
    let board = generate_board(&spec);
    let board_hash = board.compute_hash();

    info!(level = spec.level_id(), hash = %short_hex(&board_hash), "level issued");

    Ok(LevelResponse {
        level_id: spec.level_id().to_string(),
        seed: spec.seed().to_string(),
        rows: spec.rows(),
        cols: spec.cols(),
        color_count: spec.color_count(),
        board: board.to_rows().unwrap_or_default(),
        board_hash: hex::encode(board_hash),
    })
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Finished session submitted by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    /// Level identifier.
    pub level_id: String,
    /// Seed issued with the level.
    pub seed: String,
    /// Board rows.
    pub rows: usize,
    /// Board columns.
    pub cols: usize,
    /// Number of tile colours.
    pub color_count: u8,
    /// Raw move entries, decoded one by one.
    #[serde(default)]
    pub moves: Vec<serde_json::Value>,
    /// Score the client computed locally. Never trusted.
    #[serde(default)]
    pub reported_score: Option<u64>,
}

impl SubmitRequest {
    /// Parse from JSON string.
    pub fn from_json(s: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Authoritative outcome of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Level identifier.
    pub level_id: String,
    /// Authoritative result.
    pub result: SimulationResult,
    /// Ledger deltas for the authoritative score.
    pub rewards: RewardDelta,
    /// Whether the client's reported score agreed, if one was sent.
    pub score_matches: Option<bool>,
    /// Hex fingerprint of the final board.
    pub final_board_hash: String,
}

impl SubmitResponse {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Score a submission.
pub fn handle_submission(
    req: &SubmitRequest,
    config: &EngineConfig,
) -> Result<SubmitResponse, ProtocolError> {
    let spec = LevelSpec::new(
        req.level_id.clone(),
        req.seed.clone(),
        req.rows,
        req.cols,
        req.color_count,
    )?;
    let moves = decode_moves(&req.moves);
    let report = simulate_with(&spec, &moves, config);

    let score_matches = req.reported_score.map(|claimed| claimed == report.result.score);
    if score_matches == Some(false) {
        debug!(
            level = spec.level_id(),
            reported = ?req.reported_score,
            authoritative = report.result.score,
            "reported score overridden"
        );
    }

    Ok(SubmitResponse {
        level_id: spec.level_id().to_string(),
        result: report.result,
        rewards: RewardDelta::from_score(report.result.score),
        score_matches,
        final_board_hash: hex::encode(report.final_board_hash),
    })
}

// =============================================================================
// TESTS
// =============================================================================

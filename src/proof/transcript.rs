//! Session Transcript Recording
//!
//! Records everything needed to deterministically replay a session:
//! the level, the raw move list, the bounds used, and the outcome hashes.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::core::hash::{StateHash, StateHasher};
use crate::game::board::generate_board;
use crate::game::engine::{SimulationReport, SimulationResult};
use crate::game::level::LevelSpec;
use crate::game::moves::Move;

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// Complete session transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTranscript {
    /// Version for forward compatibility.
    pub version: u8,

    /// Level the session was played on.
    pub level: LevelSpec,

    /// Move cap in force.
    pub max_moves: u32,

    /// Cascade pass ceiling in force.
    pub max_cascade_passes: u32,

    /// Moves exactly as submitted, before truncation.
    pub moves: Vec<Move>,

    /// Fingerprint of the generated board.
    pub initial_board_hash: StateHash,

    /// Outcome, once the session is finalized.
    pub outcome: Option<TranscriptOutcome>,
}

/// Recorded session outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptOutcome {
    /// Authoritative result.
    pub result: SimulationResult,
    /// Fingerprint of the final board.
    pub final_board_hash: StateHash,
}

/// Transcript errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Binary encoding failed.
    #[error("Transcript serialization failed: {0}")]
    SerializationFailed(String),

    /// Binary decoding failed.
    #[error("Transcript deserialization failed: {0}")]
    DeserializationFailed(String),
}

impl SessionTranscript {
    /// Start a transcript for a submitted move list.
    pub fn new(level: LevelSpec, moves: Vec<Move>, config: &EngineConfig) -> Self {
        let initial_board_hash = generate_board(&level).compute_hash();
        Self {
            version: TRANSCRIPT_VERSION,
            level,
            max_moves: u32::try_from(config.max_moves).unwrap_or(u32::MAX),
            max_cascade_passes: config.max_cascade_passes,
            moves,
            initial_board_hash,
            outcome: None,
        }
    }

    /// Finalize from a simulation report.
    pub fn finalize(&mut self, report: &SimulationReport) {
        self.outcome = Some(TranscriptOutcome {
            result: report.result,
            final_board_hash: report.final_board_hash,
        });
    }

    /// Check if transcript is complete.
    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Bounds to replay with.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_moves: self.max_moves as usize,
            max_cascade_passes: self.max_cascade_passes,
        }
    }

    /// Fingerprint of the inputs (level and moves), independent of outcome.
    ///
    /// Two submissions with the same fingerprint must score identically.
    pub fn input_fingerprint(&self) -> StateHash {
        let mut hasher = StateHasher::for_moves();
        hasher.update_str(self.level.level_id());
        hasher.update_str(self.level.seed());
        hasher.update_u32(self.level.rows() as u32);
        hasher.update_u32(self.level.cols() as u32);
        hasher.update_u8(self.level.color_count());
        hasher.update_u32(self.max_moves);
        hasher.update_u32(self.moves.len() as u32);
        for mv in &self.moves {
            match mv {
                Move::Swap { from, to } => {
                    hasher.update_u8(0);
                    hasher.update_i32(from.row);
                    hasher.update_i32(from.col);
                    hasher.update_i32(to.row);
                    hasher.update_i32(to.col);
                }
                Move::Unsupported { kind } => {
                    hasher.update_u8(1);
                    hasher.update_str(kind);
                }
            }
        }
        hasher.finalize()
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TranscriptError> {
        bincode::serialize(self).map_err(|e| TranscriptError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from bytes.
    ///
    /// The embedded level is re-validated during decoding.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TranscriptError> {
        bincode::deserialize(data).map_err(|e| TranscriptError::DeserializationFailed(e.to_string()))
    }
}

//! Verification API
//!
//! Verify sessions by deterministic replay, and check client-reported
//! scores against the authoritative simulation.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::core::hash::{short_hex, StateHash};
use crate::game::engine::{simulate_with, SimulationResult};
use crate::game::level::LevelSpec;
use crate::game::moves::Move;
use crate::proof::transcript::{SessionTranscript, TRANSCRIPT_VERSION};

/// Verification result.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Did verification pass?
    pub valid: bool,

    /// Result from replay (absent if replay never ran).
    pub computed: Option<SimulationResult>,

    /// Final board hash from replay.
    pub computed_final_hash: Option<StateHash>,

    /// Detailed error if verification failed.
    pub error: Option<VerificationError>,
}

impl VerificationResult {
    fn failed(error: VerificationError) -> Self {
        Self {
            valid: false,
            computed: None,
            computed_final_hash: None,
            error: Some(error),
        }
    }
}

/// Errors that can occur during verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Transcript version mismatch.
    #[error("Version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Expected version.
        expected: u8,
        /// Actual version.
        got: u8,
    },

    /// Initial board hash mismatch.
    #[error("Initial board hash mismatch")]
    InitialBoardMismatch {
        /// Expected hash.
        expected: StateHash,
        /// Computed hash.
        computed: StateHash,
    },

    /// Replayed result differs from the recorded one.
    #[error("Result mismatch: recorded {expected:?}, replayed {computed:?}")]
    ResultMismatch {
        /// Recorded result.
        expected: SimulationResult,
        /// Replayed result.
        computed: SimulationResult,
    },

    /// Final board hash mismatch.
    #[error("Final board hash mismatch")]
    FinalBoardMismatch {
        /// Expected hash.
        expected: StateHash,
        /// Computed hash.
        computed: StateHash,
    },

    /// Transcript is incomplete.
    #[error("Transcript is incomplete")]
    IncompleteTranscript,
}

/// Verify a session transcript by full replay.
pub fn verify_transcript(transcript: &SessionTranscript) -> VerificationResult {
    if transcript.version != TRANSCRIPT_VERSION {
        return VerificationResult::failed(VerificationError::VersionMismatch {
            expected: TRANSCRIPT_VERSION,
            got: transcript.version,
        });
    }

    let outcome = match &transcript.outcome {
        Some(o) => o,
        None => return VerificationResult::failed(VerificationError::IncompleteTranscript),
    };

    let report = simulate_with(&transcript.level, &transcript.moves, &transcript.engine_config());

    let error = if report.initial_board_hash != transcript.initial_board_hash {
        Some(VerificationError::InitialBoardMismatch {
            expected: transcript.initial_board_hash,
            computed: report.initial_board_hash,
        })
    } else if report.result != outcome.result {
        Some(VerificationError::ResultMismatch {
            expected: outcome.result,
            computed: report.result,
        })
    } else if report.final_board_hash != outcome.final_board_hash {
        Some(VerificationError::FinalBoardMismatch {
            expected: outcome.final_board_hash,
            computed: report.final_board_hash,
        })
    } else {
        None
    };

    match &error {
        Some(e) => warn!(level = transcript.level.level_id(), "transcript rejected: {}", e),
        None => debug!(
            level = transcript.level.level_id(),
            final_hash = %short_hex(&report.final_board_hash),
            "transcript verified"
        ),
    }

    VerificationResult {
        valid: error.is_none(),
        computed: Some(report.result),
        computed_final_hash: Some(report.final_board_hash),
        error,
    }
}

/// Authoritative result alongside what the client claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCheck {
    /// Server-computed result. Always the one to trust.
    pub result: SimulationResult,
    /// Score the client reported.
    pub claimed_score: u64,
    /// Whether the claim equals the authoritative score.
    pub matches: bool,
}

/// Compare a client-reported score with the authoritative simulation.
pub fn verify_claim(
    spec: &LevelSpec,
    moves: &[Move],
    claimed_score: u64,
    config: &EngineConfig,
) -> ClaimCheck {
    let result = simulate_with(spec, moves, config).result;
    let matches = result.score == claimed_score;
    if !matches {
        warn!(
            level = spec.level_id(),
            claimed = claimed_score,
            authoritative = result.score,
            "client score claim differs"
        );
    }
    ClaimCheck {
        result,
        claimed_score,
        matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized() -> SessionTranscript {
        let level = LevelSpec::new("L1", "abc", 6, 6, 5).unwrap();
        let moves = vec![Move::swap((1, 4), (2, 4)), Move::swap((2, 1), (2, 2))];
        let config = EngineConfig::default();
        let mut transcript = SessionTranscript::new(level, moves, &config);
        let report = simulate_with(&transcript.level, &transcript.moves, &config);
        transcript.finalize(&report);
        transcript
    }

    #[test]
    fn test_valid_transcript() {
        let result = verify_transcript(&finalized());
        assert!(result.valid);
        assert!(result.error.is_none());
        assert!(result.computed.is_some());
    }

    #[test]
    fn test_incomplete_transcript_fails() {
        let mut transcript = finalized();
        transcript.outcome = None;

        let result = verify_transcript(&transcript);
        assert!(!result.valid);
        assert_eq!(result.error, Some(VerificationError::IncompleteTranscript));
    }

    #[test]
    fn test_version_mismatch() {
        let mut transcript = finalized();
        transcript.version = 99;

        let result = verify_transcript(&transcript);
        assert!(matches!(
            result.error,
            Some(VerificationError::VersionMismatch { expected: 1, got: 99 })
        ));
    }

    #[test]
    fn test_tampered_score_detected() {
        let mut transcript = finalized();
        if let Some(outcome) = transcript.outcome.as_mut() {
            outcome.result.score += 10;
        }

        let result = verify_transcript(&transcript);
        assert!(!result.valid);
        assert!(matches!(result.error, Some(VerificationError::ResultMismatch { .. })));
    }

    #[test]
    fn test_tampered_initial_hash_detected() {
        let mut transcript = finalized();
        transcript.initial_board_hash = [0; 32];

        let result = verify_transcript(&transcript);
        assert!(matches!(result.error, Some(VerificationError::InitialBoardMismatch { .. })));
    }

    #[test]
    fn test_tampered_final_hash_detected() {
        let mut transcript = finalized();
        if let Some(outcome) = transcript.outcome.as_mut() {
            outcome.final_board_hash = [7; 32];
        }

        let result = verify_transcript(&transcript);
        assert!(matches!(result.error, Some(VerificationError::FinalBoardMismatch { .. })));
    }

    #[test]
    fn test_verify_claim() {
        let level = LevelSpec::new("L1", "abc", 6, 6, 5).unwrap();
        let moves = [Move::swap((2, 1), (2, 2))];
        let config = EngineConfig::default();

        let honest = verify_claim(&level, &moves, 30, &config);
        assert!(honest.matches);
        assert_eq!(honest.result.score, 30);

        let inflated = verify_claim(&level, &moves, 5000, &config);
        assert!(!inflated.matches);
        assert_eq!(inflated.result.score, 30);
        assert_eq!(inflated.claimed_score, 5000);
    }

    #[test]
    fn test_ceiling_transcript_replays() {
        let level = LevelSpec::new("L1", "abc", 6, 6, 5).unwrap();
        let moves = vec![Move::swap((1, 4), (2, 4)), Move::swap((0, 0), (0, 1))];
        let config = EngineConfig { max_moves: 30, max_cascade_passes: 1 };

        let mut transcript = SessionTranscript::new(level, moves, &config);
        let report = simulate_with(&transcript.level, &transcript.moves, &config);
        transcript.finalize(&report);

        let bytes = transcript.to_bytes().unwrap();
        let decoded = SessionTranscript::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.engine_config(), config);

        let result = verify_transcript(&decoded);
        assert!(result.valid);
        assert_eq!(
            result.computed,
            Some(SimulationResult { score: 30, total_combos: 1, moves_applied: 1 })
        );

        // Replaying without the ceiling scores differently and is rejected
        let mut relaxed = decoded;
        relaxed.max_cascade_passes = 256;
        assert!(matches!(
            verify_transcript(&relaxed).error,
            Some(VerificationError::ResultMismatch { .. })
        ));
    }
}

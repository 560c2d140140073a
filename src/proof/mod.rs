//! Session Verification
//!
//! Provides verifiable session outcomes through:
//! - Session transcript recording
//! - Board fingerprints at start and end
//! - Verification by deterministic replay
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    VERIFICATION                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transcript.rs   - Level, raw moves, bounds, outcome        │
//! │  verify.rs       - Replay and client-claim checks           │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod transcript;
pub mod verify;

// Re-export key types
pub use transcript::{SessionTranscript, TranscriptOutcome, TranscriptError, TRANSCRIPT_VERSION};
pub use verify::{
    verify_transcript, verify_claim, ClaimCheck, VerificationResult, VerificationError,
};

//! Ground-truth matching and detection-quality metrics for piiscan-rs
//!
//! Matches predicted PII findings against human-labeled ground-truth boxes
//! under a per-edge pixel tolerance, classifies each prediction as a true or
//! false positive, and aggregates precision/recall. The matcher is greedy in
//! predicted-finding order: each ground-truth box is consumed by at most one
//! prediction per run.
//!
//! Everything here is produced fresh per evaluation call; there is no shared
//! mutable state across calls.

pub mod engine;
pub mod error;
pub mod ground_truth;
pub mod matching;
pub mod metrics;

pub use engine::EvaluationEngine;
pub use error::{EvalError, Result};
pub use ground_truth::{load_ground_truth, GroundTruthBox, GroundTruthFile};
pub use matching::{match_findings, Classification, MatchResult};
pub use metrics::{summarize, EvaluationSummary};

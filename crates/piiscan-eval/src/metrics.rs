//! Precision/recall aggregation.

use crate::matching::{Classification, MatchResult};
use serde::{Deserialize, Serialize};

/// Aggregated detection-quality metrics for one evaluation run.
///
/// The serialized field names are an external contract and must stay
/// bit-compatible: `all_positives`, `ground_truth`, `precision`, `recall`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Number of predicted positives (true + false)
    pub all_positives: u32,
    /// Number of ground-truth annotations
    pub ground_truth: u32,
    /// TP / (TP + FP); 0.0 when there are no predictions
    pub precision: f64,
    /// TP / ground truth; 0.0 when there is no ground truth
    pub recall: f64,
}

/// Compute precision and recall from match results.
///
/// Both divisions are guarded: precision is 0.0 when nothing was predicted
/// and recall is 0.0 when `ground_truth_count` is 0, so a run over an empty
/// image never faults.
#[allow(clippy::cast_possible_truncation)] // match counts are tiny
#[must_use = "evaluation summary is returned but not used"]
pub fn summarize(matches: &[MatchResult], ground_truth_count: u32) -> EvaluationSummary {
    let true_positives = matches
        .iter()
        .filter(|m| m.classification == Classification::TruePositive)
        .count() as u32;
    let all_positives = matches.len() as u32;

    let precision = if all_positives == 0 {
        0.0
    } else {
        f64::from(true_positives) / f64::from(all_positives)
    };
    let recall = if ground_truth_count == 0 {
        0.0
    } else {
        f64::from(true_positives) / f64::from(ground_truth_count)
    };

    EvaluationSummary {
        all_positives,
        ground_truth: ground_truth_count,
        precision,
        recall,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use piiscan_core::{MappedFinding, Rect};

    fn result(classification: Classification) -> MatchResult {
        MatchResult {
            finding: MappedFinding {
                entity: "PERSON".to_string(),
                score: 0.9,
                rect: Rect::new(0, 0, 10, 10),
            },
            matched: None,
            classification,
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_perfect_run() {
        let matches = vec![
            result(Classification::TruePositive),
            result(Classification::TruePositive),
        ];
        let summary = summarize(&matches, 2);
        assert_eq!(summary.all_positives, 2);
        assert_eq!(summary.ground_truth, 2);
        assert_eq!(summary.precision, 1.0);
        assert_eq!(summary.recall, 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_mixed_run() {
        let matches = vec![
            result(Classification::TruePositive),
            result(Classification::FalsePositive),
        ];
        // One annotation was never found
        let summary = summarize(&matches, 2);
        assert_eq!(summary.precision, 0.5);
        assert_eq!(summary.recall, 0.5);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_empty_run_is_all_zeroes() {
        let summary = summarize(&[], 0);
        assert_eq!(
            summary,
            EvaluationSummary {
                all_positives: 0,
                ground_truth: 0,
                precision: 0.0,
                recall: 0.0,
            }
        );
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_guarded_divides() {
        // Predictions but no ground truth
        let summary = summarize(&[result(Classification::FalsePositive)], 0);
        assert_eq!(summary.precision, 0.0);
        assert_eq!(summary.recall, 0.0);

        // Ground truth but no predictions
        let summary = summarize(&[], 3);
        assert_eq!(summary.precision, 0.0);
        assert_eq!(summary.recall, 0.0);
        assert_eq!(summary.ground_truth, 3);
    }

    #[test]
    fn test_serialized_contract_field_names() {
        let summary = summarize(&[result(Classification::TruePositive)], 1);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["all_positives"], 1);
        assert_eq!(json["ground_truth"], 1);
        assert_eq!(json["precision"], 1.0);
        assert_eq!(json["recall"], 1.0);
    }
}

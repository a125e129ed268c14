//! Greedy tolerance matching of predicted findings to ground truth.

use crate::ground_truth::GroundTruthBox;
use piiscan_core::MappedFinding;
use tracing::debug;

/// Outcome class of one predicted finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The finding corresponds to a ground-truth annotation within tolerance
    TruePositive,
    /// No ground-truth annotation matched the finding
    FalsePositive,
}

/// One predicted finding with its match decision.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The predicted finding being classified
    pub finding: MappedFinding,
    /// The ground-truth box it consumed, if any
    pub matched: Option<GroundTruthBox>,
    /// True/false positive classification
    pub classification: Classification,
}

/// Match predicted findings against ground truth under a per-edge tolerance.
///
/// For each finding, in input order, every not-yet-consumed ground-truth box
/// whose four edges each lie within `tolerance` pixels of the finding's
/// edges qualifies. Among qualifying boxes the one with the smallest total
/// edge-distance sum wins; remaining ties break in first-seen order. A
/// matched box leaves the candidate pool, so each ground-truth box is
/// consumed at most once per run.
///
/// The policy is greedy and therefore order-dependent in the finding list;
/// inputs arrive in OCR reading order, which is stable for a given image and
/// collaborator pair. Ground-truth boxes that never match are not classified
/// here but count in the recall denominator.
#[must_use = "match results are returned but not used"]
pub fn match_findings(
    predicted: &[MappedFinding],
    ground_truth: &[GroundTruthBox],
    tolerance: u32,
) -> Vec<MatchResult> {
    let mut consumed = vec![false; ground_truth.len()];
    let mut results = Vec::with_capacity(predicted.len());

    for finding in predicted {
        let best = ground_truth
            .iter()
            .enumerate()
            .filter(|(i, gt)| {
                !consumed[*i] && finding.rect.within_tolerance(&gt.rect(), tolerance)
            })
            .min_by_key(|(_, gt)| finding.rect.edge_distance(&gt.rect()));

        match best {
            Some((i, gt)) => {
                consumed[i] = true;
                debug!(
                    entity = %finding.entity,
                    gt_label = %gt.label,
                    distance = finding.rect.edge_distance(&gt.rect()),
                    "matched finding to ground truth"
                );
                results.push(MatchResult {
                    finding: finding.clone(),
                    matched: Some(gt.clone()),
                    classification: Classification::TruePositive,
                });
            }
            None => {
                debug!(entity = %finding.entity, "no ground truth within tolerance");
                results.push(MatchResult {
                    finding: finding.clone(),
                    matched: None,
                    classification: Classification::FalsePositive,
                });
            }
        }
    }

    results
}

//! Weighted aggregation of criterion results.

use super::criteria::CompiledCriterion;
use super::{completeness, AggregateResult, CriterionResult};
use crate::workflows::naturalization::catalog::CriterionGroup;

/// Folds per-criterion results into one weighted score plus the counts
/// the classifier reads. Mandatory criteria always contribute their
/// signed score; favorable criteria only add when met; disqualifiers
/// only subtract when triggered (their weights are negative).
pub(super) fn aggregate(
    compiled: &[CompiledCriterion],
    results: &[CriterionResult],
) -> AggregateResult {
    let mut total_score = 0.0f32;
    let mut met_mandatory = 0usize;
    let mut unmet_mandatory = 0usize;
    let mut caveats = Vec::new();
    let mut disqualifier_count = 0usize;
    let mut favorable_count = 0usize;

    for (criterion, result) in compiled.iter().zip(results) {
        let spec = &criterion.spec;
        match spec.group {
            CriterionGroup::Mandatory => {
                total_score += result.signed_score as f32 * spec.weight;
                if result.met {
                    met_mandatory += 1;
                } else {
                    unmet_mandatory += 1;
                    if completeness::is_caveat(spec, result) {
                        caveats.push(result.criterion_id.clone());
                    }
                }
            }
            CriterionGroup::Favorable => {
                if result.met {
                    total_score += result.signed_score as f32 * spec.weight;
                    favorable_count += 1;
                }
            }
            CriterionGroup::Disqualifying => {
                if result.met {
                    total_score += result.signed_score as f32 * spec.weight;
                    disqualifier_count += 1;
                }
            }
        }
    }

    AggregateResult {
        total_score,
        met_mandatory,
        unmet_mandatory,
        caveats,
        disqualifier_count,
        favorable_count,
    }
}

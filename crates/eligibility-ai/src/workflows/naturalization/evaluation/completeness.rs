//! Splits unmet mandatory criteria into pending-document caveats and
//! genuine failures.

use super::CriterionResult;
use crate::workflows::naturalization::catalog::CriterionSpec;

/// A caveat is an unmet mandatory criterion where nothing in the corpus
/// argues against the applicant. The evidence is absent, not adverse:
/// zero signed score and no negative matches. Contradicted or
/// out-of-range criteria carry adverse evidence and stay critical.
pub(super) fn is_caveat(spec: &CriterionSpec, result: &CriterionResult) -> bool {
    !result.met
        && spec.missing_is_caveat
        && result.signed_score == 0
        && result.matched_negative.is_empty()
}

use crate::workflows::naturalization::catalog::GateCheck;
use crate::workflows::naturalization::dates;
use crate::workflows::naturalization::domain::StructuredFacts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum GateOutcome {
    Passed,
    Failed { detail: String },
}

/// Run one admissibility check. A missing fact is a failed gate, never a
/// skipped one.
pub(super) fn run_gate(check: &GateCheck, facts: &StructuredFacts) -> GateOutcome {
    match check {
        GateCheck::AgeAtProcessStart { min, max } => {
            let Some(age) = facts.age_at_process_start() else {
                return GateOutcome::Failed {
                    detail: "age not determinable from birth and process start dates".to_owned(),
                };
            };
            if age < 0 {
                return GateOutcome::Failed {
                    detail: format!("implausible age {age} at process start"),
                };
            }
            if let Some(bound) = min {
                if age < *bound {
                    return GateOutcome::Failed {
                        detail: format!("age {age} below the minimum of {bound}"),
                    };
                }
            }
            if let Some(bound) = max {
                if age > *bound {
                    return GateOutcome::Failed {
                        detail: format!("age {age} above the maximum of {bound}"),
                    };
                }
            }
            GateOutcome::Passed
        }
        GateCheck::ResidenceFixedBeforeAge { max_age } => {
            let (Some(birth), Some(residence)) = (facts.birth_date, facts.residence_start_date)
            else {
                return GateOutcome::Failed {
                    detail: "residence start or birth date missing".to_owned(),
                };
            };
            let age_when_fixed = dates::years_between(birth, residence);
            if age_when_fixed < 0 {
                return GateOutcome::Failed {
                    detail: "residence start predates the birth date".to_owned(),
                };
            }
            if age_when_fixed < *max_age {
                GateOutcome::Passed
            } else {
                GateOutcome::Failed {
                    detail: format!(
                        "residence fixed at age {age_when_fixed}, limit is before {max_age}"
                    ),
                }
            }
        }
        GateCheck::RegistryConfirmationRequired { key } => {
            match facts.registry_confirmation(key) {
                Some(true) => GateOutcome::Passed,
                Some(false) => GateOutcome::Failed {
                    detail: format!("registry denies `{key}`"),
                },
                None => GateOutcome::Failed {
                    detail: format!("registry confirmation `{key}` absent"),
                },
            }
        }
    }
}

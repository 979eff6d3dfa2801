use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::dates;
use super::domain::{CaseFile, CaseId, CaseSubmission, EvidenceDocument, StructuredFacts};

/// Validation errors raised by the intake guard.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("case id is blank")]
    BlankCaseId,
    #[error("document name is blank")]
    BlankDocumentName,
    #[error("duplicate document name: {name}")]
    DuplicateDocument { name: String },
    #[error("too many documents (limit {max}, found {found})")]
    DocumentLimitExceeded { max: usize, found: usize },
    #[error("document {name} exceeds the text limit of {max_chars} characters")]
    DocumentTooLarge { name: String, max_chars: usize },
    #[error("birth date {birth} is after the process start {process_start}")]
    ImplausibleBirthDate {
        birth: NaiveDate,
        process_start: NaiveDate,
    },
}

const DEFAULT_MAX_DOCUMENTS: usize = 32;
const DEFAULT_MAX_DOCUMENT_CHARS: usize = 200_000;

/// Limits backing intake validation.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    max_documents: usize,
    max_document_chars: usize,
}

impl IntakePolicy {
    pub fn new(max_documents: usize, max_document_chars: usize) -> Self {
        Self {
            max_documents: if max_documents == 0 {
                DEFAULT_MAX_DOCUMENTS
            } else {
                max_documents
            },
            max_document_chars: if max_document_chars == 0 {
                DEFAULT_MAX_DOCUMENT_CHARS
            } else {
                max_document_chars
            },
        }
    }

    pub fn max_documents(&self) -> usize {
        self.max_documents
    }

    pub fn max_document_chars(&self) -> usize {
        self.max_document_chars
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENTS, DEFAULT_MAX_DOCUMENT_CHARS)
    }
}

/// Guard responsible for producing `CaseFile` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Convert an inbound submission into a validated case file.
    ///
    /// Structural defects (blank or duplicate document names, oversized
    /// texts, a birth date after the process start) are rejected.
    /// Unparseable form dates are tolerated: the fact stays absent and a
    /// note records what intake could not read. When the submission
    /// carries no case id the returned file holds an empty one and the
    /// service assigns the definitive id.
    pub fn case_from_submission(
        &self,
        submission: CaseSubmission,
    ) -> Result<CaseFile, IntakeViolation> {
        let case_id = match &submission.case_id {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(IntakeViolation::BlankCaseId);
                }
                CaseId(trimmed.to_owned())
            }
            None => CaseId(String::new()),
        };

        if submission.documents.len() > self.policy.max_documents {
            return Err(IntakeViolation::DocumentLimitExceeded {
                max: self.policy.max_documents,
                found: submission.documents.len(),
            });
        }

        let mut seen = BTreeSet::new();
        let mut documents = Vec::with_capacity(submission.documents.len());
        for document in submission.documents {
            let name = document.name.trim().to_lowercase();
            if name.is_empty() {
                return Err(IntakeViolation::BlankDocumentName);
            }
            if !seen.insert(name.clone()) {
                return Err(IntakeViolation::DuplicateDocument { name });
            }
            if document.raw_text.chars().count() > self.policy.max_document_chars {
                return Err(IntakeViolation::DocumentTooLarge {
                    name,
                    max_chars: self.policy.max_document_chars,
                });
            }
            documents.push(EvidenceDocument {
                name,
                raw_text: document.raw_text,
                present: document.present,
            });
        }

        let mut intake_notes = Vec::new();
        let form = submission.form;
        let birth_date = parse_dated_field(&form.birth_date, "birth date", &mut intake_notes);
        let process_start_date =
            parse_dated_field(&form.process_start_date, "process start date", &mut intake_notes);
        let residence_start_date = parse_dated_field(
            &form.residence_start_date,
            "residence start date",
            &mut intake_notes,
        );
        let certificate_emission_date = parse_dated_field(
            &form.certificate_emission_date,
            "certificate emission date",
            &mut intake_notes,
        );

        if let (Some(birth), Some(process_start)) = (birth_date, process_start_date) {
            if birth > process_start {
                return Err(IntakeViolation::ImplausibleBirthDate {
                    birth,
                    process_start,
                });
            }
        }

        let declared_decision = form
            .declared_decision
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        let registry_confirmations = form
            .registry_confirmations
            .into_iter()
            .filter_map(|(key, confirmed)| {
                let key = key.trim().to_lowercase();
                if key.is_empty() {
                    None
                } else {
                    Some((key, confirmed))
                }
            })
            .collect();

        Ok(CaseFile {
            case_id,
            process_kind: submission.process_kind,
            documents,
            facts: StructuredFacts {
                birth_date,
                process_start_date,
                residence_start_date,
                certificate_emission_date,
                declared_decision,
                registry_confirmations,
            },
            intake_notes,
        })
    }
}

fn parse_dated_field(
    raw: &Option<String>,
    label: &str,
    notes: &mut Vec<String>,
) -> Option<NaiveDate> {
    let value = raw.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    match dates::parse_form_date(value) {
        Some(date) => Some(date),
        None => {
            notes.push(format!("could not parse {label}: `{value}`"));
            None
        }
    }
}

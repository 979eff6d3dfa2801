use super::dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier assigned to a naturalization case (protocol number or generated).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three naturalization process variants, each with its own ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Definitiva,
    Ordinaria,
    Provisoria,
}

impl ProcessKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Definitiva, Self::Ordinaria, Self::Provisoria]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Definitiva => "naturalização definitiva",
            Self::Ordinaria => "naturalização ordinária",
            Self::Provisoria => "naturalização provisória",
        }
    }
}

fn default_present() -> bool {
    true
}

/// One piece of textual evidence extracted by the OCR/download collaborator.
///
/// `present` is false when the collaborator knows the document exists but
/// failed to retrieve it; `raw_text` may be empty either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDocument {
    pub name: String,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default = "default_present")]
    pub present: bool,
}

impl EvidenceDocument {
    pub fn new(name: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_text: raw_text.into(),
            present: true,
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_text: String::new(),
            present: false,
        }
    }
}

#[derive(Debug, Clone)]
struct CorpusEntry {
    text: String,
    present: bool,
}

/// Per-evaluation view over the case documents: name lookup plus a derived
/// lower-cased concatenation the pattern matcher runs against.
///
/// Built fresh for every evaluation run; names are keyed in sorted order so
/// the concatenation (and therefore every match trace) is reproducible
/// regardless of submission order.
#[derive(Debug, Clone)]
pub struct EvidenceCorpus {
    entries: BTreeMap<String, CorpusEntry>,
    normalized: String,
}

impl EvidenceCorpus {
    pub fn from_documents(documents: &[EvidenceDocument]) -> Self {
        let mut entries = BTreeMap::new();
        for document in documents {
            let name = document.name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            entries.insert(
                name,
                CorpusEntry {
                    text: document.raw_text.clone(),
                    present: document.present,
                },
            );
        }

        let mut normalized = String::new();
        for entry in entries.values() {
            if !entry.present {
                continue;
            }
            let lowered = entry.text.to_lowercase();
            let trimmed = lowered.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !normalized.is_empty() {
                normalized.push('\n');
            }
            normalized.push_str(trimmed);
        }

        Self {
            entries,
            normalized,
        }
    }

    /// Extracted text for a document, when it was actually retrieved.
    pub fn document_text(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.trim().to_lowercase())
            .filter(|entry| entry.present)
            .map(|entry| entry.text.as_str())
    }

    /// Whether the named document was retrieved with any usable text.
    pub fn has_document(&self, name: &str) -> bool {
        self.document_text(name)
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    }

    /// Lower-cased concatenation of every retrieved document.
    pub fn normalized_text(&self) -> &str {
        &self.normalized
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.trim().is_empty()
    }
}

/// Structured facts scraped from the case form, already parsed at intake.
///
/// Every field is optional: the engine degrades a criterion or fails a gate
/// when a fact it needs is absent, it never refuses to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredFacts {
    pub birth_date: Option<NaiveDate>,
    pub process_start_date: Option<NaiveDate>,
    pub residence_start_date: Option<NaiveDate>,
    pub certificate_emission_date: Option<NaiveDate>,
    pub declared_decision: Option<String>,
    #[serde(default)]
    pub registry_confirmations: BTreeMap<String, bool>,
}

impl StructuredFacts {
    /// Tri-state registry lookup: confirmed, denied, or unknown.
    pub fn registry_confirmation(&self, key: &str) -> Option<bool> {
        self.registry_confirmations.get(key).copied()
    }

    /// Completed years of age on the process start date.
    pub fn age_at_process_start(&self) -> Option<i32> {
        let birth = self.birth_date?;
        let reference = self.process_start_date?;
        Some(dates::years_between(birth, reference))
    }

    /// Completed years of residence on the process start date.
    pub fn residence_years_at_process_start(&self) -> Option<i32> {
        let start = self.residence_start_date?;
        let reference = self.process_start_date?;
        Some(dates::years_between(start, reference))
    }

    /// Days elapsed between the background-check certificate emission and the
    /// process start. Negative when the certificate postdates the process.
    pub fn certificate_age_days(&self) -> Option<i64> {
        let emission = self.certificate_emission_date?;
        let reference = self.process_start_date?;
        Some((reference - emission).num_days())
    }
}

/// Raw form fields as scraped; dates stay strings until intake parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseFormFields {
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub process_start_date: Option<String>,
    #[serde(default)]
    pub residence_start_date: Option<String>,
    #[serde(default)]
    pub certificate_emission_date: Option<String>,
    #[serde(default)]
    pub declared_decision: Option<String>,
    #[serde(default)]
    pub registry_confirmations: BTreeMap<String, bool>,
}

/// Inbound payload for case submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSubmission {
    #[serde(default)]
    pub case_id: Option<String>,
    pub process_kind: ProcessKind,
    #[serde(default)]
    pub documents: Vec<EvidenceDocument>,
    #[serde(default)]
    pub form: CaseFormFields,
}

/// Validated case ready for evaluation, produced by the intake guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub case_id: CaseId,
    pub process_kind: ProcessKind,
    pub documents: Vec<EvidenceDocument>,
    pub facts: StructuredFacts,
    /// Anything intake tolerated but wants a reviewer to know about
    /// (e.g., a form date it could not parse).
    #[serde(default)]
    pub intake_notes: Vec<String>,
}

impl CaseFile {
    pub fn corpus(&self) -> EvidenceCorpus {
        EvidenceCorpus::from_documents(&self.documents)
    }
}

/// Lifecycle of a stored case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Received,
    Decided,
    Consolidated,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Decided => "decided",
            Self::Consolidated => "consolidated",
        }
    }
}

/// Closed set of decision categories the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityCategory {
    HighProbabilityEligible,
    MediumProbabilityEligible,
    LowProbabilityEligible,
    EligibleWithCaveats,
    DeferredWithCaveats,
    UncertainEligibility,
    Ineligible,
    AutomaticRejection,
}

impl EligibilityCategory {
    /// Stable wire label matching the upstream case-management vocabulary.
    pub const fn label(self) -> &'static str {
        match self {
            Self::HighProbabilityEligible => "elegivel_alta_probabilidade",
            Self::MediumProbabilityEligible => "elegivel_probabilidade_media",
            Self::LowProbabilityEligible => "elegivel_probabilidade_baixa",
            Self::EligibleWithCaveats => "elegivel_com_ressalvas",
            Self::DeferredWithCaveats => "deferimento_com_ressalvas",
            Self::UncertainEligibility => "elegibilidade_incerta",
            Self::Ineligible => "nao_elegivel",
            Self::AutomaticRejection => "indeferimento_automatico",
        }
    }
}

impl fmt::Display for EligibilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

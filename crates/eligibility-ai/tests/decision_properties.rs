//! Property-based tests for decision and consolidation invariants.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;

use eligibility_ai::workflows::naturalization::evaluation::consolidate::consolidate;
use eligibility_ai::workflows::naturalization::{
    ChecklistStatus, DecisionRecord, DocumentChecklist, EligibilityCategory, EligibilityEngine,
    EvidenceCorpus, ProcessKind, RulesetCatalog, StructuredFacts,
};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1980i32..=2024, 1u32..=12, 1u32..=28).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    })
}

fn facts_strategy() -> impl Strategy<Value = StructuredFacts> {
    (
        prop::option::of(date_strategy()),
        prop::option::of(date_strategy()),
        prop::option::of(date_strategy()),
        prop::option::of(date_strategy()),
    )
        .prop_map(
            |(birth, process, residence, certificate)| StructuredFacts {
                birth_date: birth,
                process_start_date: process,
                residence_start_date: residence,
                certificate_emission_date: certificate,
                declared_decision: None,
                registry_confirmations: BTreeMap::new(),
            },
        )
}

fn category_strategy() -> impl Strategy<Value = EligibilityCategory> {
    prop_oneof![
        Just(EligibilityCategory::HighProbabilityEligible),
        Just(EligibilityCategory::MediumProbabilityEligible),
        Just(EligibilityCategory::LowProbabilityEligible),
        Just(EligibilityCategory::EligibleWithCaveats),
        Just(EligibilityCategory::DeferredWithCaveats),
        Just(EligibilityCategory::UncertainEligibility),
        Just(EligibilityCategory::Ineligible),
        Just(EligibilityCategory::AutomaticRejection),
    ]
}

fn process_kind_strategy() -> impl Strategy<Value = ProcessKind> {
    prop_oneof![
        Just(ProcessKind::Definitiva),
        Just(ProcessKind::Ordinaria),
        Just(ProcessKind::Provisoria),
    ]
}

fn primary_strategy() -> impl Strategy<Value = DecisionRecord> {
    (category_strategy(), 0.0f32..=1.0).prop_map(|(category, confidence)| DecisionRecord {
        category,
        confidence,
        score: 12.0,
        recommendation: String::new(),
        legal_grounds: Vec::new(),
        diagnostics: Vec::new(),
        criteria: Vec::new(),
    })
}

fn checklist_strategy() -> impl Strategy<Value = DocumentChecklist> {
    (
        prop::collection::vec("[a-z]{3,12}", 0..4),
        prop::collection::vec("[a-z]{3,12}", 0..4),
        prop::option::of(0u8..=100),
        prop::option::of(prop_oneof![
            Just(ChecklistStatus::Complete),
            Just(ChecklistStatus::Incomplete),
        ]),
    )
        .prop_map(|(missing, failed, pct, status)| DocumentChecklist {
            missing_documents: missing,
            failed_downloads: failed,
            completeness_pct: pct,
            status,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1024))]

    #[test]
    fn consolidated_confidence_stays_within_bounds(
        primary in primary_strategy(),
        checklist in checklist_strategy(),
    ) {
        let consolidated = consolidate(&primary, &checklist);
        prop_assert!(consolidated.confidence >= 0.0);
        prop_assert!(consolidated.confidence <= 1.0);
        prop_assert!(
            consolidated.confidence <= primary.confidence + 1e-6,
            "consolidated {} exceeds primary {}",
            consolidated.confidence,
            primary.confidence
        );
        prop_assert!((0..=100).contains(&consolidated.review_score));
    }

    #[test]
    fn problem_counts_match_the_checklist(checklist in checklist_strategy()) {
        let expected = checklist.missing_documents.len()
            + checklist.failed_downloads.len()
            + usize::from(matches!(checklist.completeness_pct, Some(pct) if pct < 100))
            + usize::from(!matches!(checklist.status, Some(ChecklistStatus::Complete)));
        prop_assert_eq!(checklist.problems().len(), expected);
    }

    #[test]
    fn clean_checklists_never_relabel(primary in primary_strategy()) {
        let checklist = DocumentChecklist {
            missing_documents: Vec::new(),
            failed_downloads: Vec::new(),
            completeness_pct: Some(100),
            status: Some(ChecklistStatus::Complete),
        };
        let consolidated = consolidate(&primary, &checklist);
        prop_assert_eq!(consolidated.category, primary.category);
        prop_assert!(consolidated.problems.is_empty());
    }

    #[test]
    fn any_problem_relabels_plain_eligibility(
        primary in primary_strategy(),
        checklist in checklist_strategy(),
    ) {
        let consolidated = consolidate(&primary, &checklist);
        let plainly_eligible = matches!(
            primary.category,
            EligibilityCategory::HighProbabilityEligible
                | EligibilityCategory::MediumProbabilityEligible
                | EligibilityCategory::LowProbabilityEligible
        );
        if plainly_eligible && !consolidated.problems.is_empty() {
            prop_assert_eq!(
                consolidated.category,
                EligibilityCategory::DeferredWithCaveats
            );
        } else {
            prop_assert_eq!(consolidated.category, primary.category);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn definitiva_age_gate_is_the_only_path_to_automatic_rejection(facts in facts_strategy()) {
        let catalog = RulesetCatalog::standard();
        let engine = EligibilityEngine::new(catalog.ruleset(ProcessKind::Definitiva))
            .expect("ruleset compiles");
        let corpus = EvidenceCorpus::from_documents(&[]);
        let decision = engine.evaluate(&corpus, &facts);

        let in_window =
            matches!(facts.age_at_process_start(), Some(age) if (18..=20).contains(&age));
        if in_window {
            prop_assert_ne!(decision.category, EligibilityCategory::AutomaticRejection);
            prop_assert!(!decision.criteria.is_empty());
        } else {
            prop_assert_eq!(decision.category, EligibilityCategory::AutomaticRejection);
            prop_assert!(decision.criteria.is_empty());
            prop_assert_eq!(decision.confidence, 1.0);
        }
    }

    #[test]
    fn every_evaluation_yields_bounded_metrics(
        facts in facts_strategy(),
        kind in process_kind_strategy(),
    ) {
        let catalog = RulesetCatalog::standard();
        let engine = EligibilityEngine::new(catalog.ruleset(kind)).expect("ruleset compiles");
        let corpus = EvidenceCorpus::from_documents(&[]);
        let decision = engine.evaluate(&corpus, &facts);

        prop_assert!((0.0..=1.0).contains(&decision.confidence));
        prop_assert!(decision.score.is_finite());
        prop_assert!(!decision.recommendation.is_empty());
    }
}

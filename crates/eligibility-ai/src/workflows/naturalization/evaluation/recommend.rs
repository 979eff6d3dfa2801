//! Advisory text and legal grounds attached to a decision.

use super::criteria::CompiledCriterion;
use super::CriterionResult;
use crate::workflows::naturalization::catalog::CriterionGroup;
use crate::workflows::naturalization::domain::EligibilityCategory;

/// Fixed advisory per category, extended with the pending documents when
/// the outcome hinges on them. The strings are the wording case officers
/// expect to read, hence Portuguese.
pub(super) fn advisory(category: EligibilityCategory, pending_documents: &[&str]) -> String {
    let base = match category {
        EligibilityCategory::HighProbabilityEligible => {
            "[OK] RECOMENDADO: Processo elegível com alta probabilidade de aprovação"
        }
        EligibilityCategory::MediumProbabilityEligible => {
            "[OK] RECOMENDADO: Processo elegível com probabilidade média de aprovação"
        }
        EligibilityCategory::LowProbabilityEligible => {
            "[AVISO] RECOMENDADO COM RESSALVAS: Processo elegível mas com baixa probabilidade"
        }
        EligibilityCategory::EligibleWithCaveats => {
            "[AVISO] RECOMENDADO COM RESSALVAS: Processo elegível mas requer atenção especial"
        }
        EligibilityCategory::DeferredWithCaveats => {
            "[OK] RECOMENDADO COM RESSALVAS: Processo elegível mas requer atenção especial"
        }
        EligibilityCategory::UncertainEligibility => {
            "[AVISO] ELEGIBILIDADE INCERTA: Mais informações necessárias para determinar"
        }
        EligibilityCategory::Ineligible => {
            "[ERRO] NÃO RECOMENDADO: Processo não elegível para naturalização"
        }
        EligibilityCategory::AutomaticRejection => {
            "[ERRO] INDEFERIMENTO AUTOMÁTICO: Requisito legal de admissibilidade não atendido"
        }
    };

    let lists_pending = matches!(
        category,
        EligibilityCategory::EligibleWithCaveats | EligibilityCategory::DeferredWithCaveats
    );
    if lists_pending && !pending_documents.is_empty() {
        format!(
            "{base}. Documentação pendente: {}",
            pending_documents.join("; ")
        )
    } else {
        base.to_owned()
    }
}

/// Articles of Lei nº 13.445/2017 that justify the decision: grounds of
/// unmet mandatory criteria and of triggered disqualifiers, deduplicated
/// in first-occurrence order.
pub(super) fn collect_legal_grounds(
    compiled: &[CompiledCriterion],
    results: &[CriterionResult],
) -> Vec<String> {
    let mut grounds: Vec<String> = Vec::new();
    for (criterion, result) in compiled.iter().zip(results) {
        let spec = &criterion.spec;
        let applies = match spec.group {
            CriterionGroup::Mandatory => !result.met,
            CriterionGroup::Disqualifying => result.met,
            CriterionGroup::Favorable => false,
        };
        if !applies {
            continue;
        }
        if let Some(ground) = spec.legal_ground {
            if !grounds.iter().any(|known| known == ground) {
                grounds.push(ground.to_owned());
            }
        }
    }
    grounds
}

//! Naturalização definitiva: conversion of a provisional naturalization once
//! the applicant reaches majority (Art. 70, parágrafo único, Lei nº
//! 13.445/2017). Window is 18 to 20 years of age at the process start.

use super::{
    ConfidenceBonuses, CriterionGroup, CriterionKind, CriterionSpec, DateFact, DecisionThresholds,
    GateCheck, GateSpec, PatternRules, Ruleset,
};
use crate::workflows::naturalization::domain::{EligibilityCategory, ProcessKind};

const ART_70_PARAGRAFO_UNICO: &str = "Art. 70, parágrafo único, da Lei nº 13.445/2017";

pub(super) fn ruleset() -> Ruleset {
    Ruleset {
        process_kind: ProcessKind::Definitiva,
        legal_basis: ART_70_PARAGRAFO_UNICO,
        gates: vec![GateSpec {
            id: "janela_de_idade",
            description: "Idade entre 18 e 20 anos na data de início do processo",
            check: GateCheck::AgeAtProcessStart {
                min: Some(18),
                max: Some(20),
            },
            legal_ground: ART_70_PARAGRAFO_UNICO,
            failure_confidence: 1.0,
        }],
        criteria: criteria(),
        thresholds: DecisionThresholds::standard(EligibilityCategory::DeferredWithCaveats),
        bonuses: ConfidenceBonuses::standard(),
    }
}

fn criteria() -> Vec<CriterionSpec> {
    vec![
        CriterionSpec {
            id: "sem_antecedentes_criminais",
            description: "Não possuir antecedentes criminais",
            weight: 3.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"não\s+consta\s+condenação",
                    r"não\s+consta\s+antecedentes",
                    r"sem\s+antecedentes",
                    r"nenhuma\s+condenação",
                    r"certidão\s+negativa",
                    r"nada\s+constar?",
                    r"não\s+constam.*processos.*criminais",
                    r"certificamos.*não\s+constam",
                ],
                negative: vec![
                    r"consta\s+condenação",
                    r"possui\s+antecedentes",
                    r"com\s+antecedentes",
                    r"condenado",
                    r"processo\s+criminal",
                    r"antecedentes\s+criminais\s+positivos",
                ],
                // Certidão formulas that contain the plain negative fragments
                // as substrings; their presence retracts the negatives.
                explicit_negation: vec![
                    r"não\s+consta\s+condenação",
                    r"não\s+constam.*condenaç",
                    r"nada\s+constar?",
                ],
            }),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "naturalizacao_provisoria",
            description: "Possuir naturalização provisória válida",
            weight: 4.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::ExternalConfirmation {
                registry_key: "naturalizacao_provisoria",
                fallback: PatternRules {
                    positive: vec![
                        r"naturalização\s+provisória",
                        r"certificado\s+provisório",
                        r"portaria.*provisória",
                        r"certificado\s+de\s+naturalização\s+provisório",
                        r"portaria\s+ministerial\s+mj",
                        r"confirmada\s+via\s+banco",
                    ],
                    negative: vec![
                        r"certificado\s+definitivo",
                        r"revogação",
                        r"cancelação",
                        r"perda.*naturalização",
                    ],
                    explicit_negation: vec![],
                },
            },
            missing_is_caveat: false,
            legal_ground: Some(ART_70_PARAGRAFO_UNICO),
        },
        CriterionSpec {
            id: "idade_processo",
            description: "Idade entre 18 e 20 anos na data de início do processo",
            weight: 2.5,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DateRange {
                fact: DateFact::AgeAtProcessStart,
                min: Some(18),
                max: Some(20),
            },
            missing_is_caveat: false,
            legal_ground: Some(ART_70_PARAGRAFO_UNICO),
        },
        CriterionSpec {
            id: "comprovante_residencia",
            description: "Comprovante de tempo de residência",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "comprovante de tempo de residência",
                min_text_len: 100,
                content_negative: vec![
                    r"comprovante.*não.*anexado",
                    r"documento.*não.*encontrado",
                    r"erro.*download.*residência",
                    r"falha.*baixar.*residência",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "documento_identidade",
            description: "Documento oficial de identidade",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "documento oficial de identidade",
                min_text_len: 100,
                content_negative: vec![
                    r"identidade.*não.*anexada",
                    r"documento.*não.*encontrado",
                    r"erro.*download.*identidade",
                    r"falha.*baixar.*identidade",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "tempo_residencia",
            description: "Tempo adequado de residência no Brasil",
            weight: 1.5,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"residindo.*\d+\s*anos",
                r"residência.*\d+\s*anos",
                r"tempo.*residência",
                r"permanência.*\d+\s*anos",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "documentacao_completa",
            description: "Documentação completa e válida",
            weight: 1.0,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"certificado.*válido",
                r"documento.*válido",
                r"validade.*\d{4}",
                r"vigente",
                r"atualizado",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "naturalizacao_revogada",
            description: "Naturalização provisória revogada ou cancelada",
            weight: -4.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"revogação",
                r"cancelação",
                r"perda.*naturalização",
                r"decisão.*negativa",
                r"indeferimento",
            ])),
            missing_is_caveat: false,
            legal_ground: Some(ART_70_PARAGRAFO_UNICO),
        },
        CriterionSpec {
            id: "idade_inadequada",
            description: "Idade incompatível com a conversão",
            weight: -3.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"menor\s+de\s+18",
                r"menor\s+de\s+dezoito",
                r"nascido.*\d{2}/\d{2}/20[1-9]\d",
            ])),
            missing_is_caveat: false,
            legal_ground: Some(ART_70_PARAGRAFO_UNICO),
        },
        CriterionSpec {
            id: "pendencias_pf",
            description: "Não comparecimento à PF ou documentação não apresentada integralmente",
            weight: -3.5,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"não\s+foi\s+apresentada\s+integralmente",
                r"documentos\s+exigidos.*não\s+foi\s+apresentada",
                r"não\s+anexando",
                r"não\s+apresentou",
                r"não\s+compareceu.*agendamento",
                r"não\s+compareceu.*notificação",
                r"não\s+compareceu.*coleta\s+biométrica",
                r"não\s+compareceu.*conferência\s+documental",
                r"requerente\s+n[ãa]o\s+compareceu\s+[àa]\s+unidade",
                r"n[ãa]o\s+compareceu.*coleta.*biom[ée]tric",
                r"coleta.*biom[ée]tric[oa]s?.*n[ãa]o\s+(foi|fora)\s+(efetuada|feita)",
                r"n[ãa]o\s+(foi|fora)\s+(efetuada|feita).*coleta.*biom[ée]tric[oa]s?",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
    ]
}

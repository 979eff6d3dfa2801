//! Naturalização provisória under Art. 70 da Lei nº 13.445/2017: migrant
//! children who fixed residence in Brazil before turning 10, with the request
//! filed by their legal representative. The PF parecer wording drives most of
//! the text evidence.

use super::{
    ConfidenceBonuses, CriterionGroup, CriterionKind, CriterionSpec, DecisionThresholds, GateCheck,
    GateSpec, PatternRules, Ruleset,
};
use crate::workflows::naturalization::domain::{EligibilityCategory, ProcessKind};

const ART_70: &str = "Art. 70 da Lei nº 13.445/2017";

pub(super) fn ruleset() -> Ruleset {
    Ruleset {
        process_kind: ProcessKind::Provisoria,
        legal_basis: ART_70,
        gates: vec![
            GateSpec {
                id: "menoridade",
                description: "Menor de 18 anos na data de início do processo",
                check: GateCheck::AgeAtProcessStart {
                    min: None,
                    max: Some(17),
                },
                legal_ground: ART_70,
                failure_confidence: 1.0,
            },
            GateSpec {
                id: "residencia_antes_dos_10",
                description: "Residência fixada antes de completar 10 anos de idade",
                check: GateCheck::ResidenceFixedBeforeAge { max_age: 10 },
                legal_ground: ART_70,
                failure_confidence: 1.0,
            },
            GateSpec {
                id: "representante_legal",
                description: "Requerimento apresentado por representante legal",
                check: GateCheck::RegistryConfirmationRequired {
                    key: "representante_legal",
                },
                legal_ground: ART_70,
                failure_confidence: 0.9,
            },
        ],
        criteria: criteria(),
        thresholds: DecisionThresholds::standard(EligibilityCategory::EligibleWithCaveats),
        bonuses: ConfidenceBonuses::standard(),
    }
}

fn criteria() -> Vec<CriterionSpec> {
    vec![
        CriterionSpec {
            id: "autorizacao_residencia_responsavel",
            description: "Autorização de residência por prazo indeterminado",
            weight: 3.5,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"possui\s+residência\s+por\s+prazo\s+indeterminado",
                    r"obteve\s+residência\s+por\s+prazo\s+indeterminado",
                    r"residência\s+por\s+prazo\s+indeterminado",
                    r"residência\s+indeterminada",
                ],
                negative: vec![
                    r"não\s+(possui|tem)\s+(autorização\s+de\s+)?residência\s+por\s+prazo\s+indeterminado",
                    r"solicitante\s+de\s+refúgio",
                ],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: Some(ART_70),
        },
        CriterionSpec {
            id: "registro_nascimento",
            description: "Certidão de nascimento do naturalizando",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "certidão de nascimento",
                min_text_len: 100,
                content_negative: vec![
                    r"certidão.*não.*anexada",
                    r"documento.*não.*encontrado",
                    r"registro.*inexistente",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "documento_responsavel",
            description: "Documento de identidade do representante legal",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "documento de identidade do representante legal",
                min_text_len: 100,
                content_negative: vec![
                    r"identidade.*não.*anexada",
                    r"documento.*não.*encontrado",
                    r"representante.*não.*identificado",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "parecer_pf",
            description: "Parecer da Polícia Federal favorável ao deferimento",
            weight: 3.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"opinião\s+favorável\s+ao\s+deferimento",
                    r"favorável\s+ao\s+deferimento",
                    r"deferimento\s+recomendado",
                    r"favorável\s+à\s+naturalização",
                ],
                negative: vec![
                    r"sugere(-se)?\s+o\s+indeferimento",
                    r"indeferimento\s+do\s+pedido",
                    r"não\s+atendeu\s+aos\s+chamados",
                    r"não\s+compareceu",
                    r"opinião\s+pelo\s+arquivamento",
                    r"arquivamento",
                ],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "residencia_antes_10_anos",
            description: "Residência confirmada antes de completar 10 anos",
            weight: 1.5,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"antes\s+de\s+completar\s+10\s+(\(dez\)\s+)?anos",
                r"antes\s+dos\s+10\s+anos",
                r"menos\s+de\s+10\s+anos\s+de\s+idade",
                r"residência\s+(por\s+prazo\s+indeterminado\s+)?no\s+brasil\s+desde",
                r"9\s+anos\s+e\s+(onze|11|seis|6|um|1)\s+m[êe]s(es)?",
                r"nove\s+anos\s+e\s+(onze|11|seis|6|um|1)\s+m[êe]s(es)?",
                r"(9|nove)\s+anos\s+e\s+meio",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "matricula_escolar",
            description: "Matrícula em instituição de ensino no Brasil",
            weight: 1.0,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"matrícula\s+escolar",
                r"declaração\s+de\s+matrícula",
                r"frequenta.*escola",
                r"histórico\s+escolar",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "falsidade_documental",
            description: "Indícios concretos de falsidade documental",
            weight: -4.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"falsidade\s+documental\s+(encontrada|detectada|identificada|comprovada)",
                    r"documento\s+fals(o|ificado)",
                    r"fraude\s+documental\s+comprovada",
                    r"irregularidade\s+documental\s+grave",
                    r"inconsistência\s+documental\s+comprovada",
                ],
                // Parecer formulas that rule falsity out; administrative
                // wording such as "não compareceu" never appears here and
                // therefore never triggers this disqualifier.
                negative: vec![
                    r"não\s+(foi\s+identificad[oa]|há\s+indícios\s+de)\s+falsidade",
                    r"não\s+(foi\s+)?constat(ou(-se)?|ada)\s+falsidade",
                    r"sem\s+indícios\s+de\s+falsidade",
                    r"não\s+há\s+falsidade",
                ],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "residencia_apos_10_anos",
            description: "Residência fixada somente após os 10 anos de idade",
            weight: -3.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"(depois\s+de|após)\s+(completar|ter\s+completado)\s+10\s+(\(dez\)\s+)?anos",
                r"obteve\s+residência\s+(após|depois\s+d)os?\s+10\s+anos",
                r"residência\s+obtida\s+(após|depois\s+d)os?\s+10\s+anos",
                r"quando\s+tinha\s+1[0-7]\s+anos",
                r"1[0-7]\s+ano\(s\)\s+e",
                r"(dez|onze|doze|treze|quatorze|quinze|dezesseis|dezessete)\s+anos\s+e",
            ])),
            missing_is_caveat: false,
            legal_ground: Some(ART_70),
        },
    ]
}

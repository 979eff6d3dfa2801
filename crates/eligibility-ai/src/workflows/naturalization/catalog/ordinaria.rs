//! Naturalização ordinária under Art. 65 da Lei nº 13.445/2017: civil
//! capacity, minimum residence, communication in Portuguese, and clean
//! criminal records, each inciso cited on failure.

use super::{
    ConfidenceBonuses, CriterionGroup, CriterionKind, CriterionSpec, DateFact, DecisionThresholds,
    GateCheck, GateSpec, PatternRules, Ruleset,
};
use crate::workflows::naturalization::domain::{EligibilityCategory, ProcessKind};

const ART_65: &str = "Art. 65 da Lei nº 13.445/2017";
const ART_65_I: &str = "Art. 65, inciso I da Lei nº 13.445/2017";
const ART_65_II: &str = "Art. 65, inciso II da Lei nº 13.445/2017";
const ART_65_III: &str = "Art. 65, inciso III da Lei nº 13.445/2017";
const ART_65_IV: &str = "Art. 65, inciso IV da Lei nº 13.445/2017";

pub(super) fn ruleset() -> Ruleset {
    Ruleset {
        process_kind: ProcessKind::Ordinaria,
        legal_basis: ART_65,
        gates: vec![GateSpec {
            id: "capacidade_civil",
            description: "Maior de 18 anos na data de início do processo",
            check: GateCheck::AgeAtProcessStart {
                min: Some(18),
                max: None,
            },
            legal_ground: ART_65_I,
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
            id: "capacidade_civil",
            description: "Capacidade civil segundo a lei brasileira",
            weight: 2.5,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DateRange {
                fact: DateFact::AgeAtProcessStart,
                min: Some(18),
                max: None,
            },
            missing_is_caveat: false,
            legal_ground: Some(ART_65_I),
        },
        CriterionSpec {
            id: "residencia_minima",
            description: "Residência em território nacional pelo prazo mínimo de 4 anos",
            weight: 3.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DateRange {
                fact: DateFact::ResidenceYearsAtProcessStart,
                min: Some(4),
                max: None,
            },
            missing_is_caveat: false,
            legal_ground: Some(ART_65_II),
        },
        CriterionSpec {
            id: "comunicacao_portugues",
            description: "Comunicação em língua portuguesa",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"comprovante\s+de\s+comunica(ção|r)\s+em\s+português",
                    r"comunica(ção|r-se)\s+em\s+(língua\s+)?portuguesa?",
                    r"proficiência.*português",
                    r"celpe-?bras",
                    r"curso\s+de\s+português.*conclu[íi]do",
                    r"histórico\s+escolar",
                ],
                negative: vec![
                    r"não\s+anexou.*comunicação",
                    r"não\s+se\s+comunica\s+em\s+português",
                    r"problema.*português",
                ],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: Some(ART_65_III),
        },
        CriterionSpec {
            id: "sem_condenacao",
            description: "Inexistência de condenação penal, ressalvada a reabilitação",
            weight: 3.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"não\s+consta\s+condenação",
                    r"não\s+constam.*processos.*criminais",
                    r"certidão\s+negativa",
                    r"nada\s+constar?",
                    r"sem\s+antecedentes",
                ],
                negative: vec![
                    r"consta\s+condenação",
                    r"condenado",
                    r"possui\s+antecedentes",
                    r"processo\s+criminal",
                ],
                explicit_negation: vec![
                    r"não\s+consta\s+condenação",
                    r"não\s+constam.*condenaç",
                    r"nada\s+constar?",
                ],
            }),
            missing_is_caveat: false,
            legal_ground: Some(ART_65_IV),
        },
        CriterionSpec {
            id: "certidao_antecedentes_valida",
            description: "Certidão de antecedentes emitida nos últimos 180 dias",
            weight: 1.5,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DateRange {
                fact: DateFact::CertificateAgeDays,
                min: None,
                max: Some(180),
            },
            missing_is_caveat: true,
            legal_ground: Some(ART_65_IV),
        },
        CriterionSpec {
            id: "crnm",
            description: "Carteira de Registro Nacional Migratório",
            weight: 2.0,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "carteira de registro nacional migratório",
                min_text_len: 100,
                content_negative: vec![
                    r"crnm.*não.*anexad",
                    r"documento.*não.*encontrado",
                    r"registro.*cancelado",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "cpf",
            description: "Comprovante de situação cadastral do CPF",
            weight: 1.5,
            group: CriterionGroup::Mandatory,
            kind: CriterionKind::DocumentPresence {
                document: "comprovante de situação cadastral do cpf",
                min_text_len: 40,
                content_negative: vec![
                    r"situação\s+cadastral.*irregular",
                    r"cpf.*suspenso",
                    r"cpf.*cancelado",
                ],
            },
            missing_is_caveat: true,
            legal_ground: None,
        },
        CriterionSpec {
            id: "residencia_excedente",
            description: "Tempo de residência superior ao mínimo legal",
            weight: 1.5,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"residindo.*\d+\s*anos",
                r"residência.*superior.*\d+\s*anos",
                r"mais\s+de\s+\d+\s+anos.*resid",
                r"reside\s+no\s+brasil\s+desde",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "atividade_profissional",
            description: "Exercício de atividade profissional ou renda própria",
            weight: 1.0,
            group: CriterionGroup::Favorable,
            kind: CriterionKind::Pattern(PatternRules::positive_only(vec![
                r"carteira\s+de\s+trabalho",
                r"vínculo\s+empregatício",
                r"atividade\s+profissional",
                r"contrato\s+de\s+trabalho",
                r"renda\s+própria",
            ])),
            missing_is_caveat: false,
            legal_ground: None,
        },
        CriterionSpec {
            id: "condenacao_sem_reabilitacao",
            description: "Condenação penal sem reabilitação",
            weight: -4.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"condenação.*trânsito\s+em\s+julgado",
                    r"condenado.*sem.*reabilitação",
                    r"cumprindo\s+pena",
                    r"execução\s+penal",
                ],
                negative: vec![r"reabilita(ção|do)", r"extinção\s+da\s+punibilidade"],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: Some(ART_65_IV),
        },
        CriterionSpec {
            id: "permanencia_irregular",
            description: "Permanência irregular em território nacional",
            weight: -3.0,
            group: CriterionGroup::Disqualifying,
            kind: CriterionKind::Pattern(PatternRules {
                positive: vec![
                    r"permanência\s+irregular",
                    r"situação\s+migratória\s+irregular",
                    r"visto\s+vencido",
                    r"estada\s+irregular",
                ],
                negative: vec![r"situação\s+migratória\s+regular(izada)?"],
                explicit_negation: vec![],
            }),
            missing_is_caveat: false,
            legal_ground: Some(ART_65_II),
        },
    ]
}

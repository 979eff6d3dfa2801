use crate::infra::{
    audit_io_error, evaluate_submission, InMemoryAuditTrail, InMemoryCaseRepository,
};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use eligibility_ai::error::AppError;
use eligibility_ai::workflows::naturalization::audit::CsvAuditLog;
use eligibility_ai::workflows::naturalization::{
    AuditSink, CaseAuditEntry, CaseFormFields, CaseId, CaseService, CaseSubmission,
    ChecklistStatus, DocumentChecklist, EvidenceDocument, ProcessKind,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only walk cases of this kind (definitiva, ordinaria, or provisoria).
    #[arg(long, value_parser = crate::infra::parse_kind)]
    pub(crate) kind: Option<ProcessKind>,
    /// Render the collected audit trail as CSV at the end of the demo.
    #[arg(long)]
    pub(crate) audit_csv: bool,
    /// Stop after the decision step, skipping documentation review.
    #[arg(long)]
    pub(crate) skip_consolidation: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a case submission JSON file.
    #[arg(long)]
    pub(crate) case_file: PathBuf,
    /// Write the decision's audit trail to this CSV file.
    #[arg(long)]
    pub(crate) audit_csv: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        kind,
        audit_csv,
        skip_consolidation,
    } = args;

    println!("Naturalization eligibility demo");

    let repository = Arc::new(InMemoryCaseRepository::default());
    let audit = Arc::new(InMemoryAuditTrail::default());
    let service = CaseService::new(repository, audit.clone())?;

    let samples = [
        sample_definitiva(),
        sample_ordinaria(),
        sample_provisoria(),
    ];
    for submission in samples {
        if let Some(wanted) = kind {
            if wanted != submission.process_kind {
                continue;
            }
        }

        let kind_label = submission.process_kind.label();
        let record = match service.submit(submission) {
            Ok(record) => record,
            Err(err) => {
                println!("  Submission rejected: {}", err);
                continue;
            }
        };
        println!("\nCase {} ({})", record.case.case_id.0, kind_label);

        let decision = match service.decide(&record.case.case_id) {
            Ok(decision) => decision,
            Err(err) => {
                println!("  Decision unavailable: {}", err);
                continue;
            }
        };
        println!(
            "  Decision: {} (score {:.1}, confidence {:.2})",
            decision.category, decision.score, decision.confidence
        );
        println!("  Recommendation: {}", decision.recommendation);
        if !decision.legal_grounds.is_empty() {
            println!("  Legal grounds:");
            for ground in &decision.legal_grounds {
                println!("    - {}", ground);
            }
        }
        if !decision.diagnostics.is_empty() {
            println!("  Diagnostics:");
            for diagnostic in &decision.diagnostics {
                println!("    - {}", diagnostic);
            }
        }
        let met = decision.criteria.iter().filter(|result| result.met).count();
        println!("  Criteria met: {}/{}", met, decision.criteria.len());

        if skip_consolidation {
            continue;
        }
        let checklist = demo_checklist(record.case.process_kind);
        match service.consolidate(&record.case.case_id, &checklist) {
            Ok(consolidated) => {
                println!(
                    "  Consolidated: {} (review score {}, confidence {:.2})",
                    consolidated.category, consolidated.review_score, consolidated.confidence
                );
                for problem in &consolidated.problems {
                    println!("    - {}", problem);
                }
            }
            Err(err) => println!("  Consolidation unavailable: {}", err),
        }
    }

    if audit_csv {
        println!("\nAudit trail (CSV)");
        let log = CsvAuditLog::from_writer(Vec::new());
        for entry in audit.entries() {
            log.record(entry).map_err(audit_io_error)?;
        }
        let bytes = log.into_inner().map_err(audit_io_error)?;
        match String::from_utf8(bytes) {
            Ok(rendered) => print!("{}", rendered),
            Err(err) => println!("  Audit render failed: {}", err),
        }
    }

    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        case_file,
        audit_csv,
    } = args;

    let raw = std::fs::read_to_string(&case_file)?;
    let submission: CaseSubmission = serde_json::from_str(&raw)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

    let (case, decision) = match evaluate_submission(submission) {
        Ok(result) => result,
        Err(rejection) => {
            println!("Submission rejected: {}", rejection);
            return Ok(());
        }
    };

    let case_label = if case.case_id.0.is_empty() {
        "ad-hoc".to_string()
    } else {
        case.case_id.0.clone()
    };
    println!("Case {} ({})", case_label, case.process_kind.label());
    for note in &case.intake_notes {
        println!("  Intake note: {}", note);
    }
    match serde_json::to_string_pretty(&decision) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Decision payload unavailable: {}", err),
    }

    if let Some(path) = audit_csv {
        let log = CsvAuditLog::create(&path).map_err(audit_io_error)?;
        log.record(CaseAuditEntry {
            case_id: CaseId(case_label),
            process_kind: case.process_kind,
            category: decision.category.label().to_owned(),
            confidence: decision.confidence,
            score: decision.score,
            diagnostics: decision.diagnostics.clone(),
        })
        .map_err(audit_io_error)?;
        println!("Audit trail written to {}", path.display());
    }

    Ok(())
}

/// Checklist used for the consolidation step of the demo. The ordinária
/// sample reviews as incomplete so the relabeling path shows up in the
/// output.
fn demo_checklist(kind: ProcessKind) -> DocumentChecklist {
    match kind {
        ProcessKind::Ordinaria => DocumentChecklist {
            missing_documents: vec!["Comprovante de residência atualizado".to_string()],
            failed_downloads: Vec::new(),
            completeness_pct: Some(85),
            status: Some(ChecklistStatus::Incomplete),
        },
        _ => DocumentChecklist {
            missing_documents: Vec::new(),
            failed_downloads: Vec::new(),
            completeness_pct: Some(100),
            status: Some(ChecklistStatus::Complete),
        },
    }
}

pub(crate) fn sample_definitiva() -> CaseSubmission {
    let mut registry = BTreeMap::new();
    registry.insert("naturalizacao_provisoria".to_string(), true);

    CaseSubmission {
        case_id: Some("DEMO-DEF-001".to_string()),
        process_kind: ProcessKind::Definitiva,
        documents: vec![
            EvidenceDocument::new(
                "Certidão de Antecedentes Criminais",
                "CERTIFICAMOS que não consta condenação criminal em nome do requerente. \
                 Certidão negativa emitida pela Polícia Federal. Nada consta.",
            ),
            EvidenceDocument::new(
                "Comprovante de tempo de residência",
                "Declaramos para os devidos fins que o requerente mantém tempo de residência \
                 contínua no território nacional, residindo no município de São Paulo há 12 anos, \
                 conforme registros de endereço do período.",
            ),
            EvidenceDocument::new(
                "Documento oficial de identidade",
                "Carteira de identidade do requerente, nascido em 15/03/2006, documento válido \
                 e vigente, com validade até 2030, registro atualizado junto ao órgão emissor.",
            ),
        ],
        form: CaseFormFields {
            birth_date: Some("15/03/2006".to_string()),
            process_start_date: Some("10/06/2025".to_string()),
            residence_start_date: Some("20/08/2012".to_string()),
            certificate_emission_date: Some("02/05/2025".to_string()),
            declared_decision: None,
            registry_confirmations: registry,
        },
    }
}

pub(crate) fn sample_ordinaria() -> CaseSubmission {
    CaseSubmission {
        case_id: Some("DEMO-ORD-001".to_string()),
        process_kind: ProcessKind::Ordinaria,
        documents: vec![
            EvidenceDocument::new(
                "Carteira de Registro Nacional Migratório",
                "Carteira de Registro Nacional Migratório emitida pela Polícia Federal. \
                 Classificação: residente. Reside no Brasil desde maio de 2015, amparado por \
                 autorização de residência por prazo indeterminado.",
            ),
            EvidenceDocument::new(
                "Comprovante de situação cadastral do CPF",
                "Situação cadastral: REGULAR. CPF de número 123.456.789-00 inscrito em \
                 10/05/2015, comprovante emitido pela Receita Federal.",
            ),
            EvidenceDocument::new(
                "Certidão de Antecedentes Criminais",
                "Certifico que NADA CONSTA em nome do requerente nos registros desta unidade. \
                 Certidão negativa de antecedentes emitida nos termos da legislação.",
            ),
            EvidenceDocument::new(
                "Certificado CELPE-Bras",
                "Certificado de Proficiência em Língua Portuguesa para Estrangeiros, \
                 CELPE-Bras, obtido com nível intermediário superior, atestando a comunicação \
                 em língua portuguesa do requerente.",
            ),
            EvidenceDocument::new(
                "Comprovante de renda",
                "Contrato de trabalho firmado com a empresa Horizonte Ltda, carteira de \
                 trabalho assinada desde 2019, exercendo atividade profissional de técnico em \
                 eletrônica com renda própria mensal de R$ 4.500,00.",
            ),
        ],
        form: CaseFormFields {
            birth_date: Some("01/01/1990".to_string()),
            process_start_date: Some("10/06/2025".to_string()),
            residence_start_date: Some("15/05/2015".to_string()),
            certificate_emission_date: Some("20/04/2025".to_string()),
            declared_decision: None,
            registry_confirmations: BTreeMap::new(),
        },
    }
}

pub(crate) fn sample_provisoria() -> CaseSubmission {
    let mut registry = BTreeMap::new();
    registry.insert("representante_legal".to_string(), true);

    CaseSubmission {
        case_id: Some("DEMO-PRO-001".to_string()),
        process_kind: ProcessKind::Provisoria,
        documents: vec![
            EvidenceDocument::new(
                "Parecer da Polícia Federal",
                "O naturalizando possui residência por prazo indeterminado no Brasil desde \
                 20/03/2016, fixada antes de completar 10 (dez) anos de idade. Opinião \
                 favorável ao deferimento do pedido de naturalização provisória.",
            ),
            EvidenceDocument::new(
                "Certidão de nascimento",
                "Certidão de nascimento emitida pelo cartório de registro civil das pessoas \
                 naturais, registrando o nascimento do menor em 10/02/2011, com filiação e \
                 naturalidade conforme assento lavrado no livro A-123.",
            ),
            EvidenceDocument::new(
                "Documento de identidade do representante legal",
                "Documento de identidade do representante legal, genitora do naturalizando, \
                 portadora do RG 12.345.678-9 expedido pela SSP, acompanhado do termo de \
                 guarda e do comprovante de responsabilidade legal.",
            ),
            EvidenceDocument::new(
                "Declaração de matrícula escolar",
                "Declaração de matrícula emitida pela Escola Municipal Boa Vista informando \
                 que o aluno frequenta regularmente a escola, matriculado no nono ano do \
                 ensino fundamental.",
            ),
        ],
        form: CaseFormFields {
            birth_date: Some("10/02/2011".to_string()),
            process_start_date: Some("10/06/2025".to_string()),
            residence_start_date: Some("20/03/2016".to_string()),
            certificate_emission_date: None,
            declared_decision: None,
            registry_confirmations: registry,
        },
    }
}

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::naturalization::domain::{
    CaseFile, CaseFormFields, CaseId, CaseStatus, CaseSubmission, EvidenceDocument, ProcessKind,
};
use crate::workflows::naturalization::evaluation::consolidate::{
    ChecklistStatus, DocumentChecklist,
};
use crate::workflows::naturalization::repository::{
    AuditError, AuditSink, CaseAuditEntry, CaseRecord, CaseRepository, RepositoryError,
};
use crate::workflows::naturalization::{
    case_router, CaseService, DecisionRecord, EligibilityEngine, IntakeGuard, RulesetCatalog,
};

pub(super) fn definitiva_submission() -> CaseSubmission {
    let mut registry = BTreeMap::new();
    registry.insert("naturalizacao_provisoria".to_string(), true);

    CaseSubmission {
        case_id: None,
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

pub(super) fn ordinaria_submission() -> CaseSubmission {
    CaseSubmission {
        case_id: None,
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

pub(super) fn provisoria_submission() -> CaseSubmission {
    let mut registry = BTreeMap::new();
    registry.insert("representante_legal".to_string(), true);

    CaseSubmission {
        case_id: None,
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

pub(super) fn underage_definitiva_submission() -> CaseSubmission {
    let mut submission = definitiva_submission();
    submission.form.birth_date = Some("15/03/2010".to_string());
    submission
}

pub(super) fn convicted_ordinaria_submission() -> CaseSubmission {
    let mut submission = ordinaria_submission();
    for document in &mut submission.documents {
        if document.name == "Certidão de Antecedentes Criminais" {
            document.raw_text = "Consta condenação criminal com trânsito em julgado, réu \
                                 condenado, atualmente cumprindo pena em regime semiaberto."
                .to_string();
        }
    }
    submission
}

pub(super) fn missing_documents_ordinaria_submission() -> CaseSubmission {
    let mut submission = ordinaria_submission();
    submission.documents.retain(|document| {
        document.name != "Carteira de Registro Nacional Migratório"
            && document.name != "Comprovante de situação cadastral do CPF"
    });
    submission
}

pub(super) fn complete_checklist() -> DocumentChecklist {
    DocumentChecklist {
        missing_documents: Vec::new(),
        failed_downloads: Vec::new(),
        completeness_pct: Some(100),
        status: Some(ChecklistStatus::Complete),
    }
}

pub(super) fn incomplete_checklist() -> DocumentChecklist {
    DocumentChecklist {
        missing_documents: vec!["Comprovante de residência".to_string()],
        failed_downloads: vec!["Documento de identidade".to_string()],
        completeness_pct: Some(60),
        status: Some(ChecklistStatus::Incomplete),
    }
}

pub(super) fn case_file(submission: CaseSubmission) -> CaseFile {
    IntakeGuard::default()
        .case_from_submission(submission)
        .expect("valid submission")
}

pub(super) fn engine(kind: ProcessKind) -> EligibilityEngine {
    let catalog = RulesetCatalog::standard();
    EligibilityEngine::new(catalog.ruleset(kind)).expect("ruleset compiles")
}

pub(super) fn decide(submission: CaseSubmission) -> DecisionRecord {
    let case = case_file(submission);
    let corpus = case.corpus();
    engine(case.process_kind).evaluate(&corpus, &case.facts)
}

pub(super) fn build_service() -> (
    CaseService<MemoryRepository, MemoryAudit>,
    Arc<MemoryRepository>,
    Arc<MemoryAudit>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let audit = Arc::new(MemoryAudit::default());
    let service =
        CaseService::new(repository.clone(), audit.clone()).expect("standard catalog compiles");
    (service, repository, audit)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.case.case_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.case.case_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.case.case_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<CaseRecord> = guard
            .values()
            .filter(|record| record.status == CaseStatus::Received)
            .cloned()
            .collect();
        pending.sort_by(|left, right| left.case.case_id.cmp(&right.case.case_id));
        pending.truncate(limit);
        Ok(pending)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryAudit {
    entries: Arc<Mutex<Vec<CaseAuditEntry>>>,
}

impl MemoryAudit {
    pub(super) fn entries(&self) -> Vec<CaseAuditEntry> {
        self.entries.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn record(&self, entry: CaseAuditEntry) -> Result<(), AuditError> {
        self.entries
            .lock()
            .expect("audit mutex poisoned")
            .push(entry);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl CaseRepository for ConflictRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct FailingAudit;

impl AuditSink for FailingAudit {
    fn record(&self, _entry: CaseAuditEntry) -> Result<(), AuditError> {
        Err(AuditError::Transport("spreadsheet offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn case_router_with_service(
    service: CaseService<MemoryRepository, MemoryAudit>,
) -> axum::Router {
    case_router(Arc::new(service))
}

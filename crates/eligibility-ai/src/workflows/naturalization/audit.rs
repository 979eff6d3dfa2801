//! CSV rendering of the audit trail, one row per diagnostic.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use super::repository::{AuditError, AuditSink, CaseAuditEntry};

/// Audit sink writing the decision trail as CSV for the spreadsheet drop.
///
/// Every entry yields at least one row; entries with diagnostics yield
/// one row per diagnostic so filters over the sheet stay line-oriented.
pub struct CsvAuditLog<W: Write + Send> {
    writer: Mutex<csv::Writer<W>>,
}

#[derive(Serialize)]
struct AuditRow<'a> {
    case_id: &'a str,
    process_kind: &'a str,
    category: &'a str,
    confidence: f32,
    score: f32,
    diagnostic: &'a str,
}

impl CsvAuditLog<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let file = File::create(path).map_err(|err| AuditError::Transport(err.to_string()))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write + Send> CsvAuditLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self {
            writer: Mutex::new(csv::Writer::from_writer(writer)),
        }
    }

    /// Consumes the log and hands back the underlying writer, flushing
    /// buffered rows first.
    pub fn into_inner(self) -> Result<W, AuditError> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| AuditError::Transport("audit log poisoned".to_owned()))?;
        writer
            .into_inner()
            .map_err(|err| AuditError::Transport(err.to_string()))
    }
}

impl<W: Write + Send> AuditSink for CsvAuditLog<W> {
    fn record(&self, entry: CaseAuditEntry) -> Result<(), AuditError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| AuditError::Transport("audit log poisoned".to_owned()))?;

        if entry.diagnostics.is_empty() {
            write_row(&mut writer, &entry, "")?;
        } else {
            for diagnostic in &entry.diagnostics {
                write_row(&mut writer, &entry, diagnostic)?;
            }
        }
        writer
            .flush()
            .map_err(|err| AuditError::Transport(err.to_string()))
    }
}

fn write_row<W: Write>(
    writer: &mut csv::Writer<W>,
    entry: &CaseAuditEntry,
    diagnostic: &str,
) -> Result<(), AuditError> {
    writer
        .serialize(AuditRow {
            case_id: &entry.case_id.0,
            process_kind: entry.process_kind.label(),
            category: &entry.category,
            confidence: entry.confidence,
            score: entry.score,
            diagnostic,
        })
        .map_err(|err| AuditError::Transport(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::naturalization::domain::{CaseId, ProcessKind};

    fn entry(diagnostics: Vec<String>) -> CaseAuditEntry {
        CaseAuditEntry {
            case_id: CaseId("NAT-000007".to_owned()),
            process_kind: ProcessKind::Ordinaria,
            category: "elegivel_alta_probabilidade".to_owned(),
            confidence: 0.95,
            score: 16.5,
            diagnostics,
        }
    }

    #[test]
    fn one_row_per_diagnostic() {
        let log = CsvAuditLog::from_writer(Vec::new());
        log.record(entry(vec![
            "criterion `cpf` unmet: document `cpf` missing".to_owned(),
            "criterion `crnm` unmet: document `crnm` missing".to_owned(),
        ]))
        .unwrap();

        let bytes = log.into_inner().unwrap();
        let rendered = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("case_id,process_kind,category"));
        assert!(lines[1].contains("NAT-000007"));
        assert!(lines[2].contains("criterion `crnm` unmet"));
    }

    #[test]
    fn clean_decisions_still_produce_a_row() {
        let log = CsvAuditLog::from_writer(Vec::new());
        log.record(entry(Vec::new())).unwrap();

        let rendered = String::from_utf8(log.into_inner().unwrap()).unwrap();
        assert_eq!(rendered.lines().count(), 2);
    }
}

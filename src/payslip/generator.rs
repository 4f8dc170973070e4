use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::*;

use super::filter::month_name;

#[derive(Debug, Error)]
pub enum PayslipError {
    #[error("Failed to write payslip: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode payslip: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Payslip generation failed: {0}")]
    Generation(String),
}

/// Turns one payroll record into a downloadable document.
///
/// The document is produced as a side effect; callers only learn whether it
/// worked.
#[async_trait]
pub trait PayslipGenerator: Send + Sync {
    async fn generate(&self, record: &PayrollRecord) -> Result<(), PayslipError>;
}

/// Writes one JSON statement per record into a directory.
#[derive(Debug, Clone)]
pub struct FilePayslipGenerator {
    output_dir: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Statement<'a> {
    period: String,
    employee_name: String,
    #[serde(flatten)]
    record: &'a PayrollRecord,
}

impl FilePayslipGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File name for a record, e.g. `payslip_41_jane_doe_2026_03.json`.
    ///
    /// The record id keeps namesakes in the same period apart.
    pub fn file_name(record: &PayrollRecord) -> String {
        let name: String = record
            .employee_name()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!(
            "payslip_{}_{}_{}_{:02}.json",
            record.id,
            name.trim_matches('_'),
            record.year,
            record.month
        )
    }
}

#[async_trait]
impl PayslipGenerator for FilePayslipGenerator {
    async fn generate(&self, record: &PayrollRecord) -> Result<(), PayslipError> {
        let month = month_name(record.month).ok_or_else(|| {
            PayslipError::Generation(format!("invalid month {} in record {}", record.month, record.id))
        })?;
        let statement = Statement {
            period: format!("{} {}", month, record.year),
            employee_name: record.employee_name(),
            record,
        };
        let body = serde_json::to_vec_pretty(&statement)?;

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(Self::file_name(record));
        tokio::fs::write(&path, body).await?;
        tracing::debug!(path = %path.display(), "Payslip written");
        Ok(())
    }
}

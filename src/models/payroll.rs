use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A monthly compensation statement for one employee.
///
/// Payroll records are read-only here: they are fetched, filtered by period
/// and employee, and handed to a payslip generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: i64,
    pub employee_id: i64,
    /// Employee summary joined in by the API.
    #[serde(default)]
    pub employee: Option<PayrollEmployee>,
    /// Calendar month, 1 to 12.
    pub month: u32,
    pub year: i32,
    /// Some backends serialize decimals as strings.
    #[serde(default, deserialize_with = "amount")]
    pub net_salary: f64,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

impl PayrollRecord {
    /// Display name of the employee, falling back to the id when the join is missing.
    pub fn employee_name(&self) -> String {
        match &self.employee {
            Some(e) => format!("{} {}", e.first_name, e.last_name),
            None => format!("employee #{}", self.employee_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEmployee {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Counters for one batch-download run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadBatchResult {
    pub success_count: usize,
    pub failure_count: usize,
}

impl DownloadBatchResult {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null(()),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        Raw::Null(()) => Ok(0.0),
    }
}

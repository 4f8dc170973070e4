//! Monthly payslip browsing and download.
//!
//! [`PayslipBrowser`] holds the period/employee selection, re-runs the payroll
//! query on demand while the view is open, and drives a
//! [`PayslipGenerator`] either for one record or for the whole result set.
//! Batch runs are strictly sequential with a fixed pause between records.

mod filter;
mod generator;

pub use filter::*;
pub use generator::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::client::{ClientError, HrClient};
use crate::models::*;
use crate::notify::Notifier;

/// Pause between consecutive generations in a batch run.
pub const BATCH_PACING: Duration = Duration::from_millis(500);

pub const NO_PAYROLLS_FOUND: &str = "No payrolls found for the selected period";
pub const DOWNLOAD_FAILED: &str = "Failed to download payslip";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Month must be between 1 and 12 (got {0})")]
    InvalidMonth(u32),

    #[error("Year {year} is not offered; choose one of {allowed:?}")]
    InvalidYear { year: i32, allowed: [i32; 3] },
}

/// Clears a busy flag when dropped, whatever way the operation ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    /// Raise the flag, or return `None` when it is already raised.
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct PayslipBrowser {
    client: HrClient,
    caller: Caller,
    generator: Arc<dyn PayslipGenerator>,
    notifier: Arc<dyn Notifier>,
    pacing: Duration,
    today: NaiveDate,
    selection: PayslipSelection,
    records: Vec<PayrollRecord>,
    active: bool,
    downloading: AtomicBool,
    downloading_all: AtomicBool,
}

impl PayslipBrowser {
    /// Create a browser for `caller`, selecting the month containing `today`.
    /// The view starts closed.
    pub fn new(
        client: HrClient,
        caller: Caller,
        generator: Arc<dyn PayslipGenerator>,
        notifier: Arc<dyn Notifier>,
        today: NaiveDate,
    ) -> Self {
        Self {
            client,
            caller,
            generator,
            notifier,
            pacing: BATCH_PACING,
            today,
            selection: PayslipSelection::current(today),
            records: Vec::new(),
            active: false,
            downloading: AtomicBool::new(false),
            downloading_all: AtomicBool::new(false),
        }
    }

    /// Override the pause between batch items.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn selection(&self) -> &PayslipSelection {
        &self.selection
    }

    pub fn years(&self) -> [i32; 3] {
        available_years(self.today)
    }

    pub fn select_month(&mut self, month: u32) -> Result<(), SelectionError> {
        if month_name(month).is_none() {
            return Err(SelectionError::InvalidMonth(month));
        }
        self.selection.month = month;
        Ok(())
    }

    pub fn select_year(&mut self, year: i32) -> Result<(), SelectionError> {
        let allowed = self.years();
        if !allowed.contains(&year) {
            return Err(SelectionError::InvalidYear { year, allowed });
        }
        self.selection.year = year;
        Ok(())
    }

    /// Pick an employee, or `None` for everyone. Has no effect on what an
    /// employee caller can see.
    pub fn select_employee(&mut self, employee_id: Option<i64>) {
        self.selection.employee_id = employee_id;
    }

    /// Records from the last [`refresh`](Self::refresh), in API order.
    pub fn records(&self) -> &[PayrollRecord] {
        &self.records
    }

    /// Heading for the current result set, e.g. `Payrolls for March 2026`.
    pub fn period_label(&self) -> String {
        format!(
            "Payrolls for {} {}",
            month_name(self.selection.month).unwrap_or("?"),
            self.selection.year
        )
    }

    pub fn count_label(&self) -> String {
        format!("{} payroll(s) found", self.records.len())
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading.load(Ordering::Acquire)
    }

    pub fn is_downloading_all(&self) -> bool {
        self.downloading_all.load(Ordering::Acquire)
    }

    /// Re-run the payroll query for the current selection.
    ///
    /// Returns `None` without touching the network while the view is closed.
    pub async fn refresh(&mut self) -> Result<Option<&[PayrollRecord]>, ClientError> {
        if !self.active {
            tracing::debug!("Payslip view closed, skipping payroll query");
            return Ok(None);
        }
        let all = self.client.list_payroll().await?;
        let fetched = all.len();
        self.records = filter_records(all, &self.selection, &self.caller);
        tracing::info!(
            month = self.selection.month,
            year = self.selection.year,
            fetched,
            matched = self.records.len(),
            "Payroll query"
        );
        Ok(Some(&self.records))
    }

    /// Employees offered in the picker. Employee callers cannot pick anyone,
    /// so for them this returns an empty list without calling the API.
    pub async fn employee_choices(&self) -> Result<Vec<User>, ClientError> {
        if self.caller.is_employee() {
            return Ok(Vec::new());
        }
        let users = self.client.list_users().await?;
        Ok(users.into_iter().filter(User::is_employee).collect())
    }

    /// Generate the payslip for one record and report the outcome.
    ///
    /// Returns `false` on failure, or when another single download is still
    /// running.
    pub async fn download_one(&self, record: &PayrollRecord) -> bool {
        let Some(_busy) = BusyGuard::acquire(&self.downloading) else {
            tracing::debug!(record_id = record.id, "Download already in progress");
            return false;
        };
        match self.generator.generate(record).await {
            Ok(()) => {
                self.notifier.success(&format!(
                    "Payslip downloaded for {}",
                    record.employee_name()
                ));
                true
            }
            Err(e) => {
                tracing::error!(record_id = record.id, error = %e, "Error downloading payslip");
                self.notifier.error(DOWNLOAD_FAILED);
                false
            }
        }
    }

    /// Generate payslips for every record of the current result set.
    ///
    /// Records are processed one at a time in list order, with the pacing
    /// delay between consecutive records whether or not the previous one
    /// succeeded. A failure is counted and the run carries on.
    pub async fn download_all(&self) -> DownloadBatchResult {
        let mut result = DownloadBatchResult::default();
        if self.records.is_empty() {
            self.notifier.warning(NO_PAYROLLS_FOUND);
            return result;
        }
        let Some(_busy) = BusyGuard::acquire(&self.downloading_all) else {
            tracing::debug!("Batch download already in progress");
            return result;
        };

        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.pacing).await;
            }
            match self.generator.generate(record).await {
                Ok(()) => result.success_count += 1,
                Err(e) => {
                    tracing::error!(
                        record_id = record.id,
                        employee = %record.employee_name(),
                        error = %e,
                        "Error downloading payslip"
                    );
                    result.failure_count += 1;
                }
            }
        }

        tracing::info!(
            succeeded = result.success_count,
            failed = result.failure_count,
            "Batch payslip download finished"
        );
        if result.success_count > 0 {
            self.notifier.success(&format!(
                "Downloaded {} payslip(s) successfully!",
                result.success_count
            ));
        }
        if result.failure_count > 0 {
            self.notifier.error(&format!(
                "Failed to download {} payslip(s)",
                result.failure_count
            ));
        }
        result
    }
}

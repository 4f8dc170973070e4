//! Domain models for hrdesk.
//!
//! - [`Goal`]: A performance goal whose progress employees report.
//! - [`KpiAssessment`] / [`KpiResult`]: Inputs and outcome of a KPI and incentive calculation.
//! - [`PayrollRecord`]: A monthly payslip source, read-only.
//! - [`User`] / [`Caller`]: Accounts known to the API and the signed-in identity.

mod goal;
mod kpi;
mod payroll;
mod user;

pub use goal::*;
pub use kpi::*;
pub use payroll::*;
pub use user::*;

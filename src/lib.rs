//! Client-side HR workflows: goal progress updates, KPI incentive
//! calculation and monthly payslip downloads over an HR REST API.

pub mod cache;
pub mod client;
pub mod config;
pub mod goals;
pub mod input;
pub mod kpi;
pub mod models;
pub mod notify;
pub mod payslip;

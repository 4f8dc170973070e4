use chrono::{Datelike, NaiveDate};

use crate::models::*;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
}

/// Years offered for selection: the current year and the two before it.
pub fn available_years(today: NaiveDate) -> [i32; 3] {
    let year = today.year();
    [year, year - 1, year - 2]
}

/// Period and employee the payslip view is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipSelection {
    /// 1 to 12.
    pub month: u32,
    pub year: i32,
    /// Only honoured for callers that are not employees.
    pub employee_id: Option<i64>,
}

impl PayslipSelection {
    /// The month containing `today`, all employees.
    pub fn current(today: NaiveDate) -> Self {
        Self {
            month: today.month(),
            year: today.year(),
            employee_id: None,
        }
    }

    /// Whether a record belongs to this selection as seen by `caller`.
    ///
    /// Employees only ever match their own records, whatever employee is
    /// selected.
    pub fn matches(&self, record: &PayrollRecord, caller: &Caller) -> bool {
        if record.month != self.month || record.year != self.year {
            return false;
        }
        if caller.is_employee() {
            record.employee_id == caller.id
        } else {
            self.employee_id.map_or(true, |id| record.employee_id == id)
        }
    }
}

/// Keep the records matching `selection`, preserving the API's order.
pub fn filter_records(
    records: Vec<PayrollRecord>,
    selection: &PayslipSelection,
    caller: &Caller,
) -> Vec<PayrollRecord> {
    records
        .into_iter()
        .filter(|r| selection.matches(r, caller))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn available_years_cover_two_prior_years() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(available_years(today), [2026, 2025, 2024]);
    }

    #[test]
    fn current_selection_uses_todays_month() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let selection = PayslipSelection::current(today);
        assert_eq!(selection.month, 10);
        assert_eq!(selection.year, 2026);
        assert!(selection.employee_id.is_none());
    }
}

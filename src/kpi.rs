//! KPI score and incentive calculation.
//!
//! The calculator owns a [`KpiAssessment`] and clamps every edit into range.
//! Totals, incentives and ratings are never stored: they are derived from the
//! current inputs on demand by the pure functions below.

use chrono::{DateTime, Utc};

use crate::input::{parse_float_prefix, parse_int_prefix};
use crate::models::*;

/// Upper bound of a category score and of the total KPI.
pub const MAX_SCORE: f64 = 100.0;

/// Weighted sum of the four category scores, capped at [`MAX_SCORE`].
///
/// Computed term by term so that unequal weights keep working.
pub fn total_kpi(assessment: &KpiAssessment) -> f64 {
    let total: f64 = KpiCategory::ALL
        .iter()
        .map(|&c| assessment.score(c) * assessment.weight(c) / 100.0)
        .sum();
    total.min(MAX_SCORE)
}

/// Incentive before the cap: scales linearly with the total KPI.
pub fn uncapped_incentive(assessment: &KpiAssessment, total_kpi: f64) -> f64 {
    (total_kpi / 100.0) * assessment.base_incentive_rate as f64 * 100.0
}

/// Incentive owed for `total_kpi`, never above the assessment's cap.
pub fn incentive_amount(assessment: &KpiAssessment, total_kpi: f64) -> f64 {
    uncapped_incentive(assessment, total_kpi).min(assessment.max_incentive as f64)
}

/// Clamp a score into 0..=100. NaN becomes 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_SCORE)
    }
}

/// Interactive KPI calculator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiCalculator {
    assessment: KpiAssessment,
}

impl KpiCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a previously saved assessment.
    ///
    /// Zero values in the seed count as unset and fall back to the defaults,
    /// so a saved cap of 0 comes back as the default cap.
    pub fn from_saved(saved: Option<&KpiAssessment>) -> Self {
        let defaults = KpiAssessment::default();
        let Some(saved) = saved else {
            return Self::default();
        };
        let or_default_u64 = |v: u64, d: u64| if v == 0 { d } else { v };

        let mut assessment = KpiAssessment {
            base_incentive_rate: or_default_u64(
                saved.base_incentive_rate,
                defaults.base_incentive_rate,
            ),
            max_incentive: or_default_u64(saved.max_incentive, defaults.max_incentive),
            ..defaults
        };
        for category in KpiCategory::ALL {
            *assessment.score_mut(category) = clamp_score(saved.score(category));
        }
        Self { assessment }
    }

    pub fn assessment(&self) -> &KpiAssessment {
        &self.assessment
    }

    /// Set a score from raw form input. Non-numeric input counts as 0.
    /// Returns the value actually stored.
    pub fn set_score_input(&mut self, category: KpiCategory, raw: &str) -> f64 {
        self.set_score(category, parse_float_prefix(raw).unwrap_or(0.0))
    }

    /// Set a score, clamped into 0..=100. Returns the value actually stored.
    pub fn set_score(&mut self, category: KpiCategory, value: f64) -> f64 {
        let clamped = clamp_score(value);
        *self.assessment.score_mut(category) = clamped;
        clamped
    }

    /// Set the per-point rate from raw input; negative or non-numeric is 0.
    pub fn set_base_incentive_rate_input(&mut self, raw: &str) -> u64 {
        self.assessment.base_incentive_rate = non_negative(raw);
        self.assessment.base_incentive_rate
    }

    /// Set the incentive cap from raw input; negative or non-numeric is 0.
    pub fn set_max_incentive_input(&mut self, raw: &str) -> u64 {
        self.assessment.max_incentive = non_negative(raw);
        self.assessment.max_incentive
    }

    pub fn set_base_incentive_rate(&mut self, rate: u64) {
        self.assessment.base_incentive_rate = rate;
    }

    pub fn set_max_incentive(&mut self, cap: u64) {
        self.assessment.max_incentive = cap;
    }

    pub fn total_kpi(&self) -> f64 {
        total_kpi(&self.assessment)
    }

    pub fn incentive_amount(&self) -> f64 {
        incentive_amount(&self.assessment, self.total_kpi())
    }

    /// Whether the cap is currently cutting the incentive down.
    pub fn is_capped(&self) -> bool {
        uncapped_incentive(&self.assessment, self.total_kpi()) > self.assessment.max_incentive as f64
    }

    pub fn rating(&self) -> KpiRating {
        KpiRating::from_total(self.total_kpi())
    }

    /// Produce the result handed to the caller for persistence.
    pub fn finish(&self, calculated_at: DateTime<Utc>) -> KpiResult {
        let total_kpi = self.total_kpi();
        let result = KpiResult {
            assessment: self.assessment.clone(),
            total_kpi,
            incentive_amount: incentive_amount(&self.assessment, total_kpi),
            calculated_date: calculated_at,
        };
        tracing::info!(
            total_kpi = result.total_kpi,
            incentive = result.incentive_amount,
            "KPI calculated"
        );
        result
    }

    pub fn finish_now(&self) -> KpiResult {
        self.finish(Utc::now())
    }
}

fn non_negative(raw: &str) -> u64 {
    parse_int_prefix(raw)
        .map(|v| u64::try_from(v).unwrap_or(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_handles_nan_and_bounds() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn non_negative_coerces_negatives_to_zero() {
        assert_eq!(non_negative("-200"), 0);
        assert_eq!(non_negative("1500"), 1500);
        assert_eq!(non_negative("oops"), 0);
    }
}

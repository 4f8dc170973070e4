use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weight of each category, in percent. The four weights sum to 100.
pub const DEFAULT_WEIGHT: f64 = 25.0;
/// Currency paid per KPI point before the cap is applied.
pub const DEFAULT_BASE_INCENTIVE_RATE: u64 = 1000;
/// Hard ceiling on the incentive amount.
pub const DEFAULT_MAX_INCENTIVE: u64 = 50_000;

/// One of the four scored performance categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiCategory {
    /// Work quality, accuracy, attention to detail
    Quality,
    /// Task completion, efficiency, output volume
    Productivity,
    /// Teamwork, communication, support to colleagues
    Collaboration,
    /// Meeting targets, project completion, deadlines
    Goal,
}

impl KpiCategory {
    pub const ALL: [KpiCategory; 4] = [
        Self::Quality,
        Self::Productivity,
        Self::Collaboration,
        Self::Goal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Productivity => "productivity",
            Self::Collaboration => "collaboration",
            Self::Goal => "goal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quality => "Quality Performance",
            Self::Productivity => "Productivity",
            Self::Collaboration => "Team Collaboration",
            Self::Goal => "Goal Achievement",
        }
    }
}

/// Inputs of one KPI calculation session.
///
/// Scores are kept within 0..=100 by the calculator. Weights are part of the
/// persisted shape but are fixed at [`DEFAULT_WEIGHT`]; nothing edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiAssessment {
    pub quality_score: f64,
    pub quality_weight: f64,
    pub productivity_score: f64,
    pub productivity_weight: f64,
    pub collaboration_score: f64,
    pub collaboration_weight: f64,
    pub goal_score: f64,
    pub goal_weight: f64,
    pub base_incentive_rate: u64,
    pub max_incentive: u64,
}

impl Default for KpiAssessment {
    fn default() -> Self {
        Self {
            quality_score: 0.0,
            quality_weight: DEFAULT_WEIGHT,
            productivity_score: 0.0,
            productivity_weight: DEFAULT_WEIGHT,
            collaboration_score: 0.0,
            collaboration_weight: DEFAULT_WEIGHT,
            goal_score: 0.0,
            goal_weight: DEFAULT_WEIGHT,
            base_incentive_rate: DEFAULT_BASE_INCENTIVE_RATE,
            max_incentive: DEFAULT_MAX_INCENTIVE,
        }
    }
}

impl KpiAssessment {
    pub fn score(&self, category: KpiCategory) -> f64 {
        match category {
            KpiCategory::Quality => self.quality_score,
            KpiCategory::Productivity => self.productivity_score,
            KpiCategory::Collaboration => self.collaboration_score,
            KpiCategory::Goal => self.goal_score,
        }
    }

    pub fn weight(&self, category: KpiCategory) -> f64 {
        match category {
            KpiCategory::Quality => self.quality_weight,
            KpiCategory::Productivity => self.productivity_weight,
            KpiCategory::Collaboration => self.collaboration_weight,
            KpiCategory::Goal => self.goal_weight,
        }
    }

    pub(crate) fn score_mut(&mut self, category: KpiCategory) -> &mut f64 {
        match category {
            KpiCategory::Quality => &mut self.quality_score,
            KpiCategory::Productivity => &mut self.productivity_score,
            KpiCategory::Collaboration => &mut self.collaboration_score,
            KpiCategory::Goal => &mut self.goal_score,
        }
    }
}

/// A finished calculation, ready for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiResult {
    #[serde(flatten)]
    pub assessment: KpiAssessment,
    #[serde(rename = "totalKPI")]
    pub total_kpi: f64,
    pub incentive_amount: f64,
    /// When the result was produced; serialized as ISO-8601.
    pub calculated_date: DateTime<Utc>,
}

/// Qualitative band for a total KPI. Display only, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KpiRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl KpiRating {
    pub fn from_total(total_kpi: f64) -> Self {
        if total_kpi >= 80.0 {
            Self::Excellent
        } else if total_kpi >= 60.0 {
            Self::Good
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

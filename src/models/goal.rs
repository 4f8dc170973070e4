use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A performance goal assigned to an employee by a manager.
///
/// Goals are created and deleted elsewhere; this crate only ever reads them
/// and pushes progress updates. Whenever `progress` reaches 100 the status is
/// forced to [`GoalStatus::Completed`] before anything is sent to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Option<GoalPriority>,
    #[serde(default)]
    pub status: Option<GoalStatus>,
    /// Percentage complete, 0 to 100.
    #[serde(default)]
    pub progress: Option<i32>,
    /// Raw target date as sent by the server (date or RFC 3339 timestamp).
    #[serde(default)]
    pub target_date: Option<String>,
    /// The manager who assigned the goal.
    #[serde(default)]
    pub setter: Option<GoalSetter>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Goal {
    /// A goal known only by id, with every optional field unset.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            description: None,
            category: None,
            priority: None,
            status: None,
            progress: None,
            target_date: None,
            setter: None,
            notes: None,
        }
    }

    /// Parsed target date, accepting both `YYYY-MM-DD` and full timestamps.
    pub fn target_date(&self) -> Option<NaiveDate> {
        let raw = self.target_date.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }

    /// A goal is overdue once its target date has passed without completion.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.target_date() {
            Some(target) => target < today && self.status != Some(GoalStatus::Completed),
            None => false,
        }
    }
}

/// The manager who set a goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSetter {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Workflow status of a goal.
///
/// - `Pending`: Not started
/// - `InProgress`: Some progress recorded
/// - `Completed`: Done, the setter gets notified
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Pending,
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Human label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Body of `PUT /api/performance-goals/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGoalInput {
    pub progress: i32,
    pub status: GoalStatus,
    /// Omitted from the body when absent so the server keeps what it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Coarse bucket for a progress percentage, used when rendering bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Complete,
    OnTrack,
    Halfway,
    Behind,
}

impl ProgressBand {
    pub fn of(progress: i32) -> Self {
        match progress {
            p if p >= 100 => Self::Complete,
            p if p >= 75 => Self::OnTrack,
            p if p >= 50 => Self::Halfway,
            _ => Self::Behind,
        }
    }
}

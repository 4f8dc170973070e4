//! Goal progress updates.
//!
//! [`GoalForm`] is the editable state seeded from a [`Goal`]; [`GoalUpdater`]
//! validates it and pushes it to the API. Nothing is applied locally before
//! the server answers, so a failed update leaves both the goal and the form
//! exactly as they were.

use std::sync::Arc;

use thiserror::Error;

use crate::cache::{QueryInvalidator, PERFORMANCE_GOALS};
use crate::client::{ClientError, HrClient};
use crate::input::parse_int_prefix;
use crate::models::*;
use crate::notify::Notifier;

pub const PROGRESS_OUT_OF_RANGE: &str = "Progress must be between 0 and 100%";
pub const GOAL_COMPLETED: &str = "🎉 Goal completed! Your manager has been notified.";
pub const GOAL_UPDATED: &str = "Goal progress updated successfully!";
pub const GOAL_UPDATE_FAILED: &str = "Failed to update goal";

#[derive(Debug, Error)]
pub enum GoalUpdateError {
    #[error("Progress must be between 0 and 100% (got {0})")]
    ProgressOutOfRange(i32),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Editable progress, status and notes for one goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalForm {
    pub progress: i32,
    pub status: GoalStatus,
    /// `None` leaves the stored notes untouched on the server.
    pub notes: Option<String>,
}

impl Default for GoalForm {
    fn default() -> Self {
        Self {
            progress: 0,
            status: GoalStatus::Pending,
            notes: None,
        }
    }
}

impl GoalForm {
    pub fn from_goal(goal: &Goal) -> Self {
        Self {
            progress: goal.progress.unwrap_or(0),
            status: goal.status.unwrap_or(GoalStatus::Pending),
            notes: goal.notes.clone(),
        }
    }

    /// Set progress from raw form input. Non-numeric input counts as 0;
    /// range checking happens on submit.
    ///
    /// Values beyond `i32` saturate so they still fail the range check.
    pub fn set_progress_input(&mut self, raw: &str) {
        self.progress = parse_int_prefix(raw)
            .map(|v| i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX }))
            .unwrap_or(0);
    }

    /// Quick action: full progress and completed status in one step.
    pub fn mark_completed(&mut self) {
        self.progress = 100;
        self.status = GoalStatus::Completed;
    }

    /// Validate and build the request body.
    ///
    /// Full progress always submits as completed, whatever status was chosen.
    pub fn to_update(&self) -> Result<UpdateGoalInput, GoalUpdateError> {
        if !(0..=100).contains(&self.progress) {
            return Err(GoalUpdateError::ProgressOutOfRange(self.progress));
        }
        let status = if self.progress == 100 {
            GoalStatus::Completed
        } else {
            self.status
        };
        Ok(UpdateGoalInput {
            progress: self.progress,
            status,
            notes: self.notes.clone(),
        })
    }
}

/// Submits progress updates for one goal at a time.
pub struct GoalUpdater {
    client: HrClient,
    notifier: Arc<dyn Notifier>,
    invalidator: Arc<dyn QueryInvalidator>,
    goal: Goal,
    form: GoalForm,
}

impl GoalUpdater {
    pub fn new(
        client: HrClient,
        notifier: Arc<dyn Notifier>,
        invalidator: Arc<dyn QueryInvalidator>,
        goal: Goal,
    ) -> Self {
        let form = GoalForm::from_goal(&goal);
        Self {
            client,
            notifier,
            invalidator,
            goal,
            form,
        }
    }

    /// Switch to another goal, discarding any unsaved edits.
    pub fn load(&mut self, goal: Goal) {
        self.form = GoalForm::from_goal(&goal);
        self.goal = goal;
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn form(&self) -> &GoalForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut GoalForm {
        &mut self.form
    }

    /// Validate the form and send it.
    ///
    /// Out-of-range progress is reported and rejected without touching the
    /// network. On success the goals cache key is invalidated and the stored
    /// goal is replaced with the server's copy.
    pub async fn submit(&mut self) -> Result<Goal, GoalUpdateError> {
        let input = match self.form.to_update() {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(goal_id = self.goal.id, progress = self.form.progress, "Rejected goal update");
                self.notifier.error(PROGRESS_OUT_OF_RANGE);
                return Err(e);
            }
        };

        match self.client.update_goal(self.goal.id, &input).await {
            Ok(updated) => {
                self.invalidator.invalidate(PERFORMANCE_GOALS);
                if input.status == GoalStatus::Completed {
                    self.notifier.success(GOAL_COMPLETED);
                } else {
                    self.notifier.success(GOAL_UPDATED);
                }
                tracing::info!(
                    goal_id = self.goal.id,
                    progress = input.progress,
                    status = input.status.as_str(),
                    "Goal updated"
                );
                self.goal = updated.clone();
                Ok(updated)
            }
            Err(e) => {
                tracing::error!(goal_id = self.goal.id, error = %e, "Goal update error");
                self.notifier
                    .error(e.server_message().unwrap_or(GOAL_UPDATE_FAILED));
                Err(e.into())
            }
        }
    }

    /// Mark the goal completed and submit through the normal path.
    pub async fn complete(&mut self) -> Result<Goal, GoalUpdateError> {
        self.form.mark_completed();
        self.submit().await
    }
}

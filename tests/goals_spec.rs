mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::NaiveDate;
use hrdesk::cache::{InvalidationLog, PERFORMANCE_GOALS};
use hrdesk::goals::*;
use hrdesk::models::*;
use hrdesk::notify::{NotificationLevel, NotificationLog};
use serde_json::json;

use common::{spawn, MockApi, MockState};

fn sample_goal() -> Goal {
    let mut goal = Goal::with_id(12);
    goal.title = "Ship the onboarding revamp".to_string();
    goal.priority = Some(GoalPriority::High);
    goal.status = Some(GoalStatus::InProgress);
    goal.progress = Some(40);
    goal.notes = Some("Kickoff done".to_string());
    goal
}

struct Fixture {
    api: MockApi,
    notifications: Arc<NotificationLog>,
    invalidations: Arc<InvalidationLog>,
    updater: GoalUpdater,
}

async fn setup(state: MockState) -> Fixture {
    let api = spawn(state).await;
    let notifications = Arc::new(NotificationLog::new());
    let invalidations = Arc::new(InvalidationLog::new());
    let updater = GoalUpdater::new(
        api.client(),
        notifications.clone(),
        invalidations.clone(),
        sample_goal(),
    );
    Fixture {
        api,
        notifications,
        invalidations,
        updater,
    }
}

mod form {
    use super::*;

    #[test]
    fn seeds_from_goal() {
        let form = GoalForm::from_goal(&sample_goal());
        assert_eq!(form.progress, 40);
        assert_eq!(form.status, GoalStatus::InProgress);
        assert_eq!(form.notes.as_deref(), Some("Kickoff done"));
    }

    #[test]
    fn seeds_defaults_for_missing_fields() {
        let form = GoalForm::from_goal(&Goal::with_id(3));
        assert_eq!(form, GoalForm::default());
        assert_eq!(form.status, GoalStatus::Pending);
        assert_eq!(form.progress, 0);
    }

    #[test]
    fn non_numeric_progress_becomes_zero() {
        let mut form = GoalForm::from_goal(&sample_goal());
        form.set_progress_input("almost done");
        assert_eq!(form.progress, 0);
        form.set_progress_input("65");
        assert_eq!(form.progress, 65);
    }

    #[test]
    fn oversized_progress_saturates_instead_of_zeroing() {
        let mut form = GoalForm::default();
        form.set_progress_input("5000000000");
        assert_eq!(form.progress, i32::MAX);
        form.set_progress_input("-99999999999999999999999");
        assert_eq!(form.progress, i32::MIN);
        assert!(form.to_update().is_err());
    }

    #[test]
    fn full_progress_always_submits_completed() {
        for status in [GoalStatus::Pending, GoalStatus::InProgress, GoalStatus::Completed] {
            let form = GoalForm {
                progress: 100,
                status,
                notes: None,
            };
            assert_eq!(form.to_update().unwrap().status, GoalStatus::Completed);
        }
    }

    #[test]
    fn partial_progress_keeps_selected_status() {
        let form = GoalForm {
            progress: 99,
            status: GoalStatus::Pending,
            notes: None,
        };
        assert_eq!(form.to_update().unwrap().status, GoalStatus::Pending);
    }

    #[test]
    fn out_of_range_progress_is_rejected() {
        for progress in [-1, 101, 250] {
            let form = GoalForm {
                progress,
                ..GoalForm::default()
            };
            assert!(matches!(
                form.to_update(),
                Err(GoalUpdateError::ProgressOutOfRange(p)) if p == progress
            ));
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        for progress in [0, 100] {
            let form = GoalForm {
                progress,
                ..GoalForm::default()
            };
            assert!(form.to_update().is_ok());
        }
    }

    #[test]
    fn mark_completed_sets_both_fields() {
        let mut form = GoalForm::default();
        form.mark_completed();
        assert_eq!(form.progress, 100);
        assert_eq!(form.status, GoalStatus::Completed);
    }
}

mod submit {
    use super::*;

    #[tokio::test]
    async fn sends_progress_status_and_notes() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().set_progress_input("60");
        fx.updater.form_mut().notes = Some("Halfway through QA".to_string());

        let goal = fx.updater.submit().await.expect("update failed");

        let updates = fx.api.state.goal_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, 12);
        assert_eq!(
            updates[0].1,
            json!({ "progress": 60, "status": "in_progress", "notes": "Halfway through QA" })
        );
        assert_eq!(goal.progress, Some(60));
        assert_eq!(fx.updater.goal().progress, Some(60));
    }

    #[tokio::test]
    async fn plain_update_notifies_progress_message() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().progress = 70;

        fx.updater.submit().await.expect("update failed");

        assert_eq!(
            fx.notifications.messages(NotificationLevel::Success),
            vec![GOAL_UPDATED.to_string()]
        );
        assert_eq!(fx.invalidations.keys(), vec![PERFORMANCE_GOALS.to_string()]);
    }

    #[tokio::test]
    async fn reaching_100_forces_completed_and_notifies_manager() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().progress = 100;
        fx.updater.form_mut().status = GoalStatus::Pending;

        let goal = fx.updater.submit().await.expect("update failed");

        assert_eq!(fx.api.state.goal_updates()[0].1["status"], "completed");
        assert_eq!(goal.status, Some(GoalStatus::Completed));
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Success),
            vec![GOAL_COMPLETED.to_string()]
        );
    }

    #[tokio::test]
    async fn out_of_range_progress_makes_no_request() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().progress = 140;
        let before = fx.updater.form().clone();

        let result = fx.updater.submit().await;

        assert!(matches!(result, Err(GoalUpdateError::ProgressOutOfRange(140))));
        assert!(fx.api.state.goal_updates().is_empty());
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Error),
            vec![PROGRESS_OUT_OF_RANGE.to_string()]
        );
        assert!(fx.invalidations.keys().is_empty());
        assert_eq!(fx.updater.form(), &before);
    }

    #[tokio::test]
    async fn goal_without_notes_omits_them_from_the_body() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.load(Goal::with_id(31));
        fx.updater.form_mut().progress = 20;

        fx.updater.submit().await.expect("update failed");

        let updates = fx.api.state.goal_updates();
        assert_eq!(updates[0].1, json!({ "progress": 20, "status": "pending" }));
        assert!(updates[0].1.get("notes").is_none());
    }

    #[tokio::test]
    async fn overflowing_progress_input_is_rejected() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().set_progress_input("5000000000");

        let result = fx.updater.submit().await;

        assert!(matches!(result, Err(GoalUpdateError::ProgressOutOfRange(p)) if p == i32::MAX));
        assert!(fx.api.state.goal_updates().is_empty());
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Error),
            vec![PROGRESS_OUT_OF_RANGE.to_string()]
        );
    }

    #[tokio::test]
    async fn negative_progress_makes_no_request() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().set_progress_input("-5");

        assert!(fx.updater.submit().await.is_err());
        assert!(fx.api.state.goal_updates().is_empty());
    }

    #[tokio::test]
    async fn server_message_is_surfaced_on_rejection() {
        let mut fx = setup(MockState {
            goal_failure: Some((
                StatusCode::FORBIDDEN,
                r#"{"message":"You can only update your own goals"}"#.to_string(),
            )),
            ..MockState::default()
        })
        .await;
        fx.updater.form_mut().progress = 90;

        let result = fx.updater.submit().await;

        assert!(matches!(result, Err(GoalUpdateError::Client(_))));
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Error),
            vec!["You can only update your own goals".to_string()]
        );
        assert!(fx.invalidations.keys().is_empty());
        assert_eq!(fx.updater.goal().progress, Some(40));
        assert_eq!(fx.updater.form().progress, 90);
    }

    #[tokio::test]
    async fn generic_message_when_server_gives_none() {
        let mut fx = setup(MockState {
            goal_failure: Some((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )),
            ..MockState::default()
        })
        .await;

        assert!(fx.updater.submit().await.is_err());
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Error),
            vec![GOAL_UPDATE_FAILED.to_string()]
        );
    }

    #[tokio::test]
    async fn complete_submits_full_progress() {
        let mut fx = setup(MockState::default()).await;

        let goal = fx.updater.complete().await.expect("update failed");

        let body = &fx.api.state.goal_updates()[0].1;
        assert_eq!(body["progress"], 100);
        assert_eq!(body["status"], "completed");
        assert_eq!(goal.status, Some(GoalStatus::Completed));
        assert_eq!(
            fx.notifications.messages(NotificationLevel::Success),
            vec![GOAL_COMPLETED.to_string()]
        );
    }

    #[tokio::test]
    async fn loading_another_goal_resets_the_form() {
        let mut fx = setup(MockState::default()).await;
        fx.updater.form_mut().progress = 95;

        let mut other = Goal::with_id(99);
        other.progress = Some(10);
        fx.updater.load(other);

        assert_eq!(fx.updater.form().progress, 10);
        assert_eq!(fx.updater.form().status, GoalStatus::Pending);
        fx.updater.submit().await.expect("update failed");
        assert_eq!(fx.api.state.goal_updates()[0].0, 99);
    }
}

mod overdue {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn past_target_and_open_is_overdue() {
        let mut goal = sample_goal();
        goal.target_date = Some("2026-10-01".to_string());
        assert!(goal.is_overdue(today()));
    }

    #[test]
    fn accepts_timestamp_target_dates() {
        let mut goal = sample_goal();
        goal.target_date = Some("2026-09-30T00:00:00.000Z".to_string());
        assert_eq!(goal.target_date(), NaiveDate::from_ymd_opt(2026, 9, 30));
        assert!(goal.is_overdue(today()));
    }

    #[test]
    fn completed_goals_are_never_overdue() {
        let mut goal = sample_goal();
        goal.target_date = Some("2026-01-01".to_string());
        goal.status = Some(GoalStatus::Completed);
        assert!(!goal.is_overdue(today()));
    }

    #[test]
    fn today_or_no_target_is_not_overdue() {
        let mut goal = sample_goal();
        goal.target_date = Some("2026-10-18".to_string());
        assert!(!goal.is_overdue(today()));
        goal.target_date = None;
        assert!(!goal.is_overdue(today()));
    }

    #[test]
    fn progress_bands() {
        assert_eq!(ProgressBand::of(100), ProgressBand::Complete);
        assert_eq!(ProgressBand::of(75), ProgressBand::OnTrack);
        assert_eq!(ProgressBand::of(74), ProgressBand::Halfway);
        assert_eq!(ProgressBand::of(50), ProgressBand::Halfway);
        assert_eq!(ProgressBand::of(49), ProgressBand::Behind);
    }
}

//! Integration tests for workout templates and the user-workout lifecycle

mod common;

use axum::http::StatusCode;
use serde_json::json;

async fn setup_template(app: &common::TestApp) -> (common::TestUser, String) {
    let admin = app.create_user_with_role("admin").await;
    let exercise_id = app.create_test_exercise(&admin.access_token).await;

    let trainer = app.create_user_with_role("trainer").await;
    let body = json!({
        "name": "Lower Body Strength",
        "description": "Heavy compound session",
        "goal": "strength",
        "difficulty": "intermediate",
        "estimated_duration_minutes": 60,
        "exercises": [
            {
                "exercise_id": exercise_id,
                "sets": 4,
                "reps": "5",
                "rest_seconds": 180,
                "load_percentage": 80.0,
                "position": 1
            }
        ]
    });

    let (status, response) = app
        .post_auth("/api/v1/workouts/templates", &body.to_string(), &trainer.access_token)
        .await;
    assert_eq!(status, StatusCode::OK, "template creation failed: {response}");

    let template: serde_json::Value = serde_json::from_str(&response).unwrap();
    let template_id = template["id"].as_str().unwrap().to_string();
    (trainer, template_id)
}

async fn book_workout(app: &common::TestApp, token: &str, template_id: &str) -> String {
    book_workout_at(app, token, template_id, "2026-08-24T10:00:00Z").await
}

async fn book_workout_at(
    app: &common::TestApp,
    token: &str,
    template_id: &str,
    scheduled_at: &str,
) -> String {
    let body = json!({
        "template_id": template_id,
        "scheduled_at": scheduled_at
    });
    let (status, response) = app
        .post_auth("/api/v1/workouts/user-workouts", &body.to_string(), token)
        .await;
    assert_eq!(status, StatusCode::OK, "booking failed: {response}");

    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    workout["id"].as_str().unwrap().to_string()
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_client_cannot_create_template() {
    let app = common::TestApp::new().await;
    let client = app.create_test_user().await;

    let body = json!({
        "name": "Nope",
        "description": "",
        "goal": "strength",
        "difficulty": "beginner",
        "estimated_duration_minutes": 30,
        "exercises": []
    });

    let (status, _) = app
        .post_auth("/api/v1/workouts/templates", &body.to_string(), &client.access_token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_template_rejects_invalid_sets() {
    let app = common::TestApp::new().await;
    let admin = app.create_user_with_role("admin").await;
    let exercise_id = app.create_test_exercise(&admin.access_token).await;
    let trainer = app.create_user_with_role("trainer").await;

    let body = json!({
        "name": "Bad Sets",
        "description": "",
        "goal": "strength",
        "difficulty": "beginner",
        "estimated_duration_minutes": 30,
        "exercises": [
            {
                "exercise_id": exercise_id,
                "sets": 0,
                "reps": "5",
                "rest_seconds": 60,
                "position": 1
            }
        ]
    });

    let (status, _) = app
        .post_auth("/api/v1/workouts/templates", &body.to_string(), &trainer.access_token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_template_detail_includes_ordered_exercises() {
    let app = common::TestApp::new().await;
    let (trainer, template_id) = setup_template(&app).await;

    let (status, response) = app
        .get_auth(&format!("/api/v1/workouts/templates/{template_id}"), &trainer.access_token)
        .await;

    assert_eq!(status, StatusCode::OK);

    let template: serde_json::Value = serde_json::from_str(&response).unwrap();
    let exercises = template["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises[0]["sets"], 4);
    assert_eq!(exercises[0]["position"], 1);
    assert!(!exercises[0]["exercise_name"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_other_trainer_cannot_update_template() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let other = app.create_user_with_role("trainer").await;

    let body = json!({ "name": "Hijacked" });
    let (status, _) = app
        .put_auth(
            &format!("/api/v1/workouts/templates/{template_id}"),
            &body.to_string(),
            &other.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_mine_requires_trainer() {
    let app = common::TestApp::new().await;
    let client = app.create_test_user().await;

    let (status, _) = app
        .get_auth("/api/v1/workouts/templates/mine", &client.access_token)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_workout_lifecycle_happy_path() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;
    let workout_id = book_workout(&app, &client.access_token, &template_id).await;

    // scheduled -> in_progress
    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/start"),
            "",
            &client.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(workout["status"], "in_progress");
    assert!(!workout["started_at"].is_null());

    // in_progress -> completed
    let body = json!({ "notes": "Felt strong" });
    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/complete"),
            &body.to_string(),
            &client.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(workout["status"], "completed");
    assert!(!workout["completed_at"].is_null());
    assert_eq!(workout["notes"], "Felt strong");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_today_listing_and_timestamp_order() {
    use chrono::{DateTime, Duration, Utc};

    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;

    let today_id = book_workout_at(
        &app,
        &client.access_token,
        &template_id,
        &Utc::now().to_rfc3339(),
    )
    .await;
    book_workout_at(
        &app,
        &client.access_token,
        &template_id,
        &(Utc::now() + Duration::days(1)).to_rfc3339(),
    )
    .await;

    let (status, response) = app
        .get_auth("/api/v1/workouts/user-workouts/today", &client.access_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let workouts: serde_json::Value = serde_json::from_str(&response).unwrap();
    let ids: Vec<&str> = workouts
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![today_id.as_str()]);

    app.post_auth(
        &format!("/api/v1/workouts/user-workouts/{today_id}/start"),
        "",
        &client.access_token,
    )
    .await;
    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{today_id}/complete"),
            &json!({}).to_string(),
            &client.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    let started: DateTime<Utc> = DateTime::parse_from_rfc3339(workout["started_at"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    let completed: DateTime<Utc> =
        DateTime::parse_from_rfc3339(workout["completed_at"].as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc);
    assert!(started <= completed);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_complete_accepts_missing_body() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;
    let workout_id = book_workout(&app, &client.access_token, &template_id).await;

    app.post_auth(
        &format!("/api/v1/workouts/user-workouts/{workout_id}/start"),
        "",
        &client.access_token,
    )
    .await;

    // No JSON body at all; notes default to empty
    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/complete"),
            "",
            &client.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::OK, "bare complete failed: {response}");
    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(workout["status"], "completed");
    assert_eq!(workout["notes"], "");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_cannot_complete_scheduled_workout() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;
    let workout_id = book_workout(&app, &client.access_token, &template_id).await;

    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/complete"),
            &json!({}).to_string(),
            &client.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let error: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(error["error"]["code"], "STATE_CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_cannot_skip_started_workout() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;
    let workout_id = book_workout(&app, &client.access_token, &template_id).await;

    app.post_auth(
        &format!("/api/v1/workouts/user-workouts/{workout_id}/start"),
        "",
        &client.access_token,
    )
    .await;

    let (status, _) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/skip"),
            "",
            &client.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_skip_scheduled_workout() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;
    let workout_id = book_workout(&app, &client.access_token, &template_id).await;

    let (status, response) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/skip"),
            "",
            &client.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let workout: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(workout["status"], "skipped");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_workouts_are_owner_scoped() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let owner = app.create_test_user().await;
    let stranger = app.create_test_user().await;
    let workout_id = book_workout(&app, &owner.access_token, &template_id).await;

    // Another user cannot see or transition someone else's workout
    let (status, _) = app
        .get_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}"),
            &stranger.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .post_auth(
            &format!("/api/v1/workouts/user-workouts/{workout_id}/start"),
            "",
            &stranger.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_status_filter() {
    let app = common::TestApp::new().await;
    let (_, template_id) = setup_template(&app).await;
    let client = app.create_test_user().await;

    let first = book_workout(&app, &client.access_token, &template_id).await;
    book_workout(&app, &client.access_token, &template_id).await;

    app.post_auth(
        &format!("/api/v1/workouts/user-workouts/{first}/skip"),
        "",
        &client.access_token,
    )
    .await;

    let (status, response) = app
        .get_auth("/api/v1/workouts/user-workouts?status=scheduled", &client.access_token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let workouts: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(workouts.as_array().unwrap().len(), 1);
    assert_eq!(workouts[0]["status"], "scheduled");
}

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

use common::{app, call, sign_up};

/// Doctor authors: q1 BOOLEAN, q2 TEXT, q3 MULTIPLE_CHOICE {a, b, c}.
async fn seed(app: &Router, doctor: &str) -> Value {
    let (status, questionnaire) = call(
        app,
        Method::POST,
        "/questionnaires",
        Some(doctor),
        Some(json!({
            "title": "Intake",
            "questions": [
                { "text": "Do you smoke?", "type": "BOOLEAN" },
                { "text": "How many per day?", "type": "TEXT" },
                {
                    "text": "Symptoms",
                    "type": "MULTIPLE_CHOICE",
                    "options": [
                        { "value": "a", "text": "Cough" },
                        { "value": "b", "text": "Fever" },
                        { "value": "c", "text": "Fatigue" }
                    ]
                }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    questionnaire
}

#[tokio::test]
async fn authoring_returns_typed_questions() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let questionnaire = seed(&app, &doctor).await;

    assert_eq!(questionnaire["id"], 1);
    let questions = questionnaire["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[0]["type"], "BOOLEAN");
    assert_eq!(questions[1]["type"], "TEXT");
    assert!(questions[1].get("options").is_none());
    assert_eq!(questions[2]["options"][1]["value"], "b");

    let (status, fetched) = call(&app, Method::GET, "/questionnaires/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Intake");
    let fetched_questions = fetched["questions"].as_array().unwrap();
    assert_eq!(fetched_questions.len(), 3);
    for (fetched, created) in fetched_questions.iter().zip(questions) {
        assert_eq!(fetched["id"], created["id"]);
        assert_eq!(fetched["type"], created["type"]);
        assert_eq!(fetched["response"], Value::Null);
    }

    let (status, _) = call(&app, Method::GET, "/questionnaires/9", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patients_cannot_author() {
    let app = app();
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    let body = json!({ "title": "Nope", "questions": [] });

    let (status, error) = call(
        &app,
        Method::POST,
        "/questionnaires",
        Some(&patient),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Insufficient permissions.");

    let (status, _) = call(&app, Method::POST, "/questionnaires", None, Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, all) = call(&app, Method::GET, "/questionnaires", None, None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn invalid_draft_rejects_whole_questionnaire() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;

    let (status, error) = call(
        &app,
        Method::POST,
        "/questionnaires",
        Some(&doctor),
        Some(json!({
            "title": "Broken",
            "questions": [
                { "text": "Fine", "type": "TEXT" },
                { "text": "No options", "type": "SINGLE_CHOICE" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "INVALID_QUESTION");

    let (_, all) = call(&app, Method::GET, "/questionnaires", None, None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn questions_append_to_existing_questionnaire() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    seed(&app, &doctor).await;

    let (status, added) = call(
        &app,
        Method::POST,
        "/questions",
        Some(&doctor),
        Some(json!({
            "questions": [{ "questionnaireId": 1, "text": "Anything else?", "type": "TEXT" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added[0]["id"], 4);

    let (status, _) = call(
        &app,
        Method::POST,
        "/questions",
        Some(&doctor),
        Some(json!({
            "questions": [{ "questionnaireId": 7, "text": "Orphan", "type": "TEXT" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn boolean_relation_routes_submission() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    seed(&app, &doctor).await;

    let (status, relations) = call(
        &app,
        Method::POST,
        "/relations",
        Some(&doctor),
        Some(json!({ "relations": [{ "questionId": 1, "equals": "true", "nextQuestionId": 2 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        relations,
        json!([{ "questionId": 1, "equals": "true", "nextQuestionId": 2 }])
    );

    let (status, yes) = call(
        &app,
        Method::POST,
        "/responses/boolean",
        Some(&patient),
        Some(json!({ "questionId": 1, "value": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(yes["next"], json!([2]));
    assert_eq!(yes["response"], json!({ "type": "BOOLEAN", "value": true }));

    let (_, no) = call(
        &app,
        Method::POST,
        "/responses/boolean",
        Some(&patient),
        Some(json!({ "questionId": 1, "value": false })),
    )
    .await;
    assert_eq!(no["next"], json!([]));

    let (status, question) = call(&app, Method::GET, "/questions/1", Some(&patient), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(question["response"], json!({ "type": "BOOLEAN", "value": false }));
    assert_eq!(question["next"][0]["nextQuestionId"], 2);

    let (_, anonymous_view) = call(&app, Method::GET, "/questions/1", None, None).await;
    assert_eq!(anonymous_view["response"], Value::Null);
}

#[tokio::test]
async fn multiple_choice_relations_fan_out_in_order() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    seed(&app, &doctor).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/relations",
        Some(&doctor),
        Some(json!({ "relations": [
            { "questionId": 3, "includes": "b", "nextQuestionId": 2 },
            { "questionId": 3, "includes": "a", "nextQuestionId": 1 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, submission) = call(
        &app,
        Method::POST,
        "/responses/choice",
        Some(&patient),
        Some(json!({ "questionId": 3, "value": ["a", "b"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submission["next"], json!([2, 1]));

    let (status, error) = call(
        &app,
        Method::POST,
        "/responses/choice",
        Some(&patient),
        Some(json!({ "questionId": 3, "value": ["z"] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "UNKNOWN_OPTION");
}

#[tokio::test]
async fn invalid_relation_batch_commits_nothing() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    seed(&app, &doctor).await;

    let (status, error) = call(
        &app,
        Method::POST,
        "/relations",
        Some(&doctor),
        Some(json!({ "relations": [
            { "questionId": 1, "equals": "true", "nextQuestionId": 2 },
            { "questionId": 1, "includes": "x", "nextQuestionId": 2 }
        ] })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "INVALID_RELATION_BATCH");
    assert_eq!(error["index"], 1);

    let (_, question) = call(&app, Method::GET, "/questions/1", None, None).await;
    assert_eq!(question["next"], json!([]));
}

#[tokio::test]
async fn submission_errors_are_reported() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    seed(&app, &doctor).await;

    // Wrong endpoint for the question's type.
    let (status, error) = call(
        &app,
        Method::POST,
        "/responses/text",
        Some(&patient),
        Some(json!({ "questionId": 1, "value": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "INVALID_RESPONSE_TYPE");

    let (status, _) = call(
        &app,
        Method::POST,
        "/responses/text",
        Some(&patient),
        Some(json!({ "questionId": 99, "value": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &app,
        Method::POST,
        "/responses/text",
        None,
        Some(json!({ "questionId": 2, "value": "ten" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn latest_text_response_is_current() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    seed(&app, &doctor).await;

    for value in ["five", "ten"] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/responses/text",
            Some(&patient),
            Some(json!({ "questionId": 2, "value": value })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, question) = call(&app, Method::GET, "/questions/2", Some(&patient), None).await;
    assert_eq!(question["response"], json!({ "type": "TEXT", "value": "ten" }));

    let (_, doctor_view) = call(&app, Method::GET, "/questions/2", Some(&doctor), None).await;
    assert_eq!(doctor_view["response"], Value::Null);
}

#[tokio::test]
async fn typed_endpoints_only_answer_their_question_types() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;

    // q1 TEXT, q2 SINGLE_CHOICE {x}
    let (status, _) = call(
        &app,
        Method::POST,
        "/questionnaires",
        Some(&doctor),
        Some(json!({
            "title": "Channels",
            "questions": [
                { "text": "Notes", "type": "TEXT" },
                { "text": "Pick", "type": "SINGLE_CHOICE", "options": [{ "value": "x", "text": "X" }] }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = call(
        &app,
        Method::POST,
        "/responses/text",
        Some(&patient),
        Some(json!({ "questionId": 2, "value": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "INVALID_RESPONSE_TYPE");

    let (status, error) = call(
        &app,
        Method::POST,
        "/responses/choice",
        Some(&patient),
        Some(json!({ "questionId": 1, "value": "anything" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["kind"], "INVALID_RESPONSE_TYPE");

    let (_, question) = call(&app, Method::GET, "/questions/1", Some(&patient), None).await;
    assert_eq!(question["response"], Value::Null);

    let (status, accepted) = call(
        &app,
        Method::POST,
        "/responses/choice",
        Some(&patient),
        Some(json!({ "questionId": 2, "value": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["response"], json!({ "type": "SINGLE_CHOICE", "value": "x" }));
}

#[tokio::test]
async fn questionnaire_reads_carry_callers_responses() {
    let app = app();
    let doctor = sign_up(&app, "doc@example.com", "DOCTOR").await;
    let patient = sign_up(&app, "pat@example.com", "PATIENT").await;
    seed(&app, &doctor).await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/responses/choice",
        Some(&patient),
        Some(json!({ "questionId": 3, "value": ["c", "a"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, mine) = call(&app, Method::GET, "/questionnaires/1", Some(&patient), None).await;
    assert_eq!(mine["questions"][0]["response"], Value::Null);
    assert_eq!(
        mine["questions"][2]["response"],
        json!({ "type": "MULTIPLE_CHOICE", "value": ["a", "c"] })
    );

    let (_, listed) = call(&app, Method::GET, "/questionnaires", Some(&patient), None).await;
    assert_eq!(listed[0]["questions"][2]["response"], mine["questions"][2]["response"]);

    let (_, theirs) = call(&app, Method::GET, "/questionnaires/1", Some(&doctor), None).await;
    assert_eq!(theirs["questions"][2]["response"], Value::Null);
}

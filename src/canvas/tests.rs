//! Tests for the Canvas API wrappers

use super::*;
use crate::http::ClientConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn canvas(base_url: &str) -> Canvas {
    let http = HttpClient::new(
        ClientConfig::builder()
            .base_url(base_url)
            .token("test-token")
            .build(),
    )
    .unwrap();
    Canvas::new(Arc::new(http))
}

#[test]
fn test_accessors_require_context() {
    let canvas = canvas("https://canvas.example.edu");

    assert!(canvas.submissions().is_err());
    assert!(canvas.assignments().is_err());
    assert!(canvas.rubrics().is_err());
    assert!(canvas.quiz_submissions().is_err());

    let canvas = canvas.with_course(1);
    assert!(canvas.assignments().is_ok());
    assert!(canvas.rubrics().is_ok());
    // assignment and quiz ids are still missing
    assert!(canvas.submissions().is_err());
    assert!(canvas.quiz_submissions().is_err());

    let canvas = canvas.with_assignment(2).with_quiz(3);
    assert!(canvas.submissions().is_ok());
    assert!(canvas.quiz_submissions().is_ok());
}

#[test]
fn test_submission_includes_to_params() {
    let params = SubmissionIncludes::default().to_params();
    assert_eq!(params, vec!["submission_history"]);

    let params = SubmissionIncludes {
        user: true,
        submission_comments: true,
        ..SubmissionIncludes::default()
    }
    .to_params();
    assert_eq!(
        params,
        vec!["submission_history", "submission_comments", "user"]
    );
}

#[tokio::test]
async fn test_submissions_index_url_and_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/123/assignments/456/submissions"))
        .and(query_param("include[]", "submission_history"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let submissions = canvas(&mock_server.uri())
        .with_course(123)
        .with_assignment(456)
        .submissions()
        .unwrap();
    let items = submissions
        .index(&SubmissionIncludes::default())
        .collect()
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
}

#[tokio::test]
async fn test_submissions_show_and_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/123/assignments/456/submissions/7"))
        .and(query_param("include[]", "submission_history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user_id": 7})))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/courses/123/assignments/456/submissions/7"))
        .and(body_json(json!({"submission": {"posted_grade": "95"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"grade": "95"})))
        .mount(&mock_server)
        .await;

    let submissions = canvas(&mock_server.uri())
        .with_course(123)
        .with_assignment(456)
        .submissions()
        .unwrap();

    let shown = submissions
        .show(7, &SubmissionIncludes::default())
        .await
        .unwrap();
    assert_eq!(shown["user_id"], 7);

    let updated = submissions
        .update(7, &json!({"submission": {"posted_grade": "95"}}))
        .await
        .unwrap();
    assert_eq!(updated["grade"], "95");
}

#[test]
fn test_create_rubric_payload_drops_empty_objects() {
    let payload = CreateRubric {
        id: Some(9),
        ..CreateRubric::default()
    }
    .to_payload()
    .unwrap();

    // Neither nested object has content, so neither appears
    assert_eq!(payload, json!({"id": 9}));
}

#[test]
fn test_create_rubric_payload_nests_fields() {
    let payload = CreateRubric {
        title: Some("Grading rubric".to_string()),
        free_form_criterion_comments: Some(true),
        association_id: Some(456),
        association_type: Some(AssociationType::Assignment),
        use_for_grading: Some(true),
        purpose: Some(RubricPurpose::Grading),
        ..CreateRubric::default()
    }
    .to_payload()
    .unwrap();

    assert_eq!(
        payload,
        json!({
            "rubric": {
                "title": "Grading rubric",
                "free_form_criterion_comments": true,
            },
            "rubric_association": {
                "association_id": 456,
                "association_type": "Assignment",
                "use_for_grading": true,
                "purpose": "grading",
            },
        })
    );
}

#[tokio::test]
async fn test_rubrics_create() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses/123/rubrics"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"rubric": {"id": 55}})),
        )
        .mount(&mock_server)
        .await;

    let rubrics = canvas(&mock_server.uri())
        .with_course(123)
        .rubrics()
        .unwrap();
    let created = rubrics
        .create(&CreateRubric {
            title: Some("R".to_string()),
            ..CreateRubric::default()
        })
        .await
        .unwrap();

    assert_eq!(created["rubric"]["id"], 55);
}

#[tokio::test]
async fn test_rubrics_show_style_and_includes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/123/rubrics/55"))
        .and(query_param("include", "assessments"))
        .and(query_param("style", "comments_only"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 55})))
        .mount(&mock_server)
        .await;

    let rubrics = canvas(&mock_server.uri())
        .with_course(123)
        .rubrics()
        .unwrap();
    let rubric = rubrics
        .show(
            55,
            &RubricIncludes {
                assessments: true,
                ..RubricIncludes::default()
            },
            Some(RubricStyle::CommentsOnly),
        )
        .await
        .unwrap();

    assert_eq!(rubric["id"], 55);
}

#[tokio::test]
async fn test_rubric_assessment_payload_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/courses/123/rubric_associations/9/rubric_assessments"))
        .and(body_json(json!({
            "graded_anonymously": false,
            "rubric_assessment": {
                "criterion_1": {"points": 3, "comments": "ok"},
                "user_id": "7",
                "assessment_type": "grading",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let rubrics = canvas(&mock_server.uri())
        .with_course(123)
        .rubrics()
        .unwrap();
    rubrics
        .create_assessment(
            9,
            7,
            AssessmentType::Grading,
            &json!({"criterion_1": {"points": 3, "comments": "ok"}}),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_quiz_submissions_update_wraps_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/courses/123/quizzes/5/submissions/77"))
        .and(body_json(json!({
            "quiz_submissions": [{"attempt": 1, "questions": {"11": {"score": 2}}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"quiz_submissions": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let quiz_submissions = canvas(&mock_server.uri())
        .with_course(123)
        .with_quiz(5)
        .quiz_submissions()
        .unwrap();
    quiz_submissions
        .update(77, &json!({"attempt": 1, "questions": {"11": {"score": 2}}}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_quiz_submission_questions_unwrap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/quiz_submissions/77/questions"))
        .and(query_param("quiz_submission_attempt", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "quiz_submission_questions": [{"id": 11}, {"id": 12}]
        })))
        .mount(&mock_server)
        .await;

    let questions = canvas(&mock_server.uri())
        .quiz_submission_questions()
        .index(77, Some(2))
        .await
        .unwrap();

    assert_eq!(questions.len(), 2);
}

#[tokio::test]
async fn test_quiz_submission_questions_missing_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/quiz_submissions/77/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": []})))
        .mount(&mock_server)
        .await;

    let err = canvas(&mock_server.uri())
        .quiz_submission_questions()
        .index(77, None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ResponseShape { .. }));
}

#[tokio::test]
async fn test_files_show_and_users_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/files/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "content-type": "application/zip"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/7/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .mount(&mock_server)
        .await;

    let canvas = canvas(&mock_server.uri());
    let file = canvas.files().show(42).await.unwrap();
    assert_eq!(file["content-type"], "application/zip");

    let profile = canvas.users().profile(7).await.unwrap();
    assert_eq!(profile["id"], 7);
}

#[tokio::test]
async fn test_graphql_list_active_students() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "course": {
                    "usersConnection": {
                        "nodes": [
                            {"_id": "1", "name": "Ada", "sisId": "A001", "integrationId": "X1"},
                            {"_id": "2", "name": "Grace", "sisId": "A002", "integrationId": "X2"},
                        ]
                    }
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let students = canvas(&mock_server.uri())
        .with_course(123)
        .list_active_students()
        .await
        .unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["name"], "Ada");
}

#[tokio::test]
async fn test_graphql_bad_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "course not found"}]
        })))
        .mount(&mock_server)
        .await;

    let err = canvas(&mock_server.uri())
        .with_course(999)
        .list_active_students()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ResponseShape { .. }));
}

//! Canvas REST endpoint wrappers
//!
//! Each struct maps one-to-one onto a group of REST paths and only does
//! parameter marshalling. Doc links point at the upstream API reference.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::Paginated;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

// ============================================================================
// Submissions
// ============================================================================

/// `include[]` flags for submission listings
#[derive(Debug, Clone)]
pub struct SubmissionIncludes {
    pub submission_history: bool,
    pub submission_comments: bool,
    pub rubric_assessment: bool,
    pub full_rubric_assessment: bool,
    pub assignment: bool,
    pub visibility: bool,
    pub course: bool,
    pub user: bool,
    pub group: bool,
    pub read_status: bool,
}

impl Default for SubmissionIncludes {
    fn default() -> Self {
        Self {
            submission_history: true,
            submission_comments: false,
            rubric_assessment: false,
            full_rubric_assessment: false,
            assignment: false,
            visibility: false,
            course: false,
            user: false,
            group: false,
            read_status: false,
        }
    }
}

impl SubmissionIncludes {
    pub(crate) fn to_params(&self) -> Vec<&'static str> {
        [
            (self.submission_history, "submission_history"),
            (self.submission_comments, "submission_comments"),
            (self.rubric_assessment, "rubric_assessment"),
            (self.full_rubric_assessment, "full_rubric_assessment"),
            (self.assignment, "assignment"),
            (self.visibility, "visibility"),
            (self.course, "course"),
            (self.user, "user"),
            (self.group, "group"),
            (self.read_status, "read_status"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect()
    }
}

/// Assignment submissions
pub struct SubmissionsApi {
    http: Arc<HttpClient>,
    course_id: u64,
    assignment_id: u64,
}

impl SubmissionsApi {
    pub(crate) fn new(http: Arc<HttpClient>, course_id: u64, assignment_id: u64) -> Self {
        Self {
            http,
            course_id,
            assignment_id,
        }
    }

    /// List assignment submissions
    ///
    /// <https://canvas.instructure.com/doc/api/submissions.html#method.submissions_api.index>
    pub fn index(&self, include: &SubmissionIncludes) -> Paginated {
        let url = format!(
            "/api/v1/courses/{}/assignments/{}/submissions",
            self.course_id, self.assignment_id
        );
        let mut page = Paginated::new(Arc::clone(&self.http), url).per_page(100);
        for name in include.to_params() {
            page = page.param("include[]", name);
        }
        page
    }

    /// Get a single submission
    ///
    /// <https://canvas.instructure.com/doc/api/submissions.html#method.submissions_api.show>
    pub async fn show(&self, user_id: u64, include: &SubmissionIncludes) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/assignments/{}/submissions/{}",
            self.course_id, self.assignment_id, user_id
        );
        let query: Vec<(String, String)> = include
            .to_params()
            .into_iter()
            .map(|name| ("include[]".to_string(), name.to_string()))
            .collect();
        self.http.get_json(&url, &query).await
    }

    /// Grade or comment on a submission
    ///
    /// <https://canvas.instructure.com/doc/api/submissions.html#method.submissions_api.update>
    pub async fn update(&self, user_id: u64, payload: &Value) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/assignments/{}/submissions/{}",
            self.course_id, self.assignment_id, user_id
        );
        self.http.put_json(&url, payload, &[]).await
    }
}

// ============================================================================
// Rubrics
// ============================================================================

/// Rubric association target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssociationType {
    Assignment,
    Course,
    Account,
}

/// Rubric association purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricPurpose {
    Grading,
    Bookmark,
}

/// Assessment kind accepted by the rubric assessment endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentType {
    Grading,
    PeerReview,
    ProvisionalGrade,
}

impl AssessmentType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Grading => "grading",
            Self::PeerReview => "peer_review",
            Self::ProvisionalGrade => "provisional_grade",
        }
    }
}

/// Detail level for a single-rubric fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricStyle {
    Full,
    CommentsOnly,
}

impl RubricStyle {
    fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::CommentsOnly => "comments_only",
        }
    }
}

/// `include` flags for a single-rubric fetch
#[derive(Debug, Clone, Default)]
pub struct RubricIncludes {
    pub assessments: bool,
    pub graded_assessments: bool,
    pub peer_assessments: bool,
    pub associations: bool,
    pub assignment_associations: bool,
    pub course_associations: bool,
    pub account_associations: bool,
}

impl RubricIncludes {
    fn to_params(&self) -> Vec<&'static str> {
        [
            (self.assessments, "assessments"),
            (self.graded_assessments, "graded_assessments"),
            (self.peer_assessments, "peer_assessments"),
            (self.associations, "associations"),
            (self.assignment_associations, "assignment_associations"),
            (self.course_associations, "course_associations"),
            (self.account_associations, "account_associations"),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| enabled.then_some(name))
        .collect()
    }
}

/// Parameters for rubric creation; `None` fields are omitted from the payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateRubric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric_association_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_form_criterion_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_updating_points_possible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_type: Option<AssociationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_for_grading: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_score_total: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<RubricPurpose>,
}

impl CreateRubric {
    /// Assemble the nested payload the endpoint expects
    ///
    /// Empty `rubric` / `rubric_association` objects are dropped entirely,
    /// matching what the endpoint tolerates.
    pub(crate) fn to_payload(&self) -> Result<Value> {
        let mut rubric = serde_json::Map::new();
        insert_some(&mut rubric, "title", self.title.as_ref())?;
        insert_some(
            &mut rubric,
            "free_form_criterion_comments",
            self.free_form_criterion_comments.as_ref(),
        )?;
        insert_some(
            &mut rubric,
            "skip_updating_points_possible",
            self.skip_updating_points_possible.as_ref(),
        )?;
        insert_some(&mut rubric, "criteria", self.criteria.as_ref())?;

        let mut association = serde_json::Map::new();
        insert_some(&mut association, "association_id", self.association_id.as_ref())?;
        insert_some(
            &mut association,
            "association_type",
            self.association_type.as_ref(),
        )?;
        insert_some(&mut association, "use_for_grading", self.use_for_grading.as_ref())?;
        insert_some(
            &mut association,
            "hide_score_total",
            self.hide_score_total.as_ref(),
        )?;
        insert_some(&mut association, "purpose", self.purpose.as_ref())?;

        let mut payload = serde_json::Map::new();
        insert_some(&mut payload, "id", self.id.as_ref())?;
        insert_some(
            &mut payload,
            "rubric_association_id",
            self.rubric_association_id.as_ref(),
        )?;
        if !rubric.is_empty() {
            payload.insert("rubric".to_string(), Value::Object(rubric));
        }
        if !association.is_empty() {
            payload.insert("rubric_association".to_string(), Value::Object(association));
        }

        Ok(Value::Object(payload))
    }
}

fn insert_some<T: Serialize>(
    map: &mut serde_json::Map<String, Value>,
    key: &str,
    value: Option<&T>,
) -> Result<()> {
    if let Some(value) = value {
        map.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}

/// Course rubrics and rubric assessments
pub struct RubricsApi {
    http: Arc<HttpClient>,
    course_id: u64,
}

impl RubricsApi {
    pub(crate) fn new(http: Arc<HttpClient>, course_id: u64) -> Self {
        Self { http, course_id }
    }

    /// Create a single rubric
    ///
    /// <https://canvas.instructure.com/doc/api/rubrics.html#method.rubrics.create>
    pub async fn create(&self, rubric: &CreateRubric) -> Result<Value> {
        let url = format!("/api/v1/courses/{}/rubrics", self.course_id);
        let payload = rubric.to_payload()?;
        self.http.post_json(&url, &payload, &[]).await
    }

    /// List the course's rubrics
    ///
    /// <https://canvas.instructure.com/doc/api/rubrics.html#method.rubrics_api.index>
    pub fn index(&self) -> Paginated {
        let url = format!("/api/v1/courses/{}/rubrics", self.course_id);
        Paginated::new(Arc::clone(&self.http), url)
    }

    /// Get a single rubric
    ///
    /// <https://canvas.instructure.com/doc/api/rubrics.html#method.rubrics_api.show>
    pub async fn show(
        &self,
        rubric_id: u64,
        include: &RubricIncludes,
        style: Option<RubricStyle>,
    ) -> Result<Value> {
        let url = format!("/api/v1/courses/{}/rubrics/{}", self.course_id, rubric_id);
        let mut query: Vec<(String, String)> = include
            .to_params()
            .into_iter()
            .map(|name| ("include".to_string(), name.to_string()))
            .collect();
        if let Some(style) = style {
            query.push(("style".to_string(), style.as_str().to_string()));
        }
        self.http.get_json(&url, &query).await
    }

    /// Create a rubric assessment
    ///
    /// <https://canvas.instructure.com/doc/api/rubrics.html#method.rubric_assessments.create>
    pub async fn create_assessment(
        &self,
        rubric_association_id: u64,
        user_id: u64,
        assessment_type: AssessmentType,
        assessment: &Value,
    ) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/rubric_associations/{}/rubric_assessments",
            self.course_id, rubric_association_id
        );
        let payload = json!({
            "graded_anonymously": false,
            "rubric_assessment": assessment_payload(user_id, assessment_type, assessment)?,
        });
        self.http.post_json(&url, &payload, &[]).await
    }

    /// Update a rubric assessment
    ///
    /// <https://canvas.instructure.com/doc/api/rubrics.html#method.rubric_assessments.update>
    pub async fn update_assessment(
        &self,
        rubric_association_id: u64,
        rubric_assessment_id: u64,
        user_id: u64,
        assessment_type: AssessmentType,
        assessment: &Value,
    ) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/rubric_associations/{}/rubric_assessments/{}",
            self.course_id, rubric_association_id, rubric_assessment_id
        );
        let payload = json!({
            "rubric_assessment": assessment_payload(user_id, assessment_type, assessment)?,
        });
        self.http.put_json(&url, &payload, &[]).await
    }
}

/// Merge the per-criterion assessment entries into the fixed fields
fn assessment_payload(
    user_id: u64,
    assessment_type: AssessmentType,
    assessment: &Value,
) -> Result<Value> {
    let mut map = match assessment {
        Value::Object(map) => map.clone(),
        _ => {
            return Err(Error::config(
                "rubric assessment must be a JSON object of criterion entries",
            ))
        }
    };
    map.insert("user_id".to_string(), json!(user_id.to_string()));
    map.insert(
        "assessment_type".to_string(),
        json!(assessment_type.as_str()),
    );
    Ok(Value::Object(map))
}

// ============================================================================
// Files, users, assignments
// ============================================================================

/// Files endpoint
pub struct FilesApi {
    http: Arc<HttpClient>,
}

impl FilesApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Get file metadata
    ///
    /// <https://canvas.instructure.com/doc/api/files.html#method.files.api_show>
    pub async fn show(&self, file_id: u64) -> Result<Value> {
        let url = format!("/api/v1/files/{file_id}");
        self.http.get_json(&url, &[]).await
    }
}

/// Users endpoint
pub struct UsersApi {
    http: Arc<HttpClient>,
}

impl UsersApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Get user profile settings
    ///
    /// <https://canvas.instructure.com/doc/api/users.html#method.profile.settings>
    pub async fn profile(&self, user_id: u64) -> Result<Value> {
        let url = format!("/api/v1/users/{user_id}/profile");
        self.http.get_json(&url, &[]).await
    }
}

/// Assignments endpoint
pub struct AssignmentsApi {
    http: Arc<HttpClient>,
    course_id: u64,
}

impl AssignmentsApi {
    pub(crate) fn new(http: Arc<HttpClient>, course_id: u64) -> Self {
        Self { http, course_id }
    }

    /// Get a single assignment
    pub async fn show(&self, assignment_id: u64) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/assignments/{}",
            self.course_id, assignment_id
        );
        self.http.get_json(&url, &[]).await
    }
}

// ============================================================================
// Quizzes
// ============================================================================

/// Quiz submissions endpoint
pub struct QuizSubmissionsApi {
    http: Arc<HttpClient>,
    course_id: u64,
    quiz_id: u64,
}

impl QuizSubmissionsApi {
    pub(crate) fn new(http: Arc<HttpClient>, course_id: u64, quiz_id: u64) -> Self {
        Self {
            http,
            course_id,
            quiz_id,
        }
    }

    /// Update student question scores and comments
    ///
    /// <https://canvas.instructure.com/doc/api/quiz_submissions.html#method.quizzes/quiz_submissions_api.update>
    pub async fn update(&self, quiz_submission_id: u64, payload: &Value) -> Result<Value> {
        let url = format!(
            "/api/v1/courses/{}/quizzes/{}/submissions/{}",
            self.course_id, self.quiz_id, quiz_submission_id
        );
        let body = json!({ "quiz_submissions": [payload] });
        self.http.put_json(&url, &body, &[]).await
    }
}

/// Quiz submission questions endpoint
pub struct QuizSubmissionQuestionsApi {
    http: Arc<HttpClient>,
}

impl QuizSubmissionQuestionsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Get all quiz submission questions
    ///
    /// <https://canvas.instructure.com/doc/api/quiz_submission_questions.html>
    pub async fn index(
        &self,
        quiz_submission_id: u64,
        attempt: Option<u32>,
    ) -> Result<Vec<Value>> {
        let url = format!("/api/v1/quiz_submissions/{quiz_submission_id}/questions");
        let query: Vec<(String, String)> = attempt
            .map(|a| vec![("quiz_submission_attempt".to_string(), a.to_string())])
            .unwrap_or_default();

        let mut body: Value = self.http.get_json(&url, &query).await?;
        match body
            .get_mut("quiz_submission_questions")
            .map(Value::take)
        {
            Some(Value::Array(questions)) => Ok(questions),
            _ => Err(Error::response_shape(
                "field 'quiz_submission_questions' missing from response",
            )),
        }
    }
}

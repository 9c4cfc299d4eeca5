//! Canvas LMS API
//!
//! One consolidated facade over the HTTP client plus thin per-resource
//! endpoint structs. Responses stay opaque `serde_json::Value`s; this layer
//! only knows URLs and parameter marshalling.

mod endpoints;

pub use endpoints::{
    AssessmentType, AssignmentsApi, AssociationType, CreateRubric, FilesApi,
    QuizSubmissionQuestionsApi, QuizSubmissionsApi, RubricIncludes, RubricPurpose, RubricStyle,
    RubricsApi, SubmissionIncludes, SubmissionsApi, UsersApi,
};

use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde_json::{json, Value};
use std::sync::Arc;

/// GraphQL query used by [`Canvas::list_active_students`]
const LIST_ACTIVE_STUDENTS: &str = r"
query ListActiveStudents($course_id: ID!) {
  course(id: $course_id) {
    usersConnection(
      filter: {enrollmentTypes: StudentEnrollment, enrollmentStates: active}
    ) {
      nodes {
        _id
        name
        sisId
        integrationId
      }
    }
  }
}
";

/// Canvas API facade
///
/// Holds the shared HTTP client and the course/assignment/quiz context the
/// endpoint wrappers need. Accessors fail when their required ids are unset.
#[derive(Debug, Clone)]
pub struct Canvas {
    http: Arc<HttpClient>,
    course_id: Option<u64>,
    assignment_id: Option<u64>,
    quiz_id: Option<u64>,
}

impl Canvas {
    /// Create a facade with no course context
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            course_id: None,
            assignment_id: None,
            quiz_id: None,
        }
    }

    /// Set the course id
    #[must_use]
    pub fn with_course(mut self, course_id: u64) -> Self {
        self.course_id = Some(course_id);
        self
    }

    /// Set the assignment id
    #[must_use]
    pub fn with_assignment(mut self, assignment_id: u64) -> Self {
        self.assignment_id = Some(assignment_id);
        self
    }

    /// Set the quiz id
    #[must_use]
    pub fn with_quiz(mut self, quiz_id: u64) -> Self {
        self.quiz_id = Some(quiz_id);
        self
    }

    /// Files endpoint
    pub fn files(&self) -> FilesApi {
        FilesApi::new(Arc::clone(&self.http))
    }

    /// Users endpoint
    pub fn users(&self) -> UsersApi {
        UsersApi::new(Arc::clone(&self.http))
    }

    /// Assignments endpoint; requires a course id
    pub fn assignments(&self) -> Result<AssignmentsApi> {
        Ok(AssignmentsApi::new(
            Arc::clone(&self.http),
            self.require("course_id", self.course_id)?,
        ))
    }

    /// Submissions endpoint; requires course and assignment ids
    pub fn submissions(&self) -> Result<SubmissionsApi> {
        Ok(SubmissionsApi::new(
            Arc::clone(&self.http),
            self.require("course_id", self.course_id)?,
            self.require("assignment_id", self.assignment_id)?,
        ))
    }

    /// Rubrics endpoint; requires a course id
    pub fn rubrics(&self) -> Result<RubricsApi> {
        Ok(RubricsApi::new(
            Arc::clone(&self.http),
            self.require("course_id", self.course_id)?,
        ))
    }

    /// Quiz submissions endpoint; requires course and quiz ids
    pub fn quiz_submissions(&self) -> Result<QuizSubmissionsApi> {
        Ok(QuizSubmissionsApi::new(
            Arc::clone(&self.http),
            self.require("course_id", self.course_id)?,
            self.require("quiz_id", self.quiz_id)?,
        ))
    }

    /// Quiz submission questions endpoint
    pub fn quiz_submission_questions(&self) -> QuizSubmissionQuestionsApi {
        QuizSubmissionQuestionsApi::new(Arc::clone(&self.http))
    }

    /// GraphQL endpoint
    ///
    /// <https://canvas.instructure.com/doc/api/file.graphql.html>
    pub async fn graphql(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        let body = json!({ "query": query, "variables": variables });
        self.http.post_json("/api/graphql", &body, &[]).await
    }

    /// List active students in the course via GraphQL
    pub async fn list_active_students(&self) -> Result<Vec<Value>> {
        let course_id = self.require("course_id", self.course_id)?;
        let resp = self
            .graphql(
                LIST_ACTIVE_STUDENTS,
                Some(json!({ "course_id": course_id })),
            )
            .await?;

        match resp
            .pointer("/data/course/usersConnection/nodes")
            .and_then(Value::as_array)
        {
            Some(nodes) => Ok(nodes.clone()),
            None => Err(Error::response_shape(
                "GraphQL response missing data.course.usersConnection.nodes",
            )),
        }
    }

    fn require(&self, field: &str, value: Option<u64>) -> Result<u64> {
        value.ok_or_else(|| Error::missing_field(field))
    }
}

#[cfg(test)]
mod tests;

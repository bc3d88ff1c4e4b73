//! Public request/response DTOs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Submissions serialize with their domain shape (camelCase), which is the
//! exact shape the web client originally persisted, so no separate DTO is
//! needed for them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Submission;

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

//
// Word selection
//

#[derive(Debug, Deserialize)]
pub struct DailyWordsQuery {
    pub count: Option<usize>,
    /// "YYYY-MM-DD"; defaults to today in the reference zone.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomWordsQuery {
    pub count: Option<usize>,
}

#[derive(Serialize)]
pub struct DailyWordsOut {
    pub date: String,
    pub words: Vec<String>,
}

#[derive(Serialize)]
pub struct RandomWordsOut {
    pub words: Vec<String>,
}

//
// Forms & validation
//

#[derive(Serialize)]
pub struct FormsOut {
    pub word: String,
    pub forms: Vec<String>,
    /// "dictionary" when the lookup contributed inflections, "base" when we
    /// fell back to the bare challenge word.
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ValidateIn {
    pub words: Vec<String>,
    pub content: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOut {
    pub plain_text: String,
    pub word_count: usize,
    pub validation: HashMap<String, bool>,
    pub all_valid: bool,
}

//
// Submissions
//

#[derive(Debug, Deserialize)]
pub struct SubmissionCreateIn {
    #[serde(default)]
    pub title: String,
    pub words: Vec<String>,
    pub content: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionUpdateIn {
    #[serde(default)]
    pub title: String,
    pub content: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsOut {
    pub submissions: Vec<Submission>,
    pub current_streak: u32,
    pub last_submission_date: String,
    pub has_submission_today: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakOut {
    pub current_streak: u32,
    pub has_submission_today: bool,
    pub last_submission_date: String,
}

#[derive(Serialize)]
pub struct OkOut {
    pub ok: bool,
}

//
// Feedback
//

#[derive(Debug, Deserialize)]
pub struct FeedbackIn {
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

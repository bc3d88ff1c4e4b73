//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::dictionary::{DictionaryError, DictionaryResponse};
use crate::domain::Submission;
use crate::errors::ApiError;
use crate::logic::validate_document;
use crate::protocol::*;
use crate::state::AppState;
use crate::streak;

const DEFAULT_WORD_COUNT: usize = 3;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

/// Requested selection size, bounded by the catalog. Oversized counts are a
/// client error here, not the catalog precondition panic.
fn selection_count(state: &AppState, requested: Option<usize>) -> Result<usize, ApiError> {
  let count = requested.unwrap_or(DEFAULT_WORD_COUNT);
  if count == 0 || count > state.catalog.len() {
    return Err(ApiError::BadRequest(format!(
      "count must be between 1 and {}", state.catalog.len()
    )));
  }
  Ok(count)
}

#[instrument(level = "info", skip(state), fields(count = ?q.count, date = ?q.date))]
pub async fn http_daily_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<DailyWordsQuery>,
) -> Result<Json<DailyWordsOut>, ApiError> {
  let count = selection_count(&state, q.count)?;
  let date = match &q.date {
    Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
      .map_err(|_| ApiError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", raw)))?,
    None => streak::today_in_reference_zone(),
  };

  let words = state.catalog.daily_words(count, date);
  info!(target: "words", %date, ?words, "Daily words served");
  Ok(Json(DailyWordsOut { date: date.format("%Y-%m-%d").to_string(), words }))
}

#[instrument(level = "info", skip(state), fields(count = ?q.count))]
pub async fn http_random_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<RandomWordsQuery>,
) -> Result<Json<RandomWordsOut>, ApiError> {
  let count = selection_count(&state, q.count)?;
  let words = state.catalog.random_words(count);
  info!(target: "words", ?words, "Random words served");
  Ok(Json(RandomWordsOut { words }))
}

#[instrument(level = "info", skip(state), fields(%word))]
pub async fn http_word_forms(
  State(state): State<Arc<AppState>>,
  Path(word): Path<String>,
) -> Json<FormsOut> {
  let forms = state.allowed_forms(&word).await;
  let source = if forms.len() > 1 { "dictionary" } else { "base" };
  info!(target: "words", %word, forms = forms.len(), source, "Forms served");
  Json(FormsOut { word, forms, source })
}

#[instrument(level = "info", skip(state), fields(%word))]
pub async fn http_word_definition(
  State(state): State<Arc<AppState>>,
  Path(word): Path<String>,
) -> Result<Json<DictionaryResponse>, ApiError> {
  let Some(dict) = &state.dictionary else {
    return Err(ApiError::Unavailable("Dictionary client unavailable".into()));
  };
  match dict.fetch_entry(&word).await {
    Ok(entry) => Ok(Json(entry)),
    Err(DictionaryError::NotFound) => Err(ApiError::NotFound("Definition not found".into())),
    Err(e) => Err(ApiError::Unavailable(e.to_string())),
  }
}

#[instrument(level = "info", skip(state, body), fields(words = body.words.len()))]
pub async fn http_validate(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ValidateIn>,
) -> Json<ValidateOut> {
  let (plain_text, word_count, validation) =
    validate_document(&state, &body.words, &body.content).await;
  let all_valid = !validation.is_empty() && validation.values().all(|v| *v);
  Json(ValidateOut { plain_text, word_count, validation, all_valid })
}

#[instrument(level = "info", skip(state))]
pub async fn http_list_submissions(State(state): State<Arc<AppState>>) -> Json<SubmissionsOut> {
  let store = state.store.lock().await;
  let data = store.data();
  // Recompute rather than trust the persisted snapshot: the cached streak
  // was written at the last mutation and goes stale across day boundaries.
  Json(SubmissionsOut {
    submissions: store.list(),
    current_streak: streak::current_streak(&data.submissions),
    last_submission_date: data.last_submission_date.clone(),
    has_submission_today: streak::has_submission_today(&data.submissions),
  })
}

#[instrument(level = "info", skip(state, body), fields(words = body.words.len(), title_len = body.title.len()))]
pub async fn http_create_submission(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SubmissionCreateIn>,
) -> Result<Json<Submission>, ApiError> {
  if body.words.is_empty() {
    return Err(ApiError::BadRequest("At least one challenge word is required".into()));
  }

  let (plain_text, word_count, validation) =
    validate_document(&state, &body.words, &body.content).await;

  let submission = state
    .store
    .lock()
    .await
    .create(body.words, &body.title, body.content, plain_text, validation)?;
  info!(target: "store", id = %submission.id, word_count, "HTTP submission created");
  Ok(Json(submission))
}

#[instrument(level = "info", skip(state, body), fields(%id, title_len = body.title.len()))]
pub async fn http_update_submission(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<SubmissionUpdateIn>,
) -> Result<Json<Submission>, ApiError> {
  // Challenge words are frozen at creation; re-validate against the stored set.
  let words = { state.store.lock().await.get(&id).map(|s| s.words.clone()) };
  let Some(words) = words else {
    return Err(ApiError::NotFound(format!("Unknown submission id: {}", id)));
  };

  // Form lookups happen outside the store lock.
  let (plain_text, _, validation) = validate_document(&state, &words, &body.content).await;

  let updated = state
    .store
    .lock()
    .await
    .update(&id, &body.title, body.content, plain_text, validation)?;
  match updated {
    Some(submission) => Ok(Json(submission)),
    None => Err(ApiError::NotFound(format!("Unknown submission id: {}", id))),
  }
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_delete_submission(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<OkOut>, ApiError> {
  state.store.lock().await.delete(&id)?;
  Ok(Json(OkOut { ok: true }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_streak(State(state): State<Arc<AppState>>) -> Json<StreakOut> {
  let store = state.store.lock().await;
  let data = store.data();
  Json(StreakOut {
    current_streak: streak::current_streak(&data.submissions),
    has_submission_today: streak::has_submission_today(&data.submissions),
    last_submission_date: data.last_submission_date.clone(),
  })
}

#[instrument(level = "info", skip(state, body), fields(message_len = body.message.len()))]
pub async fn http_post_feedback(
  State(state): State<Arc<AppState>>,
  Json(body): Json<FeedbackIn>,
) -> Result<Json<OkOut>, ApiError> {
  let message = body.message.trim();
  if message.is_empty() {
    return Err(ApiError::BadRequest("Message is required".into()));
  }

  let Some(notifier) = &state.notifier else {
    return Err(ApiError::Unavailable("Feedback relay not configured".into()));
  };

  notifier
    .send(message, body.name.as_deref(), body.email.as_deref())
    .await
    .map_err(ApiError::Unavailable)?;
  Ok(Json(OkOut { ok: true }))
}

//! Domain models: the submission record and the persisted aggregate.
//!
//! Field names serialize in camelCase so the on-disk aggregate stays readable
//! by the web client that originally owned this data shape.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title applied when the user saves a story without one.
pub const UNTITLED: &str = "Untitled";

/// One saved story. `id`, `words` and `created_at` are frozen at creation;
/// everything else is overwritten on each save.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
  pub id: String,
  pub title: String,
  /// The challenge words assigned when the story was started.
  pub words: Vec<String>,
  /// Rich-text document as produced by the editor. Opaque to the backend
  /// except for plain-text extraction.
  pub content: serde_json::Value,
  pub plain_text: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Per challenge word: did the story use it (or an accepted form)?
  /// Keys always mirror `words` exactly.
  pub word_validation: HashMap<String, bool>,
}

/// The aggregate root persisted as a single JSON document.
/// `current_streak` and `last_submission_date` are derived from
/// `submissions` and recomputed on every mutation, never trusted from disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
  pub submissions: Vec<Submission>,
  pub current_streak: u32,
  pub last_submission_date: String,
}

impl Default for AppData {
  fn default() -> Self {
    Self {
      submissions: Vec::new(),
      current_streak: 0,
      last_submission_date: String::new(),
    }
  }
}

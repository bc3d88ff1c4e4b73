//! Durable submission store: owns the aggregate and its JSON file.
//!
//! Every mutation is a full read-modify-write of the aggregate: mutate the
//! collection, recompute the derived streak fields from the complete
//! history, then rewrite the whole file. There is no partial persistence,
//! so whatever is on disk is always internally consistent.
//!
//! A missing or unparseable file is "no data": we log it and start from the
//! empty default, never fail. IO failures on write surface as a typed error
//! value for the handler to report.

use std::path::{Path, PathBuf};

use chrono::Utc;
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::{AppData, Submission};
use crate::streak;

#[derive(Debug)]
pub enum StoreError {
  Io(String),
}

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::Io(msg) => write!(f, "Storage failure: {}", msg),
    }
  }
}

pub struct SubmissionStore {
  path: PathBuf,
  data: AppData,
  untitled_label: String,
}

impl SubmissionStore {
  /// Open the store at `path`, falling back to the empty aggregate when the
  /// file is absent or corrupt. Derived fields are recomputed immediately;
  /// the persisted copies are only a snapshot of the last write.
  #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
  pub fn open(path: impl AsRef<Path>, untitled_label: String) -> Self {
    let path = path.as_ref().to_path_buf();
    let data = Self::load_from(&path);
    let mut store = Self { path, data, untitled_label };
    store.recompute_derived();
    info!(
      target: "store",
      submissions = store.data.submissions.len(),
      streak = store.data.current_streak,
      "Store opened"
    );
    store
  }

  fn load_from(path: &Path) -> AppData {
    match std::fs::read_to_string(path) {
      Ok(raw) => match serde_json::from_str::<AppData>(&raw) {
        Ok(data) => data,
        Err(e) => {
          warn!(target: "store", path = %path.display(), error = %e, "Aggregate unparseable; starting empty");
          AppData::default()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppData::default(),
      Err(e) => {
        warn!(target: "store", path = %path.display(), error = %e, "Aggregate unreadable; starting empty");
        AppData::default()
      }
    }
  }

  fn recompute_derived(&mut self) {
    self.data.current_streak = streak::current_streak(&self.data.submissions);
    self.data.last_submission_date = streak::last_submission_date(&self.data.submissions);
  }

  fn persist(&self) -> Result<(), StoreError> {
    if let Some(dir) = self.path.parent() {
      std::fs::create_dir_all(dir).map_err(|e| StoreError::Io(e.to_string()))?;
    }
    let raw = serde_json::to_string_pretty(&self.data).map_err(|e| StoreError::Io(e.to_string()))?;
    std::fs::write(&self.path, raw).map_err(|e| StoreError::Io(e.to_string()))
  }

  pub fn data(&self) -> &AppData {
    &self.data
  }

  /// Submissions newest-first, the order every view presents them in.
  pub fn list(&self) -> Vec<Submission> {
    let mut subs = self.data.submissions.clone();
    subs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    subs
  }

  pub fn get(&self, id: &str) -> Option<&Submission> {
    self.data.submissions.iter().find(|s| s.id == id)
  }

  #[instrument(level = "info", skip_all, fields(words = words.len(), title_len = title.len()))]
  pub fn create(
    &mut self,
    words: Vec<String>,
    title: &str,
    content: serde_json::Value,
    plain_text: String,
    validation: HashMap<String, bool>,
  ) -> Result<Submission, StoreError> {
    let now = Utc::now();
    let title = title.trim();
    let submission = Submission {
      id: Uuid::new_v4().to_string(),
      title: if title.is_empty() { self.untitled_label.clone() } else { title.to_string() },
      words,
      content,
      plain_text,
      created_at: now,
      updated_at: now,
      word_validation: validation,
    };

    self.data.submissions.push(submission.clone());
    self.recompute_derived();
    self.persist()?;
    info!(target: "store", id = %submission.id, streak = self.data.current_streak, "Submission created");
    Ok(submission)
  }

  /// Overwrite the mutable fields of an existing submission. `id`, `words`
  /// and `created_at` stay frozen. Unknown ids report as `Ok(None)`.
  #[instrument(level = "info", skip_all, fields(%id))]
  pub fn update(
    &mut self,
    id: &str,
    title: &str,
    content: serde_json::Value,
    plain_text: String,
    validation: HashMap<String, bool>,
  ) -> Result<Option<Submission>, StoreError> {
    let untitled = self.untitled_label.clone();
    let Some(existing) = self.data.submissions.iter_mut().find(|s| s.id == id) else {
      warn!(target: "store", %id, "Update for unknown submission");
      return Ok(None);
    };

    let title = title.trim();
    existing.title = if title.is_empty() { untitled } else { title.to_string() };
    existing.content = content;
    existing.plain_text = plain_text;
    existing.word_validation = validation;
    existing.updated_at = Utc::now();
    let updated = existing.clone();

    self.recompute_derived();
    self.persist()?;
    Ok(Some(updated))
  }

  /// Remove a submission; a no-op when the id is unknown. The streak is
  /// recomputed from whatever remains either way.
  #[instrument(level = "info", skip(self), fields(%id))]
  pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
    let before = self.data.submissions.len();
    self.data.submissions.retain(|s| s.id != id);
    let removed = self.data.submissions.len() != before;

    self.recompute_derived();
    self.persist()?;
    if removed {
      info!(target: "store", %id, streak = self.data.current_streak, "Submission deleted");
    }
    Ok(removed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn story_doc(text: &str) -> serde_json::Value {
    json!({
      "type": "doc",
      "content": [ { "type": "paragraph", "content": [ { "type": "text", "text": text } ] } ]
    })
  }

  fn open_in(dir: &tempfile::TempDir) -> SubmissionStore {
    SubmissionStore::open(dir.path().join("story40.json"), "Untitled".into())
  }

  #[test]
  fn create_persists_and_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
      let mut store = open_in(&dir);
      let sub = store
        .create(
          vec!["spark".into()],
          "My story",
          story_doc("a spark in the dark"),
          "a spark in the dark ".into(),
          HashMap::from([("spark".into(), true)]),
        )
        .unwrap();
      assert_eq!(sub.title, "My story");
    }

    let store = open_in(&dir);
    assert_eq!(store.data().submissions.len(), 1);
    // Created just now, so it counts for today.
    assert_eq!(store.data().current_streak, 1);
    assert!(!store.data().last_submission_date.is_empty());
  }

  #[test]
  fn blank_titles_get_the_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_in(&dir);
    let sub = store
      .create(vec![], "   ", story_doc("x"), "x ".into(), HashMap::new())
      .unwrap();
    assert_eq!(sub.title, "Untitled");
  }

  #[test]
  fn update_freezes_identity_words_and_created_at() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_in(&dir);
    let sub = store
      .create(
        vec!["river".into()],
        "Draft",
        story_doc("by the river"),
        "by the river ".into(),
        HashMap::from([("river".into(), true)]),
      )
      .unwrap();

    let updated = store
      .update(
        &sub.id,
        "Final",
        story_doc("near the rivers"),
        "near the rivers ".into(),
        HashMap::from([("river".into(), true)]),
      )
      .unwrap()
      .expect("submission exists");

    assert_eq!(updated.id, sub.id);
    assert_eq!(updated.words, sub.words);
    assert_eq!(updated.created_at, sub.created_at);
    assert_eq!(updated.title, "Final");
    assert!(updated.updated_at >= sub.updated_at);
  }

  #[test]
  fn updating_an_unknown_id_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_in(&dir);
    let result = store
      .update("missing", "t", story_doc("x"), "x ".into(), HashMap::new())
      .unwrap();
    assert!(result.is_none());
  }

  #[test]
  fn deleting_the_only_submission_zeroes_the_streak() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_in(&dir);
    let sub = store
      .create(vec![], "t", story_doc("x"), "x ".into(), HashMap::new())
      .unwrap();
    assert_eq!(store.data().current_streak, 1);

    assert!(store.delete(&sub.id).unwrap());
    assert_eq!(store.data().current_streak, 0);
    assert_eq!(store.data().last_submission_date, "");

    // Deleting again is a quiet no-op.
    assert!(!store.delete(&sub.id).unwrap());
  }

  #[test]
  fn corrupt_aggregate_falls_back_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story40.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = SubmissionStore::open(&path, "Untitled".into());
    assert!(store.data().submissions.is_empty());
    assert_eq!(store.data().current_streak, 0);
  }
}

//! Core behaviors shared by the HTTP handlers.
//!
//! The one real orchestration step lives here: turning an editor document
//! plus a challenge-word set into plain text, a word count, and the
//! per-word validation map, with inflected forms resolved through the
//! session cache. Everything else in the handlers is plumbing.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::matching;
use crate::state::AppState;

/// Flatten the document, resolve allowed forms for every challenge word,
/// and evaluate which words the text actually uses.
///
/// When a form lookup fails the affected word silently degrades to exact
/// base-word matching; writing is never blocked on the dictionary.
#[instrument(level = "debug", skip(state, content), fields(words = words.len()))]
pub async fn validate_document(
  state: &AppState,
  words: &[String],
  content: &serde_json::Value,
) -> (String, usize, HashMap<String, bool>) {
  let plain_text = matching::extract_plain_text(content);
  let forms_by_word = state.forms_for(words).await;
  let validation = matching::validate_all(words, &plain_text, &forms_by_word);
  let word_count = matching::count_words(&plain_text);

  debug!(
    target: "words",
    text_len = plain_text.len(),
    word_count,
    valid = validation.values().filter(|v| **v).count(),
    "Document validated"
  );
  (plain_text, word_count, validation)
}

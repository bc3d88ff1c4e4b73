//! Free Dictionary API client (https://freedictionaryapi.com/).
//!
//! One GET per word; the response groups entries by part of speech, each with
//! optional pronunciations, inflected forms, and senses. We only *need* the
//! forms (they feed word matching), but the full entry is kept intact so the
//! definition endpoint can pass it through to the UI.
//!
//! No retries here: a word's entry never changes within the app's lifetime,
//! so callers cache successful lookups per word and may retry transient
//! failures on the next request.

use std::time::Duration;

use reqwest::header::USER_AGENT;
use serde::{Deserialize, Serialize};
use tracing::{instrument, info};

/// Lookup outcome, kept as an explicit tagged type: "no such word" is an
/// expected answer, not a fault.
#[derive(Debug)]
pub enum DictionaryError {
  /// The dictionary has no entry for this word (HTTP 404).
  NotFound,
  /// Transport failure, non-2xx status, or malformed body.
  Http(String),
}

impl std::fmt::Display for DictionaryError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      DictionaryError::NotFound => write!(f, "Definition not found"),
      DictionaryError::Http(msg) => write!(f, "Dictionary lookup failed: {}", msg),
    }
  }
}

#[derive(Clone)]
pub struct Dictionary {
  pub client: reqwest::Client,
  pub base_url: String,
}

impl Dictionary {
  /// Construct the client; base URL is overridable via DICTIONARY_BASE_URL.
  pub fn from_env() -> Option<Self> {
    let base_url = std::env::var("DICTIONARY_BASE_URL")
      .unwrap_or_else(|_| "https://freedictionaryapi.com/api/v1".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .ok()?;

    Some(Self { client, base_url })
  }

  /// Fetch the complete entry set for a word (all parts of speech).
  #[instrument(level = "info", skip(self), fields(%word))]
  pub async fn fetch_entry(&self, word: &str) -> Result<DictionaryResponse, DictionaryError> {
    let url = format!("{}/entries/en/{}", self.base_url, word.to_lowercase());

    let res = self
      .client
      .get(&url)
      .header(USER_AGENT, "story40-backend/0.1")
      .send()
      .await
      .map_err(|e| DictionaryError::Http(e.to_string()))?;

    if res.status() == reqwest::StatusCode::NOT_FOUND {
      return Err(DictionaryError::NotFound);
    }
    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      return Err(DictionaryError::Http(format!(
        "HTTP {}: {}",
        status,
        crate::util::trunc_for_log(&body, 200)
      )));
    }

    let body: DictionaryResponse = res
      .json()
      .await
      .map_err(|e| DictionaryError::Http(format!("JSON parse error: {}", e)))?;

    info!(
      target: "words",
      %word,
      entries = body.entries.len(),
      forms = extract_forms(&body).len(),
      "Dictionary entry fetched"
    );
    Ok(body)
  }
}

/// Flatten every declared inflected form across all part-of-speech entries.
/// Order follows the document; duplicates across entries are dropped.
pub fn extract_forms(response: &DictionaryResponse) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  for entry in &response.entries {
    for form in &entry.forms {
      if !out.contains(&form.word) {
        out.push(form.word.clone());
      }
    }
  }
  out
}

/// The full set of strings accepted as "using" a challenge word:
/// the word itself plus every inflected form the dictionary declares.
pub fn allowed_forms(word: &str, response: &DictionaryResponse) -> Vec<String> {
  let mut out = vec![word.to_string()];
  for form in extract_forms(response) {
    if !out.contains(&form) {
      out.push(form);
    }
  }
  out
}

// --- Dictionary DTOs (passed through to the UI verbatim) ---

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DictionaryResponse {
  pub word: String,
  #[serde(default)]
  pub entries: Vec<DictionaryEntry>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub source: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub language: Option<LanguageTag>,
  #[serde(default)]
  pub part_of_speech: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub pronunciations: Vec<Pronunciation>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub forms: Vec<WordForm>,
  #[serde(default)]
  pub senses: Vec<Sense>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub synonyms: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub antonyms: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LanguageTag {
  pub code: String,
  #[serde(default)]
  pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pronunciation {
  #[serde(default)]
  pub r#type: String,
  pub text: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WordForm {
  pub word: String,
  #[serde(default)]
  pub tags: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sense {
  pub definition: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub tags: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub examples: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub quotes: Vec<Quote>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub synonyms: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub antonyms: Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub subsenses: Vec<Sense>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
  pub text: String,
  #[serde(default)]
  pub reference: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = r#"{
    "word": "whisper",
    "entries": [
      {
        "language": { "code": "en", "name": "English" },
        "partOfSpeech": "verb",
        "forms": [
          { "word": "whispers", "tags": ["third-person", "singular"] },
          { "word": "whispering", "tags": ["present", "participle"] },
          { "word": "whispered", "tags": ["past"] }
        ],
        "senses": [ { "definition": "To speak softly." } ]
      },
      {
        "partOfSpeech": "noun",
        "forms": [ { "word": "whispers", "tags": ["plural"] } ],
        "senses": [ { "definition": "A soft utterance." } ]
      }
    ]
  }"#;

  #[test]
  fn forms_flatten_across_entries_without_duplicates() {
    let response: DictionaryResponse = serde_json::from_str(SAMPLE).unwrap();
    let forms = extract_forms(&response);
    assert_eq!(forms, vec!["whispers", "whispering", "whispered"]);
  }

  #[test]
  fn allowed_forms_always_include_the_base_word() {
    let response: DictionaryResponse = serde_json::from_str(SAMPLE).unwrap();
    let forms = allowed_forms("whisper", &response);
    assert_eq!(forms[0], "whisper");
    assert!(forms.contains(&"whispering".to_string()));
  }

  #[test]
  fn entries_without_forms_yield_nothing() {
    let response: DictionaryResponse = serde_json::from_str(
      r#"{ "word": "ocean", "entries": [ { "partOfSpeech": "noun", "senses": [] } ] }"#,
    )
    .unwrap();
    assert!(extract_forms(&response).is_empty());
    assert_eq!(allowed_forms("ocean", &response), vec!["ocean"]);
  }
}

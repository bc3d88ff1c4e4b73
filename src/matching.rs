//! Text matching: plain-text extraction from the editor document and
//! challenge-word validation.
//!
//! Matching is exact on normalized tokens, not substring containment, so
//! "cat" never matches inside "category". Inflections ("whispering" for
//! "whisper") are accepted only when the dictionary declared them as forms
//! of the challenge word (see `dictionary::allowed_forms`).

use std::collections::HashMap;

use serde_json::Value;

/// Depth-first flattening of the editor's rich-text document.
///
/// Concatenates every `"text"` leaf in document order. After each
/// block-level child (paragraph, heading, list item) a single space is
/// appended so words from adjacent blocks never merge into one token.
pub fn extract_plain_text(node: &Value) -> String {
  let mut text = String::new();

  if let Some(t) = node.get("text").and_then(Value::as_str) {
    text.push_str(t);
  }

  if let Some(children) = node.get("content").and_then(Value::as_array) {
    for child in children {
      text.push_str(&extract_plain_text(child));
      if matches!(
        child.get("type").and_then(Value::as_str),
        Some("paragraph") | Some("heading") | Some("listItem")
      ) {
        text.push(' ');
      }
    }
  }

  text
}

/// Canonical comparison key: lowercase, `[a-z]` only.
pub fn normalize_word(raw: &str) -> String {
  raw
    .to_lowercase()
    .chars()
    .filter(|c| c.is_ascii_lowercase())
    .collect()
}

/// Validate every challenge word against the text.
///
/// The text is split on whitespace and each token normalized; a challenge
/// word counts when any token equals any of its normalized allowed forms.
/// A word with no entry in `forms_by_word` falls back to exact base-word
/// matching only.
pub fn validate_all(
  challenge_words: &[String],
  text: &str,
  forms_by_word: &HashMap<String, Vec<String>>,
) -> HashMap<String, bool> {
  let tokens: Vec<String> = text
    .split_whitespace()
    .map(normalize_word)
    .filter(|t| !t.is_empty())
    .collect();

  challenge_words
    .iter()
    .map(|word| {
      let fallback = [word.clone()];
      let forms: &[String] = forms_by_word
        .get(word)
        .map(Vec::as_slice)
        .unwrap_or(&fallback);
      let used = forms.iter().any(|f| {
        let form = normalize_word(f);
        !form.is_empty() && tokens.iter().any(|t| *t == form)
      });
      (word.clone(), used)
    })
    .collect()
}

/// Word count for the 40-word minimum: whitespace tokens containing at
/// least one alphanumeric character.
pub fn count_words(text: &str) -> usize {
  text
    .split_whitespace()
    .filter(|t| t.chars().any(char::is_alphanumeric))
    .count()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn adjacent_paragraphs_do_not_merge() {
    let doc = json!({
      "type": "doc",
      "content": [
        { "type": "paragraph", "content": [ { "type": "text", "text": "Hello" } ] },
        { "type": "paragraph", "content": [ { "type": "text", "text": "world" } ] }
      ]
    });
    assert_eq!(extract_plain_text(&doc), "Hello world ");
  }

  #[test]
  fn inline_marks_do_not_split_words() {
    let doc = json!({
      "type": "doc",
      "content": [
        { "type": "paragraph", "content": [
          { "type": "text", "text": "soft " },
          { "type": "text", "text": "whisper", "marks": [ { "type": "bold" } ] }
        ] }
      ]
    });
    assert_eq!(extract_plain_text(&doc), "soft whisper ");
  }

  #[test]
  fn normalization_strips_punctuation_and_case() {
    assert_eq!(normalize_word("Cat's!"), "cats");
    assert_eq!(normalize_word("Hello42"), "hello");
    assert_eq!(normalize_word("—"), "");
  }

  #[test]
  fn matching_is_exact_not_substring() {
    let words = vec!["cat".to_string()];
    let mut forms = HashMap::new();
    forms.insert("cat".to_string(), vec!["cat".to_string(), "cats".to_string()]);

    let hit = validate_all(&words, "Cat's! everywhere", &forms);
    assert_eq!(hit["cat"], true); // "Cat's!" normalizes to "cats"

    let miss = validate_all(&words, "a whole category of things", &forms);
    assert_eq!(miss["cat"], false);
  }

  #[test]
  fn inflections_count_only_with_a_form_set() {
    let words = vec!["whisper".to_string()];
    let mut forms = HashMap::new();
    forms.insert(
      "whisper".to_string(),
      vec!["whisper".to_string(), "whispering".to_string()],
    );

    let with_forms = validate_all(&words, "She was whispering softly", &forms);
    assert_eq!(with_forms["whisper"], true);

    let without = validate_all(&words, "She was whispering softly", &HashMap::new());
    assert_eq!(without["whisper"], false);
  }

  #[test]
  fn empty_inputs_are_harmless() {
    let words = vec!["spark".to_string()];
    let v = validate_all(&words, "", &HashMap::new());
    assert_eq!(v["spark"], false);
    assert!(validate_all(&[], "some text", &HashMap::new()).is_empty());
  }

  #[test]
  fn word_count_skips_bare_punctuation() {
    assert_eq!(count_words("one two — three!"), 3);
    assert_eq!(count_words(""), 0);
  }
}

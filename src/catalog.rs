//! Word catalog: built-in challenge-word bank plus daily/random selection.
//!
//! Daily selection must be reproducible across processes: two devices asking
//! for the same calendar date get the same words. We therefore seed a small
//! LCG from the date digits instead of using `rand`, which is reserved for
//! the explicitly non-deterministic "give me new words" path.

use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use tracing::instrument;

/// Built-in bank of short, concrete words. Duplicate-free.
pub const WORD_BANK: &[&str] = &[
  "adventure", "whisper", "mountain", "dream", "shadow",
  "journey", "spark", "ocean", "mystery", "twilight",
  "ember", "river", "lantern", "echo", "storm",
  "garden", "voyage", "secret", "winter", "harvest",
  "mirror", "thunder", "velvet", "compass", "island",
  "meadow", "candle", "fortune", "castle", "breeze",
  "puzzle", "wander", "glimmer", "horizon", "marble",
  "orchard", "ribbon", "silver", "tunnel", "willow",
];

/// Smallest bank we accept from config; keeps selection-without-replacement
/// comfortably terminating for the usual count of 3.
const MIN_BANK_SIZE: usize = 10;

#[derive(Clone)]
pub struct WordCatalog {
  words: Vec<String>,
}

impl WordCatalog {
  pub fn builtin() -> Self {
    Self { words: WORD_BANK.iter().map(|w| w.to_string()).collect() }
  }

  /// Build a catalog from a config-supplied bank. Rejects banks that are too
  /// small or carry duplicates; the caller falls back to the built-in list.
  pub fn from_bank(words: Vec<String>) -> Option<Self> {
    if words.len() < MIN_BANK_SIZE {
      return None;
    }
    let mut seen = std::collections::HashSet::new();
    for w in &words {
      if !seen.insert(w.trim().to_lowercase()) {
        return None;
      }
    }
    Some(Self { words })
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  /// Deterministic daily selection.
  ///
  /// The LCG is seeded from `year*10000 + month*100 + day`, so the seed
  /// depends on the calendar date only. Indices are drawn modulo the bank
  /// size, skipping repeats, until `count` distinct words are collected.
  ///
  /// Panics if `count` exceeds the catalog size; that cannot happen through
  /// user input and indicates a programming error.
  #[instrument(level = "debug", skip(self), fields(%date, count))]
  pub fn daily_words(&self, count: usize, date: NaiveDate) -> Vec<String> {
    assert!(
      count <= self.words.len(),
      "requested {} distinct words from a {}-word catalog",
      count,
      self.words.len()
    );

    let seed = (date.year() as u32)
      .wrapping_mul(10_000)
      .wrapping_add(date.month() * 100)
      .wrapping_add(date.day());
    let mut lcg = Lcg::new(seed);

    let mut picked: Vec<usize> = Vec::with_capacity(count);
    while picked.len() < count {
      let idx = (lcg.next() as usize) % self.words.len();
      if !picked.contains(&idx) {
        picked.push(idx);
      }
    }
    picked.into_iter().map(|i| self.words[i].clone()).collect()
  }

  /// Non-deterministic selection: uniform shuffle, take a prefix.
  #[instrument(level = "debug", skip(self), fields(count))]
  pub fn random_words(&self, count: usize) -> Vec<String> {
    assert!(
      count <= self.words.len(),
      "requested {} distinct words from a {}-word catalog",
      count,
      self.words.len()
    );
    let mut shuffled = self.words.clone();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled.truncate(count);
    shuffled
  }
}

/// Minimal 32-bit LCG (Numerical Recipes constants). All we need is a fixed
/// sequence that every process derives identically from the same seed.
struct Lcg(u32);

impl Lcg {
  fn new(seed: u32) -> Self {
    Self(seed)
  }

  fn next(&mut self) -> u32 {
    self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  #[test]
  fn daily_words_are_deterministic() {
    let cat = WordCatalog::builtin();
    let a = cat.daily_words(3, date(2024, 6, 15));
    let b = cat.daily_words(3, date(2024, 6, 15));
    assert_eq!(a, b);
  }

  #[test]
  fn daily_words_are_distinct_and_from_the_bank() {
    let cat = WordCatalog::builtin();
    let words = cat.daily_words(3, date(2025, 1, 1));
    assert_eq!(words.len(), 3);
    let unique: std::collections::HashSet<_> = words.iter().collect();
    assert_eq!(unique.len(), 3);
    for w in &words {
      assert!(WORD_BANK.contains(&w.as_str()));
    }
  }

  #[test]
  fn random_words_are_distinct() {
    let cat = WordCatalog::builtin();
    let words = cat.random_words(3);
    assert_eq!(words.len(), 3);
    let unique: std::collections::HashSet<_> = words.iter().collect();
    assert_eq!(unique.len(), 3);
  }

  #[test]
  #[should_panic]
  fn asking_for_more_words_than_the_bank_holds_panics() {
    let cat = WordCatalog::builtin();
    cat.daily_words(WORD_BANK.len() + 1, date(2024, 6, 15));
  }

  #[test]
  fn tiny_or_duplicated_banks_are_rejected() {
    assert!(WordCatalog::from_bank(vec!["one".into(), "two".into()]).is_none());
    let mut bank: Vec<String> = (0..12).map(|i| format!("word{i}")).collect();
    bank[11] = "word0".into();
    assert!(WordCatalog::from_bank(bank).is_none());
  }
}

//! Streak calculation over the submission history.
//!
//! All day boundaries use one fixed reference zone (America/Winnipeg, as the
//! original deployment did) so "today" and "yesterday" mean the same thing
//! on every device. Rules:
//!   - a day counts once no matter how many submissions landed on it
//!   - the count anchors at today, or at yesterday when today is still empty
//!     (one-day grace: the streak is intact on the grace day itself and
//!     shows 0 only the day after, if nothing new was submitted)
//!   - walking back from the anchor, the first missing day ends the streak
//!
//! `updated_at` never participates; only `created_at` places a submission
//! on a calendar day.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Winnipeg;

use crate::domain::Submission;

/// Calendar day of an instant in the reference zone, as "YYYY-MM-DD".
pub fn calendar_day(instant: DateTime<Utc>) -> String {
  instant.with_timezone(&Winnipeg).format("%Y-%m-%d").to_string()
}

fn day_in_zone(instant: DateTime<Utc>) -> NaiveDate {
  instant.with_timezone(&Winnipeg).date_naive()
}

/// Today's calendar date in the reference zone; the default date for the
/// daily word selection.
pub fn today_in_reference_zone() -> NaiveDate {
  day_in_zone(Utc::now())
}

/// Streak as of `now`. Pure; `now` is a parameter so the calendar scenarios
/// are testable without clock control.
pub fn streak_at(submissions: &[Submission], now: DateTime<Utc>) -> u32 {
  if submissions.is_empty() {
    return 0;
  }

  let days: HashSet<NaiveDate> = submissions
    .iter()
    .map(|s| day_in_zone(s.created_at))
    .collect();

  let today = day_in_zone(now);
  let Some(yesterday) = today.pred_opt() else {
    return 0;
  };

  let anchor = if days.contains(&today) {
    today
  } else if days.contains(&yesterday) {
    yesterday
  } else {
    // Neither today nor yesterday: a full day was missed.
    return 0;
  };

  let mut streak = 0;
  let mut cursor = anchor;
  while days.contains(&cursor) {
    streak += 1;
    match cursor.pred_opt() {
      Some(prev) => cursor = prev,
      None => break,
    }
  }
  streak
}

pub fn current_streak(submissions: &[Submission]) -> u32 {
  streak_at(submissions, Utc::now())
}

pub fn has_submission_today_at(submissions: &[Submission], now: DateTime<Utc>) -> bool {
  let today = day_in_zone(now);
  submissions.iter().any(|s| day_in_zone(s.created_at) == today)
}

pub fn has_submission_today(submissions: &[Submission]) -> bool {
  has_submission_today_at(submissions, Utc::now())
}

/// Calendar day of the most recent submission, or "" when there are none.
pub fn last_submission_date(submissions: &[Submission]) -> String {
  submissions
    .iter()
    .max_by_key(|s| s.created_at)
    .map(|s| calendar_day(s.created_at))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn at(iso: &str) -> DateTime<Utc> {
    iso.parse().unwrap()
  }

  fn submission(created: &str) -> Submission {
    Submission {
      id: created.to_string(),
      title: "t".into(),
      words: vec![],
      content: serde_json::Value::Null,
      plain_text: String::new(),
      created_at: at(created),
      updated_at: at(created),
      word_validation: HashMap::new(),
    }
  }

  // 18:00 UTC is midday in Winnipeg year-round, so these instants sit
  // squarely inside their reference-zone calendar day.
  fn three_day_history() -> Vec<Submission> {
    vec![
      submission("2024-01-01T18:00:00Z"),
      submission("2024-01-02T18:00:00Z"),
      submission("2024-01-03T18:00:00Z"),
    ]
  }

  #[test]
  fn consecutive_days_count() {
    let subs = three_day_history();
    assert_eq!(streak_at(&subs, at("2024-01-03T18:00:00Z")), 3);
  }

  #[test]
  fn grace_day_keeps_the_streak_then_it_resets() {
    let subs = three_day_history();
    // Nothing on the 4th: still 3 (grace day).
    assert_eq!(streak_at(&subs, at("2024-01-04T18:00:00Z")), 3);
    // Still nothing on the 5th: broken.
    assert_eq!(streak_at(&subs, at("2024-01-05T18:00:00Z")), 0);
  }

  #[test]
  fn same_day_submissions_count_once() {
    let mut subs = three_day_history();
    subs.push(submission("2024-01-03T19:30:00Z"));
    subs.push(submission("2024-01-03T23:59:00Z"));
    assert_eq!(streak_at(&subs, at("2024-01-03T23:59:30Z")), 3);
  }

  #[test]
  fn a_gap_in_the_middle_stops_the_walk() {
    let subs = vec![
      submission("2024-01-01T18:00:00Z"),
      // the 2nd is missing
      submission("2024-01-03T18:00:00Z"),
    ];
    assert_eq!(streak_at(&subs, at("2024-01-03T18:00:00Z")), 1);
  }

  #[test]
  fn empty_history_is_zero() {
    assert_eq!(streak_at(&[], at("2024-01-03T18:00:00Z")), 0);
    assert_eq!(last_submission_date(&[]), "");
  }

  #[test]
  fn days_are_reference_zone_not_utc() {
    // 03:00 UTC on Jan 4 is still the evening of Jan 3 in Winnipeg (UTC-6).
    let subs = vec![submission("2024-01-04T03:00:00Z")];
    assert_eq!(calendar_day(subs[0].created_at), "2024-01-03");
    assert!(has_submission_today_at(&subs, at("2024-01-04T02:00:00Z")));
    assert_eq!(streak_at(&subs, at("2024-01-04T02:00:00Z")), 1);
  }

  #[test]
  fn streak_never_grows_as_the_history_ages() {
    let subs = three_day_history();
    let mut last = u32::MAX;
    for day in 3..=8 {
      let now = at(&format!("2024-01-{:02}T18:00:00Z", day));
      let s = streak_at(&subs, now);
      assert!(s <= last);
      last = s;
    }
  }

  #[test]
  fn last_submission_date_tracks_created_at_only() {
    let mut subs = three_day_history();
    subs[0].updated_at = at("2024-02-01T18:00:00Z");
    assert_eq!(last_submission_date(&subs), "2024-01-03");
  }
}

//! Per-domain progress statistics over the session history.

use serde::Serialize;

use crate::domain::{Domain, Session};

const NOT_AVAILABLE: &str = "N/A";

/// One completed session, flattened for charts.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
  /// `YYYY-MM-DD` of the end time.
  pub date: String,
  pub confidence_score: u8,
  pub technical_score: u8,
  pub communication_score: u8,
  pub code_quality_score: u8,
  pub problem_solving_score: u8,
  pub management_score: u8,
  pub overall_score: u8,
}

/// Rounded per-category means over the entries.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAverages {
  pub confidence: u8,
  pub technical: u8,
  pub communication: u8,
  pub code_quality: u8,
  pub problem_solving: u8,
  pub management: u8,
}

/// First-to-last change per category, in whole percent.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
  pub confidence: i64,
  pub technical: i64,
  pub communication: i64,
  pub code_quality: i64,
  pub problem_solving: i64,
  pub management: i64,
  pub overall: i64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainProgress {
  pub domain: Domain,
  pub entries: Vec<ProgressEntry>,
  pub total_sessions: usize,
  pub average_score: u8,
  pub top_skill: String,
  pub improvement_area: String,
  pub category_averages: CategoryAverages,
  pub improvement: Improvement,
}

/// Domain of the most recently finished session, if any.
pub fn most_recent_domain(history: &[Session]) -> Option<Domain> {
  history.iter().max_by_key(|s| s.end_time).map(|s| s.domain)
}

/// Domains that have at least one stored session, in first-seen order.
pub fn domains_with_history(history: &[Session]) -> Vec<Domain> {
  let mut out = Vec::new();
  for s in history {
    if !out.contains(&s.domain) {
      out.push(s.domain);
    }
  }
  out
}

pub fn domain_progress(history: &[Session], domain: Domain) -> DomainProgress {
  let entries: Vec<ProgressEntry> = history.iter().filter(|s| s.domain == domain).map(entry).collect();
  if entries.is_empty() {
    return DomainProgress {
      domain,
      entries,
      total_sessions: 0,
      average_score: 0,
      top_skill: NOT_AVAILABLE.into(),
      improvement_area: NOT_AVAILABLE.into(),
      category_averages: CategoryAverages::default(),
      improvement: Improvement::default(),
    };
  }

  let avg = |f: fn(&ProgressEntry) -> u8| entries.iter().map(|e| f64::from(f(e))).sum::<f64>() / entries.len() as f64;
  let mut skills = [
    ("Technical Knowledge", avg(|e| e.technical_score)),
    ("Communication Clarity", avg(|e| e.communication_score)),
    ("Confidence", avg(|e| e.confidence_score)),
    ("Code Quality", avg(|e| e.code_quality_score)),
    ("Problem Solving", avg(|e| e.problem_solving_score)),
  ];
  let average_score = (skills.iter().map(|(_, v)| v).sum::<f64>() / skills.len() as f64).floor() as u8;
  let category_averages = CategoryAverages {
    confidence: js_round(skills[2].1) as u8,
    technical: js_round(skills[0].1) as u8,
    communication: js_round(skills[1].1) as u8,
    code_quality: js_round(skills[3].1) as u8,
    problem_solving: js_round(skills[4].1) as u8,
    management: js_round(avg(|e| e.management_score)) as u8,
  };
  let improvement = trend(&entries);
  // stable: ties keep the listing order above
  skills.sort_by(|a, b| b.1.total_cmp(&a.1));

  DomainProgress {
    domain,
    total_sessions: entries.len(),
    entries,
    average_score,
    top_skill: skills[0].0.into(),
    improvement_area: skills[skills.len() - 1].0.into(),
    category_averages,
    improvement,
  }
}

fn trend(entries: &[ProgressEntry]) -> Improvement {
  if entries.len() < 2 {
    return Improvement::default();
  }
  let (first, last) = (&entries[0], &entries[entries.len() - 1]);
  let change = |f: fn(&ProgressEntry) -> u8| percent_change(f(first), f(last));
  Improvement {
    confidence: change(|e| e.confidence_score),
    technical: change(|e| e.technical_score),
    communication: change(|e| e.communication_score),
    code_quality: change(|e| e.code_quality_score),
    problem_solving: change(|e| e.problem_solving_score),
    management: change(|e| e.management_score),
    overall: change(|e| e.overall_score),
  }
}

/// Whole-percent change; a zero baseline reports no change.
fn percent_change(first: u8, last: u8) -> i64 {
  if first == 0 {
    return 0;
  }
  let (first, last) = (f64::from(first), f64::from(last));
  js_round((last - first) * 100.0 / first) as i64
}

// Half-up rounding, so -2.5 becomes -2.
fn js_round(v: f64) -> f64 {
  (v + 0.5).floor()
}

fn entry(session: &Session) -> ProgressEntry {
  let fb = session.feedback.clone().unwrap_or_default();
  ProgressEntry {
    date: session.end_time.unwrap_or(session.start_time).format("%Y-%m-%d").to_string(),
    confidence_score: fb.confidence_score,
    technical_score: fb.technical_score.unwrap_or(0),
    communication_score: fb.communication_score.unwrap_or(0),
    code_quality_score: fb.code_quality_score.unwrap_or(0),
    problem_solving_score: fb.problem_solving_score,
    management_score: fb.management_score.unwrap_or(0),
    overall_score: fb.overall_score,
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::domain::{Level, SessionFeedback};

  fn finished(domain: Domain, day: u32, fb: SessionFeedback) -> Session {
    let end = Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
    Session {
      id: format!("session-{day}"),
      domain,
      difficulty_level: Level::Beginner,
      start_time: end,
      end_time: Some(end),
      questions: vec![],
      answers: Default::default(),
      feedback: Some(fb),
    }
  }

  #[test]
  fn empty_domain_reports_not_available() {
    let p = domain_progress(&[], Domain::Teaching);
    assert_eq!(p.total_sessions, 0);
    assert_eq!(p.top_skill, "N/A");
    assert_eq!(p.improvement_area, "N/A");
  }

  #[test]
  fn averages_and_skill_ranking() {
    let fb = |c, t, m, q, p| SessionFeedback {
      confidence_score: c,
      technical_score: Some(t),
      communication_score: Some(m),
      code_quality_score: Some(q),
      problem_solving_score: p,
      overall_score: 70,
      ..Default::default()
    };
    let history = vec![
      finished(Domain::SoftwareDevelopment, 1, fb(60, 90, 70, 50, 71)),
      finished(Domain::SoftwareDevelopment, 2, fb(70, 80, 70, 51, 70)),
      finished(Domain::UxDesign, 3, fb(10, 10, 10, 10, 10)),
    ];
    let p = domain_progress(&history, Domain::SoftwareDevelopment);
    assert_eq!(p.total_sessions, 2);
    assert_eq!(p.entries[0].date, "2024-05-01");
    // (65 + 85 + 70 + 50.5 + 70.5) / 5 = 68.2
    assert_eq!(p.average_score, 68);
    assert_eq!(p.top_skill, "Technical Knowledge");
    assert_eq!(p.improvement_area, "Code Quality");
    assert_eq!(most_recent_domain(&history), Some(Domain::UxDesign));
    assert_eq!(domains_with_history(&history), vec![Domain::SoftwareDevelopment, Domain::UxDesign]);
  }

  #[test]
  fn missing_optional_scores_count_as_zero() {
    let graphic = SessionFeedback { confidence_score: 80, problem_solving_score: 80, overall_score: 80, ..Default::default() };
    let p = domain_progress(&[finished(Domain::GraphicDesign, 4, graphic)], Domain::GraphicDesign);
    assert_eq!(p.entries[0].technical_score, 0);
    assert_eq!(p.average_score, 32);
    // confidence is listed before problem solving, so it wins the tie
    assert_eq!(p.top_skill, "Confidence");
    assert_eq!(p.improvement_area, "Code Quality");
    assert_eq!(p.improvement, Improvement::default());
  }

  fn scored(c: u8, t: u8, overall: u8, management: Option<u8>) -> SessionFeedback {
    SessionFeedback {
      confidence_score: c,
      technical_score: Some(t),
      communication_score: Some(60),
      problem_solving_score: 60,
      management_score: management,
      overall_score: overall,
      ..Default::default()
    }
  }

  #[test]
  fn single_session_has_no_trend() {
    let p = domain_progress(&[finished(Domain::Teaching, 1, scored(50, 50, 50, None))], Domain::Teaching);
    assert_eq!(p.improvement, Improvement::default());
  }

  #[test]
  fn trend_compares_first_and_last_sessions() {
    let history = vec![
      finished(Domain::SoftwareDevelopment, 1, scored(50, 80, 40, None)),
      finished(Domain::SoftwareDevelopment, 2, scored(10, 10, 10, None)),
      finished(Domain::SoftwareDevelopment, 3, scored(75, 60, 40, None)),
    ];
    let p = domain_progress(&history, Domain::SoftwareDevelopment);
    assert_eq!(p.improvement.confidence, 50);
    assert_eq!(p.improvement.technical, -25);
    assert_eq!(p.improvement.overall, 0);
    assert_eq!(p.improvement.communication, 0);
    // code quality starts at zero
    assert_eq!(p.improvement.code_quality, 0);
    assert_eq!(p.category_averages.confidence, 45);
    assert_eq!(p.category_averages.technical, 50);
    assert_eq!(p.category_averages.code_quality, 0);
  }

  #[test]
  fn team_leadership_tracks_management() {
    let history = vec![
      finished(Domain::TeamLeadership, 1, scored(60, 60, 60, Some(40))),
      finished(Domain::TeamLeadership, 2, scored(60, 60, 60, Some(71))),
    ];
    let p = domain_progress(&history, Domain::TeamLeadership);
    assert_eq!(p.entries[0].management_score, 40);
    // (40 + 71) / 2 = 55.5
    assert_eq!(p.category_averages.management, 56);
    // (71 - 40) / 40 = 77.5%
    assert_eq!(p.improvement.management, 78);
  }
}

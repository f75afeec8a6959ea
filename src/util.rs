//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Drops a leading "Question N: " ordinal (case-insensitive), if present.
pub fn strip_question_prefix(question: &str) -> &str {
  let Some(head) = question.get(..9) else { return question };
  if !head.eq_ignore_ascii_case("question ") {
    return question;
  }
  let rest = &question[9..];
  let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
  if digits == 0 {
    return question;
  }
  rest[digits..].strip_prefix(": ").unwrap_or(question)
}

/// Lowercases and keeps only word characters and whitespace.
/// Used for topic matching against question text.
pub fn simplify(text: &str) -> String {
  text
    .to_lowercase()
    .chars()
    .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
    .collect()
}

/// Log-safe truncation for large strings.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_ordinal_prefix_only() {
    assert_eq!(strip_question_prefix("Question 3: What is a loop?"), "What is a loop?");
    assert_eq!(strip_question_prefix("question 10: Why?"), "Why?");
    assert_eq!(strip_question_prefix("Question: no number"), "Question: no number");
    assert_eq!(strip_question_prefix("What is a loop?"), "What is a loop?");
  }

  #[test]
  fn simplify_drops_punctuation() {
    assert_eq!(simplify("What's an If-Statement?"), "whats an ifstatement");
  }

  #[test]
  fn trunc_for_log_keeps_short_strings() {
    assert_eq!(trunc_for_log("short", 10), "short");
    assert_eq!(trunc_for_log("abcdefgh", 3), "abc… (8 bytes total)");
  }

  #[test]
  fn fill_template_replaces_all_keys() {
    assert_eq!(fill_template("{a} and {a} or {b}", &[("a", "x"), ("b", "y")]), "x and x or y");
  }
}

//! Keyword and phrase tables that drive answer scoring.
//!
//! Everything here is static data. `Lexicon::builtin()` compiles the regex
//! sets once at startup; the resulting value is shared through `Arc` and
//! handed to the scorer and the coach, never reached through a global.

use regex::Regex;

use crate::domain::Domain;

const DONT_KNOW_PATTERNS: &[&str] = &[
  r"i don'?t know",
  r"idk",
  r"no idea",
  r"not sure",
  r"can'?t answer",
  r"unsure",
  r"don'?t have (a|an|the) answer",
  r"^no$",
];

const CONFIDENT_PATTERNS: &[&str] = &[
  r"definitely",
  r"certainly",
  r"absolutely",
  r"without a doubt",
  r"I'm confident",
  r"I'm certain",
  r"I know",
  r"clearly",
  r"precisely",
  r"indeed",
];

const UNCERTAIN_PATTERNS: &[&str] = &[
  r"maybe",
  r"perhaps",
  r"I think",
  r"possibly",
  r"I guess",
  r"probably",
  r"not entirely sure",
  r"could be",
];

const TECH_SOFTWARE: &[&str] = &[
  "code", "algorithm", "function", "programming", "variable", "object", "class", "complexity",
  "data structure", "optimization", "API", "framework", "library", "database", "security",
  "architecture", "pattern", "testing", "deployment", "version control",
];
const TECH_AI: &[&str] = &[
  "model", "training", "neural", "machine learning", "dataset", "algorithm", "accuracy",
  "precision", "recall", "inference", "classification", "regression", "clustering", "overfitting",
  "bias", "CNN", "RNN", "transformer", "feature extraction", "deep learning",
];
const TECH_GRAPHIC: &[&str] = &[
  "design", "color", "layout", "typography", "visual", "composition", "user experience",
  "wireframe", "mockup", "prototype", "branding", "logo", "illustration", "UX", "UI", "responsive",
  "grid system", "style guide", "accessibility", "hierarchy",
];
const TECH_UX: &[&str] = &[
  "user research", "usability testing", "user journey", "personas", "information architecture",
  "wireframes", "prototyping", "interaction design", "user-centered", "accessibility", "user flows",
  "heuristic evaluation", "cognitive load", "mental models", "A/B testing", "card sorting",
  "user interviews", "empathy map", "UX strategy", "user needs",
];
const TECH_DATA: &[&str] = &[
  "data", "analysis", "statistics", "visualization", "pattern", "insight", "correlation",
  "hypothesis", "regression", "classification", "clustering", "predictive modeling", "ETL",
  "data cleaning", "outliers", "big data", "SQL", "dashboard", "A/B testing", "metrics",
];
const TECH_FREELANCING: &[&str] = &[
  "client", "project", "contract", "deliverable", "deadline", "scope", "proposal", "invoice",
  "timeframe", "milestone", "estimation", "communication", "portfolio", "networking", "pricing",
  "branding", "marketing", "time management", "legal", "freelancing platform",
];
const TECH_TEACHING: &[&str] = &[
  "student", "learning", "curriculum", "education", "assessment", "classroom", "pedagogy",
  "engagement", "differentiation", "outcomes", "evaluation", "feedback", "objectives",
  "lesson plan", "methodology", "instruction", "strategy", "theory", "education technology",
  "inclusive learning",
];
const TECH_PRODUCT: &[&str] = &[
  "product", "feature", "user", "roadmap", "stakeholder", "requirement", "backlog", "sprint",
  "metrics", "adoption", "MVP", "customer", "prioritization", "market research", "user testing",
  "analytics", "KPI", "value proposition", "market fit", "user story",
];
const TECH_LEADERSHIP: &[&str] = &[
  "team", "leadership", "management", "delegate", "motivation", "strategy", "performance",
  "feedback", "development", "collaboration", "mentoring", "coaching", "conflict resolution",
  "onboarding", "goals", "recognition", "accountability", "decision-making", "negotiation",
  "retention",
];
const TECH_DEFAULT: &[&str] = &[
  "experience", "skill", "project", "work", "learn", "career", "growth", "challenge",
  "opportunity", "strength", "weakness", "improvement", "achievement", "success", "failure",
  "learning", "adaptation", "industry", "professional", "role",
];

const MISCONCEPTIONS_SOFTWARE: &[&str] = &[
  "HTML is a programming language",
  "Java and JavaScript are the same",
  "more CPU cores always means faster code",
  "the cloud is just someone else's computer",
  "web design is the same as web development",
];
const MISCONCEPTIONS_AI: &[&str] = &[
  "AI can solve any problem",
  "neural networks work like the human brain",
  "more data always means better models",
  "AI and ML are the same thing",
  "correlation implies causation",
];
const MISCONCEPTIONS_GRAPHIC: &[&str] = &[
  "good design is purely subjective",
  "design is just making things look pretty",
  "more colors mean better design",
  "comic sans is a professional font",
  "all designs should be minimalist",
];
const MISCONCEPTIONS_UX: &[&str] = &[
  "UX is the same as UI",
  "UX design is just about making things look good",
  "users always know what they want",
  "UX is only about usability testing",
  "following UX best practices guarantees a successful product",
];
const MISCONCEPTIONS_DATA: &[&str] = &[
  "data science is just statistics",
  "bigger datasets are always better",
  "correlation implies causation",
  "you need big data for machine learning",
  "data cleaning is not important",
];
const MISCONCEPTIONS_DEFAULT: &[&str] = &[
  "qualifications matter more than skills",
  "hard skills are more important than soft skills",
  "networking isn't important",
  "success is purely merit-based",
  "failure means you're not qualified",
];

const CODE_QUALITY_INDICATORS: &[&str] = &[
  "clean code", "refactor", "maintainable", "readable", "documentation",
  "testing", "unit test", "integration test", "version control", "git",
  "review", "standards", "best practice", "pattern", "architecture",
  "reusability", "modularity", "separation of concerns", "SOLID", "DRY principle",
  "continuous integration", "code review", "linting", "type safety", "error handling",
];

const PROBLEM_SOLVING_INDICATORS: &[&str] = &[
  "problem", "solution", "approach", "method", "process",
  "debug", "troubleshoot", "identify", "analyze", "evaluate",
  "optimize", "improve", "efficiency", "complexity", "tradeoff",
  "root cause", "systematic", "step-by-step", "investigation", "reasoning",
  "logic", "critical thinking", "alternative solutions", "edge cases", "constraints",
];

const VERIFY_SOFTWARE: &[&str] = &[
  "code", "programming", "algorithm", "function", "variable", "class", "object", "framework", "API",
];
const VERIFY_AI: &[&str] = &[
  "model", "data", "training", "algorithm", "machine learning", "neural network", "prediction",
  "feature",
];
const VERIFY_UX: &[&str] = &[
  "user", "design", "interface", "experience", "testing", "prototype", "wireframe", "research",
];
const VERIFY_DEFAULT: &[&str] = &[
  "process", "approach", "strategy", "experience", "skill", "technique", "method",
];

const QUESTION_STOPWORDS: &[&str] = &[
  "what", "when", "where", "which", "their", "there", "would", "should", "could", "about",
];

/// Compiled phrase sets plus the static keyword tables.
#[derive(Debug)]
pub struct Lexicon {
  dont_know: Vec<Regex>,
  confident: Vec<Regex>,
  uncertain: Vec<Regex>,
}

impl Lexicon {
  pub fn builtin() -> Result<Self, regex::Error> {
    Ok(Self {
      dont_know: compile_all(DONT_KNOW_PATTERNS)?,
      confident: compile_all(CONFIDENT_PATTERNS)?,
      uncertain: compile_all(UNCERTAIN_PATTERNS)?,
    })
  }

  /// True for "I don't know", "no idea", a bare "no" and similar non-answers.
  pub fn is_dont_know(&self, answer: &str) -> bool {
    let trimmed = answer.trim();
    self.dont_know.iter().any(|re| re.is_match(trimmed))
  }

  pub fn confident_markers(&self, answer: &str) -> usize {
    self.confident.iter().filter(|re| re.is_match(answer)).count()
  }

  pub fn uncertain_markers(&self, answer: &str) -> usize {
    self.uncertain.iter().filter(|re| re.is_match(answer)).count()
  }

  pub fn technical_keywords(&self, domain: Domain) -> &'static [&'static str] {
    match domain {
      Domain::SoftwareDevelopment => TECH_SOFTWARE,
      Domain::AiEngineering => TECH_AI,
      Domain::GraphicDesign => TECH_GRAPHIC,
      Domain::UxDesign => TECH_UX,
      Domain::DataScience => TECH_DATA,
      Domain::Freelancing => TECH_FREELANCING,
      Domain::Teaching => TECH_TEACHING,
      Domain::ProductManagement => TECH_PRODUCT,
      Domain::TeamLeadership => TECH_LEADERSHIP,
      Domain::Default => TECH_DEFAULT,
    }
  }

  pub fn misconceptions(&self, domain: Domain) -> &'static [&'static str] {
    match domain {
      Domain::SoftwareDevelopment => MISCONCEPTIONS_SOFTWARE,
      Domain::AiEngineering => MISCONCEPTIONS_AI,
      Domain::GraphicDesign => MISCONCEPTIONS_GRAPHIC,
      Domain::UxDesign => MISCONCEPTIONS_UX,
      Domain::DataScience => MISCONCEPTIONS_DATA,
      Domain::Freelancing
      | Domain::Teaching
      | Domain::ProductManagement
      | Domain::TeamLeadership
      | Domain::Default => MISCONCEPTIONS_DEFAULT,
    }
  }

  pub fn code_quality_indicators(&self) -> &'static [&'static str] {
    CODE_QUALITY_INDICATORS
  }

  pub fn problem_solving_indicators(&self) -> &'static [&'static str] {
    PROBLEM_SOLVING_INDICATORS
  }

  /// Keywords the verification step looks for.
  pub fn verification_keywords(&self, domain: Domain) -> &'static [&'static str] {
    match domain {
      Domain::SoftwareDevelopment => VERIFY_SOFTWARE,
      Domain::AiEngineering => VERIFY_AI,
      Domain::UxDesign => VERIFY_UX,
      _ => VERIFY_DEFAULT,
    }
  }

  pub fn is_question_stopword(&self, word: &str) -> bool {
    QUESTION_STOPWORDS.contains(&word)
  }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
  patterns
    .iter()
    .map(|p| Regex::new(&format!("(?i){p}")))
    .collect()
}

/// Number of `terms` that occur in `text`, case-insensitively. Each term counts once.
pub fn count_terms(terms: &[&str], text: &str) -> usize {
  let haystack = text.to_lowercase();
  terms
    .iter()
    .filter(|term| haystack.contains(&term.to_lowercase()))
    .count()
}

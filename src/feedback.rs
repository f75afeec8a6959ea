//! Coach text shown after each answer.
//!
//! The tier is decided once from the answer and its scores; each tier has its
//! own template. Canonical answers, resources and tips are static tables keyed
//! by domain (and level where it applies). Randomness is only used to pick
//! which missing concepts to mention, and the RNG is passed in.

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::domain::{AnswerScores, Domain, Level};
use crate::lexicon::Lexicon;
use crate::util::{simplify, strip_question_prefix};

/// Shown instead of coaching when the evaluation pipeline fails.
pub const EVALUATION_APOLOGY: &str =
  "I'm having trouble evaluating your answer at the moment. Please try again or rephrase your response.";

const MAX_TYPING_DELAY_MS: u64 = 1500;
const TYPING_MS_PER_CHAR: u64 = 10;
const MISSING_KEYWORD_ODDS: f64 = 0.4;
const MAX_MISSING_KEYWORDS: usize = 3;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTier {
  DontKnow,
  Poor,
  NeedsImprovement,
  Good,
  Excellent,
}

impl ResponseTier {
  pub fn classify(lexicon: &Lexicon, answer: &str, overall: u8) -> Self {
    if answer.trim().chars().count() < 20 || lexicon.is_dont_know(answer) {
      ResponseTier::DontKnow
    } else if overall < 60 {
      ResponseTier::Poor
    } else if overall <= 80 {
      ResponseTier::NeedsImprovement
    } else if overall < 90 {
      ResponseTier::Good
    } else {
      ResponseTier::Excellent
    }
  }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoachResponse {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tier: Option<ResponseTier>,
  pub text: String,
  /// Suggested pacing for clients that animate the reply.
  pub typing_delay_ms: u64,
}

impl CoachResponse {
  fn new(tier: Option<ResponseTier>, text: String) -> Self {
    let typing_delay_ms = (text.chars().count() as u64 * TYPING_MS_PER_CHAR).min(MAX_TYPING_DELAY_MS);
    Self { tier, text, typing_delay_ms }
  }

  pub fn apology() -> Self {
    Self::new(None, EVALUATION_APOLOGY.to_string())
  }
}

/// Builds the coach reply for one scored answer.
pub fn coach_response<R: Rng + ?Sized>(
  lexicon: &Lexicon,
  answer: &str,
  scores: &AnswerScores,
  domain: Domain,
  question: &str,
  level: Level,
  rng: &mut R,
) -> CoachResponse {
  let tier = ResponseTier::classify(lexicon, answer, scores.overall_score);
  let question = strip_question_prefix(question);
  let text = match tier {
    ResponseTier::DontKnow => dont_know_text(domain, question, level),
    ResponseTier::Poor => poor_text(answer, domain, question, level, rng),
    ResponseTier::NeedsImprovement => needs_improvement_text(scores, domain, level),
    ResponseTier::Good | ResponseTier::Excellent => good_text(scores, domain, tier),
  };
  CoachResponse::new(Some(tier), text)
}

fn dont_know_text(domain: Domain, question: &str, level: Level) -> String {
  let mut out = String::from("I noticed your answer was quite brief. Let me help you understand this topic better:\n\n");
  out.push_str(&format!("📌 **Correct Answer:**\n{}\n\n", canonical_answer(question, domain)));
  let label = domain.label();
  match level {
    Level::Beginner => out.push_str(&format!(
      "💡 **Learning Tip:**\nThis is a fundamental concept in {label}. Understanding this will help you build a solid foundation for more advanced topics.\n\n"
    )),
    Level::Intermediate => out.push_str(
      "💡 **Interview Tip:**\nAt the intermediate level, interviewers want to see not just your understanding of the concept, but how you can apply it to real-world scenarios. Try to include examples from your experience.\n\n",
    ),
    Level::Expert => out.push_str(&format!(
      "💡 **Expert Insight:**\nAt the expert level, you should be able to discuss nuances, trade-offs, and implementation details. Consider how this concept connects to other aspects of {label}.\n\n"
    )),
  }
  out.push_str(&format!("🔗 **Resources:**\n{}", resources(domain, level)));
  out
}

fn poor_text<R: Rng + ?Sized>(answer: &str, domain: Domain, question: &str, level: Level, rng: &mut R) -> String {
  let correct = canonical_answer(question, domain);
  let mut out = String::from("Your answer covers some points, but has important gaps. Let me provide a more complete explanation:\n\n");
  out.push_str(&format!("📌 **Complete Answer:**\n{correct}\n\n"));
  out.push_str("🔍 **What Your Answer Missed:**\n");

  let missing = missing_keywords(&correct, answer, rng);
  if missing.is_empty() {
    out.push_str("Your answer lacked detail and specific examples.\n\n");
  } else {
    out.push_str(&format!("Your answer didn't mention concepts like: {}.\n\n", missing.join(", ")));
  }

  let res = resources(domain, level);
  out.push_str(&match level {
    Level::Beginner => format!(
      "💡 **Improvement Tip:**\nFocus on building your basic understanding. Consider studying {res} to strengthen your foundation."
    ),
    Level::Intermediate => format!(
      "💡 **Improvement Tip:**\nAt your level, try to connect concepts to practical implementations. {res} might help deepen your knowledge."
    ),
    Level::Expert => format!(
      "💡 **Improvement Tip:**\nAs an expert, you should articulate the nuances and edge cases. Consider reviewing {res} to polish your understanding."
    ),
  });
  out
}

/// Unique words of five or more word characters from `reference` that the
/// answer never mentions, each kept with probability 0.4, at most three.
pub fn missing_keywords<R: Rng + ?Sized>(reference: &str, answer: &str, rng: &mut R) -> Vec<String> {
  let answer = answer.to_lowercase();
  let reference = reference.to_lowercase();
  let mut seen = HashSet::new();
  reference
    .split(|c: char| !(c.is_alphanumeric() || c == '_'))
    .filter(|w| w.chars().count() >= 5)
    .filter(|w| seen.insert(*w))
    .filter(|w| !answer.contains(*w))
    .filter(|_| rng.gen_bool(MISSING_KEYWORD_ODDS))
    .take(MAX_MISSING_KEYWORDS)
    .map(str::to_string)
    .collect()
}

fn needs_improvement_text(scores: &AnswerScores, domain: Domain, level: Level) -> String {
  let mut strengths = Vec::new();
  if scores.confidence_score > 70 { strengths.push("confident delivery"); }
  if scores.technical_score > 70 { strengths.push("good technical knowledge"); }
  if scores.communication_score > 70 { strengths.push("clear communication"); }
  if scores.problem_solving_score > 70 { strengths.push("effective problem-solving"); }
  if scores.code_quality_score > 70 { strengths.push("attention to quality"); }
  let strengths = if strengths.is_empty() { "some good understanding".to_string() } else { strengths.join(", ") };

  format!(
    "✅ **Score: {}/100**\n\n💪 **Strengths:** Your answer shows {}.\n\n🔍 **Areas for Improvement:** {}\n\n💡 **Interview Tip:** {}",
    scores.overall_score,
    strengths,
    domain_coaching(scores, domain),
    tip(domain, level),
  )
}

/// Advice aimed at the weakest dimension for the domain.
fn domain_coaching(s: &AnswerScores, domain: Domain) -> &'static str {
  match domain {
    Domain::SoftwareDevelopment if s.technical_score < 70 => "Your technical terminology could be more precise. Try incorporating more specific programming concepts and principles.",
    Domain::SoftwareDevelopment if s.code_quality_score < 70 => "Consider adding more details about code quality aspects like maintainability, performance, and error handling.",
    Domain::SoftwareDevelopment => "You have a good foundation, but could add more specific examples from your coding experience.",
    Domain::AiEngineering if s.technical_score < 70 => "Try incorporating more AI-specific concepts like model evaluation metrics, feature engineering, or neural network architectures.",
    Domain::AiEngineering if s.problem_solving_score < 70 => "Consider discussing how you approach model selection, hyperparameter tuning, and performance evaluation.",
    Domain::AiEngineering => "Your answer is on the right track, but could benefit from more technical depth around AI algorithms and implementations.",
    Domain::GraphicDesign if s.problem_solving_score < 70 => "Try framing your design work more as solutions to specific client problems or user needs.",
    Domain::GraphicDesign => "Your creative approach is good, but could be explained more methodically in terms of your design process.",
    Domain::UxDesign if s.problem_solving_score < 70 => "Try articulating how your design decisions address specific user pain points and business goals.",
    Domain::UxDesign if s.communication_score < 70 => "Consider explaining your user research methods and findings more thoroughly to strengthen your answer.",
    Domain::UxDesign => "Your UX approach is good, but could demonstrate more user empathy and testing insights.",
    Domain::TeamLeadership if matches!(s.management_score, Some(m) if m > 0 && m < 70) => "Add more concrete examples of specific leadership techniques you've used and their outcomes.",
    Domain::TeamLeadership => "Your leadership approach is sound, but could benefit from more specific strategies for different team scenarios.",
    Domain::ProductManagement if s.problem_solving_score < 70 => "Elaborate more on how you balance user needs with business requirements in your product decisions.",
    Domain::ProductManagement => "Good product thinking, but consider adding more about metrics and stakeholder communication.",
    Domain::Freelancing if s.communication_score < 70 => "Consider adding more about client communication strategies and expectation management.",
    Domain::Freelancing => "Your freelancing approach is good, but could include more business strategy details.",
    Domain::Teaching | Domain::DataScience | Domain::Default => "Your answer contains good points, but could be more comprehensive with specific examples.",
  }
}

fn good_text(scores: &AnswerScores, domain: Domain, tier: ResponseTier) -> String {
  let headline = if tier == ResponseTier::Excellent {
    "Excellent answer! You've demonstrated strong knowledge and communication skills."
  } else {
    "Very good answer! You've shown solid understanding of the topic."
  };

  let mut strengths = Vec::new();
  if scores.technical_score >= 80 { strengths.push("Your technical knowledge is strong."); }
  if scores.communication_score >= 80 { strengths.push("You communicate concepts clearly."); }
  if scores.problem_solving_score >= 80 { strengths.push("Your problem-solving approach is effective."); }
  if scores.confidence_score >= 80 { strengths.push("You present your thoughts confidently."); }

  let advanced = match domain {
    Domain::SoftwareDevelopment => "To further strengthen your answers, consider discussing system design implications or performance considerations.",
    Domain::AiEngineering => "For even stronger answers, you could discuss model interpretability and ethical considerations in AI deployment.",
    Domain::GraphicDesign | Domain::UxDesign => "To elevate your answers further, discuss how you measure the impact and effectiveness of your design decisions.",
    Domain::TeamLeadership => "For even more impact, include how you adapt your leadership style to different team member personalities and situations.",
    Domain::ProductManagement => "To take your answers to the next level, discuss how you handle product decisions when data is limited or conflicting.",
    _ => "To further improve, consider adding more specific examples from your experience.",
  };

  format!(
    "✅ **Score: {}/100**\n\n🏆 **Feedback:** {}\n\n💪 **Strengths:** {}\n\n💡 **Advanced Tip:** {}",
    scores.overall_score,
    headline,
    strengths.join(" "),
    advanced,
  )
}

/// Reference answer for a question. Domain topics are tried in table order;
/// the first key contained in the normalized question wins.
pub fn canonical_answer(question: &str, domain: Domain) -> String {
  let simplified = simplify(question);
  if let Some((_, answer)) = canonical_table(domain).iter().find(|(key, _)| simplified.contains(key)) {
    return (*answer).to_string();
  }

  let words = domain.words();
  let has = |needle: &str| simplified.contains(needle);
  if has("experience") {
    format!("When discussing your experience in {words}, focus on specific projects, challenges overcome, and measurable results. Include both technical and soft skills you've developed, and how they're relevant to the role.")
  } else if has("strengths") || has("skills") {
    format!("When discussing strengths in {words}, focus on specific technical skills, soft skills like communication or problem-solving, and domain knowledge. Use concrete examples to illustrate these strengths in action.")
  } else if has("trends") || has("updated") {
    format!("Staying updated in {words} involves following industry blogs, participating in professional communities, attending conferences, taking online courses, and networking with peers. Mention specific resources you use and how you apply new knowledge.")
  } else if has("challenge") || has("problem") {
    format!("When discussing challenges in {words}, use the STAR method (Situation, Task, Action, Result). Clearly explain the context, your specific role, the actions you took, and quantifiable results. Focus on what you learned and how it improved your skills.")
  } else if has("collaborate") || has("team") {
    format!("Effective collaboration in {words} involves clear communication, active listening, respecting diverse perspectives, setting shared goals, and leveraging team members' strengths. Provide specific examples of successful collaboration and your contribution to team success.")
  } else if has("approach") || has("process") {
    format!("When describing your approach to {words}, outline your methodology step-by-step, explain how you gather requirements, handle constraints, validate solutions, and iterate based on feedback. Use a specific project example to illustrate your process.")
  } else {
    format!("This question is asking about your knowledge, experience, or approach in {words}. Provide specific examples from your experience, focus on measurable results, and explain your reasoning clearly.")
  }
}

fn canonical_table(domain: Domain) -> &'static [(&'static str, &'static str)] {
  match domain {
    Domain::SoftwareDevelopment => &[
      ("variable", "A variable is a named storage location in memory that contains data which can be modified during program execution. Variables have a name, a type, and a value."),
      ("function", "A function is a reusable block of code designed to perform a specific task. It can take inputs (parameters), process them, and return an output. Functions help organize code and promote reusability."),
      ("loop", "A loop is a control structure that allows code to be executed repeatedly based on a given condition. Common types include for loops, while loops, and do-while loops."),
      ("array", "An array is a data structure that stores a collection of elements (values or variables), each identified by an index or a key."),
      ("if statement", "An if statement is a conditional control structure that executes a block of code only if a specified condition evaluates to true."),
    ],
    Domain::TeamLeadership => &[
      ("conflicts", "Effective conflict resolution involves addressing issues directly, listening to all perspectives, focusing on facts rather than personalities, finding common ground, and working toward mutually beneficial solutions. It's important to address conflicts early before they escalate."),
      ("delegating", "Effective delegation involves matching tasks to team members' skills, providing clear instructions and expectations, granting appropriate authority, offering support, and following up without micromanaging."),
      ("motivate", "To motivate struggling team members, identify the root causes of performance issues, provide specific feedback, establish clear expectations, offer necessary resources and support, recognize improvements, and develop personalized improvement plans."),
      ("goals", "Setting effective team goals involves making them SMART (Specific, Measurable, Achievable, Relevant, Time-bound), involving team members in the goal-setting process, tracking progress regularly, adjusting as needed, and celebrating achievements."),
      ("innovation", "Fostering innovation involves creating psychological safety, encouraging idea sharing, allocating time for experimentation, embracing failures as learning opportunities, and recognizing innovative efforts regardless of outcomes."),
    ],
    Domain::AiEngineering => &[
      ("machine learning", "Machine learning is a subset of artificial intelligence that uses algorithms and statistical models to enable computers to perform tasks without explicit instructions, instead relying on patterns and inference. Key types include supervised, unsupervised, and reinforcement learning."),
      ("supervised learning", "Supervised learning involves training models on labeled data, where the algorithm learns to map inputs to known outputs. Applications include classification (predicting categories) and regression (predicting continuous values)."),
      ("unsupervised learning", "Unsupervised learning identifies patterns in unlabeled data. Common techniques include clustering (grouping similar data points) and dimensionality reduction (simplifying data while retaining important information)."),
      ("model evaluation", "Effective model evaluation combines metrics (accuracy, precision, recall, F1-score for classification; RMSE, MAE for regression), cross-validation techniques, and consideration of business requirements and ethical implications."),
      ("imbalanced datasets", "Techniques for handling imbalanced datasets include resampling (oversampling minority classes or undersampling majority classes), synthetic data generation (SMOTE), algorithm-level approaches (cost-sensitive learning), and ensemble methods."),
    ],
    Domain::GraphicDesign => &[
      ("design process", "An effective design process typically includes discovery (understanding client needs), research (market analysis, competitor research), ideation (sketching, brainstorming), prototyping (creating mockups), feedback (client and user reviews), and refinement (iterative improvements)."),
      ("design trends", "Staying current with design trends involves following design blogs and publications, participating in online communities, attending industry events, analyzing competitor work, and experimenting with new techniques while maintaining a critical perspective on which trends serve your specific project goals."),
      ("rebrand", "A successful rebrand strategy involves thorough research of the company's history and values, stakeholder interviews, competitive analysis, preserving recognizable elements while modernizing others, ensuring cohesive implementation across all touchpoints, and developing comprehensive brand guidelines."),
      ("client feedback", "Handling client feedback effectively requires active listening, separating personal attachment from professional assessment, asking clarifying questions, presenting design decisions with strategic rationale, offering solutions rather than just accommodations, and maintaining a collaborative rather than adversarial relationship."),
      ("accessible designs", "Creating accessible designs involves following WCAG guidelines, ensuring sufficient color contrast, providing text alternatives for non-text content, designing for keyboard navigation, using clear typography and layout, considering diverse user needs, and testing with assistive technologies."),
    ],
    Domain::UxDesign => &[
      ("ux and ui", "UX (User Experience) design focuses on the overall feel and usability of a product, addressing user needs, pain points, and journey. UI (User Interface) design is more concerned with the visual elements users interact with. UX is about how it works; UI is about how it looks."),
      ("user research", "Effective user research involves multiple methods including interviews, surveys, usability testing, card sorting, and analytics review. It should be conducted throughout the product lifecycle to validate assumptions, identify opportunities, and measure success."),
      ("research insights", "Translating research insights into design decisions requires organizing findings into patterns, creating user personas and journey maps, prioritizing pain points, ideating solutions that directly address identified problems, and continuously validating through testing."),
      ("wireframes", "Wireframes are simplified visual representations of a digital interface that outline structure, layout, information hierarchy, and core functionality without detailed visual design. They help stakeholders focus on usability and content organization before aesthetic decisions."),
      ("user personas", "User personas are fictional but research-based representations of your target users that include demographics, behaviors, goals, pain points, and motivations. They help design teams build empathy, focus on user needs, and make user-centered decisions."),
    ],
    Domain::ProductManagement => &[
      ("prioritize features", "Feature prioritization should combine user value (addressing pain points), business value (revenue potential, strategic alignment), and implementation complexity. Frameworks like RICE (Reach, Impact, Confidence, Effort) or the Kano model provide structured approaches to prioritization."),
      ("user research", "Product managers should conduct continuous user research using methods like interviews, surveys, usability testing, and analytics. Research goals should align with product lifecycle stages, from problem validation to concept testing to monitoring post-launch performance."),
      ("feature success", "Measuring feature success requires defining clear success metrics before launch that align with both user and business goals. These might include engagement metrics, conversion improvements, retention impact, or efficiency metrics, compared against pre-defined baselines."),
      ("stakeholders", "Effective stakeholder communication involves tailoring messages to different audiences (executives, engineering, marketing), using data to support decisions, maintaining transparency about trade-offs, providing regular updates, and cultivating relationships built on trust and mutual respect."),
      ("tradeoff", "Making product trade-offs requires a clear understanding of user needs, business objectives, and technical constraints. Document alternatives considered, evaluate options against strategic goals, involve key stakeholders, communicate decisions transparently, and monitor outcomes to validate choices."),
    ],
    Domain::Freelancing => &[
      ("rates", "Setting appropriate freelance rates involves calculating your desired annual income, billable hours, overhead costs, and market positioning. Consider value-based pricing for projects where your expertise delivers significant client value, and regularly review and adjust rates as your skills and market position evolve."),
      ("finding clients", "A sustainable client acquisition strategy combines online presence (portfolio, social media), networking (industry events, professional groups), referrals from satisfied clients, targeted outreach to ideal clients, content marketing to demonstrate expertise, and selective use of freelance platforms."),
      ("scope creep", "Managing scope creep involves defining clear project boundaries in contracts, documenting all requirements before starting, establishing a formal change request process, communicating how changes impact timeline and budget, and maintaining open communication throughout the project."),
      ("tools", "Essential freelance business tools include project management software, time tracking, invoicing and accounting systems, contracts and proposal templates, communication platforms, portfolio presentation tools, and backup/security solutions. The specific tools should fit your workflow and client expectations."),
      ("legal aspects", "Handling legal aspects of freelancing requires clear contracts specifying deliverables, payment terms, intellectual property rights, and liability limitations. Consider forming an appropriate business entity, maintaining proper insurance, understanding tax obligations, and seeking professional legal advice for complex situations."),
    ],
    Domain::Teaching => &[
      ("teaching methods", "Effective teaching methods should be varied to accommodate different learning styles (visual, auditory, kinesthetic). Use a mix of lectures, discussions, hands-on activities, and multimedia resources to engage all students."),
      ("assessment", "Good assessment strategies include formative (ongoing) and summative (final) assessments, use rubrics for consistent grading, provide timely specific feedback, and measure both knowledge acquisition and practical application."),
      ("technology", "Educational technology should enhance, not replace, good pedagogy. Choose tools that address specific learning objectives, ensure accessibility for all students, and provide training and support for both students and educators."),
      ("classroom management", "Effective classroom management establishes clear expectations, creates routines, uses positive reinforcement, addresses issues promptly and privately, and creates an environment where students feel safe to participate and make mistakes."),
      ("curriculum design", "Strong curriculum design aligns with educational standards, incorporates backward design (starting with desired outcomes), includes diverse perspectives and materials, addresses different levels of complexity, and makes real-world connections."),
    ],
    Domain::DataScience | Domain::Default => &[],
  }
}

fn resources(domain: Domain, level: Level) -> &'static str {
  use Level::*;
  match (domain, level) {
    (Domain::SoftwareDevelopment, Beginner) => "basic tutorials on data structures and algorithms",
    (Domain::SoftwareDevelopment, Intermediate) => "design patterns and system architecture resources",
    (Domain::SoftwareDevelopment, Expert) => "advanced system design and performance optimization literature",
    (Domain::AiEngineering, Beginner) => "introductory courses on machine learning fundamentals",
    (Domain::AiEngineering, Intermediate) => "practical ML deployment and optimization guides",
    (Domain::AiEngineering, Expert) => "research papers on cutting-edge AI techniques",
    (Domain::GraphicDesign, Beginner) => "foundational design principle tutorials",
    (Domain::GraphicDesign, Intermediate) => "case studies on successful design projects",
    (Domain::GraphicDesign, Expert) => "advanced resources on design systems and accessibility",
    (Domain::UxDesign, Beginner) => "introductory user research and usability testing guides",
    (Domain::UxDesign, Intermediate) => "interaction design patterns and user journey mapping resources",
    (Domain::UxDesign, Expert) => "advanced UX strategy and service design frameworks",
    (Domain::TeamLeadership, Beginner) => "fundamental leadership and team building guides",
    (Domain::TeamLeadership, Intermediate) => "conflict resolution and performance management resources",
    (Domain::TeamLeadership, Expert) => "strategic leadership and organizational development materials",
    (Domain::ProductManagement, Beginner) => "introductory product management frameworks",
    (Domain::ProductManagement, Intermediate) => "user research and product metrics guides",
    (Domain::ProductManagement, Expert) => "product strategy and innovation management resources",
    (Domain::Freelancing, Beginner) => "beginner guides to freelance business setup",
    (Domain::Freelancing, Intermediate) => "client management and project scoping resources",
    (Domain::Freelancing, Expert) => "advanced freelance business scaling strategies",
    _ => "relevant learning resources for your field",
  }
}

fn tip(domain: Domain, level: Level) -> &'static str {
  use Level::*;
  match (domain, level) {
    (Domain::SoftwareDevelopment, Beginner) => "Try to include at least one specific code example or algorithm when discussing programming concepts.",
    (Domain::SoftwareDevelopment, Intermediate) => "Discuss trade-offs between different approaches and mention best practices relevant to the technology.",
    (Domain::SoftwareDevelopment, Expert) => "Include system design considerations, scalability concerns, and performance optimization strategies.",
    (Domain::AiEngineering, Beginner) => "Make sure to explain the fundamental machine learning concepts clearly with simple examples.",
    (Domain::AiEngineering, Intermediate) => "Include details about model selection, evaluation metrics, and data preprocessing steps.",
    (Domain::AiEngineering, Expert) => "Discuss state-of-the-art approaches, model limitations, and ethical considerations in AI systems.",
    (Domain::GraphicDesign, Beginner) => "Describe your design process step-by-step and mention specific design principles you apply.",
    (Domain::GraphicDesign, Intermediate) => "Explain how your design decisions address specific user needs and business goals.",
    (Domain::GraphicDesign, Expert) => "Discuss how you approach complex design systems and measure the effectiveness of your designs.",
    (Domain::UxDesign, Beginner) => "Explain your user research methods and how you translate findings into design decisions.",
    (Domain::UxDesign, Intermediate) => "Describe how you test and iterate on your designs based on user feedback and quantitative data.",
    (Domain::UxDesign, Expert) => "Discuss how you balance business objectives with user needs and measure the success of your UX solutions.",
    (Domain::TeamLeadership, Beginner) => "Describe specific team communication and motivation techniques you use.",
    (Domain::TeamLeadership, Intermediate) => "Include examples of how you've handled challenging team situations and developed team members.",
    (Domain::TeamLeadership, Expert) => "Explain your strategic leadership approach and how you align team performance with organizational goals.",
    (Domain::ProductManagement, Beginner) => "Include specific frameworks you use for product decisions and prioritization.",
    (Domain::ProductManagement, Intermediate) => "Describe how you collect and act on user feedback and measure product success.",
    (Domain::ProductManagement, Expert) => "Explain your approach to product strategy, innovation management, and cross-functional leadership.",
    _ => "Provide specific examples from your experience to strengthen your answer.",
  }
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;

  fn lexicon() -> Lexicon {
    Lexicon::builtin().unwrap()
  }

  fn scores(overall: u8, dim: u8) -> AnswerScores {
    AnswerScores {
      confidence_score: dim,
      technical_score: dim,
      communication_score: dim,
      code_quality_score: dim,
      problem_solving_score: dim,
      management_score: None,
      overall_score: overall,
    }
  }

  #[test]
  fn tiers_follow_score_bands() {
    let lx = lexicon();
    let long = "A loop repeats a block of code while its condition holds.";
    assert_eq!(ResponseTier::classify(&lx, "short", 95), ResponseTier::DontKnow);
    assert_eq!(ResponseTier::classify(&lx, "I don't know, honestly I never used loops", 95), ResponseTier::DontKnow);
    assert_eq!(ResponseTier::classify(&lx, long, 59), ResponseTier::Poor);
    assert_eq!(ResponseTier::classify(&lx, long, 60), ResponseTier::NeedsImprovement);
    assert_eq!(ResponseTier::classify(&lx, long, 80), ResponseTier::NeedsImprovement);
    assert_eq!(ResponseTier::classify(&lx, long, 81), ResponseTier::Good);
    assert_eq!(ResponseTier::classify(&lx, long, 90), ResponseTier::Excellent);
  }

  #[test]
  fn dont_know_reply_teaches_the_canonical_answer() {
    let mut rng = StdRng::seed_from_u64(7);
    let r = coach_response(
      &lexicon(),
      "I don't know",
      &AnswerScores::dont_know(),
      Domain::SoftwareDevelopment,
      "Question 1: What is a variable?",
      Level::Beginner,
      &mut rng,
    );
    assert_eq!(r.tier, Some(ResponseTier::DontKnow));
    assert!(r.text.contains("A variable is a named storage location"));
    assert!(r.text.contains("fundamental concept in Software Development"));
    assert!(r.text.contains("basic tutorials on data structures and algorithms"));
    assert_eq!(r.typing_delay_ms, 1500);
  }

  #[test]
  fn needs_improvement_lists_strengths_and_coaching() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut s = scores(72, 75);
    s.technical_score = 65;
    let r = coach_response(
      &lexicon(),
      "A variable holds a value that the program can change later on.",
      &s,
      Domain::SoftwareDevelopment,
      "Question 2: What is a variable?",
      Level::Intermediate,
      &mut rng,
    );
    assert!(r.text.starts_with("✅ **Score: 72/100**"));
    assert!(r.text.contains("Your answer shows confident delivery, clear communication"));
    assert!(r.text.contains("technical terminology could be more precise"));
    assert!(r.text.contains("Discuss trade-offs between different approaches"));
  }

  #[test]
  fn good_and_excellent_use_domain_advanced_tip() {
    let mut rng = StdRng::seed_from_u64(1);
    let answer = "I align the team on goals and adapt to each person over time.";
    let good = coach_response(&lexicon(), answer, &scores(85, 82), Domain::TeamLeadership, "q", Level::Expert, &mut rng);
    assert_eq!(good.tier, Some(ResponseTier::Good));
    assert!(good.text.contains("Very good answer!"));
    assert!(good.text.contains("adapt your leadership style"));
    let great = coach_response(&lexicon(), answer, &scores(93, 60), Domain::Teaching, "q", Level::Expert, &mut rng);
    assert!(great.text.contains("Excellent answer!"));
    assert!(great.text.contains("more specific examples from your experience"));
  }

  #[test]
  fn teaching_falls_back_to_generic_resources_and_tips() {
    assert_eq!(resources(Domain::Teaching, Level::Beginner), "relevant learning resources for your field");
    assert_eq!(tip(Domain::Teaching, Level::Expert), "Provide specific examples from your experience to strengthen your answer.");
  }

  #[test]
  fn canonical_answer_prefers_domain_topics_then_generic() {
    assert!(canonical_answer("How do you handle scope creep?", Domain::Freelancing).starts_with("Managing scope creep"));
    assert!(canonical_answer("Tell me about your experience", Domain::UxDesign).contains("experience in ux design"));
    assert!(canonical_answer("Why here?", Domain::Default).starts_with("This question is asking"));
  }

  #[test]
  fn missing_keywords_are_sampled_and_capped() {
    let reference = "Wireframes outline structure layout hierarchy functionality stakeholders usability content";
    let mut rng = StdRng::seed_from_u64(42);
    let picked = missing_keywords(reference, "my layout is fine", &mut rng);
    assert!(picked.len() <= 3);
    assert!(!picked.contains(&"layout".to_string()));
    for word in &picked {
      assert!(word.chars().count() >= 5);
      assert!(reference.to_lowercase().contains(word.as_str()));
    }
    // every word already mentioned: nothing to report
    let mut rng = StdRng::seed_from_u64(42);
    assert!(missing_keywords("alpha bravo", "alpha bravo", &mut rng).is_empty());
  }

  #[test]
  fn apology_has_no_tier() {
    let r = CoachResponse::apology();
    assert_eq!(r.tier, None);
    assert_eq!(r.text, EVALUATION_APOLOGY);
  }
}

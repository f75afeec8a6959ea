//! Built-in question bank and generated filler questions.
//!
//! The bank guarantees the app is useful without any config file. Domains
//! or levels with fewer than ten entries are topped up from the templates
//! below when a session is drawn.

use crate::domain::{Domain, Level, Question};
use crate::util::fill_template;

use Domain::*;
use Level::*;

/// (id, domain, level, category, question)
type SeedRow = (&'static str, Domain, Level, &'static str, &'static str);

const SEED_BANK: &[SeedRow] = &[
  ("sd_b1", SoftwareDevelopment, Beginner, "languages", "What programming languages are you familiar with?"),
  ("sd_b2", SoftwareDevelopment, Beginner, "basics", "Can you explain what a variable is?"),
  ("sd_b3", SoftwareDevelopment, Beginner, "basics", "What is a function?"),
  ("sd_b4", SoftwareDevelopment, Beginner, "web", "Describe the difference between HTML and CSS."),
  ("sd_b5", SoftwareDevelopment, Beginner, "basics", "What is a loop?"),
  ("sd_b6", SoftwareDevelopment, Beginner, "tools", "What is version control and why is it important?"),
  ("sd_b7", SoftwareDevelopment, Beginner, "data-structures", "What is an array?"),
  ("sd_b8", SoftwareDevelopment, Beginner, "process", "What is debugging?"),
  ("sd_b9", SoftwareDevelopment, Beginner, "control-flow", "Explain what an if statement does."),
  ("sd_b10", SoftwareDevelopment, Beginner, "concepts", "What is the difference between frontend and backend development?"),
  ("sd_i1", SoftwareDevelopment, Intermediate, "algorithms", "Explain the concept of recursion and provide an example."),
  ("sd_i2", SoftwareDevelopment, Intermediate, "web", "What are the key differences between REST and GraphQL?"),
  ("sd_i3", SoftwareDevelopment, Intermediate, "database", "How would you optimize a slow-performing database query?"),
  ("sd_i4", SoftwareDevelopment, Intermediate, "javascript", "Explain the concept of closures in JavaScript."),
  ("sd_i5", SoftwareDevelopment, Intermediate, "testing", "What is your approach to testing code?"),
  ("sd_i6", SoftwareDevelopment, Intermediate, "architecture", "Describe the MVC architecture pattern."),
  ("sd_i7", SoftwareDevelopment, Intermediate, "design-patterns", "What is dependency injection?"),
  ("sd_i8", SoftwareDevelopment, Intermediate, "javascript", "Explain the concept of promises in JavaScript."),
  ("sd_i9", SoftwareDevelopment, Intermediate, "design-principles", "What are the SOLID principles?"),
  ("sd_i10", SoftwareDevelopment, Intermediate, "security", "Explain how you would implement authentication in a web application."),
  ("sd_e1", SoftwareDevelopment, Expert, "system-design", "Explain how you would design a distributed system for a high-traffic application."),
  ("sd_e2", SoftwareDevelopment, Expert, "advanced", "How would you implement a real-time collaborative editor?"),
  ("sd_e3", SoftwareDevelopment, Expert, "database", "Explain the CAP theorem and its implications for database design."),
  ("sd_e4", SoftwareDevelopment, Expert, "architecture", "Describe approaches to handle eventual consistency in a microservices architecture."),
  ("sd_e5", SoftwareDevelopment, Expert, "low-level", "How would you implement a custom garbage collector?"),
  ("sd_e6", SoftwareDevelopment, Expert, "system-design", "Explain how you would handle concurrency issues in a distributed system."),
  ("sd_e7", SoftwareDevelopment, Expert, "performance", "Describe how you would implement a custom caching layer for a high-traffic application."),
  ("sd_e8", SoftwareDevelopment, Expert, "system-design", "How would you design a system that processes millions of events per second?"),
  ("sd_e9", SoftwareDevelopment, Expert, "distributed-systems", "Explain how you would implement a distributed lock in a microservices architecture."),
  ("sd_e10", SoftwareDevelopment, Expert, "devops", "Describe approaches to achieve zero-downtime deployments in a large-scale system."),
  ("ai_b1", AiEngineering, Beginner, "basics", "What is machine learning?"),
  ("ai_b10", AiEngineering, Beginner, "basics", "What is the difference between supervised and unsupervised learning?"),
  ("ai_i1", AiEngineering, Intermediate, "ml-basics", "Explain the difference between supervised and unsupervised learning."),
  ("ai_i10", AiEngineering, Intermediate, "deployment", "Describe your experience with deploying machine learning models to production."),
  ("ai_e1", AiEngineering, Expert, "ml-advanced", "How would you handle imbalanced datasets in a classification problem?"),
  ("ai_e10", AiEngineering, Expert, "nlp", "Explain how transformers work in natural language processing."),
  ("gd1", GraphicDesign, Beginner, "process", "Walk me through your design process from concept to completion."),
  ("gd2", GraphicDesign, Beginner, "trends", "How do you stay updated with current design trends?"),
  ("gd3", GraphicDesign, Intermediate, "branding", "Describe how you would approach a rebrand for a well-established company."),
  ("gd4", GraphicDesign, Intermediate, "client", "How do you handle client feedback, especially when you disagree with their suggestions?"),
  ("gd5", GraphicDesign, Expert, "accessibility", "Explain your approach to creating accessible designs."),
  ("ux_b1", UxDesign, Beginner, "basics", "What is the difference between UX and UI design?"),
  ("ux_b2", UxDesign, Beginner, "research", "What is your process for conducting user research?"),
  ("ux_b3", UxDesign, Beginner, "process", "How do you translate research insights into design decisions?"),
  ("ux_b4", UxDesign, Beginner, "tools", "What are wireframes and why are they important?"),
  ("ux_b5", UxDesign, Beginner, "research", "Explain the concept of user personas and how you use them."),
  ("ux_b6", UxDesign, Beginner, "accessibility", "How do you ensure your designs are accessible to all users?"),
  ("ux_b7", UxDesign, Beginner, "tools", "What tools do you use in your UX design workflow?"),
  ("ux_b8", UxDesign, Beginner, "structure", "How do you approach information architecture?"),
  ("ux_b9", UxDesign, Beginner, "experience", "Describe a recent UX project you worked on."),
  ("ux_b10", UxDesign, Beginner, "principles", "What makes a good user experience?"),
  ("ux_i1", UxDesign, Intermediate, "testing", "How do you conduct usability testing?"),
  ("ux_i2", UxDesign, Intermediate, "testing", "Tell me about a time when usability testing significantly changed your design approach."),
  ("ux_i3", UxDesign, Intermediate, "strategy", "How do you balance business requirements with user needs?"),
  ("ux_i4", UxDesign, Intermediate, "metrics", "How do you measure the success of your UX design solutions?"),
  ("ux_i5", UxDesign, Intermediate, "responsive", "Explain how you approach designing for different platforms (mobile, web, desktop)."),
  ("ux_i6", UxDesign, Intermediate, "tools", "How do you create and use journey maps in your design process?"),
  ("ux_i7", UxDesign, Intermediate, "communication", "Describe your approach to handling stakeholder feedback that conflicts with user needs."),
  ("ux_i8", UxDesign, Intermediate, "research", "How do you integrate quantitative and qualitative research in your UX process?"),
  ("ux_i9", UxDesign, Intermediate, "prototyping", "Explain your process for creating interactive prototypes."),
  ("ux_i10", UxDesign, Intermediate, "accessibility", "How do you design for users with different abilities and accessibility needs?"),
  ("ux_e1", UxDesign, Expert, "leadership", "How do you lead a UX team and establish design processes across an organization?"),
  ("ux_e2", UxDesign, Expert, "innovation", "How do you approach designing for emerging technologies like AR/VR or voice interfaces?"),
  ("ux_e3", UxDesign, Expert, "systems", "Describe your approach to creating a comprehensive design system."),
  ("ux_e4", UxDesign, Expert, "strategy", "How do you balance innovation with established design patterns?"),
  ("ux_e5", UxDesign, Expert, "complexity", "How would you design for complex user workflows in enterprise applications?"),
  ("ux_e6", UxDesign, Expert, "ethics", "Explain how you incorporate ethical considerations into your design process."),
  ("ux_e7", UxDesign, Expert, "metrics", "How do you measure and improve the ROI of UX design in an organization?"),
  ("ux_e8", UxDesign, Expert, "challenges", "Describe a situation where you had to redesign a product with significant user adoption challenges."),
  ("ux_e9", UxDesign, Expert, "technology", "How do you incorporate AI and machine learning into UX design?"),
  ("ux_e10", UxDesign, Expert, "strategy", "Explain your approach to designing complex systems with multiple user types and competing priorities."),
  ("fr1", Freelancing, Beginner, "business", "How do you determine your rates for different types of projects?"),
  ("fr2", Freelancing, Beginner, "marketing", "What is your approach to finding and retaining clients?"),
  ("fr3", Freelancing, Intermediate, "project-management", "How do you handle scope creep in a project?"),
  ("fr4", Freelancing, Expert, "tools", "What tools do you use to manage your freelance business and stay organized?"),
  ("fr5", Freelancing, Expert, "legal", "How do you handle the legal aspects of freelancing, like contracts and intellectual property?"),
  ("te1", Teaching, Beginner, "pedagogy", "How do you adapt your teaching methods for different learning styles?"),
  ("te2", Teaching, Intermediate, "edtech", "What technologies do you use to enhance the learning experience?"),
  ("te3", Teaching, Intermediate, "assessment", "How do you assess student understanding and progress?"),
  ("te4", Teaching, Expert, "challenges", "Describe a challenging teaching situation and how you handled it."),
  ("te5", Teaching, Expert, "professional-development", "How do you stay current with developments in your field?"),
  ("pm1", ProductManagement, Beginner, "roadmap", "How do you prioritize features in a product roadmap?"),
  ("pm2", ProductManagement, Intermediate, "user-research", "Describe your process for conducting user research."),
  ("pm3", ProductManagement, Intermediate, "metrics", "How do you measure the success of a product feature after launch?"),
  ("pm4", ProductManagement, Expert, "communication", "How do you communicate product decisions to stakeholders?"),
  ("pm5", ProductManagement, Expert, "decision-making", "Describe a situation where you had to make a difficult trade-off in a product decision."),
  ("tl1", TeamLeadership, Beginner, "conflict-resolution", "How do you handle conflicts within your team?"),
  ("tl2", TeamLeadership, Intermediate, "delegation", "What is your approach to delegating tasks to team members?"),
  ("tl3", TeamLeadership, Intermediate, "motivation", "How do you motivate team members who are struggling with performance?"),
  ("tl4", TeamLeadership, Expert, "goal-setting", "Describe your process for setting and tracking team goals."),
  ("tl5", TeamLeadership, Expert, "culture", "How do you foster a culture of innovation and continuous improvement?"),
];

/// (category, template). `{domain}` is replaced by the domain in words.
const CUSTOM_TEMPLATES: &[(&str, &str)] = &[
  ("experience", "What experience do you have in {domain}?"),
  ("strengths", "What are your strengths related to {domain}?"),
  ("learning", "How do you stay updated with the latest trends in {domain}?"),
  ("challenges", "What challenges have you faced in {domain} and how did you overcome them?"),
  ("career", "Where do you see yourself in the field of {domain} in the next 5 years?"),
];

const ADDITIONAL_TEMPLATES: &[(&str, &str)] = &[
  ("tools", "What tools or technologies do you use most frequently in your {domain} work?"),
  ("metrics", "How do you measure success in your {domain} projects?"),
  ("experience", "Describe a successful {domain} project you've worked on."),
  ("skills", "What skills do you think are most important for someone in {domain}?"),
  ("process", "How do you approach problem-solving in {domain}?"),
  ("problem-solving", "What was the most challenging {domain} problem you've solved?"),
  ("collaboration", "How do you collaborate with others in your {domain} work?"),
  ("learning", "What resources do you use to improve your {domain} skills?"),
  ("feedback", "How do you handle feedback on your {domain} work?"),
  ("trends", "What do you think will be the next big trend in {domain}?"),
];

/// The built-in bank, in declaration order.
pub fn seed_questions() -> Vec<Question> {
  SEED_BANK
    .iter()
    .map(|&(id, domain, level, category, question)| Question {
      id: id.into(),
      domain,
      question: question.into(),
      category: Some(category.into()),
      difficulty: Some(level),
    })
    .collect()
}

/// Last-resort questions for a domain with no bank entries at all.
pub fn custom_questions(domain: Domain) -> Vec<Question> {
  generate(domain, "custom", Beginner, CUSTOM_TEMPLATES)
}

/// Generic filler used to top a draw up to ten questions.
pub fn additional_questions(domain: Domain, level: Level) -> Vec<Question> {
  generate(domain, "additional", level, ADDITIONAL_TEMPLATES)
}

fn generate(domain: Domain, kind: &str, level: Level, templates: &[(&str, &str)]) -> Vec<Question> {
  let words = domain.words();
  templates
    .iter()
    .enumerate()
    .map(|(i, (category, tpl))| Question {
      id: format!("{}_{}_{}", domain.id(), kind, i + 1),
      domain,
      question: fill_template(tpl, &[("domain", &words)]),
      category: Some((*category).into()),
      difficulty: Some(level),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn seed_ids_are_unique() {
    let qs = seed_questions();
    let ids: HashSet<_> = qs.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), qs.len());
    assert_eq!(qs.iter().filter(|q| q.domain == SoftwareDevelopment).count(), 30);
  }

  #[test]
  fn generated_questions_use_domain_words() {
    let custom = custom_questions(Domain::DataScience);
    assert_eq!(custom.len(), 5);
    assert_eq!(custom[0].id, "data-science_custom_1");
    assert_eq!(custom[0].question, "What experience do you have in data science?");

    let extra = additional_questions(Domain::Teaching, Expert);
    assert_eq!(extra.len(), 10);
    assert_eq!(extra[9].id, "teaching_additional_10");
    assert_eq!(extra[1].question, "How do you measure success in your teaching projects?");
    assert!(extra.iter().all(|q| q.difficulty == Some(Expert)));
  }
}

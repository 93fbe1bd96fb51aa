//! Likely interview question selection: trigger keywords matched against
//! extracted skills, backfilled from a generic behavioral pool.

use crate::analysis::extraction::ExtractionResult;

pub const MAX_QUESTIONS: usize = 10;

/// Ordered (trigger, question) pairs. Evaluated top to bottom.
const QUESTION_TEMPLATES: &[(&str, &str)] = &[
    ("SQL", "Explain indexing in databases and when it helps."),
    ("MongoDB", "When would you choose MongoDB over a relational database?"),
    (
        "React",
        "Explain state management options in React (useState, context, Redux).",
    ),
    (
        "DSA",
        "How would you optimize search in sorted data? Discuss time complexity.",
    ),
    ("OOP", "Explain polymorphism and give a real-world example."),
    ("Node.js", "How does the Node.js event loop work?"),
    ("Docker", "What is the difference between a Docker image and a container?"),
    ("REST", "REST vs GraphQL: when would you choose one over the other?"),
    ("DBMS", "Explain ACID properties and why they matter."),
    ("OS", "Explain process vs thread and when to use which."),
    ("Networks", "Explain HTTP vs HTTPS and what TLS provides."),
    (
        "Kubernetes",
        "What are Kubernetes pods and how do they relate to deployments?",
    ),
    ("Java", "Explain the difference between equals() and == in Java."),
    ("Python", "Explain list vs tuple and when to use each."),
    ("JavaScript", "Explain closures and a practical use case."),
    ("CI/CD", "What does a typical CI/CD pipeline do from commit to deploy?"),
    ("JUnit", "How do you structure unit tests? What do you mock?"),
    ("System Design", "How would you design a URL shortener?"),
];

/// Generic behavioral pool used to backfill when fewer than 10 triggers fire.
const FALLBACK_QUESTIONS: &[&str] = &[
    "Walk me through your resume and a project you are proud of.",
    "Describe a time you solved a difficult technical problem.",
    "How do you stay updated with new technologies?",
    "What is your approach to debugging production issues?",
    "How do you handle disagreements in a team?",
    "Explain a system you designed or improved.",
    "What are your strengths and how do they apply to this role?",
    "Where do you see yourself in 2–3 years?",
    "Do you have any questions for us?",
];

/// Selects up to 10 questions. A pair fires when any extracted skill
/// contains the trigger or the trigger contains the skill, case-insensitively.
pub fn generate_questions(extraction: &ExtractionResult) -> Vec<String> {
    let skills_lower: Vec<String> = extraction.all.iter().map(|s| s.to_lowercase()).collect();
    let mut selected: Vec<String> = Vec::new();

    for (trigger, question) in QUESTION_TEMPLATES {
        let trigger_lower = trigger.to_lowercase();
        let fired = skills_lower
            .iter()
            .any(|s| s.contains(&trigger_lower) || trigger_lower.contains(s.as_str()));
        if fired && !selected.iter().any(|q| q == question) {
            selected.push((*question).to_string());
        }
        if selected.len() >= MAX_QUESTIONS {
            break;
        }
    }

    if selected.len() < MAX_QUESTIONS {
        for q in FALLBACK_QUESTIONS {
            if selected.len() >= MAX_QUESTIONS {
                break;
            }
            if !selected.iter().any(|s| s == q) {
                selected.push((*q).to_string());
            }
        }
    }

    selected.truncate(MAX_QUESTIONS);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extraction::extract_skills;

    #[test]
    fn test_triggers_fire_in_template_order() {
        let extraction = extract_skills("SQL, React and Docker stack");
        let questions = generate_questions(&extraction);
        // SQL, React, Docker come before any fallback question.
        assert_eq!(questions[0], "Explain indexing in databases and when it helps.");
        assert_eq!(
            questions[1],
            "Explain state management options in React (useState, context, Redux)."
        );
        assert_eq!(
            questions[2],
            "What is the difference between a Docker image and a container?"
        );
    }

    #[test]
    fn test_fallback_backfills_to_ten() {
        let extraction = extract_skills("SQL only here");
        let questions = generate_questions(&extraction);
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert!(questions
            .contains(&"Walk me through your resume and a project you are proud of.".to_string()));
    }

    #[test]
    fn test_fresher_gets_nine_fallback_questions() {
        // No skills fire any trigger and the fallback pool holds only 9.
        let extraction = extract_skills("we want a smart intern");
        let questions = generate_questions(&extraction);
        assert_eq!(questions.len(), 9);
        assert_eq!(
            questions[0],
            "Walk me through your resume and a project you are proud of."
        );
    }

    #[test]
    fn test_bidirectional_substring_match() {
        // Both directions of the containment test get exercised here.
        let extraction = extract_skills("CI/CD pipelines with Kubernetes");
        let questions = generate_questions(&extraction);
        assert!(questions
            .contains(&"What are Kubernetes pods and how do they relate to deployments?".to_string()));
        assert!(questions
            .contains(&"What does a typical CI/CD pipeline do from commit to deploy?".to_string()));
    }

    #[test]
    fn test_never_more_than_ten_and_no_duplicates() {
        let extraction = extract_skills(
            "SQL MongoDB React DSA OOP Node.js Docker REST DBMS OS Networks Kubernetes Java Python JavaScript CI/CD JUnit System Design",
        );
        let questions = generate_questions(&extraction);
        assert_eq!(questions.len(), MAX_QUESTIONS);
        let mut deduped = questions.clone();
        deduped.dedup();
        assert_eq!(deduped.len(), questions.len());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let extraction = extract_skills("Python with PyTest and AWS");
        assert_eq!(generate_questions(&extraction), generate_questions(&extraction));
    }
}

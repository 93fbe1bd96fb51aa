//! Fixed skill taxonomy: keyword buckets matched against raw JD text.
//!
//! Matching is case-insensitive substring containment with no word-boundary
//! check: "Go" matches inside "Google". That imprecision is part of the
//! heuristic and must not be "fixed" here.

use serde::{Deserialize, Serialize};

/// One bucket of the fixed skill taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    CoreCs,
    Languages,
    Web,
    Data,
    CloudDevOps,
    Testing,
    /// Catch-all bucket, only produced synthetically for general freshers.
    Other,
}

impl SkillCategory {
    /// Human label shown next to the bucket.
    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "Core CS",
            SkillCategory::Languages => "Languages",
            SkillCategory::Web => "Web",
            SkillCategory::Data => "Data",
            SkillCategory::CloudDevOps => "Cloud/DevOps",
            SkillCategory::Testing => "Testing",
            SkillCategory::Other => "Other",
        }
    }

    /// Canonical key used in persisted entries (`cloudDevOps` stores as `cloud`).
    pub fn storage_key(&self) -> &'static str {
        match self {
            SkillCategory::CoreCs => "coreCS",
            SkillCategory::Languages => "languages",
            SkillCategory::Web => "web",
            SkillCategory::Data => "data",
            SkillCategory::CloudDevOps => "cloud",
            SkillCategory::Testing => "testing",
            SkillCategory::Other => "other",
        }
    }
}

/// A taxonomy category paired with its trigger keywords.
pub struct CategorySpec {
    pub category: SkillCategory,
    pub keywords: &'static [&'static str],
}

/// The taxonomy, in fixed scan order. Immutable, process-wide.
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: SkillCategory::CoreCs,
        keywords: &[
            "DSA",
            "OOP",
            "DBMS",
            "OS",
            "Networks",
            "Data Structures",
            "Algorithms",
            "Operating System",
            "Computer Networks",
            "System Design",
        ],
    },
    CategorySpec {
        category: SkillCategory::Languages,
        keywords: &[
            "Java",
            "Python",
            "JavaScript",
            "TypeScript",
            "C",
            "C++",
            "C#",
            "Go",
            "Golang",
            "Ruby",
            "Kotlin",
            "Swift",
        ],
    },
    CategorySpec {
        category: SkillCategory::Web,
        keywords: &[
            "React",
            "Next.js",
            "Node.js",
            "Express",
            "REST",
            "GraphQL",
            "Angular",
            "Vue",
            "HTML",
            "CSS",
            "frontend",
            "backend",
        ],
    },
    CategorySpec {
        category: SkillCategory::Data,
        keywords: &["SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis", "NoSQL", "database"],
    },
    CategorySpec {
        category: SkillCategory::CloudDevOps,
        keywords: &[
            "AWS",
            "Azure",
            "GCP",
            "Docker",
            "Kubernetes",
            "CI/CD",
            "Linux",
            "DevOps",
            "K8s",
            "Terraform",
        ],
    },
    CategorySpec {
        category: SkillCategory::Testing,
        keywords: &[
            "Selenium",
            "Cypress",
            "Playwright",
            "JUnit",
            "PyTest",
            "Jest",
            "testing",
            "unit test",
        ],
    },
];

/// Skills injected into the `Other` bucket when nothing at all matched.
pub const DEFAULT_FRESHER_SKILLS: &[&str] =
    &["Communication", "Problem solving", "Basic coding", "Projects"];

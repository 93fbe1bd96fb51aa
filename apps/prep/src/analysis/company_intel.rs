//! Company intel from name + JD text. Heuristic only, no scraping or lookup.
//!
//! Size buckets: startup (<200), mid-size (200-2000), enterprise (2000+).
//! The name check alone only ever yields `enterprise` or `startup`;
//! `mid-size` exists for callers that supply it directly.

use serde::{Deserialize, Serialize};

/// Company size bucket used by the round-mapping heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "startup")]
    Startup,
    #[serde(rename = "mid-size")]
    MidSize,
    #[serde(rename = "enterprise")]
    Enterprise,
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SizeCategory::Startup => "startup",
            SizeCategory::MidSize => "mid-size",
            SizeCategory::Enterprise => "enterprise",
        };
        f.write_str(s)
    }
}

/// Derived company profile attached to an analysis when a company was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntel {
    pub company_name: String,
    pub industry: String,
    pub size_category: SizeCategory,
    pub typical_hiring_focus: String,
}

/// Large employers recognized by normalized-name containment (either direction).
const KNOWN_ENTERPRISE: &[&str] = &[
    "amazon",
    "infosys",
    "tcs",
    "tata consultancy",
    "wipro",
    "accenture",
    "microsoft",
    "google",
    "meta",
    "apple",
    "ibm",
    "oracle",
    "capgemini",
    "cognizant",
    "hcl",
    "tech mahindra",
    "larsen",
    "toubro",
    "lt",
    "dell",
    "cisco",
    "intel",
    "sap",
    "salesforce",
    "adobe",
    "netflix",
    "uber",
    "paypal",
    "goldman sachs",
    "jpmorgan",
    "morgan stanley",
    "mckinsey",
    "bcg",
    "bain",
    "deloitte",
    "ey",
    "kpmg",
    "pwc",
];

struct IndustryRule {
    keywords: &'static [&'static str],
    industry: &'static str,
}

/// First-match-wins industry table, evaluated in declared order against
/// normalized company name + lowercased JD text.
const INDUSTRY_RULES: &[IndustryRule] = &[
    IndustryRule {
        keywords: &["fintech", "banking", "finance", "payment", "insurance"],
        industry: "Financial Services",
    },
    IndustryRule {
        keywords: &["healthcare", "medical", "pharma", "clinical"],
        industry: "Healthcare",
    },
    IndustryRule {
        keywords: &["ecommerce", "retail", "marketplace", "shopping"],
        industry: "E-commerce & Retail",
    },
    IndustryRule {
        keywords: &["edtech", "education", "learning", "course"],
        industry: "Education Technology",
    },
    IndustryRule {
        keywords: &["saas", "cloud", "enterprise software"],
        industry: "SaaS & Enterprise Software",
    },
    IndustryRule {
        keywords: &["automotive", "vehicle", "ev", "mobility"],
        industry: "Automotive & Mobility",
    },
];

const DEFAULT_INDUSTRY: &str = "Technology Services";

const ENTERPRISE_FOCUS: &str = "Structured process with emphasis on DSA, core CS fundamentals, and system design. Multiple technical rounds with standardized evaluation. Strong aptitude and communication rounds.";
const MID_SIZE_FOCUS: &str = "Balance of problem-solving, hands-on coding, and domain fit. Often 2-3 technical rounds plus culture fit.";
const STARTUP_FOCUS: &str = "Practical problem-solving and stack depth. Focus on what you can build, past projects, and how you learn. Fewer rounds; impact and culture fit matter.";

fn normalize_company(name: &str) -> String {
    name.trim().to_lowercase()
}

fn matches_known_enterprise(normalized: &str) -> bool {
    KNOWN_ENTERPRISE
        .iter()
        .any(|known| normalized.contains(known) || known.contains(normalized))
}

/// Narrative string keyed by size category.
pub fn hiring_focus(size: SizeCategory) -> &'static str {
    match size {
        SizeCategory::Enterprise => ENTERPRISE_FOCUS,
        SizeCategory::MidSize => MID_SIZE_FOCUS,
        SizeCategory::Startup => STARTUP_FOCUS,
    }
}

/// Classifies a company name into size + industry and derives the
/// hiring-focus narrative. Pure function of its inputs.
pub fn company_intel(company: &str, jd_text: &str) -> CompanyIntel {
    let trimmed = company.trim();
    let company_name = if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    };
    let normalized = normalize_company(company);
    let combined = format!("{} {}", normalized, jd_text.to_lowercase());

    let size_category = if !normalized.is_empty() && matches_known_enterprise(&normalized) {
        SizeCategory::Enterprise
    } else {
        SizeCategory::Startup
    };

    let industry = INDUSTRY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| combined.contains(kw)))
        .map(|rule| rule.industry)
        .unwrap_or(DEFAULT_INDUSTRY)
        .to_string();

    CompanyIntel {
        company_name,
        industry,
        size_category,
        typical_hiring_focus: hiring_focus(size_category).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_employer_is_enterprise() {
        let intel = company_intel("Google", "");
        assert_eq!(intel.size_category, SizeCategory::Enterprise);
        assert_eq!(intel.company_name, "Google");
    }

    #[test]
    fn test_containment_works_both_directions() {
        // "goog" is contained by the known entry "google".
        assert_eq!(company_intel("goog", "").size_category, SizeCategory::Enterprise);
        // "google india pvt ltd" contains "google".
        assert_eq!(
            company_intel("Google India Pvt Ltd", "").size_category,
            SizeCategory::Enterprise
        );
    }

    #[test]
    fn test_unknown_company_is_startup_never_mid_size() {
        let intel = company_intel("Pixelgrid", "");
        assert_eq!(intel.size_category, SizeCategory::Startup);
    }

    #[test]
    fn test_industry_first_match_wins_over_name_and_jd() {
        // "payment" (Financial Services) is declared before "cloud" (SaaS).
        let intel = company_intel("Pixelgrid", "payment platform on cloud infra");
        assert_eq!(intel.industry, "Financial Services");
    }

    #[test]
    fn test_industry_from_company_name_alone() {
        let intel = company_intel("BrightEdtech", "");
        assert_eq!(intel.industry, "Education Technology");
    }

    #[test]
    fn test_default_industry_when_nothing_matches() {
        let intel = company_intel("Pixelgrid", "we build things");
        assert_eq!(intel.industry, "Technology Services");
    }

    #[test]
    fn test_hiring_focus_tracks_size_category() {
        assert!(hiring_focus(SizeCategory::Enterprise).starts_with("Structured process"));
        assert!(hiring_focus(SizeCategory::MidSize).starts_with("Balance of problem-solving"));
        assert!(hiring_focus(SizeCategory::Startup).starts_with("Practical problem-solving"));
        let intel = company_intel("Infosys", "");
        assert_eq!(intel.typical_hiring_focus, ENTERPRISE_FOCUS);
    }

    #[test]
    fn test_blank_company_name_falls_back_to_unknown() {
        let intel = company_intel("   ", "");
        assert_eq!(intel.company_name, "Unknown");
        assert_eq!(intel.size_category, SizeCategory::Startup);
    }

    #[test]
    fn test_size_category_serde_strings() {
        assert_eq!(serde_json::to_string(&SizeCategory::MidSize).unwrap(), "\"mid-size\"");
        let parsed: SizeCategory = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(parsed, SizeCategory::Enterprise);
    }
}

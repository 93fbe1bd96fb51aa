//! The analysis pipeline. Pure and deterministic: identical inputs always
//! produce an identical bundle. No I/O, no storage dependencies.

pub mod checklist;
pub mod company_intel;
pub mod extraction;
pub mod plan;
pub mod questions;
pub mod rounds;
pub mod scoring;
pub mod taxonomy;

use tracing::debug;

use crate::errors::{AppError, Result};

use checklist::ChecklistRound;
use company_intel::{CompanyIntel, SizeCategory};
use extraction::ExtractionResult;
use plan::PlanDay;
use rounds::MappedRound;

/// Everything one analysis run produces, before persistence shaping.
#[derive(Debug, Clone)]
pub struct AnalysisBundle {
    pub extraction: ExtractionResult,
    pub readiness_score: u32,
    pub checklist: Vec<ChecklistRound>,
    pub plan: Vec<PlanDay>,
    pub questions: Vec<String>,
    pub company_intel: Option<CompanyIntel>,
    pub round_mapping: Vec<MappedRound>,
}

/// Runs the full pipeline over a JD and optional company/role metadata.
///
/// Company intel is derived only when a company name was given; round
/// mapping then uses its size category, defaulting to startup otherwise.
pub fn run_analysis(jd_text: &str, company: &str, role: &str) -> Result<AnalysisBundle> {
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description text must not be empty".to_string(),
        ));
    }

    let extraction = extraction::extract_skills(jd_text);
    let readiness_score = scoring::readiness_score(&extraction, company, role, jd_text);
    let checklist = checklist::generate_checklist(&extraction);
    let plan = plan::generate_plan(&extraction);
    let questions = questions::generate_questions(&extraction);

    let company_intel = if company.trim().is_empty() {
        None
    } else {
        Some(company_intel::company_intel(company.trim(), jd_text))
    };
    let size = company_intel
        .as_ref()
        .map(|intel| intel.size_category)
        .unwrap_or(SizeCategory::Startup);
    let round_mapping = rounds::round_mapping(size, &extraction);

    debug!(
        skills = extraction.all.len(),
        score = readiness_score,
        rounds = round_mapping.len(),
        "analysis complete"
    );

    Ok(AnalysisBundle {
        extraction,
        readiness_score,
        checklist,
        plan,
        questions,
        company_intel,
        round_mapping,
    })
}

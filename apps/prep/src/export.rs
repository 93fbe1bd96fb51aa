//! Plain-text rendering of a saved analysis for copy/export.

use crate::models::entry::AnalysisEntry;

/// The 7-day plan as copyable text: focus line, then `  • task` lines per
/// block, blocks separated by a blank line.
pub fn render_plan_text(entry: &AnalysisEntry) -> String {
    let mut lines: Vec<String> = Vec::new();
    for day in &entry.plan_7_days {
        lines.push(day.focus.clone());
        for task in &day.tasks {
            lines.push(format!("  • {task}"));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

/// The round checklist as copyable text, same layout as the plan.
pub fn render_checklist_text(entry: &AnalysisEntry) -> String {
    let mut lines: Vec<String> = Vec::new();
    for round in &entry.checklist {
        lines.push(round.round_title.clone());
        for item in &round.items {
            lines.push(format!("  • {item}"));
        }
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

/// The questions as a numbered list.
pub fn render_questions_text(entry: &AnalysisEntry) -> String {
    entry
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full export: optional `company · role` header followed by the three
/// sections.
pub fn render_full_text(entry: &AnalysisEntry) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !entry.company.is_empty() || !entry.role.is_empty() {
        let header: Vec<&str> = [entry.company.as_str(), entry.role.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        parts.push(header.join(" · "));
        parts.push(String::new());
    }

    parts.push("--- Round-wise checklist ---".to_string());
    for round in &entry.checklist {
        parts.push(round.round_title.clone());
        for item in &round.items {
            parts.push(format!("  • {item}"));
        }
        parts.push(String::new());
    }

    parts.push("--- 7-day plan ---".to_string());
    for day in &entry.plan_7_days {
        parts.push(day.focus.clone());
        for task in &day.tasks {
            parts.push(format!("  • {task}"));
        }
        parts.push(String::new());
    }

    parts.push("--- 10 likely interview questions ---".to_string());
    for (i, question) in entry.questions.iter().enumerate() {
        parts.push(format!("{}. {question}", i + 1));
    }

    parts.join("\n")
}

/// Download name for the full export.
pub fn export_filename(company: &str, timestamp_millis: i64) -> String {
    let name = if company.is_empty() { "analysis" } else { company };
    format!("placement-prep-{name}-{timestamp_millis}.txt")
}

use super::SessionReport;
use crate::report_helpers;

pub fn print_report(report: &SessionReport) {
    let separator = report_helpers::separator(70);
    let insights = &report.insights;

    if report.date.is_empty() {
        println!("Session {}: {}", report.session_id, report.title);
    } else {
        println!(
            "Session {}: {} ({})",
            report.session_id, report.title, report.date
        );
    }
    println!("{separator}");

    println!("Decisions ({}):", insights.decisions.len());
    for d in &insights.decisions {
        println!("  - {}", d.decision);
        if !d.rationale.is_empty() {
            println!("      why: {}", d.rationale);
        }
        if !d.alternatives_rejected.is_empty() {
            println!("      rejected: {}", d.alternatives_rejected.join("; "));
        }
    }

    println!();
    println!("Patterns ({}):", insights.patterns.len());
    for p in &insights.patterns {
        println!("  - {}: {}", p.pattern, p.description);
    }

    println!();
    println!("Gotchas ({}):", insights.gotchas.len());
    for g in &insights.gotchas {
        println!("  - {}: {}", g.issue, g.context);
    }

    println!("{separator}");
    println!("Proposed rules:");
    for r in &insights.proposed_rules {
        let section = if r.section.is_empty() {
            "General"
        } else {
            r.section.as_str()
        };
        println!("  [{section}] {}", r.rule);
    }
}

pub fn print_json(report: &SessionReport) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(report)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

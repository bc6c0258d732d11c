use super::GroupAnalysis;
use crate::report_helpers;

pub fn print_report(analysis: &GroupAnalysis) {
    let separator = report_helpers::separator(70);

    println!("Repo Group: {}", analysis.group_name);
    println!("{separator}");
    if !analysis.summary.is_empty() {
        println!("{}", analysis.summary);
        println!();
    }

    if analysis.connections.is_empty() {
        println!("No cross-repo connections found.");
    } else {
        println!("Connections ({}):", analysis.connections.len());
        for c in &analysis.connections {
            println!(
                "  {} -> {}  [{}]",
                c.from_repo, c.to_repo, c.connection_type
            );
            if !c.description.is_empty() {
                println!("      {}", c.description);
            }
            if !c.evidence.is_empty() {
                println!("      evidence: {}", c.evidence);
            }
        }
    }

    if !analysis.repo_briefs.is_empty() {
        println!("{separator}");
        let width = report_helpers::column_width(analysis.repo_briefs.keys().map(String::as_str), 4);
        for (name, brief) in &analysis.repo_briefs {
            println!("  {name:<width$}  {brief}");
        }
    }
    println!("{separator}");
}

pub fn print_json(analysis: &GroupAnalysis) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(analysis)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

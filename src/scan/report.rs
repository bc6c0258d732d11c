use super::ScanResult;
use crate::report_helpers;

pub fn print_report(result: &ScanResult) {
    if result.files.is_empty() {
        println!("No matching files found in {}.", result.root.display());
        return;
    }

    let max_path_len =
        report_helpers::column_width(result.files.iter().map(|f| f.relative_path.as_str()), 4);
    // 1 (leading space) + 2 (focus marker) + path + 2 + 10 + 1 + 6 + 1 + 7 + 1 + 6 = path + 37
    let header_width = max_path_len + 37;
    let separator = report_helpers::separator(header_width.max(78));

    println!(
        "Comprehension Risk ({} files scanned in {})",
        result.file_count,
        result.root.display()
    );
    println!("{separator}");
    println!(
        "   {:<width$}  {:>10} {:>6} {:>7} {:>6}",
        "File",
        "Language",
        "Lines",
        "Ref-by",
        "Risk",
        width = max_path_len
    );
    println!("{separator}");

    for f in &result.files {
        let marker = if f.is_focus { "*" } else { " " };
        println!(
            " {marker} {:<width$}  {:>10} {:>6} {:>7} {:>6.1}",
            f.relative_path,
            f.language,
            f.line_count,
            f.reference_weight,
            f.risk_score,
            width = max_path_len
        );
        if !f.risk_factors.is_empty() {
            println!("     factors: {}", f.risk_factors.join(", "));
        }
        if !f.blast_radius.is_empty() {
            println!("     blast radius: {}", f.blast_radius);
        }
    }

    println!("{separator}");
    println!();
    println!("Risk 0-100: how likely the file's logic is to be misunderstood.");
    println!("Ref-by = other scanned files containing the file name. * = focus file.");
}

pub fn print_json(result: &ScanResult) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(result)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

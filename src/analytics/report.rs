use super::{Analytics, CatchupBrief};
use crate::report_helpers;

pub fn print_analytics(result: &Analytics) {
    if result.total_questions_answered == 0 {
        println!(
            "No graded answers yet ({} sessions recorded).",
            result.total_sessions
        );
        return;
    }

    let max_topic_len =
        report_helpers::column_width(result.topic_scores.iter().map(|t| t.topic.as_str()), 5);
    // 3 (marker column) + topic + 2 + 7 + 1 + 9 + 1 + 8 = topic + 31
    let separator = report_helpers::separator((max_topic_len + 31).max(60));

    println!(
        "Quiz Analytics ({} of {} sessions completed, {} answers, avg {:.2})",
        result.completed_sessions,
        result.total_sessions,
        result.total_questions_answered,
        result.overall_avg_score
    );
    println!("{separator}");
    println!(
        "   {:<width$}  {:>7} {:>9} {:>8}",
        "Topic",
        "Avg",
        "Questions",
        "Sessions",
        width = max_topic_len
    );
    println!("{separator}");
    for t in &result.topic_scores {
        let marker = if t.is_blind_spot { "!" } else { " " };
        println!(
            " {marker} {:<width$}  {:>7.2} {:>9} {:>8}",
            t.topic,
            t.avg_score,
            t.question_count,
            t.sessions_appeared_in,
            width = max_topic_len
        );
    }
    println!("{separator}");

    if !result.trend.is_empty() {
        println!();
        println!("Trend (latest attempt per session):");
        for p in &result.trend {
            let date = if p.date.is_empty() { "-" } else { p.date.as_str() };
            println!("  {date:<10}  {:>6.2}  {}", p.score, p.title);
        }
    }

    println!();
    if result.blind_spots.is_empty() {
        println!("No blind spots.");
    } else {
        let names: Vec<&str> = result.blind_spots.iter().map(|t| t.topic.as_str()).collect();
        println!("! = blind spot (avg below 60 over 2+ answers): {}", names.join(", "));
    }
}

pub fn print_catchup(brief: &CatchupBrief) {
    println!("Catch-up: {}", brief.topic);
    println!("{}", report_helpers::separator(60));
    println!("{}", brief.brief);
    if !brief.source_sessions.is_empty() {
        let ids: Vec<String> = brief.source_sessions.iter().map(|id| id.to_string()).collect();
        println!();
        println!("Sources: sessions {}", ids.join(", "));
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use super::*;

#[test]
fn column_width_takes_widest_label() {
    let labels = ["src/auth.py", "src/very_long_name.rs"];
    assert_eq!(column_width(labels.into_iter(), 4), "src/very_long_name.rs".len());
}

#[test]
fn column_width_empty_uses_min() {
    assert_eq!(column_width(std::iter::empty(), 5), 5);
}

#[test]
fn column_width_counts_chars_not_bytes() {
    assert_eq!(column_width(["Sécurité"].into_iter(), 1), 8);
}

#[test]
fn separator_width() {
    assert_eq!(separator(5).chars().count(), 5);
}

#[test]
fn print_json_stdout_serializes() {
    print_json_stdout(&serde_json::json!({"topic": "Security"})).unwrap();
}

pub fn indent_str(string: &str, level: usize) -> String {
    string
        .lines()
        .map(|line| format!("{:indent$} |  {}", "", line, indent = level))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lowercase, blank out everything but `[a-z0-9]` and whitespace, collapse runs
/// of whitespace and trim. Idempotent.
pub fn normalize(raw: &str) -> String {
    let blanked: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    blanked.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split on runs of `.` or newline, trimming pieces and dropping empty ones.
pub fn segment(raw: &str) -> Vec<String> {
    raw.split(['.', '\n'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

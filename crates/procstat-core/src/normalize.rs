use procstat_model::NameMatching;

/// Turns a procedure cell into its grouping key.
///
/// Returns `None` for blank cells.
pub fn normalize_name(raw: &str, matching: NameMatching) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match matching {
        NameMatching::Raw => trimmed.to_string(),
        NameMatching::Normalized => trimmed.to_uppercase(),
    })
}

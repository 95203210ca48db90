//! CSV header normalization.

use std::collections::BTreeSet;

/// Normalizes a header: strips a byte-order mark, trims, and collapses inner
/// whitespace runs to a single space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Renames repeated headers to `NAME_1`, `NAME_2`, ... so every column keeps
/// its own key in a row mapping. The first occurrence keeps its name.
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut result = Vec::with_capacity(headers.len());
    for header in headers {
        if used.insert(header.clone()) {
            result.push(header);
            continue;
        }
        let mut suffix = 1usize;
        let renamed = loop {
            let candidate = format!("{header}_{suffix}");
            if !used.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        used.insert(renamed.clone());
        result.push(renamed);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  AÑO  "), "AÑO");
        assert_eq!(normalize_header("\u{feff}AÑO"), "AÑO");
        assert_eq!(normalize_header("TIPO  DE\tPROCEDIMENTO"), "TIPO DE PROCEDIMENTO");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_dedupe_headers() {
        let headers = dedupe_headers(strings(&["AÑO", "PROCEDIMENTO", "PROCEDIMENTO"]));
        assert_eq!(headers, strings(&["AÑO", "PROCEDIMENTO", "PROCEDIMENTO_1"]));
    }

    #[test]
    fn test_dedupe_headers_avoids_existing_suffix() {
        let headers = dedupe_headers(strings(&["A", "A_1", "A", "A"]));
        assert_eq!(headers, strings(&["A", "A_1", "A_2", "A_3"]));
    }
}

// src/common/db_utils.rs

// Escapa os curingas do LIKE/ILIKE para que a busca seja por substring literal.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Comparação de substring sem diferenciar maiúsculas, usada pelo store em memória.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn substring_match_ignores_case() {
        assert!(contains_ignore_case("Alice Johnson", "JOHN"));
        assert!(contains_ignore_case("TechCorp", "corp"));
        assert!(!contains_ignore_case("TechCorp", "corpo"));
    }
}

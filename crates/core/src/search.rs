/// Trims a submitted query. Blank input yields `None` and must not reach the backend.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_are_ignored() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query("   \t\n"), None);
    }

    #[test]
    fn queries_are_trimmed() {
        assert_eq!(normalize_query("  Infosys Ltd "), Some("Infosys Ltd"));
    }
}

//! Header-to-field resolution for spreadsheet imports.
//!
//! Sheets arrive with inconsistent, typo-ridden headers, so each logical
//! field carries a list of known aliases and resolution degrades gracefully:
//! exact match first, then case-insensitive, then substring containment.

/// Minimum alias length for substring matching. Short names like "name"
/// would otherwise match almost any header.
const SUBSTRING_MIN_LEN: usize = 4;

/// Resolves a logical field to a column index.
///
/// Tiers, in order:
/// 1. exact header match;
/// 2. case-insensitive match;
/// 3. substring containment in either direction, skipped for aliases of
///    three characters or fewer.
///
/// Presence of the column decides the match; the cell itself may be empty.
pub(crate) fn resolve(headers: &[String], aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        if let Some(index) = headers.iter().position(|header| header == alias) {
            return Some(index);
        }
    }

    for alias in aliases {
        if let Some(index) =
            headers.iter().position(|header| header.eq_ignore_ascii_case(alias))
        {
            return Some(index);
        }
    }

    for alias in aliases {
        if alias.len() < SUBSTRING_MIN_LEN {
            continue;
        }
        let alias_lower = alias.to_lowercase();
        if let Some(index) = headers.iter().position(|header| {
            let header_lower = header.to_lowercase();
            !header_lower.is_empty()
                && (header_lower.contains(&alias_lower) || alias_lower.contains(&header_lower))
        }) {
            return Some(index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn exact_match_wins() {
        let headers = headers(&["skill", "trainer_name", "expertise_level"]);
        assert_eq!(resolve(&headers, &["trainer_name", "trainer"]), Some(1));
    }

    #[test]
    fn case_insensitive_match() {
        let headers = headers(&["Skill", "TRAINER_NAME"]);
        assert_eq!(resolve(&headers, &["trainer_name"]), Some(1));
    }

    #[test]
    fn substring_match_both_directions() {
        // alias contained in header
        let headers_a = headers(&["main_trainer_name_col"]);
        assert_eq!(resolve(&headers_a, &["trainer_name"]), Some(0));

        // header contained in alias
        let headers_b = headers(&["trainer"]);
        assert_eq!(resolve(&headers_b, &["trainer_name_full"]), Some(0));
    }

    #[test]
    fn short_aliases_never_substring_match() {
        let headers = headers(&["training_name"]);
        // "ame" would substring-match but is below the length floor
        assert_eq!(resolve(&headers, &["ame"]), None);
    }

    #[test]
    fn earlier_alias_takes_precedence() {
        let headers = headers(&["trainer", "trainer_name"]);
        assert_eq!(resolve(&headers, &["trainer_name", "trainer"]), Some(1));
    }

    #[test]
    fn no_match_returns_none() {
        let headers = headers(&["division", "department"]);
        assert_eq!(resolve(&headers, &["trainer_name", "trainer"]), None);
    }

    #[test]
    fn known_typo_alias_resolves() {
        let headers = headers(&["copmetency"]);
        assert_eq!(resolve(&headers, &["trainer_name", "copmetency"]), Some(0));
    }
}

//! Amenity text normalization.
//!
//! A listing's amenities arrive as one string such as
//! `{TV,Wifi,"24-hour check-in","Family/kid friendly"}`. Normalization turns it
//! into comparable tokens (`tv`, `wifi`, `h24_check_in`, `family_kid_friendly`)
//! so that spelling variants of the same amenity collapse to one token.

use crate::error::{AmenityFormatError, FeatureError, Result};

/// Characters unified to `_`.
const SEPARATORS: [char; 3] = ['-', '/', ' '];

/// Characters dropped outright. U+2019 is the typographic apostrophe.
const DROPPED: [char; 3] = ['(', ')', '\u{2019}'];

/// Characters belonging to the list syntax rather than to amenity names.
const LIST_SYNTAX: [char; 3] = ['{', '}', '"'];

/// Normalize one listing's amenities field into its token sequence.
///
/// Returns one token per comma-separated segment, in field order. Empty
/// segments are kept; they are dropped later by the vocabulary exclusions.
/// A missing or blank field yields no tokens, while `{}` yields a single
/// empty token.
///
/// # Examples
/// ```
/// use listings_features::normalize_amenities;
/// let tokens = normalize_amenities(Some(r#"{Wifi,"24-hour check-in"}"#)).unwrap();
/// assert_eq!(tokens, vec!["wifi", "h24_check_in"]);
/// assert!(normalize_amenities(None).unwrap().is_empty());
/// ```
pub fn normalize_amenities(raw: Option<&str>) -> std::result::Result<Vec<String>, AmenityFormatError> {
    let field = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(field) => field,
    };

    validate_field(field)?;

    Ok(canonicalize(field)
        .split(',')
        .map(|token| token.to_string())
        .collect())
}

/// Normalize a single amenity name.
///
/// Applies the same rewrites as [`normalize_amenities`] without splitting.
pub fn normalize_token(name: &str) -> String {
    canonicalize(name)
}

/// Normalize every listing's field, one sequence per listing, in order.
pub fn normalize_column(fields: &[Option<String>]) -> Result<Vec<Vec<String>>> {
    fields
        .iter()
        .enumerate()
        .map(|(row, field)| {
            normalize_amenities(field.as_deref())
                .map_err(|source| FeatureError::MalformedAmenityField { row, source })
        })
        .collect()
}

fn validate_field(field: &str) -> std::result::Result<(), AmenityFormatError> {
    if !field.starts_with('{') || !field.ends_with('}') {
        return Err(AmenityFormatError::MissingBraces);
    }

    let opens = field.matches('{').count();
    let closes = field.matches('}').count();
    if opens != 1 || closes != 1 {
        return Err(AmenityFormatError::UnbalancedBraces);
    }

    if field.matches('"').count() % 2 != 0 {
        return Err(AmenityFormatError::UnbalancedQuotes);
    }

    Ok(())
}

/// Separator unification and punctuation removal happen before the
/// `24_hour` rewrite, which in turn happens before lowercasing.
fn canonicalize(text: &str) -> String {
    let unified: String = text
        .chars()
        .filter(|c| !DROPPED.contains(c))
        .map(|c| if SEPARATORS.contains(&c) { '_' } else { c })
        .collect();

    unified
        .replace("24_hour", "H24")
        .to_lowercase()
        .chars()
        .filter(|c| !LIST_SYNTAX.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_lowercases() {
        let tokens = normalize_amenities(Some("{TV,Wifi,Kitchen}")).unwrap();
        assert_eq!(tokens, vec!["tv", "wifi", "kitchen"]);
    }

    #[test]
    fn test_quoted_names_with_separators() {
        let tokens =
            normalize_amenities(Some(r#"{"Family/kid friendly","Self check-in"}"#)).unwrap();
        assert_eq!(tokens, vec!["family_kid_friendly", "self_check_in"]);
    }

    #[test]
    fn test_drops_parentheses_and_curly_apostrophe() {
        assert_eq!(normalize_token("Washer (in unit)"), "washer_in_unit");
        assert_eq!(normalize_token("Host\u{2019}s greeting"), "hosts_greeting");
    }

    #[test]
    fn test_hour_rewrite_follows_separator_unification() {
        assert_eq!(normalize_token("24-hour check-in"), "h24_check_in");
        assert_eq!(normalize_token("24 hour check in"), "h24_check_in");
        assert_eq!(normalize_token("24 hour check-in"), "h24_check_in");
    }

    #[test]
    fn test_rewrite_is_case_sensitive_before_lowercasing() {
        // Only the lowercase spelling is rewritten; lowercasing comes after.
        assert_eq!(normalize_token("24-Hour check-in"), "24_hour_check_in");
    }

    #[test]
    fn test_missing_and_blank_fields_are_empty() {
        assert!(normalize_amenities(None).unwrap().is_empty());
        assert!(normalize_amenities(Some("")).unwrap().is_empty());
        assert!(normalize_amenities(Some("   ")).unwrap().is_empty());
    }

    #[test]
    fn test_empty_segments_are_preserved() {
        assert_eq!(normalize_amenities(Some("{}")).unwrap(), vec![""]);
        assert_eq!(normalize_amenities(Some("{Wifi,}")).unwrap(), vec!["wifi", ""]);
    }

    #[test]
    fn test_rejects_malformed_fields() {
        assert_eq!(
            normalize_amenities(Some("TV,Wifi")),
            Err(AmenityFormatError::MissingBraces)
        );
        assert_eq!(
            normalize_amenities(Some("{TV,{Wifi}")),
            Err(AmenityFormatError::UnbalancedBraces)
        );
        assert_eq!(
            normalize_amenities(Some(r#"{"TV,Wifi}"#)),
            Err(AmenityFormatError::UnbalancedQuotes)
        );
    }

    #[test]
    fn test_normalizing_normalized_tokens_is_a_no_op() {
        let tokens = normalize_amenities(Some(
            r#"{TV,"Free parking on premises","Laptop-friendly workspace","24-hour check-in"}"#,
        ))
        .unwrap();
        for token in &tokens {
            assert_eq!(&normalize_token(token), token);
        }
    }

    #[test]
    fn test_column_errors_carry_row_index() {
        let fields = vec![Some("{Wifi}".to_string()), None, Some("{TV".to_string())];
        match normalize_column(&fields) {
            Err(FeatureError::MalformedAmenityField { row, source }) => {
                assert_eq!(row, 2);
                assert_eq!(source, AmenityFormatError::MissingBraces);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

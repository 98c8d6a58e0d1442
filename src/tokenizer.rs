use data_error::{CsvError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: u8 = b',';

/// How empty fields produced by adjacent, leading or trailing
/// delimiters are treated.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldPolicy {
    /// Every delimiter separates two fields, so `"a,,b,"` has four fields
    /// and the empty ones are kept as empty strings.
    #[default]
    Preserve,
    /// Empty fields are dropped, so `",a,,b,"` yields only `a` and `b`.
    Collapse,
}

/// Split a single line into its fields.
///
/// Quote characters have no special meaning: a delimiter inside quotes
/// still splits the field. An empty line has no fields at all.
///
/// `delimiter` must be an ASCII byte, as returned by
/// [`validate_delimiter`]. A byte above `0x7F` is not a character on its
/// own in UTF-8 text.
pub fn tokenize(line: &str, delimiter: u8, policy: FieldPolicy) -> Vec<String> {
    debug_assert!(delimiter.is_ascii(), "delimiter must be ASCII");
    if line.is_empty() {
        return Vec::new();
    }

    let fields = line.split(char::from(delimiter));
    match policy {
        FieldPolicy::Preserve => fields.map(str::to_owned).collect(),
        FieldPolicy::Collapse => fields
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect(),
    }
}

/// Check that `delimiter` fits in one byte and cannot be confused
/// with a line terminator.
pub fn validate_delimiter(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '\n' || delimiter == '\r' {
        return Err(CsvError::InvalidArgument(format!(
            "delimiter {:?} must be a single byte and not a line terminator",
            delimiter
        )));
    }
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case("a,b,c", FieldPolicy::Preserve, &["a", "b", "c"])]
    #[case("a,b,c", FieldPolicy::Collapse, &["a", "b", "c"])]
    #[case("a,,b", FieldPolicy::Preserve, &["a", "", "b"])]
    #[case("a,,b", FieldPolicy::Collapse, &["a", "b"])]
    #[case("a,b,", FieldPolicy::Preserve, &["a", "b", ""])]
    #[case("a,b,", FieldPolicy::Collapse, &["a", "b"])]
    #[case(",a", FieldPolicy::Preserve, &["", "a"])]
    #[case(",a", FieldPolicy::Collapse, &["a"])]
    #[case(",", FieldPolicy::Preserve, &["", ""])]
    #[case(",", FieldPolicy::Collapse, &[])]
    #[case("", FieldPolicy::Preserve, &[])]
    #[case("", FieldPolicy::Collapse, &[])]
    #[case("\"x,y\",z", FieldPolicy::Preserve, &["\"x", "y\"", "z"])]
    fn tokenize_cases(
        #[case] line: &str,
        #[case] policy: FieldPolicy,
        #[case] expected: &[&str],
    ) {
        assert_eq!(tokenize(line, b',', policy), expected);
    }

    #[test]
    fn tokenize_with_custom_delimiter() {
        assert_eq!(
            tokenize("1;2;3", b';', FieldPolicy::Preserve),
            vec!["1", "2", "3"]
        );
        assert_eq!(
            tokenize("1,2;3", b';', FieldPolicy::Preserve),
            vec!["1,2", "3"]
        );
    }

    #[test]
    fn tokenize_keeps_multibyte_text_intact() {
        assert_eq!(
            tokenize("héllo|wörld", b'|', FieldPolicy::Preserve),
            vec!["héllo", "wörld"]
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "delimiter must be ASCII")]
    fn tokenize_refuses_non_ascii_delimiter() {
        tokenize("a\u{e9}b", 0xE9, FieldPolicy::Preserve);
    }

    #[rstest]
    #[case(',', Some(b','))]
    #[case('\t', Some(b'\t'))]
    #[case('\n', None)]
    #[case('\r', None)]
    #[case('é', None)]
    fn validate_delimiter_cases(
        #[case] delimiter: char,
        #[case] expected: Option<u8>,
    ) {
        assert_eq!(validate_delimiter(delimiter).ok(), expected);
    }

    #[quickcheck]
    fn prop_line_without_delimiter_is_one_field(line: String) -> bool {
        let line = line.replace(',', "");
        if line.is_empty() {
            return true;
        }
        tokenize(&line, b',', FieldPolicy::Preserve) == vec![line.clone()]
            && tokenize(&line, b',', FieldPolicy::Collapse) == vec![line]
    }

    #[quickcheck]
    fn prop_preserve_inverts_join(fields: Vec<String>) -> bool {
        let fields: Vec<String> =
            fields.iter().map(|f| f.replace(',', "")).collect();
        let line = fields.join(",");
        if line.is_empty() {
            return true;
        }
        tokenize(&line, b',', FieldPolicy::Preserve) == fields
    }

    #[quickcheck]
    fn prop_collapse_never_yields_empty_fields(line: String) -> bool {
        tokenize(&line, b',', FieldPolicy::Collapse)
            .iter()
            .all(|field| !field.is_empty())
    }
}

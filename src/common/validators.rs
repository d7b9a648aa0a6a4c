use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DNA: Regex = Regex::new("^[ATGC]*$").expect("static regex");
    static ref CONTAINER_NAME: Regex = Regex::new("^[^/ ]+$").expect("static regex");
    static ref TAG_DISALLOWED: Regex = Regex::new("[^A-Za-z0-9:-]").expect("static regex");
}

/// Sequences, primers, barcodes and indexes are upper-case nucleotides only.
pub fn is_dna(value: &str) -> bool {
    DNA.is_match(value)
}

/// Container names may not contain a slash or a space.
pub fn is_valid_container_name(value: &str) -> bool {
    CONTAINER_NAME.is_match(value)
}

/// Spaces become dashes, anything outside `[A-Za-z0-9:-]` is dropped, and
/// the result is lower-cased.
pub fn normalize_tag(value: &str) -> String {
    let dashed = value.trim().replace(' ', "-");
    TAG_DISALLOWED.replace_all(&dashed, "").to_lowercase()
}

/// Returns the name of the first field carrying a non-DNA value.
pub fn first_non_dna<'a, I>(fields: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    fields
        .into_iter()
        .find(|(_, value)| value.is_some_and(|v| !is_dna(v)))
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_strings() {
        assert!(is_dna("ATGCGTA"));
        assert!(is_dna(""));
        assert!(!is_dna("ATGN"));
        assert!(!is_dna("atgc"));
    }

    #[test]
    fn test_container_names() {
        assert!(is_valid_container_name("freezer-1"));
        assert!(!is_valid_container_name("freezer 1"));
        assert!(!is_valid_container_name("lab/room"));
        assert!(!is_valid_container_name(""));
    }

    #[test]
    fn test_tag_normalization() {
        assert_eq!(normalize_tag("Open Source"), "open-source");
        assert_eq!(normalize_tag("E.coli: K12!"), "ecoli:-k12");
        assert_eq!(normalize_tag("  cds "), "cds");
    }

    #[test]
    fn test_first_non_dna_field() {
        let fields = [
            ("primer_forward", Some("ATG")),
            ("barcode", None),
            ("primer_reverse", Some("ATX")),
        ];
        assert_eq!(first_non_dna(fields), Some("primer_reverse"));
        assert_eq!(first_non_dna([("sequence", Some("GATTACA"))]), None);
    }
}

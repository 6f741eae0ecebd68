//! Deterministic integrity tagging.
//!
//! The tag is a SHA-256 fingerprint over the record's identity triple,
//! joined with a fixed delimiter. It proves the triple has not changed since
//! the last successful mutation; it is *not* an authenticated signature — it
//! carries no key material and anyone holding the three fields can reproduce
//! it. Clinical content is deliberately outside its scope.

use sha2::{Digest, Sha256};

/// Delimiter between the tag's inputs. Wire-frozen: changing it changes
/// every tag in existing datasets.
const TAG_DELIMITER: char = '|';

/// Derives the integrity tag for `(form_id, doctor_id, timestamp)`.
///
/// The result is the lowercase hex SHA-256 digest of
/// `"<formId>|<doctorId>|<timestamp>"`. Any change to any input, including
/// reformatting the timestamp string, yields a different tag.
pub fn tag(form_id: &str, doctor_id: &str, timestamp: &str) -> String {
    let data = format!("{form_id}{TAG_DELIMITER}{doctor_id}{TAG_DELIMITER}{timestamp}");
    let digest = Sha256::digest(data.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_triples_hash_to_known_tags() {
        // Fixed vectors shared with prior writers of the same datasets.
        assert_eq!(
            tag("F1", "D1", "2024-01-01T00:00:00Z"),
            "603ac9a66c2162ca89040906d837a9450bbdbac60296e0573b674d8ea68d9d52"
        );
        assert_eq!(
            tag("FORM-9", "DOC-3", "2024-06-01T08:30:00Z"),
            "bd1fdaacbb738c11cf6017e7aec700ee37176073e529d252cad077ef80c3e189"
        );
    }

    #[test]
    fn tag_is_deterministic() {
        let a = tag("F1", "D1", "2024-01-01T00:00:00Z");
        let b = tag("F1", "D1", "2024-01-01T00:00:00Z");
        assert_eq!(a, b);
    }

    #[test]
    fn every_input_is_significant() {
        let base = tag("F1", "D1", "2024-01-01T00:00:00Z");
        assert_ne!(base, tag("F2", "D1", "2024-01-01T00:00:00Z"));
        assert_ne!(base, tag("F1", "D2", "2024-01-01T00:00:00Z"));
        assert_ne!(base, tag("F1", "D1", "2024-01-01T00:00:01Z"));
    }

    #[test]
    fn input_order_is_significant() {
        assert_ne!(
            tag("a", "b", "c"),
            tag("b", "a", "c"),
        );
    }

    #[test]
    fn tag_is_lowercase_hex_of_sha256_length() {
        let t = tag("F1", "D1", "2024-01-01T00:00:00Z");
        assert_eq!(t.len(), 64);
        assert!(t.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

//! Cleanup of identifiers and names returned by the Route 53 API

use super::normalize::normalize_zone_name;

/// "/hostedzone/Z1D633PJN98FT9" -> "Z1D633PJN98FT9"
pub fn clean_zone_id(id: &str) -> &str {
    id.strip_prefix("/hostedzone/").unwrap_or(id)
}

/// "/delegationset/N1PA6795SAMPLE" -> "N1PA6795SAMPLE"
pub fn clean_delegation_set_id(id: &str) -> &str {
    id.strip_prefix("/delegationset/").unwrap_or(id)
}

/// "/change/C2682N5HXP0BZ4" -> "C2682N5HXP0BZ4"
pub fn clean_change_id(id: &str) -> &str {
    id.strip_prefix("/change/").unwrap_or(id)
}

/// "/healthcheck/abcdef11-2222-3333-4444-555555fedcba" -> "abcdef11-..."
pub fn clean_health_check_id(id: &str) -> &str {
    id.strip_prefix("/healthcheck/").unwrap_or(id)
}

/// Decode the `\DDD` octal escapes Route 53 puts into record names
///
/// - "\052.example.com" -> "*.example.com"
/// - "\100.example.com" -> "@.example.com"
///
/// Names holding a backslash that does not start an octal escape, or whose
/// decoded bytes are not UTF-8, are returned unchanged.
pub fn clean_record_name(name: &str) -> String {
    if !name.contains('\\') {
        return name.to_string();
    }

    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match decode_octal(&bytes[i + 1..]) {
            Some(b) => {
                out.push(b);
                i += 4;
            }
            None => {
                log::debug!("keeping record name {:?}: malformed escape at byte {}", name, i);
                return name.to_string();
            }
        }
    }

    String::from_utf8(out).unwrap_or_else(|_| name.to_string())
}

fn decode_octal(rest: &[u8]) -> Option<u8> {
    let digits = rest.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, d| acc * 8 + u16::from(d - b'0'));
    u8::try_from(value).ok()
}

/// Expand a record name relative to its hosted zone into a fully-qualified name
///
/// - ("www", "example.com") -> "www.example.com"
/// - ("test.example.com.", "example.com") -> "test.example.com"
/// - ("", "example.com") -> "example.com"
pub fn expand_record_name(name: &str, zone: &str) -> String {
    let record = normalize_zone_name(name);
    let zone = normalize_zone_name(zone);
    if zone.is_empty() || zone == "." {
        return record;
    }
    if record.is_empty() {
        return zone;
    }
    if record == zone || record.ends_with(&format!(".{}", zone)) {
        record
    } else {
        format!("{}.{}", record, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_ids() {
        assert_eq!(clean_zone_id("/hostedzone/Z1D633PJN98FT9"), "Z1D633PJN98FT9");
        assert_eq!(clean_zone_id("Z1D633PJN98FT9"), "Z1D633PJN98FT9");
        assert_eq!(
            clean_delegation_set_id("/delegationset/N1PA6795SAMPLE"),
            "N1PA6795SAMPLE"
        );
        assert_eq!(clean_change_id("/change/C2682N5HXP0BZ4"), "C2682N5HXP0BZ4");
        assert_eq!(clean_health_check_id("/healthcheck/abc-123"), "abc-123");
        // prefixes of another kind are left alone
        assert_eq!(clean_change_id("/hostedzone/Z1"), "/hostedzone/Z1");
    }

    #[test]
    fn test_clean_record_name() {
        let cases = [
            ("www.nonexample.com", "www.nonexample.com"),
            ("\\052.nonexample.com", "*.nonexample.com"),
            ("\\100.nonexample.com", "@.nonexample.com"),
            ("\\043.nonexample.com", "#.nonexample.com"),
            ("nonexample.com", "nonexample.com"),
            ("a\\057b.nonexample.com", "a/b.nonexample.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(clean_record_name(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_clean_record_name_decodes_utf8() {
        assert_eq!(clean_record_name("caf\\303\\251.example"), "caf\u{e9}.example");
    }

    #[test]
    fn test_clean_record_name_keeps_malformed_input() {
        for name in ["a\\", "\\12", "\\089.example.com", "\\400.example.com", "\\303.example"] {
            assert_eq!(clean_record_name(name), name);
        }
    }

    #[test]
    fn test_expand_record_name() {
        let cases = [
            ("www", "www.nonexample.com"),
            ("www.", "www.nonexample.com"),
            ("dev.www", "dev.www.nonexample.com"),
            ("*", "*.nonexample.com"),
            ("nonexample.com", "nonexample.com"),
            ("test.nonexample.com", "test.nonexample.com"),
            ("test.nonexample.com.", "test.nonexample.com"),
            ("WWW", "www.nonexample.com"),
            ("", "nonexample.com"),
            // a shared suffix is not a parent zone
            ("anonexample.com", "anonexample.com.nonexample.com"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                expand_record_name(input, "nonexample.com"),
                expected,
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_expand_record_name_with_dotted_zone() {
        assert_eq!(expand_record_name("www", "Example.com."), "www.example.com");
        assert_eq!(expand_record_name("www", "."), "www");
    }
}

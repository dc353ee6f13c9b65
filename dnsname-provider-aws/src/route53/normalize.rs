//! Domain name normalization
//!
//! Converts user-entered zone names, record names and alias targets into the
//! representation Route 53 returns, so that configuration and API state can be
//! compared as plain strings.
//!
//! See <https://docs.aws.amazon.com/Route53/latest/DeveloperGuide/DomainNameFormat.html>

use dnsname_core::value::NameInput;

/// Bytes Route 53 stores verbatim. Every other byte is written as `\DDD`.
const VERBATIM: [bool; 256] = verbatim_table();

const fn verbatim_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < table.len() {
        let b = i as u8;
        // '.' separates labels and is never escaped
        table[i] = b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b'.';
        i += 1;
    }
    table
}

/// Returns true if `rest` starts with a `\DDD` escape sequence
fn starts_with_escape(rest: &[u8]) -> bool {
    rest.len() >= 4 && rest[0] == b'\\' && rest[1..4].iter().all(u8::is_ascii_digit)
}

fn trim_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Escape a name the way the Route 53 API stores it
///
/// Existing `\DDD` sequences are kept as they are. Case is not changed.
/// - "a/b.example.com" -> "a\057b.example.com"
/// - "\052.example.com" -> "\052.example.com"
pub fn normalize_name_into_api_representation(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if starts_with_escape(&bytes[i..]) {
            // four ASCII bytes, so the slice is on char boundaries
            out.push_str(&name[i..i + 4]);
            i += 4;
            continue;
        }

        let b = bytes[i];
        if VERBATIM[b as usize] {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\{:03o}", b));
        }
        i += 1;
    }

    out
}

/// Lower-case a hosted zone name and strip one trailing dot
///
/// The root zone "." is kept as is. No escaping is applied.
/// - "AbC.example.com" -> "abc.example.com"
/// - "www.example.com." -> "www.example.com"
pub fn normalize_zone_name(input: impl Into<NameInput>) -> String {
    let input = input.into();
    let name = input.as_str();
    if name == "." {
        return name.to_string();
    }
    trim_trailing_dot(name).to_lowercase()
}

/// Canonical form of a domain name: trailing dot removed, escaped, lower-cased
///
/// "." passes through unchanged.
pub fn normalize_domain_name(input: impl Into<NameInput>) -> String {
    canonical_domain_name(input.into().as_str())
}

fn canonical_domain_name(name: &str) -> String {
    if name == "." {
        return name.to_string();
    }
    normalize_name_into_api_representation(trim_trailing_dot(name)).to_ascii_lowercase()
}

/// Canonical form of an alias target domain name
///
/// Unlike [`normalize_domain_name`], a single "." is not passed through as is:
/// the trailing dot is always stripped first, so "." becomes "".
pub fn normalize_alias_domain_name(input: impl Into<NameInput>) -> String {
    let input = input.into();
    canonical_domain_name(trim_trailing_dot(input.as_str()))
}

/// Canonical form of an alias record's target name
/// - "NAME-123456789.region.elb.amazonaws.com" -> "name-123456789.region.elb.amazonaws.com"
/// - "\052.example.com" -> "\052.example.com"
pub fn normalize_alias_name(input: impl Into<NameInput>) -> String {
    normalize_alias_domain_name(input)
}

const DUALSTACK_PREFIX: &str = "dualstack.";

/// Canonical form of a load balancer alias target
///
/// Route 53 reports ELB targets without the `dualstack.` label that ELB
/// hands out, so it is removed before normalizing.
/// - "dualstack.name-123.region.elb.amazonaws.com" -> "name-123.region.elb.amazonaws.com"
pub fn normalize_elb_alias_name(input: impl Into<NameInput>) -> String {
    let input = input.into();
    let name = input.as_str();
    let name = match name.get(..DUALSTACK_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(DUALSTACK_PREFIX) => {
            &name[DUALSTACK_PREFIX.len()..]
        }
        _ => name,
    };
    normalize_alias_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use dnsname_core::value::Value;

    #[test]
    fn api_representation_keeps_safe_characters() {
        for name in [
            "www",
            "Mixed-Case_label",
            "0123456789",
            "abcdefghijklmnopqrstuvwxyz",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            "_dmarc.example.com",
        ] {
            assert_eq!(normalize_name_into_api_representation(name), name);
        }
    }

    #[test]
    fn api_representation_escapes_special_characters() {
        let cases = [
            ("*", "\\052"),
            ("!", "\\041"),
            ("/", "\\057"),
            ("~", "\\176"),
            ("@", "\\100"),
            ("#", "\\043"),
            (" ", "\\040"),
        ];
        for (input, expected) in cases {
            assert_eq!(
                normalize_name_into_api_representation(input),
                expected,
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn api_representation_escapes_inside_names() {
        assert_eq!(
            normalize_name_into_api_representation("a/b.example.com"),
            "a\\057b.example.com"
        );
        assert_eq!(
            normalize_name_into_api_representation("*.example.com"),
            "\\052.example.com"
        );
    }

    #[test]
    fn api_representation_keeps_existing_escapes() {
        for name in ["a\\000c.example.com", "a\\056c.example.com", "\\052.example.com"] {
            assert_eq!(normalize_name_into_api_representation(name), name);
        }
    }

    #[test]
    fn api_representation_escapes_incomplete_sequences() {
        // a backslash without three digits is an ordinary character
        assert_eq!(normalize_name_into_api_representation("a\\"), "a\\134");
        assert_eq!(normalize_name_into_api_representation("\\12"), "\\13412");
        assert_eq!(normalize_name_into_api_representation("\\x41"), "\\134x41");
    }

    #[test]
    fn api_representation_escapes_each_utf8_byte() {
        // 'é' is 0xC3 0xA9
        assert_eq!(
            normalize_name_into_api_representation("caf\u{e9}.example"),
            "caf\\303\\251.example"
        );
    }

    #[test]
    fn api_representation_does_not_change_case() {
        assert_eq!(
            normalize_name_into_api_representation("WWW.Example.COM"),
            "WWW.Example.COM"
        );
    }

    #[test]
    fn api_representation_is_idempotent() {
        for name in ["a/b.example.com", "*.example.com", "caf\u{e9}", "a\\", "x y~z"] {
            let once = normalize_name_into_api_representation(name);
            assert_eq!(normalize_name_into_api_representation(&once), once);
        }
    }

    #[test]
    fn zone_name_lower_cases_and_trims_dot() {
        assert_eq!(normalize_zone_name("AbC.example.com"), "abc.example.com");
        assert_eq!(normalize_zone_name("www.example.com."), "www.example.com");
        assert_eq!(normalize_zone_name("example.com"), "example.com");
        // only one dot is removed
        assert_eq!(normalize_zone_name("example.com.."), "example.com.");
        assert_eq!(normalize_zone_name(""), "");
    }

    #[test]
    fn zone_name_keeps_root_zone() {
        assert_eq!(normalize_zone_name("."), ".");
    }

    #[test]
    fn zone_name_does_not_escape() {
        assert_eq!(normalize_zone_name("*.Example.com."), "*.example.com");
    }

    #[test]
    fn zone_name_of_absent_values_is_empty() {
        assert_eq!(normalize_zone_name(None::<String>), "");
        assert_eq!(normalize_zone_name(NameInput::Absent), "");
        assert_eq!(normalize_zone_name(&Value::Int(42)), "");
        assert_eq!(normalize_zone_name(&Value::Bool(true)), "");
        assert_eq!(
            normalize_zone_name(Some("Example.COM.".to_string())),
            "example.com"
        );
    }

    #[test]
    fn alias_name_keeps_escaped_wildcard() {
        assert_eq!(normalize_alias_name("\\052.example.com"), "\\052.example.com");
    }

    #[test]
    fn alias_name_lower_cases_elb_targets() {
        assert_eq!(
            normalize_alias_name("NAME-123456789.region.elb.amazonaws.com"),
            "name-123456789.region.elb.amazonaws.com"
        );
    }

    #[test]
    fn alias_name_trims_dot_and_escapes() {
        assert_eq!(normalize_alias_name("www.example.com."), "www.example.com");
        assert_eq!(normalize_alias_name("*.Example.com."), "\\052.example.com");
    }

    #[test]
    fn alias_name_does_not_keep_root() {
        assert_eq!(normalize_alias_name("."), "");
        assert_eq!(normalize_alias_domain_name("."), "");
        assert_eq!(normalize_alias_name(None::<&str>), "");
    }

    #[test]
    fn domain_name_keeps_root() {
        assert_eq!(normalize_domain_name("."), ".");
        assert_eq!(normalize_domain_name("A/B.Example.com."), "a\\057b.example.com");
    }

    #[test]
    fn alias_domain_name_strips_dot_twice() {
        // the first dot is stripped by the alias variant, the second by the
        // shared canonicalization
        assert_eq!(normalize_alias_domain_name("example.com.."), "example.com");
        assert_eq!(normalize_alias_domain_name(".."), ".");
    }

    #[test]
    fn elb_alias_name_strips_dualstack() {
        let cases = [
            ("www.example.com", "www.example.com"),
            ("www.example.com.", "www.example.com"),
            (
                "dualstack.name-123456789.region.elb.amazonaws.com",
                "name-123456789.region.elb.amazonaws.com",
            ),
            (
                "DualStack.test-987654321.region.elb.amazonaws.com",
                "test-987654321.region.elb.amazonaws.com",
            ),
            ("dualstacktest.com", "dualstacktest.com"),
            (
                "NAME-123456789.region.elb.amazonaws.com",
                "name-123456789.region.elb.amazonaws.com",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_elb_alias_name(input), expected, "input: {}", input);
        }
    }
}

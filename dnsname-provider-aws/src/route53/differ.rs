//! Differ - Name-aware comparison of desired and current attributes
//!
//! Route 53 hands back names in its own representation. Attributes holding
//! names are compared through the matching normalizer so that case, trailing
//! dots and escaping alone never show up as a change.

use std::collections::HashMap;

use dnsname_core::value::{NameInput, Value, flatten_attributes};

use super::normalize::{
    normalize_alias_name, normalize_domain_name, normalize_name_into_api_representation,
    normalize_zone_name,
};

/// Which normalization applies to an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
    /// Hosted zone names and FQDNs: lower-cased, trailing dot removed
    ZoneName,
    /// Alias targets
    AliasName,
    /// Record names: escaped, lower-cased, trailing dot removed
    RecordName,
    /// Escaping only
    ApiRepresentation,
}

impl NameKind {
    pub fn normalize(&self, input: impl Into<NameInput>) -> String {
        let input = input.into();
        match self {
            NameKind::ZoneName => normalize_zone_name(input),
            NameKind::AliasName => normalize_alias_name(input),
            NameKind::RecordName => normalize_domain_name(input),
            NameKind::ApiRepresentation => normalize_name_into_api_representation(input.as_str()),
        }
    }
}

/// Options for name-aware diffing
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Skip attributes whose key starts with `_`
    pub skip_internal: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            skip_internal: true,
        }
    }
}

/// Compare two attribute values by their normalized names
///
/// Values that are not strings normalize to "", so a missing value and a
/// non-string value compare equal.
pub fn names_equivalent(kind: NameKind, desired: Option<&Value>, current: Option<&Value>) -> bool {
    kind.normalize(desired) == kind.normalize(current)
}

/// Find changed attributes between desired and current state
///
/// Nested maps are flattened to dotted keys first, so `kinds` can address
/// `alias.name`. Keys without a `NameKind` are compared by equality.
/// The result is sorted.
pub fn find_changed_name_attributes(
    desired: &HashMap<String, Value>,
    current: &HashMap<String, Value>,
    kinds: &HashMap<&str, NameKind>,
    options: &DiffOptions,
) -> Vec<String> {
    let desired = flatten_attributes(desired);
    let current = flatten_attributes(current);
    let mut changed = Vec::new();

    for (key, desired_value) in &desired {
        if options.skip_internal && key.starts_with('_') {
            continue;
        }

        let current_value = current.get(key);
        let same = match kinds.get(key.as_str()) {
            Some(kind) => {
                let same = names_equivalent(*kind, Some(desired_value), current_value);
                if same && current_value != Some(desired_value) {
                    log::debug!(
                        "{}: {:?} and {:?} are the same {:?}, ignoring",
                        key,
                        desired_value,
                        current_value,
                        kind
                    );
                }
                same
            }
            None => current_value == Some(desired_value),
        };

        if !same {
            log::trace!("{}: {:?} -> {:?}", key, current_value, desired_value);
            changed.push(key.clone());
        }
    }

    changed.sort();
    changed
}

/// Name attributes of a health check
pub fn health_check_name_kinds() -> HashMap<&'static str, NameKind> {
    HashMap::from([("fqdn", NameKind::ZoneName)])
}

/// Name attributes of a record set
pub fn record_name_kinds() -> HashMap<&'static str, NameKind> {
    HashMap::from([
        ("name", NameKind::RecordName),
        ("fqdn", NameKind::RecordName),
        ("alias.name", NameKind::AliasName),
    ])
}

/// Name attributes of a hosted zone
pub fn hosted_zone_name_kinds() -> HashMap<&'static str, NameKind> {
    HashMap::from([("name", NameKind::ZoneName)])
}

/// Name attributes of a resource type
pub fn name_kinds_for(resource_type: &str) -> Option<HashMap<&'static str, NameKind>> {
    match resource_type {
        "route53.health_check" => Some(health_check_name_kinds()),
        "route53.record" => Some(record_name_kinds()),
        "route53.zone" => Some(hosted_zone_name_kinds()),
        _ => None,
    }
}

//! Record ID - Composite identifier of a record set
//!
//! A record set has no ID of its own in Route 53. It is identified by
//! `ZONEID_name_TYPE`, with `_SETID` appended for records that carry a set
//! identifier (weighted, latency, failover, ...).

use std::fmt;
use std::str::FromStr;

use dnsname_core::error::{NameError, NameResult};
use serde::{Deserialize, Serialize};

/// DNS record types supported by Route 53
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Ds,
    Https,
    Mx,
    Naptr,
    Ns,
    Ptr,
    Soa,
    Spf,
    Srv,
    Sshfp,
    Svcb,
    Tlsa,
    Txt,
}

impl RecordType {
    pub const ALL: &'static [RecordType] = &[
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Caa,
        RecordType::Cname,
        RecordType::Ds,
        RecordType::Https,
        RecordType::Mx,
        RecordType::Naptr,
        RecordType::Ns,
        RecordType::Ptr,
        RecordType::Soa,
        RecordType::Spf,
        RecordType::Srv,
        RecordType::Sshfp,
        RecordType::Svcb,
        RecordType::Tlsa,
        RecordType::Txt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Ds => "DS",
            RecordType::Https => "HTTPS",
            RecordType::Mx => "MX",
            RecordType::Naptr => "NAPTR",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
            RecordType::Soa => "SOA",
            RecordType::Spf => "SPF",
            RecordType::Srv => "SRV",
            RecordType::Sshfp => "SSHFP",
            RecordType::Svcb => "SVCB",
            RecordType::Tlsa => "TLSA",
            RecordType::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = NameError;

    /// Record types are matched case-sensitively, as the API returns them
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NameError::UnknownRecordType(s.to_string()))
    }
}

/// Identifier of a record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordId {
    pub zone_id: String,
    /// Record name without the trailing dot
    pub name: String,
    pub record_type: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,
}

impl RecordId {
    pub fn new(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        record_type: RecordType,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            record_type,
            set_identifier: None,
        }
    }

    pub fn with_set_identifier(mut self, set_identifier: impl Into<String>) -> Self {
        self.set_identifier = Some(set_identifier.into());
        self
    }

    /// Parse `ZONEID_name_TYPE[_SETID]`
    ///
    /// Names may contain underscores (`_dmarc.example.com`), so the type is
    /// the right-most `_`-separated token that is a known record type.
    /// Everything after it is the set identifier.
    pub fn parse(id: &str) -> NameResult<Self> {
        let (zone_id, rest) = id
            .split_once('_')
            .ok_or_else(|| NameError::invalid_record_id(id, "missing '_' separator"))?;
        if zone_id.is_empty() {
            return Err(NameError::invalid_record_id(id, "missing hosted zone ID"));
        }

        let separators: Vec<usize> = rest.match_indices('_').map(|(i, _)| i).collect();
        for k in (0..separators.len()).rev() {
            let start = separators[k] + 1;
            let end = separators.get(k + 1).copied().unwrap_or(rest.len());
            let Ok(record_type) = rest[start..end].parse::<RecordType>() else {
                continue;
            };

            let name = &rest[..separators[k]];
            let name = name.strip_suffix('.').unwrap_or(name);
            if name.is_empty() {
                return Err(NameError::invalid_record_id(id, "missing record name"));
            }

            let set_identifier = (end < rest.len()).then(|| rest[end + 1..].to_string());
            if set_identifier.as_deref() == Some("") {
                return Err(NameError::invalid_record_id(id, "empty set identifier"));
            }

            return Ok(Self {
                zone_id: zone_id.to_string(),
                name: name.to_string(),
                record_type,
                set_identifier,
            });
        }

        Err(NameError::invalid_record_id(id, "missing record type"))
    }
}

impl FromStr for RecordId {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.zone_id, self.name, self.record_type)?;
        if let Some(ref set) = self.set_identifier {
            write!(f, "_{}", set)?;
        }
        Ok(())
    }
}

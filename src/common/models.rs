use std::fmt;
use std::str::FromStr;

use super::{Result, ValidationSnafu};

/// DNS record types Porkbun accepts.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    A,
    AAAA,
    CNAME,
    MX,
    NS,
    PTR,
    SRV,
    SOA,
    TXT,
    CAA,
    DS,
    DNSKEY,
}

impl RecordKind {
    pub const ALL: [RecordKind; 12] = [
        RecordKind::A,
        RecordKind::AAAA,
        RecordKind::CNAME,
        RecordKind::MX,
        RecordKind::NS,
        RecordKind::PTR,
        RecordKind::SRV,
        RecordKind::SOA,
        RecordKind::TXT,
        RecordKind::CAA,
        RecordKind::DS,
        RecordKind::DNSKEY,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::AAAA => "AAAA",
            RecordKind::CNAME => "CNAME",
            RecordKind::MX => "MX",
            RecordKind::NS => "NS",
            RecordKind::PTR => "PTR",
            RecordKind::SRV => "SRV",
            RecordKind::SOA => "SOA",
            RecordKind::TXT => "TXT",
            RecordKind::CAA => "CAA",
            RecordKind::DS => "DS",
            RecordKind::DNSKEY => "DNSKEY",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = super::Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| {
                ValidationSnafu {
                    message: format!("unsupported record type '{s}'"),
                }
                .build()
            })
    }
}

/// A DNS record, either declared in the configuration or listed by the
/// provider.
///
/// Configured records carry a name relative to their domain (empty for the
/// apex) and never have an `id`. Listed records carry the provider's
/// absolute name and always have one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub kind: RecordKind,
    pub content: String,
    pub ttl: Option<u32>,
    pub priority: Option<u32>,
    pub id: Option<String>,
}

impl Record {
    pub fn new(name: impl Into<String>, kind: RecordKind, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            content: content.into(),
            ttl: None,
            priority: None,
            id: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// A domain as seen by the planner.
///
/// `existing_records` is `None` when the provider listing failed, which the
/// planner treats as a skip rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Domain {
    pub name: String,
    pub desired_records: Option<Vec<Record>>,
    pub existing_records: Option<Vec<Record>>,
}

/// The remote side of a sync run.
pub trait RecordService {
    /// Public address of the caller as seen by the service. Used as a
    /// credentials check before anything else is attempted.
    fn caller_address(&self) -> Result<String>;
    fn list_records(&self, domain: &str) -> Result<Vec<Record>>;
    /// Returns the identifier assigned to the new record.
    fn create_record(&self, domain: &str, record: &Record) -> Result<String>;
    fn update_record(&self, domain: &str, id: &str, record: &Record) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_parses_case_insensitively() {
        assert_eq!("aaaa".parse::<RecordKind>().unwrap(), RecordKind::AAAA);
        assert_eq!(" Mx ".parse::<RecordKind>().unwrap(), RecordKind::MX);
        assert_eq!("DNSKEY".parse::<RecordKind>().unwrap(), RecordKind::DNSKEY);
    }

    #[test]
    fn record_kind_rejects_unknown() {
        let err = "SPF".parse::<RecordKind>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: unsupported record type 'SPF'"
        );
    }

    #[test]
    fn record_kind_display_round_trips_every_variant() {
        for kind in RecordKind::ALL {
            assert_eq!(kind.to_string().parse::<RecordKind>().unwrap(), kind);
        }
    }
}

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use snafu::ResultExt;

use crate::common::{LoadSnafu, Record, RecordKind, Result, ValidationSnafu};

/// Environment variables with this prefix override file values, using `__`
/// between nested keys (`PORKBUN_API__APIKEY`).
pub const ENV_PREFIX: &str = "PORKBUN";

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub api: crate::porkbun::Config,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub domains: Vec<DomainConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DomainConfig {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<RecordConfig>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecordConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub ttl: Option<u32>,
    #[serde(alias = "prio")]
    pub priority: Option<u32>,
}

/// A key left empty in YAML (`domains:`) is null, not a missing key.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    let value: Option<Vec<T>> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl Config {
    /// Read a YAML document, overlaid by `PORKBUN_` environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();

        config::Config::builder()
            .add_source(config::File::new(&display, config::FileFormat::Yaml))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .context(LoadSnafu { path: display })
    }

    /// Configured records per domain, validated.
    ///
    /// Any invalid domain or record rejects the whole configuration.
    pub fn desired_records(&self) -> Result<BTreeMap<String, Vec<Record>>> {
        let mut seen = HashSet::new();
        let mut domains = BTreeMap::new();

        for domain in self.domains.iter() {
            validate_domain_name(&domain.name)?;
            if !seen.insert(domain.name.as_str()) {
                return ValidationSnafu {
                    message: format!("domain '{}' is configured more than once", domain.name),
                }
                .fail();
            }

            let records = domain
                .records
                .iter()
                .enumerate()
                .map(|(idx, record)| {
                    Record::try_from(record).map_err(|err| {
                        ValidationSnafu {
                            message: format!(
                                "domain '{}', record #{} ('{}'): {}",
                                domain.name,
                                idx + 1,
                                record.name,
                                reason(err),
                            ),
                        }
                        .build()
                    })
                })
                .collect::<Result<Vec<Record>>>()?;

            domains.insert(domain.name.clone(), records);
        }

        Ok(domains)
    }

    pub fn domain_names(&self) -> Vec<String> {
        self.domains.iter().map(|d| d.name.clone()).collect()
    }
}

/// Strip the outer "invalid configuration" wording from a nested error.
fn reason(err: crate::common::Error) -> String {
    match err {
        crate::common::Error::ValidationError { message } => message,
        other => other.to_string(),
    }
}

fn validate_domain_name(name: &str) -> Result<()> {
    match url::Host::parse(name) {
        Ok(url::Host::Domain(host)) if host == name && !name.ends_with('.') => Ok(()),
        _ => ValidationSnafu {
            message: format!("'{name}' is not a valid domain name"),
        }
        .fail(),
    }
}

impl TryFrom<&RecordConfig> for Record {
    type Error = crate::common::Error;

    fn try_from(value: &RecordConfig) -> Result<Self> {
        let kind: RecordKind = value.kind.parse()?;

        if value.name.ends_with('.') || value.name.chars().any(char::is_whitespace) {
            return ValidationSnafu {
                message: "name must be relative to the domain, without whitespace or trailing dot",
            }
            .fail();
        }
        if value.content.trim().is_empty() {
            return ValidationSnafu {
                message: "content must not be empty",
            }
            .fail();
        }

        Ok(Record {
            name: value.name.clone(),
            kind,
            content: value.content.clone(),
            ttl: value.ttl,
            priority: value.priority,
            id: None,
        })
    }
}

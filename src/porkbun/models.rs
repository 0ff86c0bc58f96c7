use snafu::ResultExt;

use crate::common::{self, ProviderSnafu, Record, RecordKind};

pub(super) const STATUS_SUCCESS: &str = "SUCCESS";

/// Envelope shared by every API response. Data fields stay untyped until
/// the caller asks for one.
#[derive(Debug, serde::Deserialize)]
pub(super) struct APIResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(serde::Serialize)]
pub(super) struct APIRequest<'a, P> {
    pub apikey: &'a str,
    pub secretapikey: &'a str,
    #[serde(flatten)]
    pub payload: P,
}

#[derive(serde::Serialize)]
pub(super) struct Empty {}

/// The API is inconsistent about quoting numbers.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub(super) enum Loose {
    Number(u64),
    Text(String),
}

impl Loose {
    fn into_text(self) -> String {
        match self {
            Loose::Number(n) => n.to_string(),
            Loose::Text(s) => s,
        }
    }

    fn into_number(self, field: &str) -> common::Result<Option<u32>> {
        let text = match self {
            Loose::Number(n) => n.to_string(),
            Loose::Text(s) if s.trim().is_empty() => return Ok(None),
            Loose::Text(s) => s,
        };
        text.trim()
            .parse::<u32>()
            .map(Some)
            .boxed_local()
            .context(ProviderSnafu {
                message: format!("Failed to parse {field} '{text}'"),
            })
    }
}

impl From<Loose> for String {
    fn from(value: Loose) -> Self {
        value.into_text()
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub(super) struct DNSRecord {
    pub id: Loose,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub ttl: Option<Loose>,
    #[serde(default)]
    pub prio: Option<Loose>,
}

impl TryFrom<DNSRecord> for Record {
    type Error = common::Error;

    fn try_from(value: DNSRecord) -> common::Result<Self> {
        Ok(Record {
            kind: value.kind.parse::<RecordKind>()?,
            name: value.name,
            content: value.content,
            ttl: value.ttl.map(|v| v.into_number("ttl")).transpose()?.flatten(),
            priority: value
                .prio
                .map(|v| v.into_number("prio"))
                .transpose()?
                .flatten(),
            id: Some(value.id.into()),
        })
    }
}

#[derive(Debug, serde::Serialize)]
pub(super) struct RecordPayload<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<String>,
}

impl<'a> From<&'a Record> for RecordPayload<'a> {
    fn from(value: &'a Record) -> Self {
        Self {
            name: &value.name,
            kind: value.kind.as_str(),
            content: &value.content,
            ttl: value.ttl.map(|ttl| ttl.to_string()),
            prio: value.priority.map(|prio| prio.to_string()),
        }
    }
}

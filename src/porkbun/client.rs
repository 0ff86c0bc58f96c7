use serde::de::DeserializeOwned;
use snafu::{IntoError, ResultExt};

use crate::common::{
    self, key_file_or_string, ProviderSnafu, Record, RecordKind, RequestSnafu, ResponseSnafu,
    Result,
};

use super::models::{
    APIRequest, APIResponse, DNSRecord, Empty, Loose, RecordPayload, STATUS_SUCCESS,
};

pub const SERVICE_NAME: &str = "Porkbun";

/// Client for the Porkbun JSON API.
///
/// Every call is a POST carrying the credentials in its body.
pub struct Porkbun {
    endpoint: url::Url,
    apikey: String,
    secretapikey: String,
    agent: ureq::Agent,
}

impl Porkbun {
    pub fn new(mut endpoint: url::Url, apikey: String, secretapikey: String) -> Self {
        // Url::join drops the last segment unless it ends with a slash.
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        Self {
            endpoint,
            apikey,
            secretapikey,
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn from_config(value: super::Config) -> Result<Self> {
        Ok(Self::new(
            value.endpoint,
            key_file_or_string(value.apikey, "api.apikey")?,
            key_file_or_string(value.secretapikey, "api.secretapikey")?,
        ))
    }

    fn api_call(&self, path: &str, payload: impl serde::Serialize) -> Result<APIResponse> {
        let url = self.endpoint.join(path).boxed_local().context(ProviderSnafu {
            message: format!("Failed to build URL for '{path}'"),
        })?;

        tracing::debug!(
            url = url.as_str(),
            method = "POST",
            service = SERVICE_NAME,
            "Sending request"
        );

        let body = APIRequest {
            apikey: &self.apikey,
            secretapikey: &self.secretapikey,
            payload,
        };

        let resp = match self.agent.post(url.as_str()).send_json(body) {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, resp)) => {
                // Error bodies usually explain themselves.
                let message = resp
                    .into_json::<APIResponse>()
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| {
                        format!("request to '{path}' failed with {code} HTTP status code")
                    });
                return ResponseSnafu { message }.fail();
            }
            Err(err) => {
                return Err(RequestSnafu { endpoint: path }.into_error(Box::new(err)));
            }
        };

        if resp.status() != 200 {
            return ResponseSnafu {
                message: format!(
                    "request to '{path}' failed with {} HTTP status code",
                    resp.status()
                ),
            }
            .fail();
        }

        let body: APIResponse = resp.into_json().boxed_local().context(ProviderSnafu {
            message: format!("invalid response from '{path}'"),
        })?;

        check_status(path, body)
    }

    fn api_call_for<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: impl serde::Serialize,
        field: &str,
    ) -> Result<T> {
        let body = self.api_call(path, payload)?;
        take_field(path, body, field)
    }
}

fn check_status(path: &str, body: APIResponse) -> Result<APIResponse> {
    let Some(status) = body.status.clone() else {
        return ResponseSnafu {
            message: format!("invalid response from '{path}': status field not found"),
        }
        .fail();
    };

    if status != STATUS_SUCCESS {
        return ResponseSnafu {
            message: body.message.unwrap_or_else(|| {
                format!("invalid response from '{path}': no error message provided")
            }),
        }
        .fail();
    }

    Ok(body)
}

fn take_field<T: DeserializeOwned>(path: &str, mut body: APIResponse, field: &str) -> Result<T> {
    let value = body.fields.remove(field).ok_or_else(|| {
        ResponseSnafu {
            message: format!("invalid response from '{path}': '{field}' field not found"),
        }
        .build()
    })?;

    serde_json::from_value(value)
        .boxed_local()
        .context(ProviderSnafu {
            message: format!("invalid response from '{path}': malformed '{field}' field"),
        })
}

/// Convert listed records, leaving out types this crate does not model.
///
/// A record of a known type that fails to convert fails the whole listing,
/// since planning against a partial view would duplicate it.
fn supported_records(domain: &str, listed: Vec<DNSRecord>) -> Result<Vec<Record>> {
    let mut records = Vec::with_capacity(listed.len());
    for record in listed {
        if let Err(err) = record.kind.parse::<RecordKind>() {
            tracing::warn!(
                service = SERVICE_NAME,
                domain,
                name = %record.name,
                kind = %record.kind,
                error = %err,
                "Ignoring unsupported record",
            );
            continue;
        }
        records.push(Record::try_from(record)?);
    }
    Ok(records)
}

fn check_input(domain: &str, record: &Record) -> Result<()> {
    if domain.is_empty() || record.content.is_empty() {
        return ResponseSnafu {
            message: "invalid input values",
        }
        .fail();
    }
    Ok(())
}

impl common::RecordService for Porkbun {
    fn caller_address(&self) -> Result<String> {
        self.api_call_for("ping", Empty {}, "yourIp")
    }

    fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        let path = format!("dns/retrieve/{domain}");
        let listed: Vec<DNSRecord> = self.api_call_for(&path, Empty {}, "records")?;

        let records = supported_records(domain, listed)?;

        tracing::debug!(
            service = SERVICE_NAME,
            domain,
            records = records.len(),
            "Read completed",
        );

        Ok(records)
    }

    fn create_record(&self, domain: &str, record: &Record) -> Result<String> {
        check_input(domain, record)?;
        let path = format!("dns/create/{domain}");
        let id: Loose = self.api_call_for(&path, RecordPayload::from(record), "id")?;
        Ok(id.into())
    }

    fn update_record(&self, domain: &str, id: &str, record: &Record) -> Result<()> {
        check_input(domain, record)?;
        if id.is_empty() {
            return ResponseSnafu {
                message: "invalid input values",
            }
            .fail();
        }
        let path = format!("dns/edit/{domain}/{id}");
        self.api_call(&path, RecordPayload::from(record))?;
        Ok(())
    }
}

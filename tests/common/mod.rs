//! In-memory record service shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};

use porkbun_sync::common::{fqdn, Record, RecordKind, RecordService, ResponseSnafu, Result};

/// Holds listed records per domain and applies creates/updates to them the
/// way the provider does: names become absolute and ids are assigned.
#[derive(Default)]
pub struct MemoryService {
    zones: RefCell<BTreeMap<String, Vec<Record>>>,
    next_id: Cell<u64>,
    calls: RefCell<Vec<String>>,
    unlistable: HashSet<String>,
    rejected: HashSet<String>,
    offline: bool,
}

impl MemoryService {
    /// Listing `domain` fails.
    pub fn unlistable(mut self, domain: &str) -> Self {
        self.unlistable.insert(domain.to_string());
        self
    }

    /// Creating or updating the record at absolute `name` fails.
    pub fn rejecting(mut self, name: &str) -> Self {
        self.rejected.insert(name.to_string());
        self
    }

    /// Every call fails, as with bad credentials.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    pub fn with_zone(self, domain: &str, records: Vec<Record>) -> Self {
        for record in &records {
            let id: u64 = record
                .id
                .as_deref()
                .and_then(|id| id.parse().ok())
                .unwrap_or(0);
            if id >= self.next_id.get() {
                self.next_id.set(id + 1);
            }
        }
        self.zones.borrow_mut().insert(domain.to_string(), records);
        self
    }

    pub fn zone(&self, domain: &str) -> Vec<Record> {
        self.zones.borrow().get(domain).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn fail(&self, message: String) -> Result<()> {
        ResponseSnafu { message }.fail()
    }
}

impl RecordService for MemoryService {
    fn caller_address(&self) -> Result<String> {
        self.calls.borrow_mut().push("ping".into());
        if self.offline {
            return ResponseSnafu {
                message: "Invalid API key. (002)",
            }
            .fail();
        }
        Ok("192.0.2.10".into())
    }

    fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        self.calls.borrow_mut().push(format!("list {domain}"));
        if self.offline || self.unlistable.contains(domain) {
            return ResponseSnafu {
                message: format!("list_dns_records failed: Invalid domain {domain}"),
            }
            .fail();
        }
        Ok(self.zone(domain))
    }

    fn create_record(&self, domain: &str, record: &Record) -> Result<String> {
        let name = fqdn(domain, record);
        self.calls.borrow_mut().push(format!("create {name}"));
        if self.rejected.contains(&name) {
            self.fail(format!("create_record failed: {name} rejected"))?;
        }

        let id = self.next_id.get().max(1);
        self.next_id.set(id + 1);
        let stored = Record {
            name,
            id: Some(id.to_string()),
            ..record.clone()
        };
        self.zones
            .borrow_mut()
            .entry(domain.to_string())
            .or_default()
            .push(stored);
        Ok(id.to_string())
    }

    fn update_record(&self, domain: &str, id: &str, record: &Record) -> Result<()> {
        let name = fqdn(domain, record);
        self.calls.borrow_mut().push(format!("update {name} #{id}"));
        if self.rejected.contains(&name) {
            return self.fail(format!("update_record failed: {name} rejected"));
        }

        let mut zones = self.zones.borrow_mut();
        let Some(existing) = zones
            .get_mut(domain)
            .and_then(|records| records.iter_mut().find(|r| r.id.as_deref() == Some(id)))
        else {
            return self.fail(format!("update_record failed: no record {id}"));
        };
        *existing = Record {
            name,
            id: Some(id.to_string()),
            ..record.clone()
        };
        Ok(())
    }
}

pub fn listed(name: &str, kind: RecordKind, content: &str, ttl: u32, id: u64) -> Record {
    Record::new(name, kind, content)
        .with_ttl(ttl)
        .with_id(id.to_string())
}

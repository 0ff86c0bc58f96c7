use std::collections::BTreeMap;

use crate::common::{content_match, identity_match, Domain, Record};

use super::{DomainPlan, Mode, Operation, OperationKind, Plan, SkipReason};

/// Join configured and listed records by domain name.
///
/// The result covers every domain present on either side. A domain missing
/// from `existing`, or mapped to `None`, has no usable listing.
pub fn collect_domains(
    desired: BTreeMap<String, Vec<Record>>,
    existing: BTreeMap<String, Option<Vec<Record>>>,
) -> Vec<Domain> {
    let mut domains: BTreeMap<String, Domain> = BTreeMap::new();

    for (name, records) in desired {
        entry(&mut domains, name).desired_records = Some(records);
    }
    for (name, records) in existing {
        entry(&mut domains, name).existing_records = records;
    }

    domains.into_values().collect()
}

fn entry(domains: &mut BTreeMap<String, Domain>, name: String) -> &mut Domain {
    domains.entry(name.clone()).or_insert_with(|| Domain {
        name,
        ..Default::default()
    })
}

/// Plan every domain under `mode`.
///
/// Later entries win if a domain name is repeated.
pub fn plan(mode: Mode, domains: &[Domain]) -> Plan {
    Plan {
        domains: domains
            .iter()
            .map(|domain| (domain.name.clone(), plan_domain(mode, domain)))
            .collect(),
    }
}

/// Plan a single domain.
///
/// Creates and updates follow the configured record order; deletes follow,
/// in listing order. Every listed record that shares name and type with a
/// configured record counts as handled and is never deleted, even when the
/// mode forbids updating it.
pub fn plan_domain(mode: Mode, domain: &Domain) -> DomainPlan {
    let Some(existing) = &domain.existing_records else {
        return DomainPlan::Skipped(SkipReason::QueryFailed);
    };
    let Some(desired) = &domain.desired_records else {
        return DomainPlan::Skipped(SkipReason::NotConfigured);
    };

    let mut operations = Vec::new();
    let mut converged = Vec::new();
    let mut processed = vec![false; existing.len()];

    for record in desired {
        let mut found = false;

        for (idx, entry) in existing.iter().enumerate() {
            if !identity_match(&domain.name, record, entry) {
                continue;
            }
            found = true;
            processed[idx] = true;

            if content_match(record, entry) {
                converged.push(record.clone());
            } else if mode.allows(OperationKind::Update) {
                operations.push(Operation::Update {
                    record: record.clone(),
                    existing: entry.clone(),
                });
            }
        }

        if !found && mode.allows(OperationKind::Create) {
            operations.push(Operation::Create {
                record: record.clone(),
            });
        }
    }

    if mode.allows(OperationKind::Delete) {
        operations.extend(
            existing
                .iter()
                .zip(processed)
                .filter(|(_, processed)| !processed)
                .map(|(record, _)| Operation::Delete {
                    record: record.clone(),
                }),
        );
    }

    DomainPlan::Planned {
        operations,
        converged,
    }
}

use std::collections::BTreeMap;
use std::fmt;

use crate::common::Record;

use super::OperationKind;

/// A single planned change to one domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Create the configured record.
    Create { record: Record },
    /// Overwrite `existing` with the configured `record`.
    Update { record: Record, existing: Record },
    /// Remove a listed record that the configuration does not mention.
    Delete { record: Record },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Create { .. } => OperationKind::Create,
            Operation::Update { .. } => OperationKind::Update,
            Operation::Delete { .. } => OperationKind::Delete,
        }
    }

    /// The record the operation is about: the configured record for
    /// create/update, the listed one for delete.
    pub fn record(&self) -> &Record {
        match self {
            Operation::Create { record }
            | Operation::Update { record, .. }
            | Operation::Delete { record } => record,
        }
    }

    /// Provider identifier of the record an update overwrites.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Operation::Update { existing, .. } => existing.id.as_deref(),
            _ => None,
        }
    }

    /// Absolute name the operation acts on within `domain`.
    pub fn display_name(&self, domain: &str) -> String {
        match self {
            Operation::Delete { record } => record.name.clone(),
            _ => crate::common::fqdn(domain, self.record()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Listing the domain's records failed.
    QueryFailed,
    /// The domain is not part of the configuration.
    NotConfigured,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::QueryFailed => "querying existing records failed",
            SkipReason::NotConfigured => "not included in current configuration",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainPlan {
    Skipped(SkipReason),
    Planned {
        operations: Vec<Operation>,
        /// Configured records that already match a listed record.
        converged: Vec<Record>,
    },
}

impl DomainPlan {
    /// Planned operations, `None` for a skipped domain.
    pub fn operations(&self) -> Option<&[Operation]> {
        match self {
            DomainPlan::Skipped(_) => None,
            DomainPlan::Planned { operations, .. } => Some(operations),
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, DomainPlan::Skipped(_))
    }
}

/// Per-domain plans, ordered by domain name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub domains: BTreeMap<String, DomainPlan>,
}

impl Plan {
    pub fn get(&self, domain: &str) -> Option<&DomainPlan> {
        self.domains.get(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DomainPlan)> {
        self.domains.iter().map(|(name, plan)| (name.as_str(), plan))
    }

    /// Number of operations across all domains.
    pub fn len(&self) -> usize {
        self.domains
            .values()
            .filter_map(DomainPlan::operations)
            .map(<[Operation]>::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, kind: OperationKind) -> usize {
        self.domains
            .values()
            .filter_map(DomainPlan::operations)
            .flatten()
            .filter(|op| op.kind() == kind)
            .count()
    }
}

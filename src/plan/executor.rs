use crate::common::{RecordService, Result};

use super::{Operation, Plan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The record was created and got this identifier.
    Created(String),
    Updated,
    /// The service rejected the call, or it never completed.
    Failed(String),
    /// The operation is known but not carried out.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub domain: String,
    pub operation: Operation,
    pub status: OutcomeStatus,
}

impl OperationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed(_))
    }
}

/// Apply `plan` through `service`, one operation at a time.
///
/// Failures are recorded and execution moves on to the next operation; there
/// is no retry or rollback. Skipped domains are passed over and deletes are
/// reported as unsupported.
pub fn execute<S: RecordService + ?Sized>(plan: &Plan, service: &S) -> Vec<OperationOutcome> {
    let mut outcomes = Vec::with_capacity(plan.len());

    for (domain, domain_plan) in plan.iter() {
        let Some(operations) = domain_plan.operations() else {
            continue;
        };

        tracing::debug!(domain, operations = operations.len(), "Altering domain");

        for operation in operations {
            let status = match apply(domain, operation, service) {
                Ok(status) => status,
                Err(err) => OutcomeStatus::Failed(err.to_string()),
            };

            tracing::debug!(
                domain,
                operation = %operation.kind(),
                kind = %operation.record().kind,
                name = %operation.display_name(domain),
                status = ?status,
                "Operation finished",
            );

            outcomes.push(OperationOutcome {
                domain: domain.to_string(),
                operation: operation.clone(),
                status,
            });
        }
    }

    outcomes
}

fn apply<S: RecordService + ?Sized>(
    domain: &str,
    operation: &Operation,
    service: &S,
) -> Result<OutcomeStatus> {
    match operation {
        Operation::Create { record } => service
            .create_record(domain, record)
            .map(OutcomeStatus::Created),
        Operation::Update { record, existing } => {
            let id = existing.id.as_deref().ok_or_else(|| {
                crate::common::ResponseSnafu {
                    message: format!("existing record '{}' has no identifier", existing.name),
                }
                .build()
            })?;
            service
                .update_record(domain, id, record)
                .map(|_| OutcomeStatus::Updated)
        }
        Operation::Delete { .. } => Ok(OutcomeStatus::Unsupported),
    }
}

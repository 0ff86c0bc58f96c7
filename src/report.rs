//! Human-readable projection of plans and execution outcomes.
//!
//! Reporting never feeds back into planning or execution. The verbosity
//! level only decides which lines are produced.

use crate::common::{fqdn, Record, Result};
use crate::plan::{DomainPlan, Operation, OperationOutcome, OutcomeStatus, Plan, SkipReason};

/// How much detail to report, from 0 (failures and skips only) upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const QUIET: Verbosity = Verbosity(0);
    /// Domain headers, progress and successes.
    pub const DOMAINS: Verbosity = Verbosity(1);
    /// Every planned operation.
    pub const OPERATIONS: Verbosity = Verbosity(2);
    /// Records that are already correct.
    pub const MATCHES: Verbosity = Verbosity(3);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub severity: Severity,
    pub message: String,
}

impl Line {
    fn info(message: String) -> Self {
        Self {
            severity: Severity::Info,
            message,
        }
    }

    fn warn(message: String) -> Self {
        Self {
            severity: Severity::Warn,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }
}

/// Emit report lines as log events.
pub fn emit(lines: &[Line]) {
    for line in lines {
        match line.severity {
            Severity::Info => tracing::info!("{}", line.message),
            Severity::Warn => tracing::warn!("{}", line.message),
            Severity::Error => tracing::error!("{}", line.message),
        }
    }
}

fn describe(domain: &str, operation: &Operation) -> String {
    format!(
        "{} {}-record '{}'",
        operation.kind(),
        operation.record().kind,
        operation.display_name(domain)
    )
}

/// Result of listing one domain's records.
pub fn listing_line(domain: &str, listing: &Result<Vec<Record>>) -> Line {
    match listing {
        Ok(records) => Line::info(format!(
            "querying records for '{domain}' .. done ({} records)",
            records.len()
        )),
        Err(err) => Line::error(format!("querying records for '{domain}' failed: {err}")),
    }
}

pub fn caller_line(address: &str, verbosity: Verbosity) -> Option<Line> {
    (verbosity >= Verbosity::DOMAINS)
        .then(|| Line::info(format!("IP address reported by API '{address}'")))
}

pub fn plan_lines(plan: &Plan, verbosity: Verbosity) -> Vec<Line> {
    let mut lines = Vec::new();

    for (domain, domain_plan) in plan.iter() {
        match domain_plan {
            DomainPlan::Skipped(reason @ SkipReason::QueryFailed) => {
                lines.push(Line::warn(format!("skipping '{domain}': {reason}")));
            }
            DomainPlan::Skipped(reason @ SkipReason::NotConfigured) => {
                if verbosity >= Verbosity::DOMAINS {
                    lines.push(Line::info(format!("skipping '{domain}': {reason}")));
                }
            }
            DomainPlan::Planned {
                operations,
                converged,
            } => {
                if verbosity >= Verbosity::DOMAINS {
                    lines.push(Line::info(format!(
                        "planned {} operation(s) for '{domain}'",
                        operations.len()
                    )));
                }
                if verbosity >= Verbosity::MATCHES {
                    for record in converged {
                        lines.push(Line::info(format!(
                            "found matching {}-record '{}'",
                            record.kind,
                            fqdn(domain, record)
                        )));
                    }
                }
                if verbosity >= Verbosity::OPERATIONS {
                    for operation in operations {
                        lines.push(Line::info(describe(domain, operation)));
                    }
                }
            }
        }
    }

    lines
}

pub fn outcome_lines(outcomes: &[OperationOutcome], verbosity: Verbosity) -> Vec<Line> {
    let mut lines = Vec::new();

    for outcome in outcomes {
        let what = describe(&outcome.domain, &outcome.operation);
        match &outcome.status {
            OutcomeStatus::Created(id) => {
                if verbosity >= Verbosity::DOMAINS {
                    lines.push(Line::info(format!("{what} ... done (id {id})")));
                }
            }
            OutcomeStatus::Updated => {
                if verbosity >= Verbosity::DOMAINS {
                    lines.push(Line::info(format!("{what} ... done")));
                }
            }
            OutcomeStatus::Unsupported => {
                lines.push(Line::warn(format!(
                    "{what} ... {} operation is not implemented - skipped",
                    outcome.operation.kind()
                )));
            }
            OutcomeStatus::Failed(message) => {
                lines.push(Line::error(format!(
                    "{what} ... failed for domain '{}': {message}",
                    outcome.domain
                )));
            }
        }
    }

    let failed = outcomes.iter().filter(|o| o.is_failure()).count();
    if failed > 0 || verbosity >= Verbosity::DOMAINS {
        lines.push(Line::info(format!(
            "{} operation(s) attempted, {failed} failed",
            outcomes.len()
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::common::{RecordKind, ResponseSnafu};

    fn sample_plan() -> Plan {
        Plan {
            domains: BTreeMap::from([
                ("a.com".into(), DomainPlan::Skipped(SkipReason::QueryFailed)),
                (
                    "b.com".into(),
                    DomainPlan::Planned {
                        operations: vec![Operation::Create {
                            record: Record::new("www", RecordKind::A, "1.1.1.1"),
                        }],
                        converged: vec![Record::new("", RecordKind::MX, "mail.b.com")],
                    },
                ),
                ("c.com".into(), DomainPlan::Skipped(SkipReason::NotConfigured)),
            ]),
        }
    }

    fn messages(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|l| l.message.as_str()).collect()
    }

    #[test]
    fn listing_failure_carries_message() {
        let failed: Result<Vec<Record>> = ResponseSnafu {
            message: "Invalid domain.",
        }
        .fail();
        let line = listing_line("a.com", &failed);
        assert_eq!(line.severity, Severity::Error);
        assert_eq!(line.message, "querying records for 'a.com' failed: Invalid domain.");

        let line = listing_line("a.com", &Ok(vec![]));
        assert_eq!(line.severity, Severity::Info);
    }

    #[test]
    fn caller_address_needs_verbosity() {
        assert_eq!(caller_line("1.2.3.4", Verbosity::QUIET), None);
        assert_eq!(
            caller_line("1.2.3.4", Verbosity::DOMAINS).map(|l| l.message),
            Some("IP address reported by API '1.2.3.4'".to_string())
        );
    }

    #[test]
    fn quiet_plan_reports_query_failures_only() {
        let lines = plan_lines(&sample_plan(), Verbosity::QUIET);
        assert_eq!(
            messages(&lines),
            vec!["skipping 'a.com': querying existing records failed"]
        );
        assert_eq!(lines[0].severity, Severity::Warn);
    }

    #[test]
    fn verbose_plan_reports_everything() {
        let lines = plan_lines(&sample_plan(), Verbosity::MATCHES);
        assert_eq!(
            messages(&lines),
            vec![
                "skipping 'a.com': querying existing records failed",
                "planned 1 operation(s) for 'b.com'",
                "found matching MX-record 'b.com'",
                "create A-record 'www.b.com'",
                "skipping 'c.com': not included in current configuration",
            ]
        );
    }

    #[test]
    fn verbosity_never_changes_failure_reporting() {
        let outcomes = vec![
            OperationOutcome {
                domain: "b.com".into(),
                operation: Operation::Create {
                    record: Record::new("www", RecordKind::A, "1.1.1.1"),
                },
                status: OutcomeStatus::Failed("Invalid API key.".into()),
            },
            OperationOutcome {
                domain: "b.com".into(),
                operation: Operation::Delete {
                    record: Record::new("old.b.com", RecordKind::A, "1.1.1.1").with_id("9"),
                },
                status: OutcomeStatus::Unsupported,
            },
        ];

        let quiet = outcome_lines(&outcomes, Verbosity::QUIET);
        assert_eq!(
            messages(&quiet),
            vec![
                "create A-record 'www.b.com' ... failed for domain 'b.com': Invalid API key.",
                "delete A-record 'old.b.com' ... delete operation is not implemented - skipped",
                "2 operation(s) attempted, 1 failed",
            ]
        );
        assert_eq!(quiet, outcome_lines(&outcomes, Verbosity::MATCHES));
    }

    #[test]
    fn successes_need_verbosity() {
        let outcomes = vec![OperationOutcome {
            domain: "b.com".into(),
            operation: Operation::Create {
                record: Record::new("", RecordKind::TXT, "hello"),
            },
            status: OutcomeStatus::Created("77".into()),
        }];

        assert!(outcome_lines(&outcomes, Verbosity::QUIET).is_empty());
        assert_eq!(
            messages(&outcome_lines(&outcomes, Verbosity::DOMAINS)),
            vec![
                "create TXT-record 'b.com' ... done (id 77)",
                "1 operation(s) attempted, 0 failed",
            ]
        );
    }
}

use std::collections::BTreeMap;

use crate::common::{Record, RecordService, Result};
use crate::plan::{self, Mode, OperationKind, OperationOutcome, Plan};
use crate::report::{self, Verbosity};

/// What a sync run ended with.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Planning only, nothing was applied.
    DryRun(Plan),
    /// The plan was not confirmed.
    Aborted(Plan),
    Executed {
        plan: Plan,
        outcomes: Vec<OperationOutcome>,
    },
}

/// One reconciliation run against a record service.
pub struct PorkbunSync<S> {
    service: S,
    mode: Mode,
    verbosity: Verbosity,
}

impl<S: RecordService> PorkbunSync<S> {
    pub fn new(service: S, mode: Mode, verbosity: Verbosity) -> Self {
        Self {
            service,
            mode,
            verbosity,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Ask the service who we are. A failure here means credentials or
    /// connectivity are broken and nothing else will work.
    pub fn check_connectivity(&self) -> Result<String> {
        let address = self.service.caller_address()?;
        if let Some(line) = report::caller_line(&address, self.verbosity) {
            report::emit(&[line]);
        }
        Ok(address)
    }

    /// List each domain once. Failed listings map to `None`.
    pub fn collect_existing(&self, domains: &[String]) -> BTreeMap<String, Option<Vec<Record>>> {
        domains
            .iter()
            .map(|domain| {
                let listing = self.service.list_records(domain);
                report::emit(&[report::listing_line(domain, &listing)]);
                (domain.clone(), listing.ok())
            })
            .collect()
    }

    /// Fetch the current state of every configured domain and plan against it.
    pub fn plan(&self, desired: BTreeMap<String, Vec<Record>>) -> Plan {
        let names: Vec<String> = desired.keys().cloned().collect();
        let existing = self.collect_existing(&names);
        let plan = plan::plan(self.mode, &plan::collect_domains(desired, existing));

        tracing::info!(
            mode = %self.mode,
            create = plan.count(OperationKind::Create),
            update = plan.count(OperationKind::Update),
            delete = plan.count(OperationKind::Delete),
            "Planning completed",
        );
        report::emit(&report::plan_lines(&plan, self.verbosity));

        plan
    }

    pub fn execute(&self, plan: &Plan) -> Vec<OperationOutcome> {
        let outcomes = plan::execute(plan, &self.service);
        report::emit(&report::outcome_lines(&outcomes, self.verbosity));
        outcomes
    }

    /// Plan, then execute unless this is a dry run or `confirm` declines.
    pub fn sync(
        &self,
        desired: BTreeMap<String, Vec<Record>>,
        dry_run: bool,
        confirm: impl FnOnce(&Plan) -> Result<bool>,
    ) -> Result<SyncOutcome> {
        let plan = self.plan(desired);

        if dry_run {
            tracing::info!("Dry run requested, skipping execution");
            return Ok(SyncOutcome::DryRun(plan));
        }

        if plan.is_empty() {
            tracing::info!("No changes detected");
            return Ok(SyncOutcome::Executed {
                plan,
                outcomes: vec![],
            });
        }

        if !confirm(&plan)? {
            tracing::warn!("Operation aborted");
            return Ok(SyncOutcome::Aborted(plan));
        }

        let outcomes = self.execute(&plan);
        Ok(SyncOutcome::Executed { plan, outcomes })
    }
}

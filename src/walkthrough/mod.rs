//! Guided tour of the ESP API.
//!
//! [`Walkthrough::run`] calls one operation of every service in a fixed
//! order and prints what came back. A failing step is logged and the run
//! moves on; identifiers captured along the way (the new sub-account, the
//! transactional message, the new IP pool) feed the steps that need them.

pub mod requests;
pub mod settings;

pub use settings::WalkthroughSettings;

use secrecy::ExposeSecret;
use std::fmt;
use std::sync::Arc;

use crate::auth::AuthScope;
use crate::client::EspClient;
use crate::errors::{EspError, EspResult};
use crate::services::{
    DomainsService, EmailsService, IpPoolsService, IpsService, MessagesService, StatsService,
    SubaccountsService, WebhooksService,
};
use crate::transport::{HttpTransport, ReqwestTransport, TransportConfig};
use crate::types::stats::StatsReport;

/// One step of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// List sub-accounts.
    ListSubaccounts,
    /// Create a sub-account.
    CreateSubaccount,
    /// Create a webhook.
    CreateWebhook,
    /// List webhooks.
    ListWebhooks,
    /// Add a sending domain.
    AddDomain,
    /// List sending domains.
    ListDomains,
    /// Send a transactional email.
    SendTransactional,
    /// Send a marketing email.
    SendMarketing,
    /// Statistics of the created sub-account.
    SubaccountStats,
    /// Aggregate statistics of the sub-account key.
    AggregateStats,
    /// Account-wide statistics.
    AccountStats,
    /// List dedicated IPs.
    ListIps,
    /// List IP pools.
    ListIpPools,
    /// Create an IP pool.
    CreateIpPool,
    /// Fetch the created IP pool.
    GetIpPool,
    /// Wait, then look up the transactional message.
    LookupMessage,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Step; 16] = [
        Step::ListSubaccounts,
        Step::CreateSubaccount,
        Step::CreateWebhook,
        Step::ListWebhooks,
        Step::AddDomain,
        Step::ListDomains,
        Step::SendTransactional,
        Step::SendMarketing,
        Step::SubaccountStats,
        Step::AggregateStats,
        Step::AccountStats,
        Step::ListIps,
        Step::ListIpPools,
        Step::CreateIpPool,
        Step::GetIpPool,
        Step::LookupMessage,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Step::ListSubaccounts => "list sub-accounts",
            Step::CreateSubaccount => "create sub-account",
            Step::CreateWebhook => "create webhook",
            Step::ListWebhooks => "list webhooks",
            Step::AddDomain => "add domain",
            Step::ListDomains => "list domains",
            Step::SendTransactional => "send transactional email",
            Step::SendMarketing => "send marketing email",
            Step::SubaccountStats => "sub-account statistics",
            Step::AggregateStats => "aggregate statistics",
            Step::AccountStats => "account statistics",
            Step::ListIps => "list IPs",
            Step::ListIpPools => "list IP pools",
            Step::CreateIpPool => "create IP pool",
            Step::GetIpPool => "get IP pool",
            Step::LookupMessage => "look up message",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The call succeeded.
    Succeeded,
    /// The step did not run because an earlier step produced nothing to use.
    Skipped {
        /// Why the step was skipped.
        reason: String,
    },
    /// The provider rejected the call.
    ApiFailure {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },
    /// The call failed before a response was received, or the response was
    /// unusable.
    Failure {
        /// Error message.
        message: String,
    },
}

impl StepOutcome {
    fn from_error(err: &EspError) -> Self {
        match err {
            EspError::Api {
                status, message, ..
            } => StepOutcome::ApiFailure {
                status: *status,
                message: message.clone(),
            },
            other => StepOutcome::Failure {
                message: other.with_causes(),
            },
        }
    }

    /// Returns true for either kind of failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            StepOutcome::ApiFailure { .. } | StepOutcome::Failure { .. }
        )
    }
}

/// Outcome of every step of a run.
#[derive(Debug, Clone, Default)]
pub struct WalkthroughReport {
    entries: Vec<(Step, StepOutcome)>,
}

impl WalkthroughReport {
    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.entries.push((step, outcome));
    }

    /// Steps and their outcomes in execution order.
    pub fn entries(&self) -> &[(Step, StepOutcome)] {
        &self.entries
    }

    /// Outcome of a given step, if it ran.
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.entries
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, o)| o)
    }

    /// Number of steps that succeeded.
    pub fn succeeded(&self) -> usize {
        self.count(|o| *o == StepOutcome::Succeeded)
    }

    /// Number of steps that failed.
    pub fn failed(&self) -> usize {
        self.count(StepOutcome::is_failure)
    }

    /// Number of steps that were skipped.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped { .. }))
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.entries.iter().filter(|(_, o)| pred(o)).count()
    }

    /// Prints the summary block to stdout.
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Steps:     {}", self.entries.len());
        println!("Succeeded: {}", self.succeeded());
        println!("Failed:    {}", self.failed());
        println!("Skipped:   {}", self.skipped());

        let problems: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, o)| *o != StepOutcome::Succeeded)
            .collect();

        if !problems.is_empty() {
            println!();
            for (step, outcome) in problems {
                match outcome {
                    StepOutcome::ApiFailure { status, message } => {
                        println!("  - {}: HTTP {} {}", step, status, message)
                    }
                    StepOutcome::Failure { message } => println!("  - {}: {}", step, message),
                    StepOutcome::Skipped { reason } => {
                        println!("  - {}: skipped ({})", step, reason)
                    }
                    StepOutcome::Succeeded => {}
                }
            }
        }
    }
}

/// Result of running one step body.
enum Progress {
    Done,
    Skipped(&'static str),
}

/// Identifiers captured from earlier steps.
#[derive(Debug, Default)]
struct Captured {
    subaccount_id: Option<String>,
    message_id: Option<String>,
    pool_name: Option<String>,
}

/// The walkthrough driver.
pub struct Walkthrough {
    settings: WalkthroughSettings,
    account: EspClient,
    subaccount: EspClient,
    run_id: String,
    captured: Captured,
}

impl Walkthrough {
    /// Creates a walkthrough that talks to the real API.
    pub fn new(settings: WalkthroughSettings) -> EspResult<Self> {
        let transport = ReqwestTransport::with_config(TransportConfig::default())?;
        Self::with_transport(settings, Arc::new(transport))
    }

    /// Creates a walkthrough that sends through `transport`.
    pub fn with_transport(
        settings: WalkthroughSettings,
        transport: Arc<dyn HttpTransport>,
    ) -> EspResult<Self> {
        let account = EspClient::builder()
            .api_key(settings.account_api_key.clone())
            .scope(AuthScope::Account)
            .base_url(settings.base_url.clone())
            .transport(transport)
            .build()?;
        let subaccount =
            account.with_credentials(settings.subaccount_api_key.clone(), AuthScope::Subaccount)?;

        Ok(Self {
            settings,
            account,
            subaccount,
            run_id: requests::new_run_id(),
            captured: Captured::default(),
        })
    }

    /// Replaces the random suffix used in created resource names.
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    /// Runs every step in order. Never stops early.
    pub async fn run(&mut self) -> WalkthroughReport {
        let mut report = WalkthroughReport::default();

        tracing::info!(run_id = %self.run_id, base_url = %self.settings.base_url, "Starting walkthrough");

        for (index, step) in Step::ALL.iter().copied().enumerate() {
            println!("\n[{}/{}] {}", index + 1, Step::ALL.len(), step);
            println!("{}", "-".repeat(40));

            let outcome = match self.execute(step).await {
                Ok(Progress::Done) => StepOutcome::Succeeded,
                Ok(Progress::Skipped(reason)) => {
                    println!("  Skipped: {}", reason);
                    tracing::info!(step = step.name(), reason, "Step skipped");
                    StepOutcome::Skipped {
                        reason: reason.to_string(),
                    }
                }
                Err(err) => {
                    log_failure(step, &err);
                    StepOutcome::from_error(&err)
                }
            };

            report.record(step, outcome);
        }

        report
    }

    async fn execute(&mut self, step: Step) -> EspResult<Progress> {
        match step {
            Step::ListSubaccounts => self.list_subaccounts().await,
            Step::CreateSubaccount => self.create_subaccount().await,
            Step::CreateWebhook => self.create_webhook().await,
            Step::ListWebhooks => self.list_webhooks().await,
            Step::AddDomain => self.add_domain().await,
            Step::ListDomains => self.list_domains().await,
            Step::SendTransactional => self.send_transactional().await,
            Step::SendMarketing => self.send_marketing().await,
            Step::SubaccountStats => self.subaccount_stats().await,
            Step::AggregateStats => self.aggregate_stats().await,
            Step::AccountStats => self.account_stats().await,
            Step::ListIps => self.list_ips().await,
            Step::ListIpPools => self.list_ip_pools().await,
            Step::CreateIpPool => self.create_ip_pool().await,
            Step::GetIpPool => self.get_ip_pool().await,
            Step::LookupMessage => self.lookup_message().await,
        }
    }

    async fn list_subaccounts(&mut self) -> EspResult<Progress> {
        let page = self
            .account
            .subaccounts()
            .list(requests::list_subaccounts())
            .await?;

        println!("  Found {} sub-account(s)", page.len());
        for sub in &page.data {
            println!("  - {} ({}) {:?}", sub.name, sub.id, sub.status);
        }
        Ok(Progress::Done)
    }

    async fn create_subaccount(&mut self) -> EspResult<Progress> {
        let created = self
            .account
            .subaccounts()
            .create(requests::create_subaccount(&self.run_id))
            .await?;

        println!("  Created sub-account {} ({})", created.name, created.id);
        self.captured.subaccount_id = Some(created.id.clone());

        if let Some(key) = &created.api_key {
            self.subaccount = self
                .account
                .with_credentials(key.expose_secret().clone(), AuthScope::Subaccount)?;
            println!("  Using the new sub-account's API key from here on");
        }
        Ok(Progress::Done)
    }

    async fn create_webhook(&mut self) -> EspResult<Progress> {
        let webhook = self
            .subaccount
            .webhooks()
            .create(requests::create_webhook(&self.settings, &self.run_id))
            .await?;

        println!("  Created webhook {} -> {}", webhook.id, webhook.url);
        println!("  Events: {:?}", webhook.events);
        Ok(Progress::Done)
    }

    async fn list_webhooks(&mut self) -> EspResult<Progress> {
        let page = self.subaccount.webhooks().list().await?;

        println!("  Found {} webhook(s)", page.len());
        for webhook in &page.data {
            let state = if webhook.active { "active" } else { "inactive" };
            println!("  - {} {} ({})", webhook.id, webhook.url, state);
        }
        Ok(Progress::Done)
    }

    async fn add_domain(&mut self) -> EspResult<Progress> {
        let domain = self
            .subaccount
            .domains()
            .add(requests::add_domain(&self.settings))
            .await?;

        println!("  Added domain {} ({:?})", domain.domain, domain.status);
        for record in domain.pending_records() {
            println!(
                "  Publish {} record {} = {}",
                record.record_type, record.host, record.value
            );
        }
        Ok(Progress::Done)
    }

    async fn list_domains(&mut self) -> EspResult<Progress> {
        let page = self.subaccount.domains().list().await?;

        println!("  Found {} domain(s)", page.len());
        for domain in &page.data {
            println!("  - {} {:?}", domain.domain, domain.status);
        }
        Ok(Progress::Done)
    }

    async fn send_transactional(&mut self) -> EspResult<Progress> {
        let request = requests::transactional_email(&self.settings, &self.run_id)?;
        let response = self.subaccount.emails().send(request).await?;

        println!(
            "  Transactional email accepted: {} ({})",
            response.message_id,
            response.status.as_deref().unwrap_or("unknown")
        );
        self.captured.message_id = Some(response.message_id);
        Ok(Progress::Done)
    }

    async fn send_marketing(&mut self) -> EspResult<Progress> {
        let request = requests::marketing_email(&self.settings, &self.run_id)?;
        let response = self.subaccount.emails().send(request).await?;

        println!(
            "  Marketing email accepted: {} ({})",
            response.message_id,
            response.status.as_deref().unwrap_or("unknown")
        );
        Ok(Progress::Done)
    }

    async fn subaccount_stats(&mut self) -> EspResult<Progress> {
        let Some(id) = self.captured.subaccount_id.clone() else {
            return Ok(Progress::Skipped("no sub-account was created"));
        };

        let report = self
            .account
            .stats()
            .subaccount(&id, requests::stats_window(&self.settings)?)
            .await?;
        print_stats(&report);
        Ok(Progress::Done)
    }

    async fn aggregate_stats(&mut self) -> EspResult<Progress> {
        let report = self
            .subaccount
            .stats()
            .aggregate(requests::stats_window(&self.settings)?)
            .await?;
        print_stats(&report);
        Ok(Progress::Done)
    }

    async fn account_stats(&mut self) -> EspResult<Progress> {
        let report = self
            .account
            .stats()
            .account(requests::stats_window(&self.settings)?)
            .await?;
        print_stats(&report);
        Ok(Progress::Done)
    }

    async fn list_ips(&mut self) -> EspResult<Progress> {
        let page = self.account.ips().list().await?;

        println!("  Found {} dedicated IP(s)", page.len());
        for ip in &page.data {
            println!(
                "  - {} pool={} warmup={}",
                ip.ip,
                ip.pool.as_deref().unwrap_or("-"),
                ip.warmup_status.as_deref().unwrap_or("-")
            );
        }
        Ok(Progress::Done)
    }

    async fn list_ip_pools(&mut self) -> EspResult<Progress> {
        let page = self.account.ip_pools().list().await?;

        println!("  Found {} IP pool(s)", page.len());
        for pool in &page.data {
            println!(
                "  - {} {:?} ({} IPs)",
                pool.name,
                pool.routing_strategy,
                pool.ips.len()
            );
        }
        Ok(Progress::Done)
    }

    async fn create_ip_pool(&mut self) -> EspResult<Progress> {
        let pool = self
            .account
            .ip_pools()
            .create(requests::create_ip_pool(&self.run_id))
            .await?;

        println!("  Created IP pool {} ({:?})", pool.name, pool.routing_strategy);
        self.captured.pool_name = Some(pool.name);
        Ok(Progress::Done)
    }

    async fn get_ip_pool(&mut self) -> EspResult<Progress> {
        let Some(name) = self.captured.pool_name.clone() else {
            return Ok(Progress::Skipped("no IP pool was created"));
        };

        let pool = self.account.ip_pools().get(&name).await?;
        println!(
            "  IP pool {} uses {:?} with IPs: {}",
            pool.name,
            pool.routing_strategy,
            if pool.ips.is_empty() {
                "(none)".to_string()
            } else {
                pool.ips.join(", ")
            }
        );
        Ok(Progress::Done)
    }

    async fn lookup_message(&mut self) -> EspResult<Progress> {
        let Some(message_id) = self.captured.message_id.clone() else {
            return Ok(Progress::Skipped("no transactional email was accepted"));
        };

        let delay = self.settings.lookup_delay;
        if !delay.is_zero() {
            println!("  Waiting {}s for the message to be processed...", delay.as_secs());
        }
        tokio::time::sleep(delay).await;

        let details = self.subaccount.messages().get(&message_id).await?;
        println!("  Message {} status: {}", details.message_id, details.status);
        if let Some(subject) = &details.subject {
            println!("  Subject: {}", subject);
        }
        for event in &details.events {
            println!(
                "  - {} {}{}",
                event.timestamp.to_rfc3339(),
                event.event,
                event
                    .detail
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default()
            );
        }
        Ok(Progress::Done)
    }
}

fn print_stats(report: &StatsReport) {
    let totals = &report.totals;
    println!("  {} to {}", report.start_date, report.end_date);
    println!(
        "  requests={} delivered={} bounced={} opened={} clicked={}",
        totals.requests, totals.delivered, totals.bounced, totals.opened, totals.clicked
    );
    println!(
        "  delivery rate {:.1}%, open rate {:.1}%",
        totals.delivery_rate() * 100.0,
        totals.open_rate() * 100.0
    );
}

fn log_failure(step: Step, err: &EspError) {
    match err {
        EspError::Api {
            status,
            message,
            code,
            body,
            request_id,
        } => {
            println!("  Failed: HTTP {} {}", status, message);
            tracing::error!(
                step = step.name(),
                status = *status,
                code = code.as_deref().unwrap_or("-"),
                request_id = request_id.as_deref().unwrap_or("-"),
                body = %crate::observability::redact_sensitive(body),
                "API error"
            );
        }
        other => {
            println!("  Failed: {}", other.with_causes());
            tracing::error!(
                step = step.name(),
                error = %other,
                causes = ?other.causes(),
                "Step failed"
            );
        }
    }
}

//! Request objects sent by the walkthrough steps.
//!
//! Kept free of I/O so the literal fields each step sends can be checked
//! without a server.

use super::settings::WalkthroughSettings;
use crate::errors::EspResult;
use crate::types::common::{EmailAddress, ListOptions};
use crate::types::domains::AddDomainRequest;
use crate::types::emails::{EmailCategory, SendEmailRequest};
use crate::types::ips::{CreateIpPoolRequest, RoutingStrategy};
use crate::types::stats::StatsQuery;
use crate::types::subaccounts::CreateSubaccountRequest;
use crate::types::webhooks::{CreateWebhookRequest, WebhookEvent};

/// Page size for the sub-account listing.
pub const SUBACCOUNT_PAGE_SIZE: u32 = 10;

/// Daily cap given to the demo sub-account.
pub const DEMO_DAILY_SEND_LIMIT: u32 = 1_000;

/// Events the demo webhook subscribes to.
pub const WEBHOOK_EVENTS: [WebhookEvent; 4] = [
    WebhookEvent::Delivered,
    WebhookEvent::Bounced,
    WebhookEvent::Opened,
    WebhookEvent::Clicked,
];

/// Short random suffix that keeps names unique across runs.
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Options for listing sub-accounts.
pub fn list_subaccounts() -> ListOptions {
    ListOptions::with_limit(SUBACCOUNT_PAGE_SIZE)
}

/// The sub-account to create.
pub fn create_subaccount(run_id: &str) -> CreateSubaccountRequest {
    CreateSubaccountRequest::new(
        format!("demo-subaccount-{}", run_id),
        format!("demo+{}@example.com", run_id),
    )
    .with_company("Demo Company")
    .with_daily_send_limit(DEMO_DAILY_SEND_LIMIT)
}

/// The webhook to create.
pub fn create_webhook(settings: &WalkthroughSettings, run_id: &str) -> CreateWebhookRequest {
    CreateWebhookRequest::new(settings.webhook_url.clone(), WEBHOOK_EVENTS.to_vec())
        .with_name(format!("demo-webhook-{}", run_id))
}

/// The domain to register.
pub fn add_domain(settings: &WalkthroughSettings) -> AddDomainRequest {
    AddDomainRequest::new(settings.domain.clone())
}

/// A transactional message: order confirmation, tracking off.
pub fn transactional_email(
    settings: &WalkthroughSettings,
    run_id: &str,
) -> EspResult<SendEmailRequest> {
    SendEmailRequest::builder()
        .from(EmailAddress::with_name("Demo Store", settings.sender.clone())?)
        .to(EmailAddress::new(settings.recipient.clone())?)
        .subject("Your order confirmation")
        .text(format!(
            "Thanks for your order.\n\nOrder reference: {}\n",
            run_id
        ))
        .html(format!(
            "<p>Thanks for your order.</p><p>Order reference: <strong>{}</strong></p>",
            run_id
        ))
        .category(EmailCategory::Transactional)
        .tag("order-confirmation")
        .metadata("order_id", run_id)
        .track_opens(false)
        .track_clicks(false)
        .build()
}

/// A marketing message: newsletter, open and click tracking on.
pub fn marketing_email(
    settings: &WalkthroughSettings,
    run_id: &str,
) -> EspResult<SendEmailRequest> {
    SendEmailRequest::builder()
        .from(EmailAddress::with_name("Demo Newsletter", settings.sender.clone())?)
        .to(EmailAddress::new(settings.recipient.clone())?)
        .subject("This month's highlights")
        .text("Here is what is new this month. Visit https://example.com/news to read more.")
        .html(
            "<h1>This month's highlights</h1>\
             <p>Here is what is new this month.</p>\
             <p><a href=\"https://example.com/news\">Read more</a></p>",
        )
        .category(EmailCategory::Marketing)
        .tag("newsletter")
        .metadata("campaign", format!("monthly-{}", run_id))
        .track_opens(true)
        .track_clicks(true)
        .build()
}

/// The statistics window shared by the three stats steps.
pub fn stats_window(settings: &WalkthroughSettings) -> EspResult<StatsQuery> {
    StatsQuery::last_days(settings.stats_days)
}

/// The IP pool to create.
pub fn create_ip_pool(run_id: &str) -> CreateIpPoolRequest {
    CreateIpPoolRequest::new(format!("demo-pool-{}", run_id), RoutingStrategy::RoundRobin)
}

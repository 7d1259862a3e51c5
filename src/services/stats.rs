//! Statistics service.
//!
//! Three views over the same counters: a single sub-account seen from the
//! parent account, the calling sub-account's own aggregate, and the whole
//! account.

use async_trait::async_trait;

use super::{encode_segment, require_id, ApiContext};
use crate::errors::EspResult;
use crate::types::stats::{StatsQuery, StatsReport};

/// Statistics service trait.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Statistics for one sub-account. Requires an account-scoped key.
    async fn subaccount(&self, subaccount_id: &str, query: StatsQuery) -> EspResult<StatsReport>;

    /// Aggregate statistics for the authenticated key's scope.
    async fn aggregate(&self, query: StatsQuery) -> EspResult<StatsReport>;

    /// Statistics for the whole account. Requires an account-scoped key.
    async fn account(&self, query: StatsQuery) -> EspResult<StatsReport>;
}

/// Default implementation of the statistics service.
pub struct DefaultStatsService {
    ctx: ApiContext,
}

impl DefaultStatsService {
    /// Creates a new statistics service.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl StatsService for DefaultStatsService {
    async fn subaccount(&self, subaccount_id: &str, query: StatsQuery) -> EspResult<StatsReport> {
        require_id("Sub-account ID", subaccount_id)?;
        let path = format!("/stats/subaccounts/{}", encode_segment(subaccount_id));
        self.ctx.get_with_query(&path, &query.to_query()).await
    }

    async fn aggregate(&self, query: StatsQuery) -> EspResult<StatsReport> {
        self.ctx
            .get_with_query("/stats/aggregate", &query.to_query())
            .await
    }

    async fn account(&self, query: StatsQuery) -> EspResult<StatsReport> {
        self.ctx
            .get_with_query("/stats/account", &query.to_query())
            .await
    }
}

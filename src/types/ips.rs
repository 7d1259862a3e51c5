//! Dedicated IP and IP pool types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dedicated sending IP.
#[derive(Debug, Clone, Deserialize)]
pub struct Ip {
    /// The IP address.
    pub ip: String,
    /// Pool the IP belongs to.
    #[serde(default)]
    pub pool: Option<String>,
    /// Warmup state, e.g. `in_progress` or `done`.
    #[serde(default)]
    pub warmup_status: Option<String>,
    /// When the IP was assigned to the account.
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

/// How a pool picks the IP for the next message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    /// Rotate through the IPs in turn.
    #[default]
    RoundRobin,
    /// Distribute according to per-IP weights.
    Weighted,
    /// Fill the first IP before moving to the next.
    Sequential,
}

/// A named group of dedicated IPs.
#[derive(Debug, Clone, Deserialize)]
pub struct IpPool {
    /// Pool name.
    pub name: String,
    /// Routing strategy.
    #[serde(default)]
    pub routing_strategy: RoutingStrategy,
    /// Member IPs.
    #[serde(default)]
    pub ips: Vec<String>,
}

/// Request to create an IP pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateIpPoolRequest {
    /// Pool name.
    pub name: String,
    /// Routing strategy.
    pub routing_strategy: RoutingStrategy,
    /// Initial member IPs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ips: Vec<String>,
}

impl CreateIpPoolRequest {
    /// Creates an empty pool request.
    pub fn new(name: impl Into<String>, routing_strategy: RoutingStrategy) -> Self {
        Self {
            name: name.into(),
            routing_strategy,
            ips: Vec::new(),
        }
    }

    /// Adds a member IP.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ips.push(ip.into());
        self
    }
}

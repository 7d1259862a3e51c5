//! Integration tests for statistics, IPs and IP pools

use super::*;
use chrono::NaiveDate;
use integrations_esp::services::{IpPoolsService, IpsService, StatsService};
use integrations_esp::types::stats::Aggregation;
use integrations_esp::{CreateIpPoolRequest, RoutingStrategy, StatsQuery};
use serde_json::json;
use wiremock::matchers::{body_json, query_param};

fn march() -> StatsQuery {
    StatsQuery::new(
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
    )
    .unwrap()
}

fn stats_body() -> serde_json::Value {
    json!({
        "start_date": "2024-03-01",
        "end_date": "2024-03-07",
        "totals": {"requests": 200, "delivered": 190, "opened": 95},
        "series": [
            {"date": "2024-03-01", "requests": 100, "delivered": 95},
            {"date": "2024-03-02", "requests": 100, "delivered": 95}
        ]
    })
}

#[tokio::test]
async fn test_subaccount_stats_uses_account_key() {
    let server = setup_mock_server().await;

    account_mock("GET", "/v1/stats/subaccounts/sa_1")
        .and(query_param("start_date", "2024-03-01"))
        .and(query_param("end_date", "2024-03-07"))
        .and(query_param("aggregated_by", "week"))
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = account_client(&server)
        .stats()
        .subaccount("sa_1", march().aggregated_by(Aggregation::Week))
        .await
        .unwrap();

    assert_eq!(report.totals.delivered, 190);
    assert_eq!(report.series.len(), 2);
    assert!((report.totals.delivery_rate() - 0.95).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_aggregate_and_account_stats() {
    let server = setup_mock_server().await;

    subaccount_mock("GET", "/v1/stats/aggregate")
        .and(query_param("start_date", "2024-03-01"))
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    account_mock("GET", "/v1/stats/account")
        .and(query_param("end_date", "2024-03-07"))
        .respond_with(success_response(stats_body()))
        .expect(1)
        .mount(&server)
        .await;

    let aggregate = subaccount_client(&server)
        .stats()
        .aggregate(march())
        .await
        .unwrap();
    let account = account_client(&server).stats().account(march()).await.unwrap();

    assert_eq!(aggregate.totals.requests, 200);
    assert_eq!(account.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
}

#[tokio::test]
async fn test_list_ips() {
    let server = setup_mock_server().await;

    account_mock("GET", "/v1/ips")
        .respond_with(success_response(json!({
            "data": [
                {"ip": "192.0.2.10", "pool": "transactional", "warmup_status": "complete"},
                {"ip": "192.0.2.11"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = account_client(&server).ips().list().await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.data[0].pool.as_deref(), Some("transactional"));
    assert!(page.data[1].warmup_status.is_none());
}

#[tokio::test]
async fn test_ip_pool_lifecycle() {
    let server = setup_mock_server().await;

    account_mock("GET", "/v1/ip-pools")
        .respond_with(success_response(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    account_mock("POST", "/v1/ip-pools")
        .and(body_json(json!({
            "name": "demo-pool",
            "routing_strategy": "weighted",
            "ips": ["192.0.2.10"]
        })))
        .respond_with(success_response(json!({
            "name": "demo-pool",
            "routing_strategy": "weighted",
            "ips": ["192.0.2.10"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    account_mock("GET", "/v1/ip-pools/demo-pool")
        .respond_with(success_response(json!({
            "name": "demo-pool",
            "routing_strategy": "weighted",
            "ips": ["192.0.2.10"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = account_client(&server);
    assert!(client.ip_pools().list().await.unwrap().is_empty());

    let created = client
        .ip_pools()
        .create(CreateIpPoolRequest::new("demo-pool", RoutingStrategy::Weighted).with_ip("192.0.2.10"))
        .await
        .unwrap();
    let fetched = client.ip_pools().get(&created.name).await.unwrap();

    assert_eq!(fetched.routing_strategy, RoutingStrategy::Weighted);
    assert_eq!(fetched.ips, vec!["192.0.2.10".to_string()]);
}

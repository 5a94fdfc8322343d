mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

async fn list(server: &common::TestServer, query: &[(&str, &str)]) -> Result<reqwest::Response> {
    Ok(server
        .client
        .get(&server.dashboards_url)
        .query(query)
        .send()
        .await?)
}

#[tokio::test]
async fn empty_store_lists_nothing() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = list(&server, &[]).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 0);

    // Trailing slash serves the same collection
    let res = server
        .client
        .get(format!("{}/", server.dashboards_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn filters_are_exact_match_and_combined() -> Result<()> {
    let server = common::spawn_server().await?;

    server.create(&common::dashboard("networkFlows", "simple_dashboard")).await?;
    server.create(&common::dashboard("myDatacube", "simple_dashboard")).await?;
    server.create(&common::dashboard("networkFlows", "other")).await?;

    let all: Vec<Value> = list(&server, &[]).await?.json().await?;
    let ids: Vec<i64> = all.iter().map(|d| d["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let by_name: Vec<Value> = list(&server, &[("shortName", "simple_dashboard")])
        .await?
        .json()
        .await?;
    assert_eq!(by_name.len(), 2);
    assert!(by_name.iter().all(|d| d["shortName"] == "simple_dashboard"));

    let both: Vec<Value> = list(
        &server,
        &[("shortName", "simple_dashboard"), ("dataCube", "myDatacube")],
    )
    .await?
    .json()
    .await?;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["id"], 2);

    let none: Vec<Value> = list(&server, &[("dataCube", "nothingHere")]).await?.json().await?;
    assert!(none.is_empty());

    // Empty value means "no filter"
    let unfiltered: Vec<Value> = list(&server, &[("shortName", "")]).await?.json().await?;
    assert_eq!(unfiltered.len(), 3);

    Ok(())
}

#[tokio::test]
async fn invalid_filter_values_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    for bad in ["a;b", "a?b", "a'b", "a\"b", "a b"] {
        let res = list(&server, &[("shortName", bad)]).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "shortName={bad:?}");
        let err: Value = res.json().await?;
        assert_eq!(err["message"], format!("Invalid shortName='{}'", bad));
    }

    let res = list(&server, &[("dataCube", "drop table;")]).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?["message"],
        "Invalid dataCube='drop table;'"
    );

    let long = "a".repeat(257);
    let res = list(&server, &[("shortName", long.as_str())]).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let at_limit = "a".repeat(256);
    let res = list(&server, &[("shortName", at_limit.as_str())]).await?;
    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

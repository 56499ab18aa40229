//! End-to-end generation-run tests against a mock search endpoint.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_topic_recommender::db::{
    load_analytics, load_feed, replace_feed, save_settings, save_topics, Database, Settings,
};
use youtube_topic_recommender::expansion::ExpansionLimits;
use youtube_topic_recommender::feed::{self, run_once, RunContext};
use youtube_topic_recommender::search::{InitialDataExtractor, SearchClient};
use youtube_topic_recommender::topic::Topic;

fn search_page(ids: &[&str]) -> String {
    let renderers: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"videoRenderer":{{"videoId":"{id}","title":{{"runs":[{{"text":"title {id}"}}]}},"ownerText":{{"runs":[{{"text":"channel"}}]}}}}}}"#
            )
        })
        .collect();
    format!(
        r#"<html><body><script>var ytInitialData = {{"contents":{{"twoColumnSearchResultsRenderer":{{"primaryContents":{{"sectionListRenderer":{{"contents":[{{"itemSectionRenderer":{{"contents":[{}]}}}}]}}}}}}}}}};</script></body></html>"#,
        renderers.join(",")
    )
}

async fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.sqlite");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

fn test_ctx(base_url: &str) -> RunContext {
    RunContext {
        client: SearchClient::new(base_url).expect("client"),
        extractor: Arc::new(InitialDataExtractor::new()),
        expansion: ExpansionLimits::default(),
        min_feed_size: 20,
        batch_size: 3,
        batch_delay: Duration::from_millis(0),
    }
}

async fn mount_all(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_stores_feed_and_analytics() {
    let (db, _temp_dir) = setup_db().await;
    let server = MockServer::start().await;
    mount_all(&server, search_page(&["v1", "v2", "v3"])).await;

    save_topics(db.pool(), &[Topic::parse("ai").unwrap()])
        .await
        .expect("seed topics");
    save_settings(db.pool(), &Settings::new(10).unwrap())
        .await
        .expect("seed settings");

    run_once(&test_ctx(&server.uri()), &db)
        .await
        .expect("run_once");

    let feed = load_feed(db.pool()).await.expect("load feed");
    let ids: Vec<&str> = feed.iter().map(|v| v.id.as_str()).collect();
    // Every expanded query returns the same three videos; dedup collapses
    // them to one occurrence each.
    assert_eq!(ids, vec!["v1", "v2", "v3"]);

    let analytics = load_analytics(db.pool())
        .await
        .expect("load analytics")
        .expect("analytics written");
    assert_eq!(analytics.generated, 3);
    assert!(!analytics.last_generated.is_empty());
}

#[tokio::test]
async fn test_run_with_no_topics_is_a_noop() {
    let (db, _temp_dir) = setup_db().await;
    let server = MockServer::start().await;
    mount_all(&server, search_page(&["v1"])).await;

    run_once(&test_ctx(&server.uri()), &db)
        .await
        .expect("run_once");

    assert!(load_feed(db.pool()).await.expect("feed").is_empty());
    assert!(load_analytics(db.pool()).await.expect("analytics").is_none());
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_failed_run_keeps_previous_feed() {
    let (db, _temp_dir) = setup_db().await;
    let server = MockServer::start().await;
    // Every fetch fails; the run completes with zero records.
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    save_topics(db.pool(), &[Topic::parse("ai").unwrap()])
        .await
        .expect("seed topics");

    let previous = vec![youtube_topic_recommender::search::VideoRecord {
        id: "keep-me".to_string(),
        title: "Previous".to_string(),
        thumbnail_url: String::new(),
        channel: "c".to_string(),
        duration: String::new(),
        views: String::new(),
    }];
    replace_feed(db.pool(), &previous).await.expect("seed feed");

    run_once(&test_ctx(&server.uri()), &db)
        .await
        .expect("run_once");

    let feed = load_feed(db.pool()).await.expect("load feed");
    assert_eq!(feed, previous, "empty aggregation leaves the feed alone");
}

#[tokio::test]
async fn test_second_run_replaces_feed_wholesale() {
    let (db, _temp_dir) = setup_db().await;
    let server = MockServer::start().await;
    mount_all(&server, search_page(&["old1", "old2"])).await;

    save_topics(db.pool(), &[Topic::parse("ai").unwrap()])
        .await
        .expect("seed topics");

    let ctx = test_ctx(&server.uri());
    run_once(&ctx, &db).await.expect("first run");

    server.reset().await;
    mount_all(&server, search_page(&["new1"])).await;

    run_once(&ctx, &db).await.expect("second run");

    let feed = load_feed(db.pool()).await.expect("load feed");
    let ids: Vec<&str> = feed.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["new1"], "old records do not survive");
}

#[tokio::test]
async fn test_trigger_during_active_run_is_dropped() {
    let (db, _temp_dir) = setup_db().await;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/results"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(&["slow"]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    save_topics(db.pool(), &[Topic::parse("ai").unwrap()])
        .await
        .expect("seed topics");

    let (service, generator) = feed::service(test_ctx(&server.uri()), db.clone());
    let generator_handle = tokio::spawn(generator.run());

    assert!(service.request_generation(), "first trigger accepted");

    // Give the generator time to pick the trigger up and start fetching.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(service.is_generating());
    assert!(
        !service.request_generation(),
        "trigger during an active run is a no-op"
    );

    // Wait for the run to finish, then confirm exactly one run happened.
    let mut waited = Duration::from_millis(0);
    while service.is_generating() && waited < Duration::from_secs(10) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }
    assert!(!service.is_generating(), "run finished");

    let feed = load_feed(db.pool()).await.expect("load feed");
    assert_eq!(feed.len(), 1);

    drop(service);
    generator_handle.await.expect("generator exits cleanly");
}

//! Integration tests for the persisted store.

use tempfile::TempDir;
use youtube_topic_recommender::db::{
    add_topic, load_analytics, load_feed, load_settings, load_topics, remove_topic, replace_feed,
    save_analytics, save_settings, save_topics, AnalyticsSnapshot, Database, Settings,
};
use youtube_topic_recommender::search::VideoRecord;
use youtube_topic_recommender::topic::Topic;

async fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.sqlite");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

fn topic(raw: &str) -> Topic {
    Topic::parse(raw).expect("valid topic")
}

fn video(id: &str) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        title: format!("title {id}"),
        thumbnail_url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
        channel: "channel".to_string(),
        duration: "1:00".to_string(),
        views: "1 view".to_string(),
    }
}

#[tokio::test]
async fn test_topics_roundtrip_preserves_order() {
    let (db, _temp_dir) = setup_db().await;

    let topics = vec![topic("zebra"), topic("ai"), topic("music")];
    save_topics(db.pool(), &topics).await.expect("save");

    let loaded = load_topics(db.pool()).await.expect("load");
    assert_eq!(loaded, topics, "insertion order, not sorted");
}

#[tokio::test]
async fn test_empty_store_defaults() {
    let (db, _temp_dir) = setup_db().await;

    assert!(load_topics(db.pool()).await.expect("topics").is_empty());
    assert_eq!(
        load_settings(db.pool()).await.expect("settings"),
        Settings::default()
    );
    assert!(load_analytics(db.pool()).await.expect("analytics").is_none());
    assert!(load_feed(db.pool()).await.expect("feed").is_empty());
}

#[tokio::test]
async fn test_add_topic_rejects_duplicate() {
    let (db, _temp_dir) = setup_db().await;

    assert!(add_topic(db.pool(), &topic("ai")).await.expect("add"));
    assert!(!add_topic(db.pool(), &topic("ai")).await.expect("add dup"));
    assert!(add_topic(db.pool(), &topic("music")).await.expect("add"));

    let loaded = load_topics(db.pool()).await.expect("load");
    assert_eq!(loaded, vec![topic("ai"), topic("music")]);
}

#[tokio::test]
async fn test_remove_topic() {
    let (db, _temp_dir) = setup_db().await;

    save_topics(db.pool(), &[topic("ai"), topic("music")])
        .await
        .expect("save");

    assert!(remove_topic(db.pool(), &topic("ai")).await.expect("remove"));
    assert!(!remove_topic(db.pool(), &topic("ai"))
        .await
        .expect("remove missing"));

    let loaded = load_topics(db.pool()).await.expect("load");
    assert_eq!(loaded, vec![topic("music")]);
}

#[tokio::test]
async fn test_settings_roundtrip() {
    let (db, _temp_dir) = setup_db().await;

    let settings = Settings::new(15).expect("valid choice");
    save_settings(db.pool(), &settings).await.expect("save");

    assert_eq!(load_settings(db.pool()).await.expect("load"), settings);
}

#[tokio::test]
async fn test_analytics_overwritten_not_accumulated() {
    let (db, _temp_dir) = setup_db().await;

    let first = AnalyticsSnapshot {
        generated: 12,
        performance_ms: 800,
        last_generated: "2024-01-01T00:00:00Z".to_string(),
    };
    save_analytics(db.pool(), &first).await.expect("save");

    let second = AnalyticsSnapshot {
        generated: 3,
        performance_ms: 200,
        last_generated: "2024-01-02T00:00:00Z".to_string(),
    };
    save_analytics(db.pool(), &second).await.expect("save");

    let loaded = load_analytics(db.pool()).await.expect("load").expect("set");
    assert_eq!(loaded, second);
}

#[tokio::test]
async fn test_feed_roundtrip_preserves_order() {
    let (db, _temp_dir) = setup_db().await;

    let videos = vec![video("c"), video("a"), video("b")];
    replace_feed(db.pool(), &videos).await.expect("replace");

    let loaded = load_feed(db.pool()).await.expect("load");
    assert_eq!(loaded, videos);
}

#[tokio::test]
async fn test_feed_replaced_wholesale() {
    let (db, _temp_dir) = setup_db().await;

    replace_feed(db.pool(), &[video("old1"), video("old2")])
        .await
        .expect("first");
    replace_feed(db.pool(), &[video("new1")]).await.expect("second");

    let loaded = load_feed(db.pool()).await.expect("load");
    let ids: Vec<&str> = loaded.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["new1"], "no records from the previous run survive");
}

//! Integration tests for the snapshot crawler using wiremock

mod common;

use serde_json::json;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wpreport::config::{CrawlConfig, SessionConfig};
use wpreport::crawler::session::RequestSession;
use wpreport::crawler::{CollectionOutcome, Crawler};
use wpreport::models::Collection;
use wpreport::report;
use wpreport::storage::SnapshotStore;

fn crawler(per_page: u32) -> Crawler {
    let session = RequestSession::new(&SessionConfig::default()).unwrap();
    let config = CrawlConfig {
        per_page,
        max_pages: 50,
        rate_limit: 1000,
    };
    Crawler::new(session, config).unwrap()
}

async fn mount_page(server: &MockServer, collection: &str, page: u32, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-json/wp/v2/{collection}")))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_extraction_then_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Mock Blog",
            "url": "https://blog.example",
            "description": "ignored"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/categories"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-WP-TotalPages", "2")
                .set_body_json(json!([
                    {"id": 1, "name": "News", "parent": 0},
                    {"id": 2, "name": "Local", "parent": 1}
                ])),
        )
        .mount(&server)
        .await;
    mount_page(&server, "categories", 2, json!([{"id": 3, "name": "Sports", "parent": 0}])).await;

    mount_page(&server, "tags", 1, json!([{"name": "rust"}])).await;
    mount_page(
        &server,
        "posts",
        1,
        json!([
            {"title": {"rendered": "Hello"}, "categories": [1], "author": 5},
            {"title": {"rendered": "Match day"}, "categories": [3], "author": 5}
        ]),
    )
    .await;
    mount_page(&server, "media", 1, json!([])).await;

    // pages falls through to wiremock's default 404
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let target = Url::parse(&server.uri()).unwrap();

    let summary = crawler(2).crawl(&target, &store).await.unwrap();

    assert!(summary.info_saved);
    assert_eq!(
        summary.outcome(Collection::Categories),
        Some(&CollectionOutcome::Saved { items: 3, pages: 2 })
    );
    assert_eq!(
        summary.outcome(Collection::Posts),
        Some(&CollectionOutcome::Saved { items: 2, pages: 1 })
    );
    assert_eq!(
        summary.outcome(Collection::Pages),
        Some(&CollectionOutcome::Skipped { status: Some(404) })
    );
    assert_eq!(
        summary.outcome(Collection::Users),
        Some(&CollectionOutcome::Skipped { status: Some(401) })
    );
    assert!(!dir.path().join("users.json").exists());
    assert!(!dir.path().join("pages.json").exists());

    report::generate(&store).unwrap();
    let text = common::read_report(dir.path());

    assert!(text.contains("🌐 url: https://blog.example"));
    assert!(text.contains("🏷️ name: Mock Blog"));
    assert!(text.contains("📂 Number of Categories: 3"));
    assert!(text.contains("📂 News\n    📂 Local\n📂 Sports\n"));
    assert!(text.contains("  - News: 1\n  - Sports: 1"));
    assert!(text.contains("📄 Number of pages: 0"));
    assert!(text.contains("Users list (users.json):\n"));
}

#[tokio::test]
async fn test_bad_request_past_last_page_stops() {
    let server = MockServer::start().await;

    mount_page(&server, "posts", 1, json!([{"title": "a"}, {"title": "b"}])).await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "rest_post_invalid_page_number"
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let target = Url::parse(&server.uri()).unwrap();

    let outcome = crawler(2)
        .crawl_collection(&target, Collection::Posts, &store)
        .await
        .unwrap();
    assert_eq!(outcome, CollectionOutcome::Saved { items: 2, pages: 1 });

    let saved: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("posts.json")).unwrap())
            .unwrap();
    assert_eq!(saved.len(), 2);
}

#[tokio::test]
async fn test_bad_request_on_first_page_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/tags"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let target = Url::parse(&server.uri()).unwrap();

    let result = crawler(10)
        .crawl_collection(&target, Collection::Tags, &store)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_server_error_aborts_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let target = Url::parse(&server.uri()).unwrap();

    assert!(crawler(10).crawl(&target, &store).await.is_err());
}

#[tokio::test]
async fn test_subdirectory_install() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog/wp-json/wp/v2/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"title": {"rendered": "Logo"}, "source_url": "https://s/logo.png"}
        ])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    let target = wpreport::utils::normalize_target(&format!("{}/blog/", server.uri())).unwrap();

    let outcome = crawler(10)
        .crawl_collection(&target, Collection::Media, &store)
        .await
        .unwrap();
    assert_eq!(outcome, CollectionOutcome::Saved { items: 1, pages: 1 });
}

#[tokio::test]
async fn test_skipped_collection_removes_earlier_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/users"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = common::snapshot_dir(&[
        ("users.json", json!([{"id": 5, "name": "Stale"}])),
        ("info.json", json!({"name": "Old Blog", "url": "https://old.example"})),
    ]);
    let store = SnapshotStore::new(dir.path());
    let target = Url::parse(&server.uri()).unwrap();

    let summary = crawler(10).crawl(&target, &store).await.unwrap();

    assert!(!summary.info_saved);
    assert_eq!(
        summary.outcome(Collection::Users),
        Some(&CollectionOutcome::Skipped { status: Some(403) })
    );
    assert!(!dir.path().join("users.json").exists());
    assert!(!dir.path().join("info.json").exists());

    report::generate(&store).unwrap();
    let text = common::read_report(dir.path());
    assert!(!text.contains("Stale"));
    assert!(text.contains("🏷️ name: N/A"));
}

use blog_saver::{
    ArticleApiClient, BlogSaverError, ContentStore, Metadata, Pipeline, fetch_all_articles,
    fetch_and_save_article, fetch_webpage, is_url_accessible,
};
use chrono::Utc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const SAMPLE_HTML: &str = concat!(
    "<html><head><title>Hi</title>",
    r#"<meta name="description" content="A greeting">"#,
    r#"<meta name="author" content="Jane">"#,
    "</head><body>Hello world</body></html>",
);

fn sample_metadata(url: &str, title: &str) -> Metadata {
    Metadata {
        title: title.to_string(),
        url: url.to_string(),
        date: Utc::now(),
        description: "A post".to_string(),
        author: "Jane".to_string(),
    }
}

/// Mount HEAD + GET mocks serving `html` at `route`.
async fn mount_page(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// ContentStore tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_round_trip() {
    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());
    assert_eq!(store.root(), tmp.path());

    let metadata = sample_metadata("https://example.com/post", "My Post");
    let saved = store
        .save_blog_content("the content\n", &metadata)
        .await
        .unwrap();

    let content = tokio::fs::read_to_string(&saved.content_path).await.unwrap();
    assert_eq!(content, "the content\n");

    let raw = tokio::fs::read_to_string(&saved.metadata_path).await.unwrap();
    let parsed: Metadata = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, metadata);
}

#[tokio::test]
async fn store_pair_shares_a_stem() {
    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());

    let metadata = sample_metadata("https://example.com/post", "Stems");
    let saved = store.save_blog_content("c", &metadata).await.unwrap();

    assert!(saved.filename.ends_with(".txt"));
    assert!(saved.content_path.ends_with(format!("posts/{}", saved.filename)));

    let stem = saved.filename.strip_suffix(".txt").unwrap();
    assert!(saved.metadata_path.ends_with(format!("metadata/{stem}.json")));
}

#[tokio::test]
async fn store_creates_directories_idempotently() {
    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());

    let metadata = sample_metadata("https://example.com/a", "A");
    store.save_blog_content("a", &metadata).await.unwrap();
    let metadata = sample_metadata("https://example.com/b", "B");
    store.save_blog_content("b", &metadata).await.unwrap();

    assert!(tmp.path().join("posts").is_dir());
    assert!(tmp.path().join("metadata").is_dir());
}

#[tokio::test]
async fn store_leaves_no_half_pair_on_failure() {
    let tmp = TempDir::new().unwrap();
    // A file where the posts directory should be makes every write fail.
    tokio::fs::write(tmp.path().join("posts"), "in the way")
        .await
        .unwrap();

    let store = ContentStore::new(tmp.path());
    let metadata = sample_metadata("https://example.com/post", "Doomed");
    let err = store.save_blog_content("c", &metadata).await.unwrap_err();
    assert!(matches!(err, BlogSaverError::Io(_)));

    // No orphaned metadata record may survive the failed save.
    let metadata_dir = tmp.path().join("metadata");
    if metadata_dir.is_dir() {
        let mut entries = tokio::fs::read_dir(&metadata_dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}

#[tokio::test]
async fn store_leaves_no_temporaries_behind() {
    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());

    let metadata = sample_metadata("https://example.com/post", "Clean");
    store.save_blog_content("c", &metadata).await.unwrap();

    for dir in ["posts", "metadata"] {
        let mut entries = tokio::fs::read_dir(tmp.path().join(dir)).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            assert!(!name.ends_with(".tmp"), "leftover temporary: {name}");
        }
    }
}

// ---------------------------------------------------------------------------
// Fetcher tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_webpage_returns_body_and_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_HTML))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/post", server.uri());
    let page = fetch_webpage(&client, &url).await.unwrap();

    assert_eq!(page.status, 200);
    assert_eq!(page.content, SAMPLE_HTML);
    assert!(page.url.ends_with("/post"));
}

#[tokio::test]
async fn fetch_webpage_error_status_is_reported_with_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let url = format!("{}/gone", server.uri());
    let err = fetch_webpage(&client, &url).await.unwrap_err();

    assert!(matches!(err, BlogSaverError::HttpStatus(404)));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn fetch_webpage_connection_failure_is_no_response() {
    // Port 9 (discard) is assumed closed; the connection is refused.
    let client = reqwest::Client::new();
    let err = fetch_webpage(&client, "http://127.0.0.1:9/post")
        .await
        .unwrap_err();
    assert!(matches!(err, BlogSaverError::NoResponse));
}

// ---------------------------------------------------------------------------
// Accessibility probe tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn probe_true_for_ok_response() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/here"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    assert!(is_url_accessible(&client, &format!("{}/here", server.uri())).await);
}

#[tokio::test]
async fn probe_false_for_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    assert!(!is_url_accessible(&client, &format!("{}/missing", server.uri())).await);
}

#[tokio::test]
async fn probe_false_for_unreachable_host() {
    let client = reqwest::Client::new();
    assert!(!is_url_accessible(&client, "http://127.0.0.1:9/").await);
}

// ---------------------------------------------------------------------------
// Pipeline tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pipeline_rejects_invalid_url_before_any_side_effect() {
    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(tmp.path());

    let err = pipeline.add_blog_post("not-a-url").await.unwrap_err();
    assert!(matches!(err, BlogSaverError::InvalidInput));

    // Nothing was created under the repository root.
    assert!(!tmp.path().join("posts").exists());
    assert!(!tmp.path().join("metadata").exists());
}

#[tokio::test]
async fn pipeline_rejects_unreachable_url_without_storing() {
    let server = MockServer::start().await;
    // No mocks mounted: every probe gets a 404.

    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(tmp.path());

    let url = format!("{}/post", server.uri());
    let err = pipeline.add_blog_post(&url).await.unwrap_err();
    assert!(matches!(err, BlogSaverError::Unreachable));
    assert!(!tmp.path().join("posts").exists());
}

#[tokio::test]
async fn pipeline_saves_extracted_post() {
    let server = MockServer::start().await;
    mount_page(&server, "/post", SAMPLE_HTML).await;

    let tmp = TempDir::new().unwrap();
    let pipeline = Pipeline::new(tmp.path());

    let url = format!("{}/post", server.uri());
    let filename = pipeline.add_blog_post(&url).await.unwrap();
    assert!(filename.starts_with("Hi_"));
    assert!(filename.ends_with(".txt"));

    let content = tokio::fs::read_to_string(tmp.path().join("posts").join(&filename))
        .await
        .unwrap();
    assert!(content.contains("# Hi"));
    assert!(content.contains(&format!("Source: {url}")));
    assert!(content.contains("Hello world"));

    let stem = filename.strip_suffix(".txt").unwrap();
    let raw = tokio::fs::read_to_string(tmp.path().join("metadata").join(format!("{stem}.json")))
        .await
        .unwrap();
    let metadata: Metadata = serde_json::from_str(&raw).unwrap();
    assert_eq!(metadata.title, "Hi");
    assert_eq!(metadata.url, url);
    assert_eq!(metadata.description, "A greeting");
    assert_eq!(metadata.author, "Jane");
}

#[tokio::test]
async fn pipeline_propagates_io_failure() {
    let server = MockServer::start().await;
    mount_page(&server, "/post", SAMPLE_HTML).await;

    let tmp = TempDir::new().unwrap();
    tokio::fs::write(tmp.path().join("posts"), "in the way")
        .await
        .unwrap();
    let pipeline = Pipeline::new(tmp.path());

    let url = format!("{}/post", server.uri());
    let err = pipeline.add_blog_post(&url).await.unwrap_err();
    assert!(matches!(err, BlogSaverError::Io(_)));
}

// ---------------------------------------------------------------------------
// Article API client tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_articles_parses_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "1", "title": "First" },
            { "id": "2", "title": "Second" },
        ])))
        .mount(&server)
        .await;

    let client = ArticleApiClient::new("key").with_base_url(server.uri());
    let articles = client.list_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, "1");
    assert_eq!(articles[1].title.as_deref(), Some("Second"));
}

#[tokio::test]
async fn list_articles_parses_wrapped_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "articles": [{ "id": "9" }]
        })))
        .mount(&server)
        .await;

    let client = ArticleApiClient::new("key").with_base_url(server.uri());
    let articles = client.list_articles().await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "9");
}

#[tokio::test]
async fn list_articles_error_status_is_not_masked() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ArticleApiClient::new("bad-key").with_base_url(server.uri());
    let err = client.list_articles().await.unwrap_err();
    assert!(matches!(err, BlogSaverError::Api(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn list_articles_unexpected_shape_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ArticleApiClient::new("key").with_base_url(server.uri());
    let err = client.list_articles().await.unwrap_err();
    assert!(matches!(err, BlogSaverError::Api(_)));
}

#[tokio::test]
async fn fetch_article_saves_formatted_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42",
            "title": "On Writing",
            "content": "Words in order.",
            "createdAt": "2024-01-15T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());
    let client = ArticleApiClient::new("key").with_base_url(server.uri());

    let filename = fetch_and_save_article(&client, &store, "42").await.unwrap();

    let content = tokio::fs::read_to_string(tmp.path().join("posts").join(&filename))
        .await
        .unwrap();
    assert!(content.contains("# On Writing"));
    assert!(content.contains("Source: Article AI Generator"));
    assert!(content.contains("ID: 42"));
    assert!(content.contains("Words in order."));
}

#[tokio::test]
async fn fetch_all_continues_past_individual_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "1", "title": "Good" },
            { "id": "2", "title": "Bad" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "1", "title": "Good", "content": "ok"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/articles/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let store = ContentStore::new(tmp.path());
    let client = ArticleApiClient::new("key").with_base_url(server.uri());

    let count = fetch_all_articles(&client, &store).await.unwrap();
    assert_eq!(count, 1);

    let mut saved = 0;
    let mut entries = tokio::fs::read_dir(tmp.path().join("posts")).await.unwrap();
    while entries.next_entry().await.unwrap().is_some() {
        saved += 1;
    }
    assert_eq!(saved, 1);
}

//! Integration tests for the acquisition pipeline.
//!
//! SearxNG instances and the reader service take configurable endpoints,
//! so a mock HTTP server can stand in for them and exercise the real
//! aggregate → extract → filter path without touching the fixed public
//! backends. Live tests against real backends are `#[ignore]`d.

use topic_scout::source::Source;
use topic_scout::{CandidateDoc, ScoutConfig, DEFAULT_MAX_DOCS, DEFAULT_MIN_LEN};

use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn searx_config(instances: &[&MockServer]) -> ScoutConfig {
    ScoutConfig {
        sources: instances
            .iter()
            .map(|server| Source::Searx {
                instance: server.uri(),
            })
            .collect(),
        user_agent: Some("TestBot/1.0".into()),
        ..Default::default()
    }
}

async fn mount_searx_results(server: &MockServer, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": results })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn aggregate_merges_dedups_and_orders() {
    let server = MockServer::start().await;
    mount_searx_results(
        &server,
        json!([
            {"title": "普通博客", "url": "https://blog.example.com/post?ref=searx", "content": "博客摘要"},
            {"title": "新浪报道", "url": "https://news.sina.com.cn/c/1#top", "content": "新浪摘要"},
            {"title": "重复链接", "url": "https://blog.example.com/post?ref=other", "content": "不该出现"},
            {"title": "百科条目", "url": "https://baike.baidu.com/item/xyz", "content": "被拉黑"}
        ]),
    )
    .await;

    let config = searx_config(&[&server]);
    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("aggregate should succeed");

    // Blacklisted domain dropped, duplicate collapsed, whitelist first.
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].domain, "news.sina.com.cn");
    assert_eq!(candidates[0].url, "https://news.sina.com.cn/c/1");
    assert_eq!(candidates[1].url, "https://blog.example.com/post");
    assert_eq!(candidates[1].snippet, "博客摘要");

    assert_eq!(meta.items_count, 2);
    assert_eq!(meta.attempted_sources, vec![format!("searxng:{}", server.uri())]);
    assert_eq!(
        meta.chosen_source,
        Some(format!("searxng:{}", server.uri()))
    );
    assert!(meta.errors.is_empty());
}

#[tokio::test]
async fn failing_sources_are_isolated_not_fatal() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&broken)
        .await;

    let healthy = MockServer::start().await;
    mount_searx_results(
        &healthy,
        json!([{"title": "唯一结果", "url": "https://news.example.cn/a", "content": ""}]),
    )
    .await;

    let config = searx_config(&[&broken, &healthy]);
    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("partial failure must not error");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://news.example.cn/a");
    // The broken instance is isolated into one tagged error entry; the
    // healthy one (second in registration order) becomes chosen_source.
    assert_eq!(meta.errors.len(), 1);
    assert!(meta.errors[0].starts_with(&format!("searxng:{}", broken.uri())));
    assert_eq!(
        meta.chosen_source,
        Some(format!("searxng:{}", healthy.uri()))
    );
}

#[tokio::test]
async fn all_sources_failing_yields_empty_result_with_one_error_each() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&broken)
        .await;

    // Nine registered sources, all pointing at the failing instance —
    // mirrors the worst case of the real nine-source registry.
    let config = ScoutConfig {
        sources: (0..9)
            .map(|i| Source::Searx {
                instance: format!("{}/instance-{i}", broken.uri()),
            })
            .collect(),
        user_agent: Some("TestBot/1.0".into()),
        ..Default::default()
    };

    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("total failure must not error");

    assert!(candidates.is_empty());
    assert_eq!(meta.errors.len(), 9);
    assert!(meta.attempted_sources.is_empty());
    assert!(meta.chosen_source.is_none());
    assert_eq!(meta.items_count, 0);
}

#[tokio::test]
async fn empty_sources_count_as_errors_not_attempts() {
    let empty = MockServer::start().await;
    mount_searx_results(&empty, json!([])).await;

    let config = searx_config(&[&empty]);
    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("empty result must not error");

    assert!(candidates.is_empty());
    assert_eq!(meta.errors.len(), 1);
    assert!(meta.errors[0].ends_with("no results"));
    assert!(meta.attempted_sources.is_empty());
    assert!(meta.chosen_source.is_none());
}

#[tokio::test]
async fn chosen_source_is_first_contributor_even_if_its_hits_are_filtered() {
    // First instance returns only a blacklisted hit; second returns a
    // surviving one. chosen_source still names the first — preserved
    // diagnostic semantics, not a ranking signal.
    let first = MockServer::start().await;
    mount_searx_results(
        &first,
        json!([{"title": "百科", "url": "https://baike.baidu.com/item/1", "content": ""}]),
    )
    .await;

    let second = MockServer::start().await;
    mount_searx_results(
        &second,
        json!([{"title": "新闻", "url": "https://news.example.cn/b", "content": ""}]),
    )
    .await;

    let config = searx_config(&[&first, &second]);
    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("aggregate should succeed");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].domain, "news.example.cn");
    assert_eq!(meta.chosen_source, Some(format!("searxng:{}", first.uri())));
    assert_eq!(meta.attempted_sources.len(), 2);
}

#[tokio::test]
async fn candidates_capped_at_max_results_with_distinct_urls() {
    let server = MockServer::start().await;
    let results: Vec<serde_json::Value> = (0..30)
        .map(|i| json!({"title": format!("条目{i}"), "url": format!("https://news.example.cn/{i}"), "content": ""}))
        .collect();
    mount_searx_results(&server, serde_json::Value::Array(results)).await;

    let config = searx_config(&[&server]);
    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("aggregate should succeed");

    assert_eq!(candidates.len(), 12);
    assert_eq!(meta.items_count, 12);
    let urls: std::collections::HashSet<&str> =
        candidates.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(urls.len(), candidates.len());
}

fn article(n: usize) -> String {
    "新能源汽车产业正在经历深刻变革，企业竞争格局快速演化。".repeat(n)
}

#[tokio::test]
async fn full_pipeline_search_extract_filter() {
    let content_server = MockServer::start().await;
    // Reader-service lookups (proxied URL in the path) fail — every
    // extraction goes through the direct stage.
    Mock::given(method("GET"))
        .and(path_regex("^/https?:"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&content_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/long"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "<html><body><article>{}</article></body></html>",
            article(30)
        )))
        .mount(&content_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dead"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&content_server)
        .await;

    let search_server = MockServer::start().await;
    mount_searx_results(
        &search_server,
        json!([
            {"title": "长文", "url": format!("{}/long", content_server.uri()), "content": "抓取失败时的摘要"},
            {"title": "死链", "url": format!("{}/dead", content_server.uri()), "content": ""}
        ]),
    )
    .await;

    let config = ScoutConfig {
        sources: vec![Source::Searx {
            instance: search_server.uri(),
        }],
        reader_endpoint: content_server.uri(),
        user_agent: Some("TestBot/1.0".into()),
        ..Default::default()
    };

    let (candidates, meta) = topic_scout::aggregate("新能源汽车", 12, &config)
        .await
        .expect("aggregate should succeed");
    assert_eq!(candidates.len(), 2);
    assert_eq!(meta.items_count, 2);

    let (documents, stats) =
        topic_scout::extract_and_filter(&candidates, DEFAULT_MIN_LEN, DEFAULT_MAX_DOCS, &config)
            .await;

    // The dead link has no snippet to fall back on and is rejected as
    // empty; the long article survives with non-empty content.
    assert_eq!(documents.len(), 1);
    assert!(documents[0].content.contains("新能源汽车产业"));
    assert!(!documents[0].content.is_empty());
    assert_eq!(stats.kept, documents.len());
    assert!(stats.kept <= DEFAULT_MAX_DOCS);
    assert_eq!(stats.attempted, 2);
    assert_eq!(stats.empty, 1);
}

#[tokio::test]
async fn extract_and_filter_is_deterministic_for_same_inputs() {
    // Every fetch (reader and direct) fails, so only snippets are used —
    // the pipeline must still produce documents, identically each run.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let candidates = vec![
        CandidateDoc {
            title: "甲".into(),
            url: format!("{}/a", server.uri()),
            domain: "news.example.cn".into(),
            snippet: "新能源汽车补贴政策进入新阶段，行业迎来结构调整。".repeat(8),
        },
        CandidateDoc {
            title: "乙".into(),
            url: format!("{}/b", server.uri()),
            domain: "news.example.cn".into(),
            snippet: "动力电池技术路线之争延续，磷酸铁锂份额继续扩大。".repeat(8),
        },
    ];

    let config = ScoutConfig {
        reader_endpoint: server.uri(),
        user_agent: Some("TestBot/1.0".into()),
        ..Default::default()
    };

    let (first, _) =
        topic_scout::extract_and_filter(&candidates, DEFAULT_MIN_LEN, DEFAULT_MAX_DOCS, &config)
            .await;
    let (second, _) =
        topic_scout::extract_and_filter(&candidates, DEFAULT_MIN_LEN, DEFAULT_MAX_DOCS, &config)
            .await;

    assert!(!first.is_empty());
    let first_urls: Vec<&str> = first.iter().map(|d| d.url.as_str()).collect();
    let second_urls: Vec<&str> = second.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(first_urls, second_urls);
}

// ── Live integration tests (require network) ──────────────────────────
// Run with: cargo test --test pipeline_integration -- --ignored

#[tokio::test]
#[ignore]
async fn live_aggregate_returns_candidates() {
    let config = ScoutConfig::from_env();
    match topic_scout::aggregate("新能源汽车", 12, &config).await {
        Ok((candidates, meta)) => {
            assert!(candidates.len() <= 12);
            let urls: std::collections::HashSet<&str> =
                candidates.iter().map(|c| c.url.as_str()).collect();
            assert_eq!(urls.len(), candidates.len());
            assert!(candidates.iter().all(|c| !c.domain.ends_with("baike.baidu.com")));
            eprintln!(
                "live aggregate: {} candidates, {} errors, chosen={:?}",
                candidates.len(),
                meta.errors.len(),
                meta.chosen_source
            );
        }
        Err(e) => eprintln!("live aggregate failed (acceptable in CI): {e}"),
    }
}

#[tokio::test]
#[ignore]
async fn live_full_pipeline_produces_non_empty_documents() {
    let config = ScoutConfig::from_env();
    let Ok((candidates, _meta)) = topic_scout::aggregate("新能源汽车", 8, &config).await else {
        return;
    };
    let (documents, stats) =
        topic_scout::extract_and_filter(&candidates, DEFAULT_MIN_LEN, DEFAULT_MAX_DOCS, &config)
            .await;
    assert_eq!(stats.kept, documents.len());
    for doc in &documents {
        assert!(!doc.content.is_empty());
        assert!(!doc.url.is_empty());
    }
}

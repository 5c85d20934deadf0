//! Integration tests for command entry: direct-send mode, empty results,
//! search failures, and first-page session attachment.

mod common;

use std::sync::Arc;

use common::{FakeFetcher, FakeSearch, RecordingMessenger, fake_urls, init_logging, test_config};
use imgscout::{ImageSearchCommand, InMemoryCorrelator, Invocation, ReplyCorrelator, UserId};

type TestCommand = ImageSearchCommand<
    FakeSearch,
    Arc<FakeFetcher>,
    Arc<RecordingMessenger>,
    Arc<InMemoryCorrelator>,
>;

struct Harness {
    command: TestCommand,
    messenger: Arc<RecordingMessenger>,
    correlator: Arc<InMemoryCorrelator>,
    fetcher: Arc<FakeFetcher>,
}

fn harness(search: FakeSearch, urls: &[String]) -> Harness {
    init_logging();
    let config = test_config();
    let messenger = Arc::new(RecordingMessenger::new());
    let correlator = Arc::new(InMemoryCorrelator::new(
        config.session_ttl(),
        config.sweep_interval(),
    ));
    let fetcher = Arc::new(FakeFetcher::serving_all(urls));
    let command = ImageSearchCommand::new(
        config,
        search,
        Arc::clone(&fetcher),
        Arc::clone(&messenger),
        Arc::clone(&correlator),
    );
    Harness {
        command,
        messenger,
        correlator,
        fetcher,
    }
}

fn invocation(text: &str) -> Invocation {
    Invocation {
        sender: UserId::new("owner"),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_direct_mode_bundles_attachments() {
    // spec scenario B: "dogs -5" is parsed as query "dogs" with count 5
    let urls = fake_urls(10);
    let h = harness(FakeSearch::with_results(urls.clone()), &urls);

    h.command.handle_invocation(invocation("dogs -5")).await.unwrap();

    let sent = h.messenger.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].body, "Searching images...");
    assert_eq!(sent[1].body, "5 image(s) for \"dogs\"");
    assert_eq!(sent[1].attachments.len(), 5);
    assert!(h.correlator.is_empty().await, "direct mode must not create a session");
}

#[tokio::test]
async fn test_direct_mode_clips_count_to_results() {
    let urls = fake_urls(3);
    let h = harness(FakeSearch::with_results(urls.clone()), &urls);

    h.command.handle_invocation(invocation("-9 dogs")).await.unwrap();

    assert_eq!(h.messenger.last().attachments.len(), 3);
}

#[tokio::test]
async fn test_direct_mode_contains_per_item_failures() {
    let urls = fake_urls(5);
    let h = harness(FakeSearch::with_results(urls.clone()), &urls);
    h.fetcher.poison(&urls[1]);
    h.fetcher.poison(&urls[4]);

    h.command.handle_invocation(invocation("dogs -5")).await.unwrap();

    let last = h.messenger.last();
    assert_eq!(last.attachments.len(), 3);
    assert_eq!(last.body, "3 image(s) for \"dogs\"");
}

#[tokio::test]
async fn test_no_results_notice() {
    // spec scenario C: empty list is "no results", not an error
    let h = harness(FakeSearch::with_results(Vec::new()), &[]);

    h.command.handle_invocation(invocation("dogs")).await.unwrap();

    let sent = h.messenger.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].body, "No images found for \"dogs\".");
    assert!(sent.iter().all(|m| m.attachments.is_empty()));
    assert!(h.correlator.is_empty().await);
}

#[tokio::test]
async fn test_search_failure_notice() {
    let h = harness(FakeSearch::unavailable(), &[]);

    h.command.handle_invocation(invocation("dogs")).await.unwrap();

    assert_eq!(h.messenger.last().body, "Image search failed.");
    assert!(h.correlator.is_empty().await);
}

#[tokio::test]
async fn test_blank_invocation_prompts_for_query() {
    let h = harness(FakeSearch::with_results(fake_urls(3)), &fake_urls(3));

    h.command.handle_invocation(invocation("   ")).await.unwrap();

    let sent = h.messenger.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, "Please provide a search query.");
}

#[tokio::test]
async fn test_canvas_mode_attaches_first_page_session() {
    let urls = fake_urls(45);
    let h = harness(FakeSearch::with_results(urls.clone()), &urls);

    h.command.handle_invocation(invocation("cats")).await.unwrap();

    let sent = h.messenger.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[1].body.starts_with("45 images found for \"cats\"."));
    assert_eq!(sent[1].attachments.len(), 1);
    assert_eq!(sent[1].attachments[0].filename, "results.png");

    let state = h.correlator.lookup(&h.messenger.id_of(2)).await.unwrap();
    assert_eq!(state.owner, UserId::new("owner"));
    assert_eq!(state.current_page, 1);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.page_size, 21);
    assert_eq!(state.displayed_map.len(), 21);
    assert_eq!(state.all_urls.len(), 45);
}

#[tokio::test]
async fn test_all_candidates_failing_surfaces_render_notice() {
    // all URLs exist in the search results but none is served
    let urls = fake_urls(5);
    let h = harness(FakeSearch::with_results(urls.clone()), &[]);

    h.command.handle_invocation(invocation("cats")).await.unwrap();

    assert_eq!(h.messenger.last().body, "Failed to render image results.");
    assert!(h.correlator.is_empty().await);
}

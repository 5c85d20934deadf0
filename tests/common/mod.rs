//! Shared in-memory fakes for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use imgscout::{
    FetchUrl, MessageId, Messenger, OutgoingMessage, Result, ScoutError, SearchApi, SearchConfig,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> SearchConfig {
    SearchConfig::builder()
        .api_endpoint("http://localhost/api/pin")
        .build()
        .unwrap()
}

/// Sequentially numbered fake URLs
pub fn fake_urls(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("http://img/{i}.jpg")).collect()
}

/// A small solid-color PNG with the given dimensions
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([90, 120, 200, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

/// Search API fake returning a fixed result list (or an error)
pub struct FakeSearch {
    pub results: Option<Vec<String>>,
}

impl FakeSearch {
    pub fn with_results(results: Vec<String>) -> Self {
        Self {
            results: Some(results),
        }
    }

    pub fn unavailable() -> Self {
        Self { results: None }
    }
}

impl SearchApi for FakeSearch {
    async fn search(&self, _query: &str, cap: u32) -> Result<Vec<String>> {
        match &self.results {
            Some(results) => Ok(results.iter().take(cap as usize).cloned().collect()),
            None => Err(ScoutError::search_unavailable("backend down")),
        }
    }
}

/// Fetcher fake serving canned bytes per URL
///
/// URLs absent from the map fail to fetch; URLs can also be poisoned after
/// construction to simulate a link dying between render and selection.
pub struct FakeFetcher {
    payloads: HashMap<String, Vec<u8>>,
    poisoned: Mutex<HashSet<String>>,
}

impl FakeFetcher {
    pub fn new(payloads: HashMap<String, Vec<u8>>) -> Self {
        Self {
            payloads,
            poisoned: Mutex::new(HashSet::new()),
        }
    }

    /// Serve the same decodable PNG for every URL
    pub fn serving_all(urls: &[String]) -> Self {
        let png = png_bytes(400, 300);
        Self::new(urls.iter().map(|u| (u.clone(), png.clone())).collect())
    }

    /// Make `url` fail from now on
    pub fn poison(&self, url: &str) {
        self.poisoned.lock().unwrap().insert(url.to_string());
    }
}

impl FetchUrl for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        if self.poisoned.lock().unwrap().contains(url) {
            return Err(ScoutError::fetch_failed(url, "poisoned"));
        }
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| ScoutError::fetch_failed(url, "not served"))
    }
}

/// Messenger fake recording every outgoing message and minting IDs m1, m2, ...
#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<OutgoingMessage>>,
    counter: AtomicUsize,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> OutgoingMessage {
        self.sent.lock().unwrap().last().cloned().expect("no message sent")
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// ID the messenger minted for the n-th message (1-based)
    pub fn id_of(&self, n: usize) -> MessageId {
        MessageId::new(format!("m{n}"))
    }
}

impl Messenger for RecordingMessenger {
    async fn send(&self, message: OutgoingMessage) -> Result<MessageId> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(message);
        Ok(MessageId::new(format!("m{n}")))
    }
}

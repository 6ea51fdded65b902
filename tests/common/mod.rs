#![allow(dead_code)]

use arrapi::{ApiRequest, ApiResponse, RadarrClient, Result, Transport};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const HOST: &str = "https://127.0.0.1:7878";
pub const API_KEY: &str = "0123456789abcdef";

/// Records every request and answers from a queue of canned responses.
/// An exhausted queue answers `200 {}`.
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
}

impl MockTransport {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ApiResponse {
                status: 200,
                body: "{}".to_string(),
            });
        Ok(response)
    }
}

pub fn radarr() -> (RadarrClient<MockTransport>, MockTransport) {
    let transport = MockTransport::default();
    let client = RadarrClient::new(transport.clone(), HOST, API_KEY).unwrap();
    (client, transport)
}

pub fn url(path_and_query: &str) -> String {
    format!("{}/api/v3/{}", HOST, path_and_query)
}

pub fn fixture(name: &str) -> &'static str {
    match name {
        "movie" => include_str!("../fixtures/movie.json"),
        "movie_all" => include_str!("../fixtures/movie_all.json"),
        "movie_lookup" => include_str!("../fixtures/movie_lookup.json"),
        "moviefile" => include_str!("../fixtures/moviefile.json"),
        "moviefiles" => include_str!("../fixtures/moviefiles.json"),
        "movie_history" => include_str!("../fixtures/movie_history.json"),
        "movie_blocklist" => include_str!("../fixtures/movie_blocklist.json"),
        "queue" => include_str!("../fixtures/queue.json"),
        "queue_details" => include_str!("../fixtures/queue_details.json"),
        "queue_status" => include_str!("../fixtures/queue_status.json"),
        "indexer" => include_str!("../fixtures/indexer.json"),
        "indexer_all" => include_str!("../fixtures/indexer_all.json"),
        "qualityprofile" => include_str!("../fixtures/qualityprofile.json"),
        "rootfolder" => include_str!("../fixtures/rootfolder.json"),
        "tag" => include_str!("../fixtures/tag.json"),
        other => panic!("unknown fixture {}", other),
    }
}

//! Recording transport for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::form::FormParams;
use super::transport::Transport;
use crate::error::{PushError, PushResult};

/// A single recorded `post_form` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    pub url: String,
    pub params: FormParams,
}

/// Replays canned results in order and records every post.
///
/// Running out of canned responses panics, so a test that posts more than it
/// expects fails loudly.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<PushResult<String>>>,
    posts: Mutex<Vec<RecordedPost>>,
}

impl MockTransport {
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|body| Ok(body.into())))
    }

    /// Canned results may be errors, returned as-is from `post_form`
    pub fn with_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = PushResult<String>>,
    {
        Self {
            responses: Mutex::new(results.into_iter().collect()),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_form(&self, url: &str, params: &FormParams) -> PushResult<String> {
        self.posts.lock().unwrap().push(RecordedPost {
            url: url.to_string(),
            params: params.clone(),
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no canned response left for {url}"))
    }
}

/// A transport failure carrying a real `reqwest::Error`
pub fn transport_error(url: &str) -> PushError {
    let source = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("an invalid URL cannot build a request");
    PushError::transport(url, source)
}

//! Canned-response [`Fetch`] implementation for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::FetchError;
use crate::http::{Fetch, FetchResponse};

enum Canned {
    Response(FetchResponse),
    Error(String),
}

/// Serves responses registered per URL and records every request made.
///
/// Unregistered URLs answer 404.
#[derive(Default)]
pub struct MemoryFetcher {
    routes: HashMap<String, Canned>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> &mut Self {
        self.routes
            .insert(url.into(), Canned::Response(FetchResponse::ok(body)));
        self
    }

    pub fn respond_status(&mut self, url: impl Into<String>, status: u16) -> &mut Self {
        self.routes.insert(
            url.into(),
            Canned::Response(FetchResponse {
                status,
                body: Vec::new(),
                rate_limit: None,
            }),
        );
        self
    }

    pub fn fail(&mut self, url: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.routes.insert(url.into(), Canned::Error(message.into()));
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn was_requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|u| u == url)
    }
}

impl Fetch for MemoryFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some(Canned::Response(resp)) => Ok(resp.clone()),
            Some(Canned::Error(msg)) => Err(FetchError::transport(msg.clone())),
            None => Ok(FetchResponse {
                status: 404,
                body: b"404: Not Found".to_vec(),
                rate_limit: None,
            }),
        }
    }
}

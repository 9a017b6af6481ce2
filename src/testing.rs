//! In-memory transport for unit tests

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use crate::client::BeszelClient;
use crate::error::BeszelResult;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Replays canned responses and records every request it sees
pub struct MockTransport {
    responses: RefCell<VecDeque<ApiResponse>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    closes: Rc<Cell<usize>>,
}

/// Inspection handle that outlives the transport
#[derive(Clone)]
pub struct MockHandle {
    requests: Rc<RefCell<Vec<ApiRequest>>>,
    closes: Rc<Cell<usize>>,
}

impl MockTransport {
    pub fn new() -> (Self, MockHandle) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let closes = Rc::new(Cell::new(0));
        let transport = Self {
            responses: RefCell::new(VecDeque::new()),
            requests: Rc::clone(&requests),
            closes: Rc::clone(&closes),
        };
        (transport, MockHandle { requests, closes })
    }

    /// Queue a JSON response
    pub fn respond(self, status: u16, body: Value) -> Self {
        self.respond_raw(status, &body.to_string())
    }

    /// Queue a raw body response
    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(ApiResponse {
            status,
            body: body.to_string(),
        });
        self
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> BeszelResult<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());
        let response = self.responses.borrow_mut().pop_front().unwrap_or(ApiResponse {
            status: 200,
            body: "{}".to_string(),
        });
        Ok(response)
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

impl MockHandle {
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests.borrow().last().cloned().expect("no request was sent")
    }

    pub fn closes(&self) -> usize {
        self.closes.get()
    }
}

/// Client against `https://hub.example.com` backed by `transport`
pub fn client_with(transport: MockTransport, token: Option<&str>) -> BeszelClient<MockTransport> {
    BeszelClient::with_transport("https://hub.example.com/", token.map(str::to_string), transport)
}

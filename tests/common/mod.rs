//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use brex_axios::clients::{
    BoxFuture, HttpError, InterceptorError, Transport, TransportError, TransportInterceptor,
    TransportRequest, TransportResult,
};
use serde_json::Value;

/// Handle onto what a [`ScriptedTransport`] received.
#[derive(Clone, Default)]
pub struct Recorded {
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

impl Recorded {
    pub fn all(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> TransportRequest {
        self.all().pop().expect("no request was sent")
    }

    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// An in-memory transport that replays queued outcomes.
///
/// Requests run through any installed transport interceptors before they
/// are recorded. When the queue is empty, a `200` echo of the request URL
/// is returned.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<TransportResult, String>>>,
    interceptors: Vec<TransportInterceptor>,
    recorded: Recorded,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Recorded {
        self.recorded.clone()
    }

    /// Queues a successful envelope.
    pub fn ok(self, status: u16, content: Value) -> Self {
        self.push(Ok(TransportResult::success(content, status, HashMap::new())))
    }

    /// Queues a successful envelope without content.
    pub fn empty(self, status: u16) -> Self {
        self.push(Ok(TransportResult {
            status,
            ..TransportResult::default()
        }))
    }

    /// Queues an error envelope without content.
    pub fn fail(self, status: u16, message: &str) -> Self {
        self.push(Ok(TransportResult::failure(
            TransportError::new(message),
            status,
            HashMap::new(),
        )))
    }

    /// Queues a failure where the transport produced no envelope at all.
    pub fn throw(self, message: &str) -> Self {
        self.push(Err(message.to_string()))
    }

    fn push(self, outcome: Result<TransportResult, String>) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResult, HttpError>> {
        let request = self
            .interceptors
            .iter()
            .fold(request, |request, interceptor| interceptor(request));
        let echo = serde_json::json!({ "url": request.url });
        self.recorded.requests.lock().unwrap().push(request);

        let outcome = self.outcomes.lock().unwrap().pop_front();
        Box::pin(async move {
            match outcome {
                Some(Ok(result)) => Ok(result),
                Some(Err(message)) => Err(InterceptorError::new(message).into()),
                None => Ok(TransportResult::success(echo, 200, HashMap::new())),
            }
        })
    }

    fn add_request_interceptor(&mut self, interceptor: TransportInterceptor) {
        self.interceptors.push(interceptor);
    }
}

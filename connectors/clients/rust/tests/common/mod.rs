// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Test transports: an in-memory imitation of the service, and a scripted
//! transport that replays canned responses.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_LOCATION, IF_MATCH, IF_NONE_MATCH, LOCATION};
use http::{HeaderMap, Method, StatusCode};
use orchestrate_client::{
    Client, ClientConfig, HttpRequest, HttpResponse, Transport, TransportError,
};
use serde_json::{json, Value};

pub const API_KEY: &str = "test-key";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

pub fn config() -> ClientConfig {
    ClientConfig::new(API_KEY).with_base_url("https://api.example.test/v0/")
}

fn response(status: StatusCode, headers: HeaderMap, body: Bytes) -> HttpResponse {
    HttpResponse {
        status,
        headers,
        body,
    }
}

fn empty(status: StatusCode) -> HttpResponse {
    response(status, HeaderMap::new(), Bytes::new())
}

fn json_response(status: StatusCode, body: Value) -> HttpResponse {
    response(status, HeaderMap::new(), Bytes::from(body.to_string()))
}

fn error(status: StatusCode, message: &str, locator: &str) -> HttpResponse {
    json_response(status, json!({ "message": message, "locator": locator }))
}

fn with_header(mut resp: HttpResponse, name: http::HeaderName, value: String) -> HttpResponse {
    resp.headers
        .insert(name, HeaderValue::from_str(&value).expect("test header value"));
    resp
}

fn header<'a>(req: &'a HttpRequest, name: &http::HeaderName) -> Option<&'a str> {
    req.headers.get(name).and_then(|v| v.to_str().ok())
}

// ---------------------------------------------------------------------------
// FakeService
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Slot {
    current: Option<String>,
    history: HashMap<String, Bytes>,
}

struct StoredEvent {
    timestamp: u64,
    ordinal: u64,
    body: Bytes,
}

#[derive(Default)]
struct State {
    values: BTreeMap<(String, String), Slot>,
    relations: HashMap<(String, String, String), Vec<(String, String)>>,
    events: HashMap<(String, String, String), Vec<StoredEvent>>,
    next_ref: u64,
    next_ordinal: u64,
    clock: u64,
}

/// Just enough of the service to exercise every operation end to end.
#[derive(Default)]
pub struct FakeService {
    state: Mutex<State>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one request")
    }

    fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let path = req.url.path().strip_prefix("/v0/").unwrap_or_default();
        let segments: Vec<String> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').map(str::to_owned).collect()
        };
        let query: HashMap<String, String> = req.url.query_pairs().into_owned().collect();
        let seg: Vec<&str> = segments.iter().map(String::as_str).collect();
        let mut state = self.state.lock().unwrap();

        match (&req.method, seg.as_slice()) {
            (&Method::HEAD, []) => empty(StatusCode::OK),
            (&Method::GET, [c, k]) => state.get_latest(c, k),
            (&Method::GET, [c, k, "refs", r]) => state.get_ref(c, k, r),
            (&Method::PUT, [c, k]) => state.put(c, k, req),
            (&Method::DELETE, [c, k]) if query.get("purge").map(String::as_str) == Some("true") => {
                state.values.remove(&(c.to_string(), k.to_string()));
                empty(StatusCode::NO_CONTENT)
            }
            (&Method::DELETE, [c, k]) => state.delete(c, k, req),
            (&Method::DELETE, [c]) if query.get("force").map(String::as_str) == Some("true") => {
                state.values.retain(|(col, _), _| col != c);
                empty(StatusCode::NO_CONTENT)
            }
            (&Method::GET, [c]) => state.list(c, &query),
            (&Method::PUT, [c, k, "relation", kind, c2, k2]) => {
                state
                    .relations
                    .entry((c.to_string(), k.to_string(), kind.to_string()))
                    .or_default()
                    .push((c2.to_string(), k2.to_string()));
                empty(StatusCode::NO_CONTENT)
            }
            (&Method::GET, [c, k, "relations", hops @ ..]) if !hops.is_empty() => {
                state.traverse(c, k, hops)
            }
            (&Method::PUT, [c, k, "events", kind]) => state.put_event(c, k, kind, &query, req),
            (&Method::GET, [c, k, "events", kind]) => state.get_events(c, k, kind, &query),
            _ => error(StatusCode::NOT_FOUND, "no such route", path),
        }
    }
}

impl State {
    fn get_latest(&self, c: &str, k: &str) -> HttpResponse {
        let slot = self.values.get(&(c.to_owned(), k.to_owned()));
        match slot.and_then(|s| s.current.as_ref().map(|r| (r, &s.history[r]))) {
            Some((r, body)) => with_header(
                response(StatusCode::OK, HeaderMap::new(), body.clone()),
                CONTENT_LOCATION,
                format!("/v0/{c}/{k}/refs/{r}"),
            ),
            None => error(
                StatusCode::NOT_FOUND,
                "The requested items could not be found.",
                &format!("{c}/{k}"),
            ),
        }
    }

    fn get_ref(&self, c: &str, k: &str, r: &str) -> HttpResponse {
        match self
            .values
            .get(&(c.to_owned(), k.to_owned()))
            .and_then(|s| s.history.get(r))
        {
            Some(body) => response(StatusCode::OK, HeaderMap::new(), body.clone()),
            None => error(
                StatusCode::NOT_FOUND,
                "The requested items could not be found.",
                &format!("{c}/{k}/refs/{r}"),
            ),
        }
    }

    fn precondition_failed(&self, c: &str, k: &str, req: &HttpRequest) -> bool {
        let current = self
            .values
            .get(&(c.to_owned(), k.to_owned()))
            .and_then(|s| s.current.clone());
        if header(req, &IF_NONE_MATCH) == Some("\"*\"") && current.is_some() {
            return true;
        }
        if let Some(expected) = header(req, &IF_MATCH) {
            return current.map(|r| format!("\"{r}\"")).as_deref() != Some(expected);
        }
        false
    }

    fn put(&mut self, c: &str, k: &str, req: &HttpRequest) -> HttpResponse {
        if self.precondition_failed(c, k, req) {
            return error(
                StatusCode::PRECONDITION_FAILED,
                "The item has been stored but conditions failed.",
                &format!("{c}/{k}"),
            );
        }
        self.next_ref += 1;
        let r = format!("{:016x}", self.next_ref);
        let slot = self.values.entry((c.to_owned(), k.to_owned())).or_default();
        slot.history
            .insert(r.clone(), req.body.clone().unwrap_or_default());
        slot.current = Some(r.clone());
        with_header(
            empty(StatusCode::CREATED),
            LOCATION,
            format!("/v0/{c}/{k}/refs/{r}"),
        )
    }

    fn delete(&mut self, c: &str, k: &str, req: &HttpRequest) -> HttpResponse {
        if self.precondition_failed(c, k, req) {
            return error(
                StatusCode::PRECONDITION_FAILED,
                "The item has been stored but conditions failed.",
                &format!("{c}/{k}"),
            );
        }
        if let Some(slot) = self.values.get_mut(&(c.to_owned(), k.to_owned())) {
            slot.current = None;
        }
        empty(StatusCode::NO_CONTENT)
    }

    fn item(&self, c: &str, k: &str) -> Option<Value> {
        let slot = self.values.get(&(c.to_owned(), k.to_owned()))?;
        let r = slot.current.as_ref()?;
        let value: Value = serde_json::from_slice(&slot.history[r]).unwrap_or(Value::Null);
        Some(json!({
            "path": { "collection": c, "key": k, "ref": r },
            "value": value,
        }))
    }

    fn list(&self, c: &str, query: &HashMap<String, String>) -> HttpResponse {
        let limit: usize = query
            .get("limit")
            .and_then(|l| l.parse().ok())
            .unwrap_or(10);
        let live: Vec<&String> = self
            .values
            .iter()
            .filter(|((col, key), slot)| {
                col == c
                    && slot.current.is_some()
                    && query.get("afterKey").map_or(true, |a| key > a)
                    && query.get("startKey").map_or(true, |s| key >= s)
            })
            .map(|((_, key), _)| key)
            .collect();

        let page: Vec<Value> = live
            .iter()
            .take(limit)
            .filter_map(|k| self.item(c, k))
            .collect();
        let mut body = json!({ "count": page.len(), "results": page });
        if live.len() > limit {
            let last = live[limit - 1];
            body["next"] = json!(format!("/v0/{c}?limit={limit}&afterKey={last}"));
        }
        json_response(StatusCode::OK, body)
    }

    fn traverse(&self, c: &str, k: &str, hops: &[&str]) -> HttpResponse {
        let mut frontier = vec![(c.to_owned(), k.to_owned())];
        for hop in hops {
            frontier = frontier
                .iter()
                .flat_map(|(col, key)| {
                    self.relations
                        .get(&(col.clone(), key.clone(), hop.to_string()))
                        .cloned()
                        .unwrap_or_default()
                })
                .collect();
        }
        let results: Vec<Value> = frontier
            .iter()
            .filter_map(|(col, key)| self.item(col, key))
            .collect();
        json_response(
            StatusCode::OK,
            json!({ "count": results.len(), "results": results }),
        )
    }

    fn put_event(
        &mut self,
        c: &str,
        k: &str,
        kind: &str,
        query: &HashMap<String, String>,
        req: &HttpRequest,
    ) -> HttpResponse {
        self.clock += 1_000;
        self.next_ordinal += 1;
        let timestamp = query
            .get("timestamp")
            .and_then(|t| t.parse().ok())
            .unwrap_or(1_400_000_000_000 + self.clock);
        let ordinal = self.next_ordinal;
        self.events
            .entry((c.to_owned(), k.to_owned(), kind.to_owned()))
            .or_default()
            .push(StoredEvent {
                timestamp,
                ordinal,
                body: req.body.clone().unwrap_or_default(),
            });
        with_header(
            empty(StatusCode::NO_CONTENT),
            LOCATION,
            format!("/v0/{c}/{k}/events/{kind}/{timestamp}/{ordinal}"),
        )
    }

    fn get_events(
        &self,
        c: &str,
        k: &str,
        kind: &str,
        query: &HashMap<String, String>,
    ) -> HttpResponse {
        let start: u64 = query.get("start").and_then(|s| s.parse().ok()).unwrap_or(0);
        let end: u64 = query
            .get("end")
            .and_then(|s| s.parse().ok())
            .unwrap_or(u64::MAX);
        let mut selected: Vec<&StoredEvent> = self
            .events
            .get(&(c.to_owned(), k.to_owned(), kind.to_owned()))
            .map(|events| {
                events
                    .iter()
                    .filter(|e| e.timestamp >= start && e.timestamp <= end)
                    .collect()
            })
            .unwrap_or_default();
        // Newest first.
        selected.sort_by(|a, b| (b.timestamp, b.ordinal).cmp(&(a.timestamp, a.ordinal)));
        let results: Vec<Value> = selected
            .iter()
            .map(|e| {
                json!({
                    "ordinal": e.ordinal,
                    "timestamp": e.timestamp,
                    "value": serde_json::from_slice::<Value>(&e.body).unwrap_or(Value::Null),
                })
            })
            .collect();
        json_response(
            StatusCode::OK,
            json!({ "count": results.len(), "results": results }),
        )
    }
}

#[async_trait]
impl Transport for FakeService {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

pub fn fake_client() -> (Client<Arc<FakeService>>, Arc<FakeService>) {
    init_tracing();
    let service = FakeService::new();
    let client = Client::with_transport(config(), Arc::clone(&service)).expect("client");
    (client, service)
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// Replays responses in order; an exhausted script is a transport failure.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: StatusCode, headers: &[(&str, &str)], body: &str) {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                http::HeaderName::from_bytes(name.as_bytes()).expect("header name"),
                HeaderValue::from_str(value).expect("header value"),
            );
        }
        self.script.lock().unwrap().push_back(Ok(response(
            status,
            map,
            Bytes::copy_from_slice(body.as_bytes()),
        )));
    }

    pub fn fail(&self, reason: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Err(reason.to_owned()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(TransportError::new(reason)),
            None => Err(TransportError::new("script exhausted")),
        }
    }
}

pub fn scripted_client() -> (Client<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    init_tracing();
    let transport = ScriptedTransport::new();
    let client = Client::with_transport(config(), Arc::clone(&transport)).expect("client");
    (client, transport)
}

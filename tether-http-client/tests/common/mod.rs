//! Shared helpers for the client integration tests.

#![allow(dead_code)]

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Statuses the test server answers on `/status/{code}`.
pub const STATUS_CODES: &[u16] = &[200, 302, 400, 401, 403, 404, 409, 418, 422, 429, 500, 503];

pub const REDIRECT_TARGET: &str = "http://example.com/redirect";

/// Start a server that answers `/status/{code}` with that status.
///
/// - `/status/200` returns the body `hello`
/// - `/status/302` carries `Location: http://example.com/redirect`
/// - `/redirect/bare` is a 302 without `Location`
/// - `/redirect/local` is a 302 pointing back at `/status/200`
/// - `POST /echo` returns 201 with the body `created`
///
/// Anything else is a 404.
pub async fn start_status_server() -> MockServer {
    let server = MockServer::start().await;

    for &code in STATUS_CODES {
        let template = match code {
            200 => ResponseTemplate::new(200).set_body_string("hello"),
            302 => ResponseTemplate::new(302).insert_header("Location", REDIRECT_TARGET),
            other => ResponseTemplate::new(other),
        };
        Mock::given(path(format!("/status/{}", code)))
            .respond_with(template)
            .mount(&server)
            .await;
    }

    Mock::given(path("/redirect/bare"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    Mock::given(path("/redirect/local"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/status/200", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    server
}

/// One captured tracing event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub target: String,
    pub level: Level,
    pub message: String,
}

/// Events captured by a [`CaptureLayer`].
#[derive(Debug, Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<CapturedEvent>>>);

impl CapturedEvents {
    /// Events emitted under `target`.
    pub fn for_target(&self, target: &str) -> Vec<CapturedEvent> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.target == target)
            .cloned()
            .collect()
    }
}

struct CaptureLayer(CapturedEvents);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        self.0.0.lock().unwrap().push(CapturedEvent {
            target: metadata.target().to_string(),
            level: *metadata.level(),
            message: visitor.0,
        });
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{:?}", value);
        } else {
            let _ = write!(self.0, " {}={:?}", field.name(), value);
        }
    }
}

/// A subscriber that records every event, plus a handle to the records.
pub fn capturing_subscriber() -> (impl Subscriber + Send + Sync, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(events.clone()));
    (subscriber, events)
}

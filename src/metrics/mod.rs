use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;
use tokio::sync::watch;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

lazy_static! {
    pub static ref STREAM_EVENTS_DISPATCHED: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "stream_events_dispatched",
            "Listener callbacks completed, by event kind"
        ),
        &["kind"]
    )
    .expect("metric can not be created");

    pub static ref PARSE_ERRORS: IntCounter = IntCounter::new(
        "stream_parse_errors",
        "Malformed JSON lines skipped by the reader loop"
    )
    .expect("metric can not be created");

    pub static ref DECODE_ERRORS: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "stream_decode_errors",
            "Recognized events with missing or malformed required fields, by event kind"
        ),
        &["kind"]
    )
    .expect("metric can not be created");

    pub static ref UNRECOGNIZED_EVENTS: IntCounter = IntCounter::new(
        "stream_unrecognized_events",
        "Valid JSON objects matching no known event signature, dropped by contract"
    )
    .expect("metric can not be created");

    pub static ref LISTENER_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new(
            "stream_listener_failures",
            "Listener callbacks that panicked, by event kind"
        ),
        &["kind"]
    )
    .expect("metric can not be created");

    pub static ref OPEN_STREAMS: IntGauge = IntGauge::new(
        "stream_open_streams",
        "Reader loops currently running"
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();

    static ref REGISTERED: () = {
        REGISTRY
            .register(Box::new(STREAM_EVENTS_DISPATCHED.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(PARSE_ERRORS.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(DECODE_ERRORS.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(UNRECOGNIZED_EVENTS.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(LISTENER_FAILURES.clone()))
            .expect("collector can be registered");
        REGISTRY
            .register(Box::new(OPEN_STREAMS.clone()))
            .expect("collector can be registered");
    };
}

fn register_custom_metrics() {
    lazy_static::initialize(&REGISTERED);
}

/// Serves `/metrics` until the shutdown signal fires.
pub async fn serve_metrics(
    port: u16,
    mut shutdown_signal: watch::Receiver<()>,
) {
    register_custom_metrics();

    let metrics_route = warp::path!("metrics").and_then(metrics_handler);

    let (_, server) =
        warp::serve(metrics_route).bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
            let _ = shutdown_signal.changed().await;
        });
    server.await;
}

async fn metrics_handler() -> std::result::Result<impl Reply, Rejection> {
    Ok(render_metrics())
}

pub(crate) fn render_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        tracing::error!("could not encode custom metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

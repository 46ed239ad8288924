//! Span timing for the search functions.
//!
//! Enable with `--features instrumentation`. Every instrumented search call opens a
//! span; the layer below sums the time spent in each span name, per thread, so rayon
//! workers in a parallel search never wait on each other to record a span.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use once_cell::sync::Lazy;
use thread_local::ThreadLocal;
use tracing::span;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Span name to (calls, total nanoseconds), one map per thread.
type SpanTimings = HashMap<&'static str, (u64, u64)>;

static THREAD_TIMING_DATA: Lazy<ThreadLocal<Mutex<SpanTimings>>> = Lazy::new(ThreadLocal::new);

struct TimingLayer;

impl<S> Layer<S> for TimingLayer
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_enter(&self, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_exit(&self, id: &span::Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };
        let start = match span.extensions_mut().remove::<Instant>() {
            Some(start) => start,
            None => return,
        };

        record_span(span.name(), start.elapsed().as_nanos() as u64);
    }
}

/// Adds one call of `name` to the current thread's timings. The mutex is only ever
/// locked by its own thread until the statistics are read.
fn record_span(name: &'static str, nanos: u64) {
    let cell = THREAD_TIMING_DATA.get_or(|| Mutex::new(HashMap::new()));
    if let Ok(mut timings) = cell.lock() {
        let entry = timings.entry(name).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += nanos;
    }
}

/// Sums the timings of every thread, slowest span first.
fn aggregate_timings() -> Vec<(&'static str, (u64, u64))> {
    let mut aggregated = SpanTimings::new();
    for thread_data in THREAD_TIMING_DATA.iter() {
        if let Ok(timings) = thread_data.lock() {
            for (name, (calls, nanos)) in timings.iter() {
                let entry = aggregated.entry(*name).or_insert((0, 0));
                entry.0 += calls;
                entry.1 += nanos;
            }
        }
    }

    let mut entries: Vec<_> = aggregated.into_iter().collect();
    entries.sort_by_key(|(_, (_, total))| std::cmp::Reverse(*total));
    entries
}

/// Installs the timing layer as the global subscriber.
///
/// With `RUST_LOG` unset or `off` spans are only timed; any other value also prints
/// span events filtered by it.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_default();

    let result = if filter.is_empty() || filter == "off" {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(TimingLayer);
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(TimingLayer)
            .with(fmt::layer().with_target(false).compact());
        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(err) = result {
        log::warn!("failed to install tracing subscriber: {}", err);
    }
}

/// Prints call counts and time per instrumented function, slowest first.
pub fn print_timing_statistics() {
    let entries = aggregate_timings();
    if entries.is_empty() {
        eprintln!("\nNo timing data collected.");
        return;
    }

    eprintln!("\n{:=<72}", "");
    eprintln!(
        "{:<32} {:>12} {:>12} {:>12}",
        "Function", "Calls", "Total (ms)", "Avg (µs)"
    );
    eprintln!("{:-<72}", "");
    for (name, (calls, nanos)) in entries {
        eprintln!(
            "{:<32} {:>12} {:>12.2} {:>12.2}",
            name,
            calls,
            nanos as f64 / 1_000_000.0,
            nanos as f64 / calls.max(1) as f64 / 1_000.0
        );
    }
}

//! Trace id of the request being served, readable from any code running
//! inside the request's future (error rendering, DB error logging).

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const NO_TRACE: &str = "unknown";

/// The current request's trace id, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run `future` with `trace_id` as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

/// Health check endpoint
///
/// Returns "ok" if the service is running.
/// Used by Kubernetes liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

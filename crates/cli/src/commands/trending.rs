use anyhow::Result;

use super::print_json;
use crate::app::App;

pub(crate) async fn run_trending(app: &App, limit: Option<usize>) -> Result<()> {
    let report = match limit {
        Some(limit) => app.tracker.get_trending(limit).await,
        None => app.tracker.trending().await,
    };
    if let Some(failure) = &report.failure {
        tracing::warn!(code = failure.code(), error = %failure, "trending unavailable");
    }
    print_json(&report.counters)
}

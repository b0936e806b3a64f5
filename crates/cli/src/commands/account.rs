use anyhow::Result;
use cinesync_core::UserProfile;
use cinesync_service::MigrationReport;
use serde_json::{json, Value};

use super::{print_json, with_code};
use crate::app::App;

fn report_json(report: &MigrationReport) -> Value {
    let failures: Vec<Value> = report
        .failures
        .iter()
        .map(|f| {
            json!({
                "document_id": f.document_id,
                "movie_id": f.movie_id,
                "code": f.error.code(),
                "error": f.error.to_string(),
            })
        })
        .collect();
    json!({
        "migrated": report.migrated,
        "conflicts": report.conflicts,
        "failures": failures,
    })
}

/// Write the session, then move this device's saved movies to the user.
pub(crate) async fn run_sign_in(
    app: &App,
    user_id: String,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    if user_id.trim().is_empty() {
        anyhow::bail!("user id must not be empty");
    }
    let user = UserProfile {
        name: name.unwrap_or_else(|| user_id.clone()),
        email: email.unwrap_or_default(),
        id: user_id,
    };
    app.session.sign_in(&user).await?;

    let report = app.registry.migrate_after_sign_in().await.map_err(with_code)?;
    if !report.is_complete() {
        tracing::warn!(
            conflicts = report.conflicts.len(),
            failures = report.failures.len(),
            "some saved movies stayed on this device"
        );
    }
    print_json(&json!({ "user": user, "migration": report_json(&report) }))
}

pub(crate) async fn run_sign_out(app: &App) -> Result<()> {
    let signed_out = app.session.sign_out().await?;
    print_json(&json!({ "signed_out": signed_out }))
}

pub(crate) async fn run_whoami(app: &App) -> Result<()> {
    let actor = app.gate.require_actor().await.map_err(with_code)?;
    print_json(&json!({
        "actor": actor,
        "device_id": app.gate.device_id(),
        "session_path": app.session.path().display().to_string(),
    }))
}

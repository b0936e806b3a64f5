pub(crate) mod account;
pub(crate) mod catalog;
pub(crate) mod saved;
pub(crate) mod trending;

use anyhow::Result;
use cinesync_service::ServiceError;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Keep the stable code visible in the CLI error chain.
fn with_code(err: ServiceError) -> anyhow::Error {
    let code = err.code();
    anyhow::Error::new(err).context(code)
}

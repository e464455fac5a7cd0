//! The row-to-log export pipeline: read the `users` table, render each row
//! as separator-delimited tokens, and emit it through the redacting
//! `user_data` logger.

use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pd_core::logging::formatter::{Level, RedactingFormatter, PII_FIELDS};
use pd_core::logging::registry::{self, FileSink, Logger};
use pd_db::settings::DbSettings;
use pd_db::{pool, queries};

/// Env var routing the user-data log to a file instead of stderr.
pub const ENV_USERDATA_LOG: &str = "PD_USERDATA_LOG";

/// Render one row as `field=value;` tokens joined by single spaces.
///
/// The final token keeps its separator so the last field is still covered
/// by the `field=value;` redaction pattern.
pub fn render_row(pairs: &[(&str, String)]) -> String {
    pairs
        .iter()
        .map(|(field, value)| format!("{}={};", field, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `user_data` logger, honoring `PD_USERDATA_LOG` if set.
fn user_data_logger() -> anyhow::Result<Arc<Logger>> {
    match env::var(ENV_USERDATA_LOG) {
        Ok(path) => {
            let sink = FileSink::new(Path::new(&path))
                .with_context(|| format!("opening user-data log {}", path))?;
            Ok(registry::get_or_create("user_data", || {
                Logger::new(
                    "user_data",
                    Level::Info,
                    RedactingFormatter::new(PII_FIELDS),
                    Arc::new(sink),
                )
            }))
        }
        Err(_) => Ok(registry::user_data_logger()),
    }
}

/// Run the export: one redacted log line per `users` row.
pub async fn run() -> anyhow::Result<()> {
    let settings = DbSettings::from_env().context("reading database settings")?;
    let pool = pool::connect(&settings)
        .await
        .context("connecting to database")?;

    let rows = queries::list_users(&pool)
        .await
        .context("fetching user rows")?;
    info!(count = rows.len(), "Exporting user rows");

    let logger = user_data_logger()?;
    for row in &rows {
        logger.info(render_row(&row.field_pairs()));
    }

    pool.close().await;
    Ok(())
}

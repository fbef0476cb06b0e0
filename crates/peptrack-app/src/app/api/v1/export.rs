use chrono::Utc;
use salvo::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use salvo::{Depot, Request, Response, Router, Scribe, handler};

use crate::app::api::extract::query_param;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;
use peptrack_core::constants::EXPORT_LOOKBACK_DAYS;
use peptrack_service::auth::depot::get_user_from_depot;
use peptrack_service::export::{ExportFile, ExportFormat, export_tracking};
use peptrack_service::tracking::resolve_range;

/// A rendered export sent as a file download.
struct Attachment(ExportFile);

impl Scribe for Attachment {
    fn render(self, res: &mut Response) {
        let ExportFile {
            filename,
            content_type,
            bytes,
        } = self.0;

        if let Err(err) = res.add_header(CONTENT_TYPE, content_type, true) {
            tracing::warn!(error = %err, "Failed to set export content type");
        }
        let disposition = format!("attachment; filename={filename}");
        if let Err(err) = res.add_header(CONTENT_DISPOSITION, disposition, true) {
            tracing::warn!(error = %err, "Failed to set export disposition");
        }
        res.body(bytes);
    }
}

async fn export(
    depot: &Depot,
    start: Option<&str>,
    end: Option<&str>,
    format: ExportFormat,
) -> AppResult<Attachment> {
    let user_id = get_user_from_depot(depot)?.id;
    let range = resolve_range(start, end, Utc::now(), EXPORT_LOOKBACK_DAYS)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let file = export_tracking(&mut conn, user_id, range, format).await?;
    Ok(Attachment(file))
}

/// GET /export/csv?start&end - Tracking rows as CSV, last 30 days by default.
#[handler]
async fn export_csv(req: &mut Request, depot: &mut Depot) -> AppResult<Attachment> {
    let start = query_param(req, "start");
    let end = query_param(req, "end");
    export(depot, start.as_deref(), end.as_deref(), ExportFormat::Csv).await
}

/// GET /export/pdf?start&end - Tracking rows as a paginated PDF table.
#[handler]
async fn export_pdf(req: &mut Request, depot: &mut Depot) -> AppResult<Attachment> {
    let start = query_param(req, "start");
    let end = query_param(req, "end");
    export(depot, start.as_deref(), end.as_deref(), ExportFormat::Pdf).await
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("export")
        .push(Router::with_path("csv").get(export_csv))
        .push(Router::with_path("pdf").get(export_pdf))
}

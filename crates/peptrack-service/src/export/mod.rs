//! Tracking exports.

use peptrack_core::util::date::DateRange;
use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::query::tracking as tracking_query;
use peptrack_db::model::tracking::DailyTracking;

use crate::error::ServiceResult;

pub mod csv;
pub mod pdf;

/// Column order shared by every export format.
pub const EXPORT_COLUMNS: [&str; 14] = [
    "created_at",
    "weight_lbs",
    "waist_in",
    "bp_am",
    "bp_pm",
    "body_fat_pct",
    "muscle_mass_pct",
    "resting_hr_bpm",
    "energy",
    "appetite",
    "performance",
    "peptide1_id",
    "peptide2_id",
    "peptide3_id",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A rendered export ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// ## Summary
/// Builds `daily_tracking_<start>_<end>.<ext>` from the range's dates.
#[must_use]
pub fn export_filename(range: &DateRange, format: ExportFormat) -> String {
    format!(
        "daily_tracking_{}_{}.{}",
        range.start.format("%Y%m%d"),
        range.end.format("%Y%m%d"),
        format.extension()
    )
}

/// Renders one tracking row as cells in [`EXPORT_COLUMNS`] order; missing
/// values are empty strings.
#[must_use]
pub fn row_cells(row: &DailyTracking) -> Vec<String> {
    fn cell<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    vec![
        row.created_at.to_rfc3339(),
        cell(row.weight_lbs),
        cell(row.waist_in),
        cell(row.bp_am.as_deref()),
        cell(row.bp_pm.as_deref()),
        cell(row.body_fat_pct),
        cell(row.muscle_mass_pct),
        cell(row.resting_hr_bpm),
        cell(row.energy),
        cell(row.appetite),
        cell(row.performance),
        cell(row.peptide1_id),
        cell(row.peptide2_id),
        cell(row.peptide3_id),
    ]
}

/// ## Summary
/// Loads the user's tracking rows within `range` and renders them in `format`.
///
/// ## Errors
/// Returns a database error, or an `ExportError` if rendering fails.
#[tracing::instrument(skip(conn), fields(user_id = %user_id))]
pub async fn export_tracking(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    range: DateRange,
    format: ExportFormat,
) -> ServiceResult<ExportFile> {
    let rows = tracking_query::list_range(conn, user_id, range.start, range.end).await?;

    let bytes = match format {
        ExportFormat::Csv => csv::write_tracking_csv(&rows)?,
        ExportFormat::Pdf => pdf::write_tracking_pdf(&rows, &range),
    };
    tracing::info!(
        rows = rows.len(),
        bytes = bytes.len(),
        format = format.extension(),
        "Export rendered"
    );

    Ok(ExportFile {
        filename: export_filename(&range, format),
        content_type: format.content_type(),
        bytes,
    })
}

use peptrack_db::model::tracking::DailyTracking;

use crate::error::{ServiceError, ServiceResult};

use super::{EXPORT_COLUMNS, row_cells};

/// ## Summary
/// Writes tracking rows as CSV with a header row, even when `rows` is empty.
///
/// ## Errors
/// Returns `ExportError` if the CSV writer fails.
pub fn write_tracking_csv(rows: &[DailyTracking]) -> ServiceResult<Vec<u8>> {
    let mut wtr = ::csv::Writer::from_writer(Vec::new());

    wtr.write_record(EXPORT_COLUMNS).map_err(export_error)?;
    for row in rows {
        wtr.write_record(row_cells(row)).map_err(export_error)?;
    }

    wtr.into_inner().map_err(|err| ServiceError::ExportError(err.to_string()))
}

fn export_error(err: ::csv::Error) -> ServiceError {
    ServiceError::ExportError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::tracking_row;

    #[test]
    fn test_empty_export_still_has_header() {
        let bytes = write_tracking_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(
            text,
            "created_at,weight_lbs,waist_in,bp_am,bp_pm,body_fat_pct,muscle_mass_pct,\
             resting_hr_bpm,energy,appetite,performance,peptide1_id,peptide2_id,peptide3_id\n"
        );
    }

    #[test]
    fn test_rows_follow_header() {
        let bytes = write_tracking_csv(&[tracking_row(1), tracking_row(2)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024-01-01T07:30:00+00:00,181.5,,120/80,,,,58,7,,,,,"
        );
    }
}

//! Weekly insights derived from recent tracking entries.

use chrono::{DateTime, TimeDelta, Utc};
use peptrack_core::constants::TRACKING_LOOKBACK_DAYS;
use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::enums::InsightSource;
use peptrack_db::db::query::{insight as insight_query, tracking as tracking_query};
use peptrack_db::model::insight::{Insight, NewInsight};
use peptrack_db::model::tracking::DailyTracking;
use serde::Serialize;
use serde_json::Value;

use crate::error::ServiceResult;
use crate::lab::display_value;
use crate::llm::{CompletionProvider, CompletionRequest};

const INSIGHT_SYSTEM_PROMPT: &str = "You return only JSON.";
const INSIGHT_TEMPERATURE: f32 = 0.3;

/// Tips returned when no completion provider is configured.
pub const DEFAULT_TIPS: [&str; 3] = [
    "Great consistency this week. Consider a light refeed if energy averages below 6.",
    "Waist trend stable; add 10–15 min post-meal walks to nudge fat loss.",
    "Keep hydration high; a slight uptick in resting HR suggests more recovery.",
];

/// Averages over a set of tracking entries; `None` when no entry has the
/// metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingSummary {
    pub entries: usize,
    pub avg_weight_lbs: Option<f64>,
    pub avg_waist_in: Option<f64>,
    pub avg_resting_hr: Option<f64>,
    pub avg_energy: Option<f64>,
    pub avg_appetite: Option<f64>,
    pub avg_performance: Option<f64>,
}

impl TrackingSummary {
    #[must_use]
    pub fn from_rows(rows: &[DailyTracking]) -> Self {
        Self {
            entries: rows.len(),
            avg_weight_lbs: average(rows.iter().filter_map(|r| r.weight_lbs)),
            avg_waist_in: average(rows.iter().filter_map(|r| r.waist_in)),
            avg_resting_hr: average(rows.iter().filter_map(|r| r.resting_hr_bpm)),
            avg_energy: average(rows.iter().filter_map(|r| r.energy).map(f64::from)),
            avg_appetite: average(rows.iter().filter_map(|r| r.appetite).map(f64::from)),
            avg_performance: average(rows.iter().filter_map(|r| r.performance).map(f64::from)),
        }
    }
}

#[expect(clippy::cast_precision_loss)]
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub tips: Vec<String>,
    pub summary: TrackingSummary,
}

/// ## Summary
/// Summarizes the user's tracking since a week before `now` (entries dated
/// later are included) and produces tips, storing the result as an insight.
/// Failing to store is logged, not returned.
///
/// ## Errors
/// Returns a database error if the tracking rows cannot be read.
#[tracing::instrument(skip(conn, llm), fields(user_id = %user_id))]
pub async fn generate(
    conn: &mut DbConnection<'_>,
    llm: Option<&dyn CompletionProvider>,
    user_id: uuid::Uuid,
    now: DateTime<Utc>,
) -> ServiceResult<InsightReport> {
    let since = now - TimeDelta::days(TRACKING_LOOKBACK_DAYS);
    let rows = tracking_query::list_since(conn, user_id, since).await?;
    let summary = TrackingSummary::from_rows(&rows);

    let tips = tips_for(llm, &summary).await;

    let insight = NewInsight {
        user_id,
        source_type: InsightSource::Tracking,
        source_id: None,
        content: None,
        summary: serde_json::to_value(&summary).ok(),
        tips: serde_json::to_value(&tips).ok(),
    };
    if let Err(err) = insight_query::create(conn, &insight).await {
        tracing::warn!(error = %err, "Failed to store tracking insight");
    }

    Ok(InsightReport { tips, summary })
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
) -> ServiceResult<Vec<Insight>> {
    Ok(insight_query::list(conn, user_id).await?)
}

/// ## Summary
/// Asks `llm` for tips, or returns [`DEFAULT_TIPS`] without one. Errors
/// become a single explanatory tip.
pub async fn tips_for(
    llm: Option<&dyn CompletionProvider>,
    summary: &TrackingSummary,
) -> Vec<String> {
    let Some(llm) = llm else {
        return DEFAULT_TIPS.iter().map(ToString::to_string).collect();
    };

    let request = CompletionRequest {
        system: INSIGHT_SYSTEM_PROMPT.to_string(),
        user: tips_prompt(summary),
        temperature: INSIGHT_TEMPERATURE,
        max_tokens: None,
    };
    let outcome = match llm.complete(&request).await {
        Ok(content) => parse_tips(&content),
        Err(err) => Err(err.to_string()),
    };
    outcome.unwrap_or_else(|err| vec![format!("Insight generation failed: {err}")])
}

fn tips_prompt(summary: &TrackingSummary) -> String {
    let rendered = serde_json::to_string(summary).unwrap_or_default();
    format!(
        "You are a health coach. Based on the user's last 7 days of metrics, \
         provide 3-5 concise, actionable tips.\n\
         Summary: {rendered}\n\
         Constraints: return JSON with 'tips': an array of strings, short and specific."
    )
}

/// ## Summary
/// Extracts tips from a JSON completion.
///
/// Reads `tips`, falling back to `suggestions` when `tips` is absent or
/// empty. A non-list value becomes a single tip.
///
/// ## Errors
/// Returns a message when the content is not a JSON object.
pub fn parse_tips(content: &str) -> Result<Vec<String>, String> {
    let content = if content.trim().is_empty() { "{}" } else { content };
    let parsed: Value = serde_json::from_str(content).map_err(|err| err.to_string())?;
    let object = parsed
        .as_object()
        .ok_or_else(|| "expected a JSON object".to_string())?;

    let tips = [object.get("tips"), object.get("suggestions")]
        .into_iter()
        .flatten()
        .find(|value| is_truthy(value));

    Ok(match tips {
        None => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(display_value).collect(),
        Some(other) => vec![display_value(other)],
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::fake::FakeCompletion;

    fn row(weight: Option<f64>, energy: Option<i32>) -> DailyTracking {
        DailyTracking {
            id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::nil(),
            created_at: Utc::now(),
            peptide1_id: None,
            peptide2_id: None,
            peptide3_id: None,
            weight_lbs: weight,
            waist_in: None,
            bp_am: None,
            bp_pm: None,
            body_fat_pct: None,
            muscle_mass_pct: None,
            resting_hr_bpm: None,
            energy,
            appetite: None,
            performance: None,
            notes: None,
        }
    }

    #[test]
    fn test_averages_skip_missing_values() {
        let rows = [row(Some(180.0), Some(6)), row(None, Some(8)), row(Some(182.0), None)];

        let summary = TrackingSummary::from_rows(&rows);

        assert_eq!(summary.entries, 3);
        assert_eq!(summary.avg_weight_lbs, Some(181.0));
        assert_eq!(summary.avg_energy, Some(7.0));
        assert_eq!(summary.avg_waist_in, None);
    }

    #[test]
    fn test_empty_rows_summarize_to_nulls() {
        let summary = TrackingSummary::from_rows(&[]);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["entries"], 0);
        assert!(json["avg_weight_lbs"].is_null());
        assert!(json["avg_performance"].is_null());
    }

    #[test]
    fn test_parse_tips_variants() {
        assert_eq!(
            parse_tips(r#"{"tips": ["Walk more", "Sleep 8h"]}"#).unwrap(),
            vec!["Walk more", "Sleep 8h"]
        );
        assert_eq!(
            parse_tips(r#"{"tips": [], "suggestions": ["Hydrate"]}"#).unwrap(),
            vec!["Hydrate"]
        );
        assert_eq!(parse_tips(r#"{"tips": "One tip"}"#).unwrap(), vec!["One tip"]);
        assert!(parse_tips(r#"{"other": 1}"#).unwrap().is_empty());
        assert!(parse_tips("").unwrap().is_empty());
        assert!(parse_tips("not json").is_err());
        assert!(parse_tips("[1, 2]").is_err());
    }

    #[test_log::test(tokio::test)]
    async fn test_defaults_without_provider() {
        let tips = tips_for(None, &TrackingSummary::from_rows(&[])).await;
        assert_eq!(tips, DEFAULT_TIPS.to_vec());
    }

    #[test_log::test(tokio::test)]
    async fn test_provider_json_is_parsed() {
        let llm = FakeCompletion {
            reply: Ok(r#"{"suggestions": ["Add protein"]}"#.to_string()),
        };

        let tips = tips_for(Some(&llm), &TrackingSummary::from_rows(&[])).await;

        assert_eq!(tips, vec!["Add protein"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_failures_become_single_tip() {
        let llm = FakeCompletion {
            reply: Ok("plain words".to_string()),
        };
        let tips = tips_for(Some(&llm), &TrackingSummary::from_rows(&[])).await;
        assert_eq!(tips.len(), 1);
        assert!(tips[0].starts_with("Insight generation failed: "));

        let failing = FakeCompletion {
            reply: Err("quota".to_string()),
        };
        let tips = tips_for(Some(&failing), &TrackingSummary::from_rows(&[])).await;
        assert_eq!(tips, vec!["Insight generation failed: Upstream error: quota"]);
    }
}

//! Lab panels and their summaries.

use peptrack_db::db::connection::DbConnection;
use peptrack_db::db::enums::InsightSource;
use peptrack_db::db::query::{insight as insight_query, lab as lab_query};
use peptrack_db::model::insight::NewInsight;
use peptrack_db::model::lab::{Lab, NewLab};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ServiceError, ServiceResult};
use crate::llm::{CompletionProvider, CompletionRequest};
use crate::validate::require_non_blank;

const SUMMARY_SYSTEM_PROMPT: &str = "You return brief, plain text.";
const SUMMARY_TEMPERATURE: f32 = 0.2;
const SUMMARY_MAX_TOKENS: u32 = 250;
const FALLBACK_KEY_COUNT: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLabRequest {
    pub panel_name: String,
    #[serde(default)]
    pub values: Map<String, Value>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabSummary {
    pub summary: String,
}

/// ## Errors
/// Returns `ValidationError` for a blank panel name or a database error.
#[tracing::instrument(skip(conn, request), fields(user_id = %user_id))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    user_id: uuid::Uuid,
    request: CreateLabRequest,
) -> ServiceResult<Lab> {
    require_non_blank("panel_name", &request.panel_name)?;
    let row = NewLab {
        user_id,
        panel_name: request.panel_name,
        values: Value::Object(request.values),
        notes: request.notes,
    };
    Ok(lab_query::create(conn, &row).await?)
}

/// ## Errors
/// Returns a database error if the query fails.
pub async fn list(conn: &mut DbConnection<'_>, user_id: uuid::Uuid) -> ServiceResult<Vec<Lab>> {
    Ok(lab_query::list(conn, user_id).await?)
}

/// ## Summary
/// Summarizes one lab panel and records the summary as an insight.
///
/// Uses `llm` when present and a rule-based summary otherwise. Failing to
/// store the insight is logged and does not fail the request.
///
/// ## Errors
/// Returns `NotFound` when the user owns no such lab.
#[tracing::instrument(skip(conn, llm), fields(user_id = %user_id))]
pub async fn summarize(
    conn: &mut DbConnection<'_>,
    llm: Option<&dyn CompletionProvider>,
    user_id: uuid::Uuid,
    lab_id: uuid::Uuid,
) -> ServiceResult<LabSummary> {
    let lab = lab_query::get(conn, user_id, lab_id)
        .await?
        .ok_or(ServiceError::NotFound("Lab"))?;

    let summary = summary_text(llm, &lab).await;

    let insight = NewInsight {
        user_id,
        source_type: InsightSource::Lab,
        source_id: Some(lab.id),
        content: Some(summary.clone()),
        summary: None,
        tips: None,
    };
    if let Err(err) = insight_query::create(conn, &insight).await {
        tracing::warn!(lab_id = %lab.id, error = %err, "Failed to store lab insight");
    }

    Ok(LabSummary { summary })
}

/// ## Summary
/// Produces the summary text for `lab`, never failing: provider errors are
/// folded into the text.
pub async fn summary_text(llm: Option<&dyn CompletionProvider>, lab: &Lab) -> String {
    let Some(llm) = llm else {
        return fallback_summary(&lab.panel_name, &lab.values);
    };

    let request = CompletionRequest {
        system: SUMMARY_SYSTEM_PROMPT.to_string(),
        user: summary_prompt(lab),
        temperature: SUMMARY_TEMPERATURE,
        max_tokens: Some(SUMMARY_MAX_TOKENS),
    };
    match llm.complete(&request).await {
        Ok(text) => text,
        Err(err) => format!("Could not generate AI summary: {err}"),
    }
}

fn summary_prompt(lab: &Lab) -> String {
    format!(
        "Summarize this lab panel concisely (3-5 bullet points max). \
         Focus on notable highs/lows and simple next steps.\n\
         Panel: {}\n\
         Date: {}\n\
         Values: {}\n\
         Return plain text.",
        lab.panel_name,
        lab.created_at.to_rfc3339(),
        lab.values
    )
}

/// ## Summary
/// Reports the first three metrics alphabetically, or notes that the panel
/// is empty.
#[must_use]
pub fn fallback_summary(panel_name: &str, values: &Value) -> String {
    let Some(map) = values.as_object().filter(|map| !map.is_empty()) else {
        return "No values provided.".to_string();
    };

    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    let pairs: Vec<String> = keys
        .into_iter()
        .take(FALLBACK_KEY_COUNT)
        .map(|key| format!("{key}: {}", display_value(&map[key])))
        .collect();

    format!(
        "Panel {panel_name}: {}. Consider discussing trends with your provider.",
        pairs.join(", ")
    )
}

pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

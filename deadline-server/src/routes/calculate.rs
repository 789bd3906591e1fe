//! Deadline calculation endpoints

use axum::{
    Form, Json, Router,
    extract::State,
    routing::{get, post},
};
use deadline_core::{DeadlineEntry, DeadlineRule, compute_deadlines};

use crate::routes::FormFields;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(calculate))
        .route("/rules", get(list_rules))
}

/// POST /calculate - Deadlines for the submitted `trial_date`
///
/// A missing or unparsable trial date yields an empty list.
async fn calculate(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Json<Vec<DeadlineEntry>> {
    let fields = FormFields(fields);
    Json(compute_deadlines(fields.get("trial_date"), state.rules()))
}

/// GET /rules - The active deadline rules
async fn list_rules(State(state): State<AppState>) -> Json<Vec<DeadlineRule>> {
    Json(state.rules().iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, body_bytes, post_form};
    use axum::{body::Body, http::Request, http::StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_calculate_returns_deadlines_in_rule_order() {
        let response = post_form("/calculate", "trial_date=2025-12-01").await;
        assert_eq!(response.status(), StatusCode::OK);

        let entries: Vec<Value> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[0]["event"], "Join additional parties");
        assert_eq!(entries[0]["date"], "2025-10-02");
        assert_eq!(entries[1]["event"], "Amend pleadings");
        assert_eq!(entries[1]["date"], "2025-11-24");
    }

    #[tokio::test]
    async fn test_calculate_with_bad_or_missing_date_is_empty() {
        for body in ["trial_date=not-a-date", "", "other=1"] {
            let response = post_form("/calculate", body).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_bytes(response).await, b"[]", "Body {:?}", body);
        }
    }

    #[tokio::test]
    async fn test_rules_lists_table() {
        let response = app()
            .oneshot(Request::get("/rules").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let rules: Vec<Value> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(rules.len(), 14);
        assert_eq!(rules[8]["label"], "Designate expert witnesses for affirmative relief");
        assert_eq!(rules[8]["offset_days"], 120);
    }
}

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraitScores;
use crate::errors::AppError;
use crate::explain::TraitLevels;
use crate::predictor::CareerScore;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub top_careers: Vec<CareerScore>,
    pub trait_levels: TraitLevels,
}

/// POST /predict
///
/// The model check runs before any body inspection, so a missing model
/// answers 503 even for garbage requests. The body is taken as raw JSON
/// rather than a typed extractor so shape problems map to the service's
/// own 400 messages instead of the framework rejection.
pub async fn handle_predict(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> Result<Json<PredictResponse>, AppError> {
    let predictor = state.predictor.as_ref().ok_or_else(|| {
        AppError::ModelUnavailable(format!(
            "no model loaded from {}",
            state.config.model_path.display()
        ))
    })?;

    let Json(body) = body.ok_or_else(|| {
        AppError::MalformedInput("Request must include personality_traits array".to_string())
    })?;
    let scores = parse_trait_scores(&body)?;
    let prediction = predictor.predict(&scores)?;

    Ok(Json(PredictResponse {
        prediction: prediction.career,
        top_careers: prediction.top_careers,
        trait_levels: TraitLevels::of(&scores),
    }))
}

/// Validates the request body in fixed order: member present, array of
/// exactly five, all JSON numbers, all inside [1, 10]. The first failure
/// wins; range errors cite the first offending trait in canonical order.
pub(crate) fn parse_trait_scores(body: &Value) -> Result<TraitScores, AppError> {
    let traits = body.get("personality_traits").ok_or_else(|| {
        AppError::MalformedInput("Request must include personality_traits array".to_string())
    })?;

    let values = traits.as_array().filter(|v| v.len() == 5).ok_or_else(|| {
        AppError::MalformedInput(
            "personality_traits must be an array with 5 values (Openness, Conscientiousness, \
             Extraversion, Agreeableness, Neuroticism)"
                .to_string(),
        )
    })?;

    let mut raw = [0.0; 5];
    for (slot, value) in raw.iter_mut().zip(values) {
        *slot = value.as_f64().ok_or_else(|| {
            AppError::MalformedInput("All personality trait scores must be numbers".to_string())
        })?;
    }

    let scores = TraitScores::from_array(raw);
    if let Some(kind) = scores.out_of_range() {
        return Err(AppError::OutOfRange(kind));
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TraitKind;
    use serde_json::json;

    fn malformed_message(err: AppError) -> String {
        match err {
            AppError::MalformedInput(msg) => msg,
            other => panic!("expected MalformedInput, got {other}"),
        }
    }

    #[test]
    fn test_accepts_a_valid_profile() {
        let scores =
            parse_trait_scores(&json!({"personality_traits": [8.5, 8.2, 4.5, 6.2, 5.0]})).unwrap();
        assert_eq!(scores.openness, 8.5);
        assert_eq!(scores.conscientiousness, 8.2);
        assert_eq!(scores.extraversion, 4.5);
        assert_eq!(scores.agreeableness, 6.2);
        assert_eq!(scores.neuroticism, 5.0);
    }

    #[test]
    fn test_accepts_integer_scores() {
        assert!(parse_trait_scores(&json!({"personality_traits": [5, 5, 5, 5, 5]})).is_ok());
    }

    #[test]
    fn test_missing_member() {
        let err = parse_trait_scores(&json!({"traits": [5, 5, 5, 5, 5]})).unwrap_err();
        assert_eq!(
            malformed_message(err),
            "Request must include personality_traits array"
        );
    }

    #[test]
    fn test_non_object_body_reads_as_missing_member() {
        let err = parse_trait_scores(&json!([5, 5, 5, 5, 5])).unwrap_err();
        assert_eq!(
            malformed_message(err),
            "Request must include personality_traits array"
        );
    }

    #[test]
    fn test_wrong_arity() {
        let err = parse_trait_scores(&json!({"personality_traits": [5, 5, 5, 5]})).unwrap_err();
        assert_eq!(
            malformed_message(err),
            "personality_traits must be an array with 5 values (Openness, Conscientiousness, \
             Extraversion, Agreeableness, Neuroticism)"
        );
    }

    #[test]
    fn test_non_array_member_reads_as_arity_error() {
        let err = parse_trait_scores(&json!({"personality_traits": "high"})).unwrap_err();
        assert!(malformed_message(err).starts_with("personality_traits must be an array"));
    }

    #[test]
    fn test_arity_is_checked_before_range() {
        // Four wildly out-of-range values still answer the arity message.
        let err =
            parse_trait_scores(&json!({"personality_traits": [99, 99, 99, 99]})).unwrap_err();
        assert!(malformed_message(err).starts_with("personality_traits must be an array"));
    }

    #[test]
    fn test_string_score_is_rejected() {
        let err =
            parse_trait_scores(&json!({"personality_traits": [5, "7", 5, 5, 5]})).unwrap_err();
        assert_eq!(
            malformed_message(err),
            "All personality trait scores must be numbers"
        );
    }

    #[test]
    fn test_bool_score_is_rejected() {
        let err =
            parse_trait_scores(&json!({"personality_traits": [5, 5, true, 5, 5]})).unwrap_err();
        assert_eq!(
            malformed_message(err),
            "All personality trait scores must be numbers"
        );
    }

    #[test]
    fn test_numbers_are_checked_before_range() {
        let err =
            parse_trait_scores(&json!({"personality_traits": [99, "x", 5, 5, 5]})).unwrap_err();
        assert!(matches!(err, AppError::MalformedInput(_)));
    }

    #[test]
    fn test_out_of_range_cites_the_first_offender() {
        let err =
            parse_trait_scores(&json!({"personality_traits": [5, 5, 99, 5, 5]})).unwrap_err();
        assert!(matches!(err, AppError::OutOfRange(TraitKind::Extraversion)));

        let err =
            parse_trait_scores(&json!({"personality_traits": [11, 5, 5, 5, 5]})).unwrap_err();
        assert!(matches!(err, AppError::OutOfRange(TraitKind::Openness)));
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        assert!(parse_trait_scores(&json!({"personality_traits": [1, 10, 1, 10, 1]})).is_ok());
        let err =
            parse_trait_scores(&json!({"personality_traits": [0.99, 5, 5, 5, 5]})).unwrap_err();
        assert!(matches!(err, AppError::OutOfRange(TraitKind::Openness)));
    }
}

//! HTTP endpoints over the workout store.
//!
//! | Method | Path             | Success                 |
//! |--------|------------------|-------------------------|
//! | GET    | `/workouts`      | 200, array of workouts  |
//! | GET    | `/workouts/{id}` | 200, workout            |
//! | POST   | `/workouts`      | 201, created workout    |
//! | DELETE | `/workouts/{id}` | 200, `{message}`        |
//!
//! Failures carry an `{"error": ...}` body, see [`ApiError`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, MessageBody};
use crate::models::{iso8601, Exercise, Workout, WorkoutDraft};
use crate::store::WorkoutStore;

pub const DELETED_MESSAGE: &str = "Workout deleted successfully";

pub type SharedStore = Arc<WorkoutStore>;

/// Build the router with the store injected as shared state.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/workouts", get(list_workouts).post(create_workout))
        .route("/workouts/{id}", get(get_workout).delete(delete_workout))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn list_workouts(State(store): State<SharedStore>) -> Result<Json<Vec<Workout>>, ApiError> {
    let workouts = store
        .list()
        .map_err(ApiError::internal("Failed to fetch workouts"))?;
    Ok(Json(workouts))
}

async fn get_workout(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Workout>, ApiError> {
    store
        .get(&id)
        .map_err(ApiError::internal("Failed to fetch workout"))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_workout(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let draft = parse_draft(&body)?;
    let workout = store
        .create(draft)
        .map_err(ApiError::internal("Failed to create workout"))?;
    info!(id = %workout.id, name = %workout.name, "workout created");
    Ok((StatusCode::CREATED, Json(workout)))
}

async fn delete_workout(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let removed = store
        .delete(&id)
        .map_err(ApiError::internal("Failed to delete workout"))?;
    if !removed {
        return Err(ApiError::NotFound);
    }
    info!(%id, "workout deleted");
    Ok(Json(MessageBody {
        message: DELETED_MESSAGE.to_string(),
    }))
}

/// Validate a create request body.
///
/// Only the shape is checked: `name` must be a non-empty string and
/// `exercises` a non-empty array of exercise objects. Values inside an
/// exercise (blank names, zero sets) are accepted as given.
pub fn parse_draft(body: &[u8]) -> Result<WorkoutDraft, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| ApiError::invalid(format!("body is not valid JSON: {err}")))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::invalid("body must be a JSON object"));
    };

    let name = match fields.get("name") {
        Some(Value::String(name)) if !name.is_empty() => name.clone(),
        _ => return Err(ApiError::invalid("`name` must be a non-empty string")),
    };

    let exercises = match fields.get("exercises") {
        Some(Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| serde_json::from_value::<Exercise>(item.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::invalid(format!("malformed exercise: {err}")))?,
        Some(Value::Array(_)) => return Err(ApiError::invalid("`exercises` is empty")),
        _ => return Err(ApiError::invalid("`exercises` must be an array")),
    };

    let mut draft = WorkoutDraft::new(name, exercises);
    draft.date = parse_date(&fields)?;
    draft.duration = parse_duration(&fields)?;
    Ok(draft)
}

fn parse_date(fields: &Map<String, Value>) -> Result<Option<chrono::DateTime<chrono::Utc>>, ApiError> {
    match fields.get("date") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.is_empty() => Ok(None),
        Some(Value::String(text)) => iso8601::parse(text)
            .map(Some)
            .map_err(|err| ApiError::invalid(format!("`date` is not ISO-8601: {err}"))),
        Some(_) => Err(ApiError::invalid("`date` must be a string")),
    }
}

fn parse_duration(fields: &Map<String, Value>) -> Result<Option<u32>, ApiError> {
    match fields.get("duration") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|minutes| u32::try_from(minutes).ok())
            .map(Some)
            .ok_or_else(|| ApiError::invalid("`duration` must be a non-negative integer")),
        Some(_) => Err(ApiError::invalid("`duration` must be a number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<WorkoutDraft, ApiError> {
        parse_draft(value.to_string().as_bytes())
    }

    fn is_invalid(result: Result<WorkoutDraft, ApiError>) -> bool {
        matches!(result, Err(ApiError::InvalidData { .. }))
    }

    #[test]
    fn test_parse_minimal_draft() {
        let draft = parse(json!({
            "name": "Leg Day 2",
            "exercises": [{"name": "Squats", "sets": 4, "reps": 8, "weight": 100}]
        }))
        .unwrap();

        assert_eq!(draft.name, "Leg Day 2");
        assert_eq!(draft.exercises, vec![Exercise::new("Squats", 4, 8, Some(100.0))]);
        assert_eq!(draft.date, None);
        assert_eq!(draft.duration, None);
    }

    #[test]
    fn test_parse_full_draft() {
        let draft = parse(json!({
            "name": "Push",
            "exercises": [{"name": "Dips", "sets": 3, "reps": 12}],
            "date": "2025-03-01T08:15:00.000Z",
            "duration": 40
        }))
        .unwrap();

        assert_eq!(
            draft.date.map(|date| iso8601::format(&date)).as_deref(),
            Some("2025-03-01T08:15:00.000Z")
        );
        assert_eq!(draft.duration, Some(40));
    }

    #[test]
    fn test_null_and_empty_optionals_use_defaults() {
        let draft = parse(json!({
            "name": "Push",
            "exercises": [{"name": "Dips", "sets": 3, "reps": 12}],
            "date": "",
            "duration": null
        }))
        .unwrap();

        assert_eq!(draft.date, None);
        assert_eq!(draft.duration, None);
    }

    #[test]
    fn test_missing_name_rejected() {
        assert!(is_invalid(parse(json!({
            "exercises": [{"name": "Dips", "sets": 3, "reps": 12}]
        }))));
        assert!(is_invalid(parse(json!({
            "name": "",
            "exercises": [{"name": "Dips", "sets": 3, "reps": 12}]
        }))));
        assert!(is_invalid(parse(json!({
            "name": 5,
            "exercises": [{"name": "Dips", "sets": 3, "reps": 12}]
        }))));
    }

    #[test]
    fn test_exercises_shape_rejected() {
        assert!(is_invalid(parse(json!({"name": "x"}))));
        assert!(is_invalid(parse(json!({"name": "x", "exercises": "Squats"}))));
        assert!(is_invalid(parse(json!({"name": "x", "exercises": []}))));
    }

    #[test]
    fn test_exercises_must_fit_typed_shape() {
        // Values are not range-checked, but every element has to deserialize
        // into an `Exercise` before it can be stored.
        let with_exercise = |exercise: Value| parse(json!({"name": "x", "exercises": [exercise]}));

        assert!(is_invalid(with_exercise(json!({"name": "Squats"}))));
        assert!(is_invalid(with_exercise(json!({"name": "Squats", "sets": "3", "reps": 8}))));
        assert!(is_invalid(with_exercise(json!({"name": "Squats", "sets": -1, "reps": 8}))));
        assert!(is_invalid(with_exercise(json!({"name": "Squats", "sets": 3, "reps": 8, "weight": "heavy"}))));
        assert!(is_invalid(with_exercise(json!("Squats"))));

        let draft = with_exercise(json!({"name": "Squats", "sets": 3, "reps": 8, "tempo": "3-1-1"})).unwrap();
        assert_eq!(draft.exercises, vec![Exercise::new("Squats", 3, 8, None)]);
    }

    #[test]
    fn test_exercise_values_not_checked() {
        let draft = parse(json!({
            "name": "x",
            "exercises": [{"name": "", "sets": 0, "reps": 0}]
        }))
        .unwrap();

        assert_eq!(draft.exercises[0], Exercise::new("", 0, 0, None));
    }

    #[test]
    fn test_bad_optionals_rejected() {
        let base = |extra: Value| {
            let mut body = json!({
                "name": "x",
                "exercises": [{"name": "Dips", "sets": 3, "reps": 12}]
            });
            if let (Value::Object(body), Value::Object(extra)) = (&mut body, extra) {
                body.extend(extra);
            }
            parse(body)
        };

        assert!(is_invalid(base(json!({"date": "yesterday"}))));
        assert!(is_invalid(base(json!({"date": 12}))));
        assert!(is_invalid(base(json!({"duration": -5}))));
        assert!(is_invalid(base(json!({"duration": 1.5}))));
        assert!(is_invalid(base(json!({"duration": "45"}))));
    }

    #[test]
    fn test_non_object_body_rejected() {
        assert!(is_invalid(parse_draft(b"not json")));
        assert!(is_invalid(parse(json!([1, 2, 3]))));
    }
}

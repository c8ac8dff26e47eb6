use crate::{
    config::{IdCheck, MutationMode, TourPolicy},
    error::AppError,
    middleware::RequestTime,
    models::TourInput,
    store::TourRepository,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;

/// Parses the `{id}` path segment. Only plain integers are accepted: `"abc"` and
/// `"1.0"` are rejected with `InvalidId` in every `IdCheck` mode.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| AppError::InvalidId)
}

/// Rejects `id` according to the configured `IdCheck`.
///
/// `IdCheck::Length` only compares against the number of stored tours, so an
/// in-range id that matches nothing passes.
fn check_id(repo: &dyn TourRepository, policy: &TourPolicy, id: i64) -> Result<(), AppError> {
    let valid = match policy.id_check {
        IdCheck::Length => id <= repo.count()? as i64,
        IdCheck::Exists => repo.get(id)?.is_some(),
    };
    if valid {
        Ok(())
    } else {
        Err(AppError::InvalidId)
    }
}

/// Lists every tour.
///
/// ## Responses:
/// - `200 OK`: `{status, requestedAt, results, data: {tours}}`.
/// - `500 Internal Server Error`: If the store is unavailable.
#[get("")]
pub async fn get_all_tours(
    repo: web::Data<dyn TourRepository>,
    requested_at: RequestTime,
) -> Result<impl Responder, AppError> {
    let tours = repo.list()?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "requestedAt": requested_at.to_iso8601(),
        "results": tours.len(),
        "data": { "tours": tours }
    })))
}

/// Retrieves a tour by id.
///
/// With `IdCheck::Length`, `data.tour` is `null` for an in-range id that
/// belongs to no tour.
///
/// ## Responses:
/// - `200 OK`: `{status, data: {tour}}`.
/// - `404 Not Found`: `{status: "fail", message: "Invalid ID"}`.
#[get("/{id}")]
pub async fn get_tour(
    repo: web::Data<dyn TourRepository>,
    policy: web::Data<TourPolicy>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&path)?;
    check_id(repo.get_ref(), &policy, id)?;
    let tour = repo.get(id)?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": { "tour": tour }
    })))
}

/// Creates a tour from an arbitrary JSON object.
///
/// The new tour gets the last tour's id plus one and a price of 230 unless the
/// body sets `id` or `price` itself. The data file is rewritten before the
/// response is sent.
///
/// ## Responses:
/// - `201 Created`: `{status, data: {tour}}`.
/// - `400 Bad Request`: If the body is not a JSON object or its `id` is not an integer.
/// - `500 Internal Server Error`: If the data file could not be written.
#[post("")]
pub async fn create_tour(
    repo: web::Data<dyn TourRepository>,
    body: web::Json<TourInput>,
) -> Result<impl Responder, AppError> {
    let input = body.into_inner();
    // The store rewrites the data file, so it runs on the blocking pool.
    let tour = web::block(move || repo.create(input)).await??;

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "data": { "tour": tour }
    })))
}

/// Updates a tour.
///
/// In `MutationMode::Stub` nothing is changed, the body is ignored and a
/// placeholder is returned. In `MutationMode::Persist` the body must be a JSON
/// object and is merged into the stored tour.
///
/// ## Responses:
/// - `200 OK`: `{status, data: {tour}}`.
/// - `400 Bad Request`: Persist mode only, if the body is not a JSON object.
/// - `404 Not Found`: `{status: "fail", message: "Invalid ID"}`.
#[patch("/{id}")]
pub async fn update_tour(
    repo: web::Data<dyn TourRepository>,
    policy: web::Data<TourPolicy>,
    path: web::Path<String>,
    body: Result<web::Json<TourInput>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&path)?;
    check_id(repo.get_ref(), &policy, id)?;

    let tour = match policy.mutations {
        MutationMode::Stub => json!("<Updated tour here...>"),
        MutationMode::Persist => {
            let input = body
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .into_inner();
            let updated = web::block(move || repo.update(id, input))
                .await??
                .ok_or(AppError::InvalidId)?;
            json!(updated)
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": { "tour": tour }
    })))
}

/// Deletes a tour. Only `MutationMode::Persist` actually removes it.
///
/// ## Responses:
/// - `204 No Content`: On success.
/// - `404 Not Found`: `{status: "fail", message: "Invalid ID"}`.
#[delete("/{id}")]
pub async fn delete_tour(
    repo: web::Data<dyn TourRepository>,
    policy: web::Data<TourPolicy>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let id = parse_id(&path)?;
    check_id(repo.get_ref(), &policy, id)?;

    if policy.mutations == MutationMode::Persist && !web::block(move || repo.delete(id)).await?? {
        return Err(AppError::InvalidId);
    }

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn store_with(count: i64) -> MemoryStore {
        let tours = (0..count)
            .map(|id| serde_json::from_value(json!({ "id": id, "name": format!("Tour {}", id) })).unwrap())
            .collect();
        MemoryStore::new(tours)
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        assert!(matches!(parse_id("seven"), Err(AppError::InvalidId)));
        assert!(matches!(parse_id("1.0"), Err(AppError::InvalidId)));
    }

    #[test]
    fn test_length_check_boundary() {
        // Ids 0..=4 are stored, so 5 matches nothing but is still in range.
        let store = store_with(5);
        let policy = TourPolicy::default();

        assert!(check_id(&store, &policy, 5).is_ok());
        assert!(matches!(check_id(&store, &policy, 6), Err(AppError::InvalidId)));
    }

    #[test]
    fn test_exists_check() {
        let store = store_with(5);
        let policy = TourPolicy {
            id_check: IdCheck::Exists,
            ..TourPolicy::default()
        };

        assert!(check_id(&store, &policy, 4).is_ok());
        assert!(matches!(check_id(&store, &policy, 5), Err(AppError::InvalidId)));
    }
}

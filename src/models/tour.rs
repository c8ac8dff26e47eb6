use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Price assigned to a new tour when the request body does not set one.
pub const DEFAULT_PRICE: u64 = 230;

/// A tour record as stored in the data file and returned by the API.
///
/// Only `id` is typed. Every other attribute (name, duration, price, ...) is
/// kept verbatim and flattened next to it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// The body of a create or update request: any JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourInput(pub Map<String, Value>);

impl TourInput {
    /// The `id` the client asked for, if any.
    ///
    /// Returns `BadRequest` when the body carries an `id` that is not an integer.
    pub fn requested_id(&self) -> Result<Option<i64>, AppError> {
        match self.0.get("id") {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| AppError::BadRequest("Tour id must be an integer".into())),
        }
    }
}

impl Tour {
    /// Builds a new tour from the defaults `{id, price: 230}` with the request
    /// body merged over them. A body `id` or `price` replaces the default.
    pub fn new(next_id: i64, input: TourInput) -> Result<Self, AppError> {
        let id = input.requested_id()?.unwrap_or(next_id);

        let mut fields = Map::new();
        fields.insert("price".to_string(), Value::from(DEFAULT_PRICE));
        for (key, value) in input.0 {
            if key != "id" {
                fields.insert(key, value);
            }
        }

        Ok(Self { id, fields })
    }

    /// Merges `input` over the current fields. The id never changes.
    pub fn apply(&mut self, input: TourInput) {
        for (key, value) in input.0 {
            if key != "id" {
                self.fields.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> TourInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tour_creation_applies_defaults() {
        let tour = Tour::new(3, input(json!({ "name": "C" }))).unwrap();
        assert_eq!(tour.id, 3);
        assert_eq!(
            serde_json::to_value(&tour).unwrap(),
            json!({ "id": 3, "price": 230, "name": "C" })
        );
    }

    #[test]
    fn test_serialized_keys_keep_insertion_order() {
        let tour = Tour::new(3, input(json!({ "name": "C", "price": 497, "duration": 5 }))).unwrap();
        assert_eq!(
            serde_json::to_string(&tour).unwrap(),
            r#"{"id":3,"price":497,"name":"C","duration":5}"#
        );
    }

    #[test]
    fn test_body_overrides_defaults() {
        let tour = Tour::new(3, input(json!({ "id": 42, "price": 997 }))).unwrap();
        assert_eq!(tour.id, 42);
        assert_eq!(tour.fields["price"], json!(997));
    }

    #[test]
    fn test_non_integer_id_is_rejected() {
        let result = Tour::new(3, input(json!({ "id": "abc" })));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut tour: Tour = serde_json::from_value(json!({ "id": 1, "name": "A" })).unwrap();
        tour.apply(input(json!({ "id": 9, "name": "A2", "duration": 5 })));
        assert_eq!(tour.id, 1);
        assert_eq!(tour.fields["name"], json!("A2"));
        assert_eq!(tour.fields["duration"], json!(5));
    }

    #[test]
    fn test_tour_deserializes_from_data_file_shape() {
        let tour: Tour = serde_json::from_value(json!({
            "id": 0,
            "name": "The Forest Hiker",
            "duration": 5,
            "price": 397
        }))
        .unwrap();
        assert_eq!(tour.id, 0);
        assert_eq!(tour.fields.len(), 3);
    }
}

//! Offer model and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{messages, AppError};

/// A stored offer, as returned by get, create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub title: String,
    pub slug: String,
    /// Opaque document, stored and returned as-is
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

/// Summary projection used by the offer listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferSummary {
    pub title: String,
    pub slug: String,
}

/// Request body for creating a new offer.
///
/// Only a JSON object is accepted; any other body fails to deserialize.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct CreateOfferRequest {
    pub title: Option<Value>,
    pub slug: Option<Value>,
    pub data: Option<Value>,
}

/// Request body for updating an existing offer. The slug comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct UpdateOfferRequest {
    pub title: Option<Value>,
    pub data: Option<Value>,
}

impl From<Map<String, Value>> for CreateOfferRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            title: body.remove("title"),
            slug: body.remove("slug"),
            data: body.remove("data"),
        }
    }
}

impl From<Map<String, Value>> for UpdateOfferRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            title: body.remove("title"),
            data: body.remove("data"),
        }
    }
}

/// A create request that passed presence validation.
#[derive(Debug, Clone)]
pub struct NewOffer {
    pub title: String,
    pub slug: String,
    pub data: Value,
}

/// An update request that passed presence validation.
#[derive(Debug, Clone)]
pub struct OfferChanges {
    pub title: String,
    pub data: Value,
}

impl CreateOfferRequest {
    /// Check that title, slug and data are all present.
    pub fn validate(self) -> Result<NewOffer, AppError> {
        match (
            self.title.filter(is_truthy),
            self.slug.filter(is_truthy),
            self.data.filter(is_truthy),
        ) {
            (Some(title), Some(slug), Some(data)) => Ok(NewOffer {
                title: to_text(title),
                slug: to_text(slug),
                data,
            }),
            _ => Err(AppError::BadRequest(messages::MISSING_FIELDS.to_string())),
        }
    }
}

impl UpdateOfferRequest {
    /// Check that title and data are both present.
    pub fn validate(self) -> Result<OfferChanges, AppError> {
        match (self.title.filter(is_truthy), self.data.filter(is_truthy)) {
            (Some(title), Some(data)) => Ok(OfferChanges {
                title: to_text(title),
                data,
            }),
            _ => Err(AppError::BadRequest(messages::MISSING_FIELDS.to_string())),
        }
    }
}

/// Whether a JSON value counts as present. Containers always do, even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text stored for a value bound to a text column.
///
/// Strings are stored as-is, scalars in their literal form and containers as JSON.
pub fn to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

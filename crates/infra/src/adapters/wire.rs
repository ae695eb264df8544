//! Response-shape normalisation
//!
//! The backend answers list endpoints in several shapes:
//!
//! - `{ "data": [...], "pagination": { page, limit, total, totalPages } }`
//! - `{ "data": [...], "page": .., "limit": .., "total": .., "totalPages": .. }`
//! - `{ "<collection>": [...] }`
//! - a bare JSON array
//!
//! Everything is folded into [`Page`] here.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use stockdesk_domain::{Page, PaginationMeta};

use crate::api::ApiError;

/// Pagination block as sent on the wire; `totalPages` may be missing or
/// spelled `pages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePagination {
    page: u32,
    limit: u32,
    total: u64,
    #[serde(default, alias = "pages")]
    total_pages: Option<u32>,
}

impl WirePagination {
    fn into_meta(self) -> PaginationMeta {
        let total_pages = self.total_pages.unwrap_or_else(|| {
            let limit = u64::from(self.limit.max(1));
            u32::try_from(self.total.div_ceil(limit)).unwrap_or(u32::MAX)
        });
        PaginationMeta { page: self.page, limit: self.limit, total: self.total, total_pages }
    }
}

/// A populated reference (`{"_id": "..", ...}`) or a bare id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdRef {
    Id(String),
    Object {
        #[serde(alias = "_id")]
        id: String,
    },
}

impl IdRef {
    pub(crate) fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

/// Normalise a list response into one canonical page.
///
/// # Errors
/// `ApiError::Decode` when no list can be found or an item does not parse.
pub(crate) fn normalize_page<T: DeserializeOwned>(
    value: Value,
    collection: &str,
) -> Result<Page<T>, ApiError> {
    match value {
        Value::Array(items) => Ok(Page::unpaginated(decode_items(items)?)),
        Value::Object(mut object) => {
            let items = take_list(&mut object, collection).ok_or_else(|| {
                ApiError::Decode(format!("response carries neither `data` nor `{collection}`"))
            })?;
            let pagination = pagination_of(object);
            Ok(Page::new(decode_items(items)?, pagination))
        }
        Value::Null => Ok(Page::empty()),
        other => Err(ApiError::Decode(format!("expected a list, got {}", kind_of(&other)))),
    }
}

/// Collections that are never paginated (locations, rooms, racks).
pub(crate) fn normalize_collection<T: DeserializeOwned>(
    value: Value,
    collection: &str,
) -> Result<Vec<T>, ApiError> {
    normalize_page(value, collection).map(|page| page.items)
}

/// Unwrap a single-object payload that may arrive as `{data: {...}}` or
/// `{<singular>: {...}}`.
pub(crate) fn unwrap_single(value: Value, singular: &str) -> Value {
    match value {
        Value::Object(mut object) => {
            for key in ["data", singular] {
                if matches!(object.get(key), Some(Value::Object(_))) {
                    if let Some(inner) = object.remove(key) {
                        return inner;
                    }
                }
            }
            Value::Object(object)
        }
        other => other,
    }
}

/// Server-assigned id of a created node.
pub(crate) fn created_id(value: Value, singular: &str) -> Result<String, ApiError> {
    let node = unwrap_single(value, singular);
    ["_id", "id"]
        .iter()
        .find_map(|key| node.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| ApiError::Decode(format!("created {singular} has no id")))
}

fn take_list(object: &mut Map<String, Value>, collection: &str) -> Option<Vec<Value>> {
    for key in ["data", collection] {
        if let Some(Value::Array(_)) = object.get(key) {
            if let Some(Value::Array(items)) = object.remove(key) {
                return Some(items);
            }
        }
    }
    None
}

fn pagination_of(mut object: Map<String, Value>) -> Option<PaginationMeta> {
    let nested = object.remove("pagination").filter(Value::is_object);
    let source = nested.unwrap_or(Value::Object(object));
    serde_json::from_value::<WirePagination>(source).ok().map(WirePagination::into_meta)
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::Decode(format!("list item {index}: {e}")))
        })
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

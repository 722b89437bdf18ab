use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use meshinv_infra::{ItemQuery, Page};
use meshinv_inventory::InventoryItem;

use crate::app::errors;

pub const MSG_MISSING_FIELDS: &str = "Missing required fields: code, name, quantity";
pub const MSG_NO_DATA: &str = "No data provided";

// -------------------------
// Request DTOs
// -------------------------

/// Raw list parameters. Unparseable numbers fall back to defaults rather than
/// failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// `page < 1` becomes 1; `per_page` is clamped to `1..=max_page_size`.
    pub fn resolve(&self, default_page_size: u64, max_page_size: u64) -> ItemQuery {
        let page = lenient_int(self.page.as_deref()).unwrap_or(1).max(1);
        let max = i64::try_from(max_page_size).unwrap_or(i64::MAX).max(1);
        let per_page = lenient_int(self.per_page.as_deref())
            .map(|n| n.clamp(1, max) as u64)
            .unwrap_or(default_page_size);

        ItemQuery {
            page: page as u64,
            per_page,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// `POST /api/inventory` body, field presence and types checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub code: String,
    pub name: String,
    /// `None` when the value is not an integer.
    pub quantity: Option<i64>,
}

impl CreateItemRequest {
    pub fn parse(body: &Bytes) -> Result<Self, Response> {
        let obj = match json_object(body) {
            Some(obj) if ["code", "name", "quantity"].iter().all(|k| obj.contains_key(*k)) => obj,
            _ => return Err(bad_request(MSG_MISSING_FIELDS)),
        };

        let field = |key: &str| obj.get(key).and_then(Value::as_str);
        let (Some(code), Some(name)) = (field("code"), field("name")) else {
            return Err(bad_request("Code and name must be strings"));
        };

        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            quantity: obj.get("quantity").and_then(integer),
        })
    }
}

/// `PUT /api/inventory/:id` body. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    /// Outer `Some` when the key was present; inner `None` when not an integer.
    pub quantity: Option<Option<i64>>,
}

impl UpdateItemRequest {
    pub fn parse(body: &Bytes) -> Result<Self, Response> {
        let obj = match json_object(body) {
            Some(obj) if !obj.is_empty() => obj,
            _ => return Err(bad_request(MSG_NO_DATA)),
        };

        let name = match obj.get("name") {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(bad_request("Item name must be a string")),
        };

        Ok(Self {
            name,
            quantity: obj.get("quantity").map(integer),
        })
    }
}

fn json_object(body: &Bytes) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// Whole JSON integers only; `5.0`, `"5"` and booleans are not quantities.
fn integer(value: &Value) -> Option<i64> {
    value.as_i64()
}

fn bad_request(message: &str) -> Response {
    errors::json_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<InventoryItem>,
    pub pagination: Pagination,
}

impl From<Page<InventoryItem>> for ItemListResponse {
    fn from(page: Page<InventoryItem>) -> Self {
        Self {
            pagination: Pagination {
                page: page.page,
                pages: page.pages,
                per_page: page.per_page,
                total: page.total,
            },
            items: page.items,
        }
    }
}

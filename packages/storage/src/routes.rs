//! Request descriptors for the HTTP design store.
//!
//! - `GET /designs/product/{productId}` or `GET /designs/{designId}` → `{data}`
//! - `POST /designs` creates, `PATCH /designs/{id}` updates
//!
//! Saves are multipart: the `PersistedDesign` JSON plus a preview part.

use crate::errors::{StoreError, StoreResult};
use crate::wire::PersistedDesign;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a design is addressed when loading
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "by", content = "id", rename_all = "camelCase")]
pub enum DesignKey {
    Design(String),
    Product(String),
}

impl fmt::Display for DesignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignKey::Design(id) => write!(f, "design {}", id),
            DesignKey::Product(id) => write!(f, "product {}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRequest {
    pub method: Method,
    pub path: String,
    pub parts: Vec<Part>,
}

impl StoreRequest {
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Decode the `design` part of a save request
    pub fn design(&self) -> StoreResult<PersistedDesign> {
        let part = self
            .part("design")
            .ok_or_else(|| StoreError::BadRequest("missing design part".to_string()))?;
        Ok(serde_json::from_str(&part.body)?)
    }

    pub fn preview(&self) -> Option<&str> {
        self.part("preview").map(|p| p.body.as_str())
    }
}

/// What a request asks the store to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Fetch(DesignKey),
    Create,
    Update(String),
}

impl Route {
    pub fn resolve(request: &StoreRequest) -> StoreResult<Route> {
        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match (request.method, segments.as_slice()) {
            (Method::Get, ["designs", "product", id]) => {
                Route::Fetch(DesignKey::Product(id.to_string()))
            }
            (Method::Get, ["designs", id]) => Route::Fetch(DesignKey::Design(id.to_string())),
            (Method::Post, ["designs"]) => Route::Create,
            (Method::Patch, ["designs", id]) => Route::Update(id.to_string()),
            _ => {
                return Err(StoreError::BadRequest(format!(
                    "no route for {:?} {}",
                    request.method, request.path
                )))
            }
        };
        Ok(route)
    }
}

pub const PREVIEW_CONTENT_TYPE: &str = "application/vnd.artboard.preview+json";

pub fn load_request(key: &DesignKey) -> StoreRequest {
    let path = match key {
        DesignKey::Design(id) => format!("/designs/{}", id),
        DesignKey::Product(id) => format!("/designs/product/{}", id),
    };
    StoreRequest {
        method: Method::Get,
        path,
        parts: Vec::new(),
    }
}

/// Create when `design_id` is `None`, update otherwise
pub fn save_request(
    design_id: Option<&str>,
    design: &PersistedDesign,
    preview: Option<String>,
) -> Result<StoreRequest, serde_json::Error> {
    let (method, path) = match design_id {
        Some(id) => (Method::Patch, format!("/designs/{}", id)),
        None => (Method::Post, "/designs".to_string()),
    };

    let mut parts = vec![Part {
        name: "design".to_string(),
        filename: None,
        content_type: "application/json".to_string(),
        body: serde_json::to_string(design)?,
    }];

    if let Some(preview) = preview {
        parts.push(Part {
            name: "preview".to_string(),
            filename: Some("preview.json".to_string()),
            content_type: PREVIEW_CONTENT_TYPE.to_string(),
            body: preview,
        });
    }

    Ok(StoreRequest {
        method,
        path,
        parts,
    })
}

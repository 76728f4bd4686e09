//! Minimal serde model of a Postman-style collection tree.
//!
//! This module defines the subset of the collection format that identity
//! derivation and folder ordering need:
//! - `Collection`: the document root with its top-level item list
//! - `CollectionNode`: folder-or-request discrimination, as on the wire
//! - `Folder` / `RequestItem`: the two node kinds
//! - `Request` / `RequestUrl` / `KeyValue`: the request payload
//! - `Event` / `Script`: scripts attached to an item lifecycle hook
//!
//! Unknown fields are ignored on input; optional fields are omitted on
//! output, so real-world collection exports parse without being carried in
//! full.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Root collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection metadata.
    pub info: CollectionInfo,
    /// Top-level folders and requests, in document order.
    #[serde(default)]
    pub item: Vec<CollectionNode>,
}

/// Collection metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Display name of the collection.
    pub name: String,
    /// Schema URL declaring the collection format version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// A node in the collection tree.
///
/// The wire format distinguishes the two shapes structurally: folders carry
/// an `item` array, requests carry a `request` payload. Variant order
/// matters here, `Folder` must be tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionNode {
    /// A named group of further nodes.
    Folder(Folder),
    /// A single request entry.
    Request(RequestItem),
}

impl CollectionNode {
    /// Display name of the node, whichever kind it is.
    pub fn name(&self) -> &str {
        match self {
            CollectionNode::Folder(folder) => &folder.name,
            CollectionNode::Request(item) => &item.name,
        }
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, CollectionNode::Folder(_))
    }

    /// The folder payload, if this node is one.
    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            CollectionNode::Folder(folder) => Some(folder),
            CollectionNode::Request(_) => None,
        }
    }

    /// The request payload, if this node is one.
    pub fn as_request(&self) -> Option<&RequestItem> {
        match self {
            CollectionNode::Folder(_) => None,
            CollectionNode::Request(item) => Some(item),
        }
    }
}

/// A named, ordered container of requests or sub-folders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Stable identifier assigned by the exporting tool, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the folder.
    pub name: String,
    /// Direct children, in document order.
    pub item: Vec<CollectionNode>,
}

/// A single request entry in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Stable identifier assigned by the exporting tool, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name of the request (e.g., "Get pet by id").
    pub name: String,
    /// The HTTP request payload.
    pub request: Request,
    /// Scripts attached to this item's lifecycle hooks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<Event>,
}

/// HTTP request payload of a request item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP verb as it appears in the document; identity accessors
    /// normalize it to upper-case.
    pub method: String,
    /// Name mirror used by downstream generators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Structured request URL.
    pub url: RequestUrl,
    /// Request headers, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header: Vec<KeyValue>,
}

/// Structured URL of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestUrl {
    /// Full URL string as exported, kept verbatim when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Path segments; variable segments use the collection's colon syntax
    /// (e.g., `["pets", ":petId"]`).
    #[serde(default)]
    pub path: Vec<String>,
    /// Query parameters, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<KeyValue>,
    /// Path variables, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variable: Vec<KeyValue>,
}

/// A key/value pair with an optional description, used for headers, query
/// parameters, and path variables alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Parameter name.
    pub key: String,
    /// Parameter value; empty when the document leaves it unset.
    #[serde(default)]
    pub value: String,
    /// Human-readable description, if the document carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A script attached to an item lifecycle hook (e.g., `test`, `prerequest`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// The hook this event listens on.
    pub listen: String,
    /// Script payload, absent for placeholder events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Script>,
}

/// Script payload of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script source, one line per entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exec: Vec<String>,
    /// Script language tag (e.g., "text/javascript").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub script_type: Option<String>,
}

impl Collection {
    /// Parse a collection document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::ParseCollection)
    }

    /// Serialize the collection to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::SerializeCollection)
    }

    /// Find the folder that directly contains the request with the given id.
    ///
    /// Returns `None` for requests sitting at the collection root and for
    /// ids that do not appear anywhere in the tree.
    pub fn parent_folder(&self, request_id: &str) -> Option<&Folder> {
        find_parent(&self.item, request_id)
    }

    /// All request items in the tree, depth-first in document order.
    pub fn requests(&self) -> Vec<&RequestItem> {
        let mut out = Vec::new();
        collect_requests(&self.item, &mut out);
        out
    }
}

fn find_parent<'a>(nodes: &'a [CollectionNode], request_id: &str) -> Option<&'a Folder> {
    for node in nodes {
        if let CollectionNode::Folder(folder) = node {
            let holds_request = folder.item.iter().any(|child| {
                matches!(child, CollectionNode::Request(item) if item.id.as_deref() == Some(request_id))
            });
            if holds_request {
                return Some(folder);
            }
            if let Some(found) = find_parent(&folder.item, request_id) {
                return Some(found);
            }
        }
    }
    None
}

fn collect_requests<'a>(nodes: &'a [CollectionNode], out: &mut Vec<&'a RequestItem>) {
    for node in nodes {
        match node {
            CollectionNode::Request(item) => out.push(item),
            CollectionNode::Folder(folder) => collect_requests(&folder.item, out),
        }
    }
}

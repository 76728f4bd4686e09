//! Operation identity derived from a single collection request.
//!
//! This module computes the stable, comparable identity used to match a
//! collection request against an external API description:
//! - `canonical_path_ref` / `canonical_path_var`: the two canonical key forms
//! - `MappedOperation`: identity plus flattened metadata for one request
//! - `OperationIdMap`: external identifier lookup keyed by path reference
//!
//! Identity is a pure function of the request's method and path segments; it
//! never depends on the request's position in the tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::collection::{Collection, Event, KeyValue, RequestItem};

/// Externally assigned identifier for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdEntry {
    /// Identifier from the source API description (e.g., "listPets").
    pub id: String,
}

/// Lookup table from canonical path reference to identifier entry, built by
/// the caller from the source API description.
pub type OperationIdMap = HashMap<String, OperationIdEntry>;

/// Flattened view of one header, query parameter, or path variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamRecord {
    /// Parameter name.
    pub name: String,
    /// Parameter value; empty when the document leaves it unset.
    pub value: String,
    /// Human-readable description, if the document carries one.
    pub description: Option<String>,
}

/// Canonical brace-form path reference for a method and raw path segments.
///
/// Segments are joined with `/` behind an upper-cased `METHOD::` prefix, and
/// any segment containing the collection's `:` variable marker is rewritten
/// to `{name}` form with the first marker stripped:
/// `get` + `["pets", ":petId"]` becomes `GET::/pets/{petId}`.
pub fn canonical_path_ref(method: &str, segments: &[String]) -> String {
    let method = method.to_uppercase();
    let joined = brace_form(segments);
    format!("{method}::/{joined}")
}

/// Canonical path-safe variable name for a method and raw path segments.
///
/// Uses the same brace-form path as [`canonical_path_ref`] without the
/// leading slash, flattens every `/` and `#` to `-`, and joins the
/// lower-cased method with `::`:
/// `GET` + `["pets", ":petId"]` becomes `get::pets-{petId}`.
pub fn canonical_path_var(method: &str, segments: &[String]) -> String {
    let method = method.to_lowercase();
    let flattened = brace_form(segments).replace(['/', '#'], "-");
    format!("{method}::{flattened}")
}

/// Join segments with `/`, rewriting colon-marked segments to brace form.
fn brace_form(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| {
            if segment.contains(':') {
                format!("{{{}}}", segment.replacen(':', "", 1))
            } else {
                segment.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Identity and flattened metadata for one request in a collection.
///
/// Owns a copy of the underlying item; deriving the identity never modifies
/// the collection it came from.
#[derive(Debug, Clone)]
pub struct MappedOperation {
    /// Externally assigned operation identifier, when one could be resolved.
    pub id: Option<String>,
    /// `/`-joined raw path with the collection's `:var` segments intact
    /// (e.g., "/pets/:petId").
    pub path: String,
    /// Upper-cased HTTP method (e.g., "GET").
    pub method: String,
    /// Canonical path reference (e.g., "GET::/pets/{petId}").
    pub path_ref: String,
    /// Canonical path-safe variable name (e.g., "get::pets-{petId}").
    pub path_var: String,
    /// Flattened request headers.
    pub request_headers: Vec<ParamRecord>,
    /// Flattened query parameters.
    pub query_params: Vec<ParamRecord>,
    /// Flattened path variables.
    pub path_params: Vec<ParamRecord>,
    /// Set by downstream pipelines once variation data has been injected
    /// into the item's test scripts; always `false` at construction.
    pub test_data_injected: bool,
    /// The underlying collection item.
    pub item: RequestItem,
}

impl MappedOperation {
    /// Derive the identity for `item`.
    ///
    /// When `id_map` is given, the identifier is resolved by canonical path
    /// reference and a miss yields `None`, even if `fallback_id` was also
    /// supplied. Without a map, `fallback_id` is used verbatim.
    pub fn new(
        item: RequestItem,
        fallback_id: Option<&str>,
        id_map: Option<&OperationIdMap>,
    ) -> Self {
        let method = item.request.method.to_uppercase();
        let segments = &item.request.url.path;
        let joined = segments.join("/");
        let path = format!("/{joined}");
        let path_ref = canonical_path_ref(&method, segments);
        let path_var = canonical_path_var(&method, segments);

        let id = match id_map {
            Some(map) => map.get(&path_ref).map(|entry| entry.id.clone()),
            None => fallback_id.map(str::to_string),
        };

        let request_headers = flatten_params(&item.request.header);
        let query_params = flatten_params(&item.request.url.query);
        let path_params = flatten_params(&item.request.url.variable);

        Self {
            id,
            path,
            method,
            path_ref,
            path_var,
            request_headers,
            query_params,
            path_params,
            test_data_injected: false,
            item,
        }
    }

    /// First event attached to the item that listens on the `test` hook.
    pub fn test_event(&self) -> Option<&Event> {
        self.item.event.iter().find(|event| event.listen == "test")
    }

    /// Id of the folder directly containing this item, if any.
    ///
    /// `None` when the item sits at the collection root, has no id of its
    /// own, or its parent folder carries no id.
    pub fn parent_folder_id<'a>(&self, collection: &'a Collection) -> Option<&'a str> {
        let request_id = self.item.id.as_deref()?;
        collection
            .parent_folder(request_id)
            .and_then(|folder| folder.id.as_deref())
    }

    /// Name of the folder directly containing this item, if any.
    pub fn parent_folder_name<'a>(&self, collection: &'a Collection) -> Option<&'a str> {
        let request_id = self.item.id.as_deref()?;
        collection
            .parent_folder(request_id)
            .map(|folder| folder.name.as_str())
    }

    /// Structurally independent copy of this operation.
    ///
    /// The copy's item id is cleared so it gets a fresh identity, `name` is
    /// applied to both the item and its inner request when given, and a
    /// present identifier gains a `-clone` suffix. Injection bookkeeping is
    /// reset on the copy.
    pub fn clone_with_name(&self, name: Option<&str>) -> Self {
        let mut copy = self.clone();
        copy.item.id = None;
        if let Some(name) = name {
            copy.item.name = name.to_string();
            copy.item.request.name = Some(name.to_string());
        }
        copy.id = self.id.as_ref().map(|id| format!("{id}-clone"));
        copy.test_data_injected = false;
        copy
    }
}

fn flatten_params(entries: &[KeyValue]) -> Vec<ParamRecord> {
    entries
        .iter()
        .map(|entry| ParamRecord {
            name: entry.key.clone(),
            value: entry.value.clone(),
            description: entry.description.clone(),
        })
        .collect()
}

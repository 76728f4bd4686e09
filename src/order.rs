//! Priority ordering of requests inside collection folders.
//!
//! This module bridges the two path syntaxes involved in ordering:
//! - requests carry colon-style variable segments (`/pets/:petId`), the
//!   collection's wire form
//! - the caller's operation references use brace syntax
//!   (`GET::/pets/{petId}`), the API description's form
//!
//! References are normalized into the wire form, every request's operation
//! key is derived from its raw segments, and each eligible folder's direct
//! children are stably sorted by position in the normalized list. Folders
//! containing sub-folders are passed through unmodified; only one level of
//! nesting is ever processed.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::collection::{Collection, CollectionNode, Folder};
use crate::operation::{OperationIdMap, canonical_path_ref};

/// Position of a request inside the collection tree: index of the top-level
/// folder and index of the request within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestHandle {
    /// Index of the folder in the collection's top-level item list.
    pub folder: usize,
    /// Index of the request within the folder's item list.
    pub request: usize,
}

/// Derived identity pair for one request in an eligible folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationTag {
    /// Wire-form operation key (e.g., "GET::/pets/:petId").
    pub operation_key: String,
    /// Externally assigned identifier, when one could be resolved.
    pub operation_id: Option<String>,
}

/// Wire-form operation key for a method and raw path segments.
///
/// Segments are joined verbatim, keeping the collection's `:var` syntax:
/// `get` + `["pets", ":petId"]` becomes `GET::/pets/:petId`.
pub fn wire_operation_key(method: &str, segments: &[String]) -> String {
    let method = method.to_uppercase();
    let joined = segments.join("/");
    format!("{method}::/{joined}")
}

/// Rewrite brace-form operation references into the colon wire form.
///
/// Only the first `{` is replaced with `:` and only the first `}` is
/// removed, so `GET::/pets/{petId}` becomes `GET::/pets/:petId` while
/// references with several variable segments keep their remaining braces.
pub fn normalize_operation_refs(operation_refs: &[String]) -> Vec<String> {
    operation_refs
        .iter()
        .map(|reference| reference.replacen('{', ":", 1).replacen('}', "", 1))
        .collect()
}

/// Compare two operation keys by their position in the normalized priority
/// list.
///
/// Keys found in the list sort by list position and ahead of keys that are
/// not; two absent keys fall back to a lexical comparison. An empty list
/// makes every pair equal, so a stable sort leaves the folder untouched.
/// Total over all inputs.
pub fn compare_by_priority(a: &str, b: &str, priority: &[String]) -> Ordering {
    if !a.is_empty() && a == b {
        return Ordering::Equal;
    }
    if priority.is_empty() {
        return Ordering::Equal;
    }
    let position_a = priority.iter().position(|key| key == a);
    let position_b = priority.iter().position(|key| key == b);
    match (position_a, position_b) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Reorder each eligible top-level folder's requests to match the caller's
/// brace-form operation references.
///
/// A folder is eligible when its direct children are exclusively requests;
/// empty folders, folders containing sub-folders, and requests sitting at
/// the collection root are left untouched. Requests themselves are never
/// modified, only their order within the folder. Never fails: unmatched or
/// empty reference lists degrade to "no reorder".
pub fn order_collection_requests(collection: &mut Collection, operation_refs: &[String]) {
    if operation_refs.is_empty() {
        debug!("no operation order configured, leaving collection untouched");
        return;
    }
    let priority = normalize_operation_refs(operation_refs);

    for node in &mut collection.item {
        let CollectionNode::Folder(folder) = node else {
            continue; // root-level requests keep their position
        };
        if !all_children_are_requests(folder) {
            debug!(folder = %folder.name, "not a flat request folder, skipping");
            continue;
        }
        folder.item.sort_by(|a, b| {
            compare_by_priority(&node_operation_key(a), &node_operation_key(b), &priority)
        });
        trace!(
            folder = %folder.name,
            requests = folder.item.len(),
            "reordered requests by operation priority"
        );
    }
}

/// Derive the companion table pairing each request in each eligible folder
/// with its wire-form operation key and resolved identifier.
///
/// The tree is not modified and ineligible folders contribute no entries.
/// When `id_map` is given, identifiers resolve by canonical path reference
/// with a miss mapping to `None`; without a map, the item's own id is used.
pub fn tag_operations(
    collection: &Collection,
    id_map: Option<&OperationIdMap>,
) -> BTreeMap<RequestHandle, OperationTag> {
    let mut tags = BTreeMap::new();
    for (folder_index, node) in collection.item.iter().enumerate() {
        let Some(folder) = node.as_folder() else {
            continue;
        };
        if !all_children_are_requests(folder) {
            continue;
        }
        for (request_index, child) in folder.item.iter().enumerate() {
            let Some(item) = child.as_request() else {
                continue;
            };
            let operation_key = wire_operation_key(&item.request.method, &item.request.url.path);
            let operation_id = match id_map {
                Some(map) => {
                    let path_ref =
                        canonical_path_ref(&item.request.method, &item.request.url.path);
                    map.get(&path_ref).map(|entry| entry.id.clone())
                }
                None => item.id.clone(),
            };
            tags.insert(
                RequestHandle {
                    folder: folder_index,
                    request: request_index,
                },
                OperationTag {
                    operation_key,
                    operation_id,
                },
            );
        }
    }
    tags
}

/// Whether the folder's direct children are exclusively requests.
fn all_children_are_requests(folder: &Folder) -> bool {
    !folder.item.is_empty() && !folder.item.iter().any(CollectionNode::is_folder)
}

/// Wire-form key of a tree node; empty for folders, which never reach the
/// comparator in an eligible folder.
fn node_operation_key(node: &CollectionNode) -> String {
    match node {
        CollectionNode::Request(item) => {
            wire_operation_key(&item.request.method, &item.request.url.path)
        }
        CollectionNode::Folder(_) => String::new(),
    }
}

#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Operation identity and priority ordering for Postman-style request
//! collections.
//!
//! This crate derives a stable, comparable identity for every request in a
//! collection tree and reorders sibling requests within flat folders to
//! match a caller-supplied list of operation references:
//! - [`collection`]: minimal serde model of the collection tree
//! - [`operation`]: canonical path reference, path-safe variable name, and
//!   flattened request metadata
//! - [`order`]: wire-form keys, reference normalization, and the stable
//!   priority sort
//!
//! Requests encode path parameters with colon-style segments
//! (`/pets/:petId`) while operation references use brace syntax
//! (`GET::/pets/{petId}`); both canonical forms reconcile the two before
//! any comparison.
//!
//! ```
//! use opmap::{Collection, order_collection_requests};
//!
//! let mut collection = Collection::from_json(r#"{
//!     "info": { "name": "Petstore" },
//!     "item": [{
//!         "name": "Pets",
//!         "item": [
//!             { "name": "Get pet", "request": { "method": "GET", "url": { "path": ["pets", ":petId"] } } },
//!             { "name": "List pets", "request": { "method": "GET", "url": { "path": ["pets"] } } }
//!         ]
//!     }]
//! }"#)?;
//!
//! order_collection_requests(
//!     &mut collection,
//!     &["GET::/pets".to_string(), "GET::/pets/{petId}".to_string()],
//! );
//!
//! let pets = collection.item[0].as_folder().unwrap();
//! assert_eq!(pets.item[0].name(), "List pets");
//! assert_eq!(pets.item[1].name(), "Get pet");
//! # Ok::<(), opmap::Error>(())
//! ```

pub mod collection;
mod error;
pub mod operation;
pub mod order;
mod order_proptest;

pub use collection::Collection;
pub use error::{Error, Result};
pub use operation::{MappedOperation, OperationIdEntry, OperationIdMap, ParamRecord};
pub use order::{OperationTag, RequestHandle, order_collection_requests, tag_operations};

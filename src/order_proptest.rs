//! Property-based tests for operation keys and folder ordering.
//!
//! These tests use proptest to generate random methods, path segments, and
//! priority lists, and verify that the key derivation and ordering
//! invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use crate::collection::{
        Collection, CollectionInfo, CollectionNode, Folder, Request, RequestItem, RequestUrl,
    };
    use crate::operation::{canonical_path_ref, canonical_path_var};
    use crate::order::{normalize_operation_refs, order_collection_requests, wire_operation_key};

    fn arb_method() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("GET".to_string()),
            Just("get".to_string()),
            Just("POST".to_string()),
            Just("PUT".to_string()),
            Just("DELETE".to_string()),
        ]
    }

    fn arb_segment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,6}",
            "[a-z]{1,6}".prop_map(|name| format!(":{name}")),
        ]
    }

    fn arb_requests() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
        prop::collection::vec(
            (arb_method(), prop::collection::vec(arb_segment(), 0..4)),
            1..8,
        )
    }

    /// One flat folder holding the given requests, the shape the orderer
    /// processes.
    fn collection_with_folder(requests: Vec<(String, Vec<String>)>) -> Collection {
        let item = requests
            .into_iter()
            .enumerate()
            .map(|(index, (method, path))| {
                CollectionNode::Request(RequestItem {
                    id: Some(format!("req-{index}")),
                    name: format!("Request {index}"),
                    request: Request {
                        method,
                        name: None,
                        url: RequestUrl {
                            raw: None,
                            path,
                            query: vec![],
                            variable: vec![],
                        },
                        header: vec![],
                    },
                    event: vec![],
                })
            })
            .collect();
        Collection {
            info: CollectionInfo {
                name: "Generated".to_string(),
                schema: None,
            },
            item: vec![CollectionNode::Folder(Folder {
                id: None,
                name: "Generated".to_string(),
                item,
            })],
        }
    }

    proptest! {
        /// Property: the wire key is a pure function of method and segments.
        #[test]
        fn wire_key_is_deterministic(
            method in arb_method(),
            segments in prop::collection::vec(arb_segment(), 0..5),
        ) {
            let first = wire_operation_key(&method, &segments);
            let second = wire_operation_key(&method, &segments);
            prop_assert_eq!(first, second);
        }

        /// Property: both canonical forms are deterministic and carry the
        /// normalized method casing.
        #[test]
        fn canonical_forms_are_deterministic(
            method in arb_method(),
            segments in prop::collection::vec(arb_segment(), 0..5),
        ) {
            let path_ref = canonical_path_ref(&method, &segments);
            prop_assert_eq!(canonical_path_ref(&method, &segments), path_ref.clone());
            let ref_prefix = format!("{}::/", method.to_uppercase());
            prop_assert!(path_ref.starts_with(&ref_prefix));

            let path_var = canonical_path_var(&method, &segments);
            prop_assert_eq!(canonical_path_var(&method, &segments), path_var.clone());
            let var_prefix = format!("{}::", method.to_lowercase());
            prop_assert!(path_var.starts_with(&var_prefix));
        }

        /// Property: a brace-form reference for a path with a single variable
        /// segment normalizes to exactly that request's wire key.
        #[test]
        fn single_variable_refs_normalize_to_wire_keys(
            literal in "[a-z]{1,6}",
            variable in "[a-z]{1,6}",
        ) {
            let segments = vec![literal.clone(), format!(":{variable}")];
            let reference = format!("GET::/{literal}/{{{variable}}}");

            let normalized = normalize_operation_refs(&[reference]);
            prop_assert_eq!(&normalized[0], &wire_operation_key("GET", &segments));
        }

        /// Property: ordering twice with the same priority list changes
        /// nothing after the first pass.
        #[test]
        fn ordering_is_idempotent(
            requests in arb_requests(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
        ) {
            let priority: Vec<String> = picks
                .iter()
                .map(|pick| {
                    let (method, path) = pick.get(&requests);
                    canonical_path_ref(method, path)
                })
                .collect();

            let mut once = collection_with_folder(requests);
            order_collection_requests(&mut once, &priority);

            let mut twice = once.clone();
            order_collection_requests(&mut twice, &priority);
            prop_assert_eq!(once, twice);
        }

        /// Property: ordering permutes requests, it never drops, duplicates,
        /// or edits them.
        #[test]
        fn ordering_preserves_request_multiset(
            requests in arb_requests(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
        ) {
            let priority: Vec<String> = picks
                .iter()
                .map(|pick| {
                    let (method, path) = pick.get(&requests);
                    canonical_path_ref(method, path)
                })
                .collect();

            let before = collection_with_folder(requests);
            let mut ordered = before.clone();
            order_collection_requests(&mut ordered, &priority);

            let mut items_before: Vec<RequestItem> =
                before.requests().into_iter().cloned().collect();
            let mut items_after: Vec<RequestItem> =
                ordered.requests().into_iter().cloned().collect();
            items_before.sort_by(|a, b| a.name.cmp(&b.name));
            items_after.sort_by(|a, b| a.name.cmp(&b.name));
            prop_assert_eq!(items_before, items_after);
        }
    }
}

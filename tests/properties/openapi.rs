//! Property tests for OpenAPI parsing.

use std::path::Path;

use proptest::prelude::*;

use dockyard::domain::services::parse_openapi;

const METHODS: [&str; 5] = ["get", "post", "put", "delete", "patch"];

fn paths() -> impl Strategy<Value = Vec<(String, Vec<usize>)>> {
    let path = proptest::string::string_regex("/[a-z]{1,8}(/[a-z]{1,8})?").unwrap();
    let methods = proptest::collection::vec(0..METHODS.len(), 1..4);
    proptest::collection::btree_map(path, methods, 0..8)
        .prop_map(|paths| paths.into_iter().collect())
}

fn document(paths: &[(String, Vec<usize>)], reverse: bool) -> String {
    let mut entries: Vec<String> = paths
        .iter()
        .map(|(path, methods)| {
            let mut ops: Vec<String> = methods
                .iter()
                .map(|m| format!("\"{}\": {{}}", METHODS[*m]))
                .collect();
            if reverse {
                ops.reverse();
            }
            format!("\"{}\": {{{}}}", path, ops.join(", "))
        })
        .collect();
    if reverse {
        entries.reverse();
    }
    format!(
        "{{\"openapi\": \"3.1.0\", \"paths\": {{{}}}}}",
        entries.join(", ")
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: key order in the document never changes the result.
    #[test]
    fn property_parse_is_order_independent(paths in paths()) {
        let doc = Path::new("openapi/api.json");
        let a = parse_openapi(doc, &document(&paths, false)).unwrap();
        let b = parse_openapi(doc, &document(&paths, true)).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.routes.len(), paths.len());
        prop_assert!(a.routes.windows(2).all(|w| w[0].path < w[1].path));
    }

    /// PROPERTY: arbitrary input never panics.
    #[test]
    fn property_parse_never_panics(content in ".{0,256}") {
        let _ = parse_openapi(Path::new("api.json"), &content);
    }
}

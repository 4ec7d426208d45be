//! Property tests for image reference derivation.

use proptest::prelude::*;

use dockyard::domain::value_objects::{BuildTarget, ImageReference, ServiceIdentity, DEFAULT_TAG};

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: derivation is pure and ignores the service version.
    #[test]
    fn property_derive_is_pure(
        application in word(),
        service in word(),
        agent in word(),
        version in "[0-9]\\.[0-9]\\.[0-9]",
        tag in proptest::option::of(word()),
    ) {
        let identity = ServiceIdentity::new(&application, &service, &agent);
        let mut target = BuildTarget::new();
        target.tag = tag.clone();

        let first = ImageReference::derive(&identity, &target);
        let again = ImageReference::derive(&identity.clone().with_version(version), &target);

        prop_assert_eq!(&first, &again);
        prop_assert_eq!(&first.repository, &agent);
        prop_assert_eq!(first.tag, tag.unwrap_or_else(|| DEFAULT_TAG.to_string()));
    }
}

//! Property tests for dependency fingerprints.

use std::path::Path;

use proptest::prelude::*;

use dockyard::domain::entities::requirements;
use dockyard::infrastructure::LocalFs;

fn python_files() -> impl Strategy<Value = Vec<(String, String)>> {
    let name = proptest::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap();
    let body = proptest::string::string_regex("[ -~\n]{0,64}").unwrap();
    proptest::collection::btree_map(name, body, 0..6)
        .prop_map(|files| files.into_iter().collect())
}

fn write_tree(root: &Path, files: &[(String, String)], reverse: bool) {
    std::fs::create_dir_all(root.join("src")).unwrap();
    std::fs::write(root.join("service.yaml"), "name: api\n").unwrap();
    let mut ordered: Vec<_> = files.iter().collect();
    if reverse {
        ordered.reverse();
    }
    for (name, body) in ordered {
        std::fs::write(root.join("src").join(format!("{name}.py")), body).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: identical content gives an identical fingerprint, whatever
    /// order the files were created in.
    #[test]
    fn property_fingerprint_depends_only_on_content(files in python_files()) {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        write_tree(a.path(), &files, false);
        write_tree(b.path(), &files, true);

        let mut set_a = requirements("python-fastapi");
        set_a.localize(a.path());
        let mut set_b = requirements("python-fastapi");
        set_b.localize(b.path());

        let fs = LocalFs::new();
        prop_assert_eq!(set_a.fingerprint(&fs).unwrap(), set_b.fingerprint(&fs).unwrap());
    }

    /// PROPERTY: `all()` is stable and never touches the file system.
    #[test]
    fn property_all_is_stable(agent in "[a-z-]{1,16}") {
        let set = requirements(&agent);
        prop_assert_eq!(set.all(), set.all());
        prop_assert_eq!(set.name(), agent.as_str());
    }
}

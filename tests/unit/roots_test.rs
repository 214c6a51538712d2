//! Tests for the resource root registry

use specrun::roots::{ResourceRoots, RootLocation, RootsError};

use crate::common::TestTree;

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn add_directory_root() {
    let tree = TestTree::new();
    let mut roots = ResourceRoots::new();
    roots.add(tree.path()).unwrap();
    assert_eq!(roots.len(), 1);
}

#[test]
fn add_missing_root_fails() {
    let mut roots = ResourceRoots::new();
    let err = roots.add("/nonexistent/path/that/does/not/exist").unwrap_err();
    assert!(matches!(err, RootsError::RootNotFound(_)));
    assert!(roots.is_empty());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn locate_in_directory_root() {
    let tree = TestTree::new();
    tree.write_file("org/app/widget.js", "// widget");

    let roots = ResourceRoots::new().with(tree.path()).unwrap();
    let location = roots.locate("/org/app").unwrap().unwrap();
    assert_eq!(location, RootLocation::Directory(tree.path().join("org/app")));
}

#[test]
fn locate_in_archive_root() {
    let tree = TestTree::new();
    let archive = tree.write_archive("lib.jar", &[("org/app/widget.js", "// widget")]);

    let roots = ResourceRoots::new().with(&archive).unwrap();
    let location = roots.locate("/org/app").unwrap().unwrap();
    assert_eq!(
        location,
        RootLocation::Archive {
            archive,
            prefix: "org/app".to_string(),
        }
    );
}

#[test]
fn locate_misses_when_no_root_holds_the_resource() {
    let tree = TestTree::new();
    let roots = ResourceRoots::new().with(tree.path()).unwrap();
    assert!(roots.locate("/no/such/thing").unwrap().is_none());
}

#[test]
fn first_registered_root_wins() {
    let first = TestTree::new();
    let second = TestTree::new();
    first.write_file("pkg/a.js", "first");
    second.write_file("pkg/a.js", "second");

    let roots = ResourceRoots::new()
        .with(first.path())
        .unwrap()
        .with(second.path())
        .unwrap();

    let location = roots.locate("pkg/a.js").unwrap().unwrap();
    assert_eq!(location, RootLocation::Directory(first.path().join("pkg/a.js")));
}

// =============================================================================
// Archive Probe Tests
// =============================================================================

#[test]
fn probe_reports_archive_backing() {
    let tree = TestTree::new();
    tree.write_file("org/app/plain.js", "// plain");
    let archive = tree.write_archive("lib.jar", &[("org/packaged/Widget.class", "bytecode")]);

    let roots = ResourceRoots::new()
        .with(tree.path())
        .unwrap()
        .with(&archive)
        .unwrap();

    assert!(!roots.is_archive_resource("/org/app/plain.js").unwrap());
    assert!(roots.is_archive_resource("/org/packaged/Widget.class").unwrap());
}

#[test]
fn probe_fails_for_unknown_resource() {
    let tree = TestTree::new();
    let roots = ResourceRoots::new().with(tree.path()).unwrap();
    let err = roots.is_archive_resource("/org/missing").unwrap_err();
    assert!(matches!(err, RootsError::ResourceNotFound(_)));
}

#[test]
fn corrupt_archive_surfaces_read_error() {
    let tree = TestTree::new();
    let bogus = tree.write_file("broken.jar", "not actually a zip");

    let roots = ResourceRoots::new().with(&bogus).unwrap();
    let err = roots.locate("org/app").unwrap_err();
    assert!(matches!(err, RootsError::ArchiveRead { .. }));
}

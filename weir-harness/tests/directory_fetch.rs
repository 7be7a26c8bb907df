//! Driving a directory-retrieval fixture end to end over file-backed
//! fixtures.

mod common;

use common::FetchDirectory;
use weir_core::record::core_attributes;
use weir_core::relationship::Relationship;
use weir_harness::TestRunner;

fn fixture_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("random-1.bin"), b"payload-one").unwrap();
    std::fs::write(dir.path().join("random-2.bin"), b"payload-two").unwrap();
    std::fs::write(dir.path().join("random-3.bin"), b"payload-three").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"not random").unwrap();
    dir
}

#[test]
fn retrieves_only_files_matching_the_filter() {
    let dir = fixture_dir();
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(
        FetchDirectory::DIRECTORY,
        dir.path().to_str().unwrap(),
    );
    runner.set_property(FetchDirectory::FILE_FILTER_REGEX, "random.*");
    runner.run().unwrap();

    let fetched = runner.records_for(&Relationship::success());
    assert_eq!(fetched.len(), 3);
    for record in fetched {
        let filename = record.attribute(core_attributes::FILENAME).unwrap();
        assert!(filename.starts_with("random"));
        record.assert_attribute_exists(core_attributes::PATH).unwrap();
    }
}

#[test]
fn retrieved_content_matches_the_fixture_bytes() {
    let dir = fixture_dir();
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(
        FetchDirectory::DIRECTORY,
        dir.path().to_str().unwrap(),
    );
    runner.set_property(FetchDirectory::FILE_FILTER_REGEX, "random-1.*");
    runner.run().unwrap();

    let fetched = runner.records_for(&Relationship::success());
    assert_eq!(fetched.len(), 1);
    fetched[0]
        .assert_attribute_equals(core_attributes::FILENAME, "random-1.bin")
        .unwrap();
    fetched[0].assert_content_equals(b"payload-one").unwrap();
    assert!(fetched[0].assert_content_equals(b"payload-1").is_err());
}

#[test]
fn default_filter_retrieves_everything() {
    let dir = fixture_dir();
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(
        FetchDirectory::DIRECTORY,
        dir.path().to_str().unwrap(),
    );
    runner.run().unwrap();

    assert_eq!(runner.records_for(&Relationship::success()).len(), 4);
}

#[test]
fn unmatched_filter_retrieves_nothing() {
    let dir = fixture_dir();
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(
        FetchDirectory::DIRECTORY,
        dir.path().to_str().unwrap(),
    );
    runner.set_property(FetchDirectory::FILE_FILTER_REGEX, "archive-.*");
    runner.run().unwrap();

    assert!(runner.records_for(&Relationship::success()).is_empty());
}

#[test]
fn unreadable_directory_propagates_as_processor_failure() {
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(FetchDirectory::DIRECTORY, "/no/such/directory");

    let err = runner.run().unwrap_err();
    assert_eq!(err.code(), "E501");
}

#[test]
fn repeated_runs_accumulate_in_emission_order() {
    let dir = fixture_dir();
    let mut runner = TestRunner::new(FetchDirectory);
    runner.set_property(
        FetchDirectory::DIRECTORY,
        dir.path().to_str().unwrap(),
    );
    runner.set_property(FetchDirectory::FILE_FILTER_REGEX, "random.*");
    runner.run_iterations(2).unwrap();

    let fetched = runner.records_for(&Relationship::success());
    assert_eq!(fetched.len(), 6);
    // Each iteration emits in sorted filename order.
    let names: Vec<&str> = fetched
        .iter()
        .map(|r| r.attribute(core_attributes::FILENAME).unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "random-1.bin",
            "random-2.bin",
            "random-3.bin",
            "random-1.bin",
            "random-2.bin",
            "random-3.bin"
        ]
    );
}

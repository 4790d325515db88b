use scribed::domain::{Recording, StagingPath};

#[test]
fn given_two_recordings_when_deriving_paths_then_paths_differ() {
    let first = Recording::new("recording.webm".to_string(), 10);
    let second = Recording::new("recording.webm".to_string(), 10);

    let first_path = StagingPath::for_recording(&first);
    let second_path = StagingPath::for_recording(&second);

    assert_ne!(first_path, second_path);
}

#[test]
fn given_filename_with_extension_when_deriving_path_then_extension_is_kept() {
    let recording = Recording::new("clip.ogg".to_string(), 10);

    let path = StagingPath::for_recording(&recording);

    assert!(path.as_str().ends_with(".ogg"));
    assert!(path.as_str().starts_with("recording-"));
}

#[test]
fn given_filename_without_extension_when_deriving_path_then_defaults_to_webm() {
    let recording = Recording::new("clip".to_string(), 10);

    let path = StagingPath::for_recording(&recording);

    assert!(path.as_str().ends_with(".webm"));
}

#[test]
fn given_filename_with_unsafe_extension_when_deriving_path_then_defaults_to_webm() {
    let oversized = Recording::new("clip.notarealextension".to_string(), 10);
    let non_ascii = Recording::new("clip.wäv".to_string(), 10);

    assert!(StagingPath::for_recording(&oversized)
        .as_str()
        .ends_with(".webm"));
    assert!(StagingPath::for_recording(&non_ascii)
        .as_str()
        .ends_with(".webm"));
}

//! Unit tests for signing key loading.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

fn path_str(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn vars(key_path: Option<String>, allow_ephemeral: Option<&str>) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    if let Some(path) = key_path {
        vars.insert(KEY_FILE_ENV, path);
    }
    if let Some(flag) = allow_ephemeral {
        vars.insert(ALLOW_EPHEMERAL_ENV, flag.to_owned());
    }
    vars
}

fn missing_path() -> String {
    std::env::temp_dir()
        .join("identity-token-key-that-does-not-exist")
        .to_string_lossy()
        .into_owned()
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn loads_a_key_file_in_both_modes(#[case] mode: BuildMode) {
    let file = key_file(KEY_MIN_LEN);
    let env = mock_env(vars(Some(path_str(&file)), Some("0")));

    let key = signing_key_from_env(&env, mode).expect("key loads");

    assert_eq!(key.as_bytes(), vec![b'k'; KEY_MIN_LEN].as_slice());
    assert!(!key.is_ephemeral());
}

#[rstest]
fn release_rejects_short_keys() {
    let file = key_file(KEY_MIN_LEN - 1);
    let env = mock_env(vars(Some(path_str(&file)), Some("0")));

    let err = signing_key_from_env(&env, BuildMode::Release).expect_err("short key");

    assert!(matches!(
        err,
        SigningKeyConfigError::KeyTooShort {
            length,
            min_len: KEY_MIN_LEN,
            ..
        } if length == KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_accepts_short_but_not_empty_keys() {
    let short = key_file(8);
    let env = mock_env(vars(Some(path_str(&short)), None));
    let key = signing_key_from_env(&env, BuildMode::Debug).expect("short key loads");
    assert_eq!(key.as_bytes().len(), 8);

    let empty = key_file(0);
    let env = mock_env(vars(Some(path_str(&empty)), None));
    let err = signing_key_from_env(&env, BuildMode::Debug).expect_err("empty key");
    assert!(matches!(
        err,
        SigningKeyConfigError::KeyTooShort { length: 0, .. }
    ));
}

#[rstest]
fn debug_falls_back_to_an_ephemeral_key() {
    let env = mock_env(vars(Some(missing_path()), None));

    let key = signing_key_from_env(&env, BuildMode::Debug).expect("ephemeral key");

    assert!(key.is_ephemeral());
    assert_eq!(key.as_bytes().len(), EPHEMERAL_KEY_LEN);
}

#[rstest]
fn ephemeral_keys_differ_per_load() {
    let env = mock_env(vars(Some(missing_path()), None));
    let first = signing_key_from_env(&env, BuildMode::Debug).expect("ephemeral key");
    let second = signing_key_from_env(&env, BuildMode::Debug).expect("ephemeral key");
    assert_ne!(first.fingerprint(), second.fingerprint());
}

#[rstest]
fn release_requires_a_readable_key() {
    let env = mock_env(vars(Some(missing_path()), Some("0")));

    let err = signing_key_from_env(&env, BuildMode::Release).expect_err("missing key");

    assert!(matches!(err, SigningKeyConfigError::KeyRead { .. }));
}

#[rstest]
#[case("1")]
#[case("true")]
#[case("YES")]
fn release_rejects_ephemeral_opt_in(#[case] flag: &str) {
    let file = key_file(KEY_MIN_LEN);
    let env = mock_env(vars(Some(path_str(&file)), Some(flag)));

    let err = signing_key_from_env(&env, BuildMode::Release).expect_err("ephemeral in release");

    assert!(matches!(err, SigningKeyConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_requires_the_ephemeral_toggle() {
    let file = key_file(KEY_MIN_LEN);
    let env = mock_env(vars(Some(path_str(&file)), None));

    let err = signing_key_from_env(&env, BuildMode::Release).expect_err("toggle missing");

    assert!(matches!(
        err,
        SigningKeyConfigError::MissingEnv {
            name: ALLOW_EPHEMERAL_ENV
        }
    ));
}

#[rstest]
#[case(BuildMode::Debug, true)]
#[case(BuildMode::Release, false)]
fn invalid_toggle_values_follow_build_mode(#[case] mode: BuildMode, #[case] loads: bool) {
    let file = key_file(KEY_MIN_LEN);
    let env = mock_env(vars(Some(path_str(&file)), Some("maybe")));

    let result = signing_key_from_env(&env, mode);

    if loads {
        assert!(result.is_ok());
    } else {
        assert!(matches!(
            result,
            Err(SigningKeyConfigError::InvalidEnv { ref value, .. }) if value == "maybe"
        ));
    }
}

#[rstest]
fn debug_output_shows_only_the_fingerprint() {
    let key = SigningKey::new(vec![b's'; KEY_MIN_LEN]);
    let rendered = format!("{key:?}");

    assert!(rendered.contains(&key.fingerprint()));
    assert!(!rendered.contains("sss"));
}

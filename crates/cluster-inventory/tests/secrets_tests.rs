//! Tests for reading the `.env` secret file from disk

use cluster_inventory::{Error, SecretMaterial, hash_env_lines, hash_password};
use cluster_test_utils::cluster::{TestCluster, fixture_dir};
use rstest::rstest;

fn load(cluster: &TestCluster) -> cluster_inventory::Result<SecretMaterial> {
    SecretMaterial::load(&cluster.layout().secrets_file())
}

#[test]
fn missing_file_means_no_secrets() {
    let cluster = TestCluster::new();
    assert_eq!(load(&cluster).unwrap(), SecretMaterial::default());
}

#[test]
fn known_keys_are_read() {
    let cluster = TestCluster::new();
    cluster.write_env(
        "# cluster secrets\n\
         CONTROLLER_BECOME_PASSWORD=\"become me\"\n\
         PXE_ROOT_PASSWORD_HASH='$6$abc$def'\n\
         UNRELATED=1\n",
    );

    let secrets = load(&cluster).unwrap();
    assert_eq!(secrets.controller_become_password.as_deref(), Some("become me"));
    assert_eq!(secrets.root_password_hash.as_deref(), Some("$6$abc$def"));
    assert_eq!(secrets.local_user_password_hash, None);
}

#[rstest]
#[case::unquoted("PXE_ROOT_PASSWORD_HASH=$6$rounds=656000$salt$hash\n")]
#[case::double_quoted("PXE_ROOT_PASSWORD_HASH=\"$6$rounds=656000$salt$hash\"\n")]
#[case::single_quoted("PXE_ROOT_PASSWORD_HASH='$6$rounds=656000$salt$hash'\n")]
fn crypt_hash_is_read_literally(#[case] line: &str) {
    let cluster = TestCluster::new();
    cluster.write_env(line);

    let secrets = load(&cluster).unwrap();
    assert_eq!(
        secrets.root_password_hash.as_deref(),
        Some("$6$rounds=656000$salt$hash")
    );
}

#[test]
fn sample_env_file_loads() {
    let cluster = TestCluster::new();
    let sample = std::fs::read_to_string(fixture_dir().join("env.example")).unwrap();
    cluster.write_env(&sample);

    let secrets = load(&cluster).unwrap();
    assert_eq!(secrets.controller_become_password.as_deref(), Some("changeme"));
    assert_eq!(
        secrets.root_password_hash.as_deref(),
        Some("$6$rounds=656000$examplesalt$examplehash")
    );
    assert_eq!(
        secrets.local_user_password_hash.as_deref(),
        Some("$6$rounds=656000$localsalt$localhash")
    );
}

#[test]
fn loading_does_not_touch_the_environment() {
    let cluster = TestCluster::new();
    cluster.write_env("PXE_LOCAL_USER_PASSWORD_HASH=only-in-file\n");

    let secrets = load(&cluster).unwrap();
    assert_eq!(secrets.local_user_password_hash.as_deref(), Some("only-in-file"));
    assert!(std::env::var("PXE_LOCAL_USER_PASSWORD_HASH").is_err());
}

#[test]
fn malformed_line_is_an_error() {
    let cluster = TestCluster::new();
    cluster.write_env("CONTROLLER_BECOME_PASSWORD='unterminated\n");

    assert!(matches!(load(&cluster), Err(Error::SecretParse { .. })));
}

#[rstest]
#[case("p@ss word")]
#[case("ünïcødé")]
fn generated_lines_load_back_verbatim(#[case] password: &str) {
    let hash = hash_password(password, 5_000).unwrap();
    let cluster = TestCluster::new();
    cluster.write_env(&format!("{}\n", hash_env_lines(&hash).join("\n")));

    let secrets = load(&cluster).unwrap();
    assert_eq!(secrets.root_password_hash.as_deref(), Some(hash.as_str()));
    assert_eq!(secrets.local_user_password_hash.as_deref(), Some(hash.as_str()));
}

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_config(dir: &Path, org_id: &str, api_host: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    let contents = format!(
        "email: ops@example.com\napi_token: test-token\norg_id: {org_id}\ncloud_id: cloud-1\napi_host: {api_host}\npreferences:\n  member_page_size: 2\n"
    );
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn opsteam() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("opsteam"));
    cmd.env_remove("OPSTEAM_CONFIG")
        .env_remove("OPSTEAM_ORG_ID")
        .env_remove("OPSTEAM_CLOUD_ID")
        .env_remove("OPSTEAM_API_HOST")
        .env_remove("OPSTEAM_FORMAT")
        .env_remove("OPSTEAM_EMAIL")
        .env_remove("OPSTEAM_API_TOKEN");
    cmd
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-status", "http://127.0.0.1:9");

    let assert = opsteam()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Organization: org-status"));
    assert!(stdout.contains("Cloud ID: cloud-1"));
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));

    Ok(())
}

#[test]
fn status_applies_org_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-file", "http://127.0.0.1:9");

    opsteam()
        .args(["status", "--org", "org-flag", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Organization: org-flag"));

    Ok(())
}

#[test]
fn missing_config_shows_helpful_error() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let nonexistent_config = temp.path().join("does-not-exist.yaml");

    opsteam()
        .args(["team", "get", "t-1", "--config"])
        .arg(&nonexistent_config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));

    Ok(())
}

#[test]
fn malformed_import_id_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", "http://127.0.0.1:9");

    opsteam()
        .args(["team", "import", "only-an-id", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("id,organization_id"));

    Ok(())
}

#[test]
fn init_writes_private_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("fresh").join("config.yaml");

    opsteam()
        .args([
            "init", "--email", "ops@example.com", "--api-token", "secret", "--org", "org-9",
            "--cloud-id", "cloud-9", "--config",
        ])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved to"));

    let contents = fs::read_to_string(&config_path)?;
    assert!(contents.contains("org_id: org-9"));
    assert!(contents.contains("cloud_id: cloud-9"));
    assert!(contents.contains("api_token: secret"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&config_path)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    opsteam()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Organization: org-9"));

    Ok(())
}

#[test]
fn init_keeps_existing_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-old", "http://127.0.0.1:9");

    opsteam()
        .args(["init", "--org", "org-new", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let contents = fs::read_to_string(&config_path)?;
    assert!(contents.contains("org_id: org-new"));
    assert!(contents.contains("email: ops@example.com"));
    assert!(contents.contains("cloud_id: cloud-1"));
    assert!(contents.contains("member_page_size: 2"));

    Ok(())
}

#[test]
fn completion_generates_script() {
    opsteam()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opsteam"));
}

/// Test that network connection errors show helpful message.
#[test]
fn connection_error_shows_network_message() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", "http://127.0.0.1:59999");

    let assert = opsteam()
        .args(["team", "get", "t-1", "--config"])
        .arg(&config_path)
        .assert()
        .failure();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(
        stderr.to_lowercase().contains("network")
            || stderr.to_lowercase().contains("connect"),
        "Expected error to mention network/connection issue, got: {}",
        stderr
    );

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn team_get_prints_members_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _team = server
        .mock("GET", "/public/teams/v1/org/org-1/teams/t-1")
        .match_header("authorization", mockito::Matcher::Regex("^Basic ".to_string()))
        .with_status(200)
        .with_body(
            r#"{"teamId":"t-1","displayName":"SRE","description":"","organizationId":"org-1","teamType":"OPEN"}"#,
        )
        .create();
    let _members = server
        .mock("POST", "/public/teams/v1/org/org-1/teams/t-1/members")
        .match_body(mockito::Matcher::PartialJsonString(r#"{"first":2}"#.to_string()))
        .with_status(200)
        .with_body(r#"{"results":[{"accountId":"acc-1"}],"pageInfo":{"hasNextPage":false}}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", &server.url());

    let assert = opsteam()
        .args(["team", "get", "t-1", "--format", "json", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["team"]["id"], "t-1");
    assert_eq!(value["data"]["members"][0]["accountId"], "acc-1");

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn team_get_missing_team_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let _team = server
        .mock("GET", "/public/teams/v1/org/org-1/teams/gone")
        .with_status(404)
        .with_body(r#"{"message":"not found"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", &server.url());

    opsteam()
        .args(["team", "get", "gone", "--config"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Resource not found: team gone"));

    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn team_delete_with_yes_skips_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let delete = server
        .mock("DELETE", "/public/teams/v1/org/org-1/teams/t-1")
        .with_status(204)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", &server.url());

    opsteam()
        .args(["team", "delete", "t-1", "--yes", "--format", "json", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": true"));

    delete.assert();
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn service_create_rejects_bad_tier_before_calling_api() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();

    let create = server
        .mock("POST", "/jsm/ops/api/cloud-1/v1/services")
        .expect(0)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "org-1", &server.url());

    opsteam()
        .args([
            "service", "create", "--name", "Payments", "--description", "Cards", "--tier", "9",
            "--config",
        ])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tier"));

    create.assert();
    Ok(())
}

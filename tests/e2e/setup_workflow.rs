//! E2E Scenario: `skill-deps setup`
//!
//! - Fresh repository gets .gitignore, .env and ~/.npmrc configured
//! - Re-running with a new token replaces the old one
//! - Existing .gitignore entries are not duplicated
//! - Missing credentials fail with `no_token`, unless ~/.npmrc is already set up

use super::fixture::E2EFixture;

const TOKEN_PREFIX: &str = "//npm.pkg.github.com/:_authToken=";
const REGISTRY_LINE: &str = "@varasto:registry=https://npm.pkg.github.com";

#[test]
fn test_setup_fresh_repository() {
    let mut fixture = E2EFixture::new("setup_fresh");
    fixture.set_env("FAKE_GH_TOKEN", "ghp_fresh");

    fixture.log_step("Run setup");
    let (output, json) = fixture.run_json(&["setup"]);
    fixture.assert_success(&output, "setup");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["env_updated"], true);
    assert_eq!(json["data"]["auth_refreshed"], true);
    assert_eq!(json["data"]["gitignore_added"].as_array().unwrap().len(), 3);

    fixture.log_step("Verify files");
    let gitignore = fixture.read(".gitignore");
    assert!(gitignore.lines().any(|line| line == ".npmrc"));
    assert!(gitignore.lines().any(|line| line == ".env"));
    assert!(fixture.read(".env").contains("SKILL_UPDATE_CHECK_DAYS=7"));

    let npmrc = std::fs::read_to_string(&fixture.npmrc).unwrap();
    assert_eq!(npmrc, format!("{REGISTRY_LINE}\n{TOKEN_PREFIX}ghp_fresh\n"));
}

#[test]
fn test_setup_rotates_token() {
    let mut fixture = E2EFixture::new("setup_rotate");
    std::fs::create_dir_all(fixture.npmrc.parent().unwrap()).unwrap();
    std::fs::write(
        &fixture.npmrc,
        format!("save-exact=true\n{TOKEN_PREFIX}abc\n{TOKEN_PREFIX}abc\n"),
    )
    .unwrap();

    fixture.log_step("Setup with gh token xyz");
    fixture.set_env("FAKE_GH_TOKEN", "xyz");
    let output = fixture.run(&["-q", "setup"]);
    fixture.assert_success(&output, "setup");

    let npmrc = std::fs::read_to_string(&fixture.npmrc).unwrap();
    let tokens: Vec<&str> = npmrc
        .lines()
        .filter(|line| line.starts_with(TOKEN_PREFIX))
        .collect();
    assert_eq!(tokens, vec![format!("{TOKEN_PREFIX}xyz").as_str()]);
    assert!(npmrc.starts_with("save-exact=true\n"));
    assert_eq!(npmrc.matches(REGISTRY_LINE).count(), 1);
}

#[test]
fn test_setup_prefers_github_token_env() {
    let mut fixture = E2EFixture::new("setup_env_token");
    fixture.set_env("FAKE_GH_TOKEN", "from_gh");
    fixture.set_env("GITHUB_TOKEN", "from_env");

    let output = fixture.run(&["-q", "setup", "--auth-only"]);
    fixture.assert_success(&output, "setup");

    let npmrc = std::fs::read_to_string(&fixture.npmrc).unwrap();
    assert!(npmrc.contains("_authToken=from_env"));
    assert!(!npmrc.contains("from_gh"));
    assert!(!fixture.root.join(".gitignore").exists());
}

#[test]
fn test_setup_keeps_existing_gitignore_entries() {
    let mut fixture = E2EFixture::new("setup_gitignore");
    std::fs::write(fixture.root.join(".gitignore"), "target\n.npmrc\n").unwrap();
    fixture.set_env("FAKE_GH_TOKEN", "ghp_x");

    let output = fixture.run(&["-q", "setup"]);
    fixture.assert_success(&output, "setup");
    let output = fixture.run(&["-q", "setup"]);
    fixture.assert_success(&output, "setup again");

    let gitignore = fixture.read(".gitignore");
    assert!(gitignore.starts_with("target\n.npmrc\n"));
    assert_eq!(gitignore.lines().filter(|line| *line == ".npmrc").count(), 1);
    assert_eq!(gitignore.lines().filter(|line| *line == ".env").count(), 1);
    assert_eq!(fixture.read(".env").matches("SKILL_UPDATE_CHECK_DAYS").count(), 1);
}

#[test]
fn test_setup_without_token_fails() {
    let mut fixture = E2EFixture::new("setup_no_token");

    fixture.log_step("Run setup with no token source");
    let (output, json) = fixture.run_json(&["setup"]);
    assert!(!output.status.success());
    assert_eq!(json["code"], "no_token");
    assert!(!fixture.npmrc.exists());

    // Repo files are handled before auth.
    assert!(fixture.root.join(".gitignore").exists());
}

#[test]
fn test_setup_without_token_keeps_configured_npmrc() {
    let mut fixture = E2EFixture::new("setup_already_configured");
    let existing = format!("{REGISTRY_LINE}\n{TOKEN_PREFIX}ghp_existing\n");
    std::fs::create_dir_all(fixture.npmrc.parent().unwrap()).unwrap();
    std::fs::write(&fixture.npmrc, &existing).unwrap();

    fixture.log_step("Run setup with no token source");
    let (output, json) = fixture.run_json(&["setup"]);
    fixture.assert_success(&output, "setup");
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["auth_refreshed"], false);
    assert_eq!(std::fs::read_to_string(&fixture.npmrc).unwrap(), existing);

    fixture.log_step("Human output reports existing auth");
    let output = fixture.run(&["-q", "setup", "--auth-only"]);
    fixture.assert_success(&output, "setup --auth-only");
    assert!(String::from_utf8_lossy(&output.stdout).contains("npm auth already configured"));
}

#[test]
fn test_setup_without_token_and_registry_only_fails() {
    let fixture = E2EFixture::new("setup_registry_only");
    std::fs::create_dir_all(fixture.npmrc.parent().unwrap()).unwrap();
    std::fs::write(&fixture.npmrc, format!("{REGISTRY_LINE}\n")).unwrap();

    let (output, json) = fixture.run_json(&["setup", "--auth-only"]);
    assert!(!output.status.success());
    assert_eq!(json["code"], "no_token");
}

//! E2E Scenario: `skill-deps install-all` / `update-all`
//!
//! - Every skill with a manifest is processed in directory order
//! - One failing skill does not stop the rest, but fails the run
//! - Robot mode reports partial success as a single JSON document

use super::fixture::E2EFixture;

#[test]
fn test_install_all_processes_every_skill() {
    let mut fixture = E2EFixture::new("install_all");
    let alpha = fixture.create_skill("alpha");
    let beta = fixture.create_skill("beta");

    fixture.log_step("install-all");
    let (output, json) = fixture.run_json(&["install-all"]);
    fixture.assert_success(&output, "install-all");
    assert_eq!(json["status"], "ok");
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["ok"] == true));

    let calls = fixture.npm_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("skills/alpha"));
    assert!(calls[1].contains("skills/beta"));
    assert!(fixture.read_marker(&alpha).is_some());
    assert!(fixture.read_marker(&beta).is_some());
}

#[test]
fn test_install_all_continues_past_failure() {
    let mut fixture = E2EFixture::new("install_all_partial");
    let alpha = fixture.create_skill("alpha");
    let _ = fixture.create_skill("beta");
    let gamma = fixture.create_skill("gamma");
    fixture.set_env("FAKE_NPM_FAIL_MATCH", "skills/beta");

    fixture.log_step("install-all with beta failing");
    let (output, json) = fixture.run_json(&["install-all"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["status"]["partial"]["completed"], 2);
    assert_eq!(json["status"]["partial"]["failed"], 1);

    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items[1]["ok"], false);
    assert!(items[1]["error"].as_str().unwrap().contains("ENOENT"));

    assert_eq!(fixture.npm_calls().len(), 3);
    assert!(fixture.read_marker(&alpha).is_some());
    assert!(fixture.read_marker(&gamma).is_some());
}

#[test]
fn test_install_all_human_summary() {
    let mut fixture = E2EFixture::new("install_all_human");
    let _ = fixture.create_skill("alpha");
    let _ = fixture.create_skill("beta");
    fixture.set_env("FAKE_NPM_FAIL_MATCH", "skills/beta");

    let output = fixture.run(&["-q", "install-all"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1/2 skills succeeded"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 2 skill(s) failed"));
}

#[test]
fn test_update_all_runs_update() {
    let fixture = E2EFixture::new("update_all");
    let _ = fixture.create_skill("alpha");
    let _ = fixture.create_skill("beta");

    let output = fixture.run(&["-q", "update-all"]);
    fixture.assert_success(&output, "update-all");
    let calls = fixture.npm_calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|call| call.starts_with("update ")));
}

#[test]
fn test_install_all_finds_top_level_manifest() {
    let fixture = E2EFixture::new("install_all_top_level");
    let skill_dir = fixture.root.join("skills/flat");
    std::fs::create_dir_all(&skill_dir).unwrap();
    std::fs::write(skill_dir.join("package.json"), r#"{"name":"flat"}"#).unwrap();
    std::fs::create_dir_all(fixture.root.join("skills/no-deps")).unwrap();

    let (output, json) = fixture.run_json(&["install-all"]);
    fixture.assert_success(&output, "install-all");
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0]["skill"].as_str().unwrap().contains("flat"));
}

#[test]
fn test_install_all_without_skills() {
    let fixture = E2EFixture::new("install_all_empty");

    let (output, json) = fixture.run_json(&["install-all"]);
    fixture.assert_success(&output, "install-all");
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
    assert!(fixture.npm_calls().is_empty());
}

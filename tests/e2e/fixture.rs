//! E2E fixture: a temp repository plus fake `npm` and `gh` binaries.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Instant;

use assert_cmd::Command;
use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::TempDir;

/// Logs every call, optionally fails, otherwise creates `node_modules`.
///
/// - `FAKE_NPM_FAIL_ONCE=<file>`: fail with E401 until `<file>` exists.
/// - `FAKE_NPM_FAIL_MATCH=<text>`: fail with ENOENT when the working directory contains it.
const FAKE_NPM: &str = r#"#!/bin/sh
dir=$(pwd -P)
echo "$1 $dir" >> "$FAKE_NPM_LOG"
if [ -n "$FAKE_NPM_FAIL_ONCE" ] && [ ! -f "$FAKE_NPM_FAIL_ONCE" ]; then
  touch "$FAKE_NPM_FAIL_ONCE"
  echo "npm ERR! code E401" >&2
  echo "npm ERR! 401 Unauthorized - GET https://npm.pkg.github.com/@varasto%2fui" >&2
  exit 1
fi
if [ -n "$FAKE_NPM_FAIL_MATCH" ]; then
  case "$dir" in
    *"$FAKE_NPM_FAIL_MATCH"*)
      echo "npm ERR! code ENOENT" >&2
      exit 1
      ;;
  esac
fi
mkdir -p node_modules
echo "fake npm $1 ok"
"#;

/// Prints `$FAKE_GH_TOKEN`, or fails when it is unset.
const FAKE_GH: &str = r#"#!/bin/sh
if [ -z "$FAKE_GH_TOKEN" ]; then
  echo "not logged in" >&2
  exit 1
fi
echo "$FAKE_GH_TOKEN"
"#;

pub struct E2EFixture {
    pub scenario: String,
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub bin_dir: PathBuf,
    pub npmrc: PathBuf,
    pub npm_log: PathBuf,
    env: Vec<(String, String)>,
    start: Instant,
    step: usize,
}

impl E2EFixture {
    pub fn new(scenario: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("repo");
        let bin_dir = temp_dir.path().join("bin");
        std::fs::create_dir_all(root.join(".git")).expect("Failed to create repo");
        std::fs::create_dir_all(&bin_dir).expect("Failed to create bin dir");

        let fixture = Self {
            scenario: scenario.to_string(),
            npmrc: temp_dir.path().join("home/.npmrc"),
            npm_log: temp_dir.path().join("npm.log"),
            root,
            bin_dir,
            temp_dir,
            env: Vec::new(),
            start: Instant::now(),
            step: 0,
        };
        fixture.write_script("npm", FAKE_NPM);
        fixture.write_script("gh", FAKE_GH);
        println!("[E2E] {scenario}: {}", fixture.root.display());
        fixture
    }

    fn write_script(&self, name: &str, body: &str) {
        let path = self.bin_dir.join(name);
        std::fs::write(&path, body).expect("Failed to write script");
        let mut perms = std::fs::metadata(&path).expect("stat script").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod script");
    }

    pub fn log_step(&mut self, description: &str) {
        self.step += 1;
        println!(
            "[E2E] {} step {} (+{}ms): {description}",
            self.scenario,
            self.step,
            self.start.elapsed().as_millis()
        );
    }

    /// Extra environment for every following run.
    pub fn set_env(&mut self, key: &str, value: impl AsRef<Path>) {
        self.env
            .push((key.to_string(), value.as_ref().display().to_string()));
    }

    /// `skills/<name>/scripts/package.json`; returns the manifest path.
    pub fn create_skill(&self, name: &str) -> PathBuf {
        let scripts = self.root.join("skills").join(name).join("scripts");
        std::fs::create_dir_all(&scripts).expect("Failed to create skill dir");
        let manifest = scripts.join("package.json");
        let body = serde_json::json!({
            "name": name,
            "version": "1.0.0",
            "dependencies": { "@varasto/ui": "^1.0.0" },
        });
        std::fs::write(&manifest, body.to_string()).expect("Failed to write manifest");
        manifest
    }

    pub fn write_marker(&self, manifest: &Path, written_at: DateTime<Utc>) {
        let node_modules = manifest.parent().unwrap().join("node_modules");
        std::fs::create_dir_all(&node_modules).expect("Failed to create node_modules");
        std::fs::write(
            node_modules.join(".skill-update-check"),
            written_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
        .expect("Failed to write marker");
    }

    pub fn read_marker(&self, manifest: &Path) -> Option<String> {
        let path = manifest
            .parent()
            .unwrap()
            .join("node_modules/.skill-update-check");
        std::fs::read_to_string(path).ok()
    }

    pub fn npm_calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.npm_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::cargo_bin("skill-deps").expect("binary built");
        cmd.current_dir(&self.root)
            .env_remove("GITHUB_TOKEN")
            .env_remove("GH_TOKEN")
            .env_remove("SKILL_UPDATE_CHECK_DAYS")
            .env_remove("RUST_LOG")
            .env("SKILL_DEPS_CONFIG", self.temp_dir.path().join("absent.toml"))
            .env("SKILL_DEPS_NPM_BIN", self.bin_dir.join("npm"))
            .env("SKILL_DEPS_GH_BIN", self.bin_dir.join("gh"))
            .env("SKILL_DEPS_NPMRC", &self.npmrc)
            .env("FAKE_NPM_LOG", &self.npm_log)
            .args(args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to run skill-deps");
        println!(
            "[E2E] skill-deps {} -> {}\n[stdout]\n{}\n[stderr]\n{}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }

    pub fn run_json(&self, args: &[&str]) -> (Output, serde_json::Value) {
        let mut full = vec!["--robot", "-q"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        let json = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        (output, json)
    }

    pub fn assert_success(&self, output: &Output, context: &str) {
        assert!(
            output.status.success(),
            "{context} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root.join(relative)).unwrap_or_default()
    }
}

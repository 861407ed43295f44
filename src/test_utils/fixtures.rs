use std::path::PathBuf;

use tempfile::TempDir;

/// Isolated repository-shaped directory for tests.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Same as [`UnitTestFixture::new`] with a `.git` directory at the root.
    #[must_use]
    pub fn repo() -> Self {
        let fixture = Self::new();
        std::fs::create_dir(fixture.data_path.join(".git")).expect("Failed to create .git");
        fixture
    }

    /// Create a test file with content.
    ///
    /// # Panics
    ///
    /// Panics if the file or its parents cannot be written.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create `skills/<name>/scripts/package.json` declaring `deps`.
    #[must_use]
    pub fn create_skill(&self, name: &str, deps: &[(&str, &str)]) -> PathBuf {
        let deps = deps
            .iter()
            .map(|(dep, range)| ((*dep).to_string(), serde_json::Value::from(*range)))
            .collect::<serde_json::Map<_, _>>();
        let manifest = serde_json::json!({
            "name": name,
            "version": "1.0.0",
            "dependencies": deps,
        });
        self.create_file(
            &format!("skills/{name}/scripts/package.json"),
            &manifest.to_string(),
        )
    }
}

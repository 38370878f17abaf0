use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

/// `[project]` section of project.toml.
#[derive(Debug, Clone, Deserialize)]
struct ProjectSection {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    main_scene: String,
}

/// One `[[scenes]]` entry: the project's build scene list, in listed order.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneEntry {
    pub path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct ProjectSettings {
    project: ProjectSection,
    #[serde(default)]
    scenes: Vec<SceneEntry>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Project handle for a loose on-disk project tree (`project.toml` + `res/`).
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    settings: ProjectSettings,
}

impl Project {
    /// Load `project.toml` from the project root.
    pub fn load(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        let manifest_path = root.join("project.toml");
        let contents = std::fs::read_to_string(&manifest_path).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!(
                    "Failed to read project.toml at {}: {}",
                    manifest_path.display(),
                    e
                ),
            )
        })?;
        Self::parse(root, &contents)
    }

    fn parse(root: &Path, contents: &str) -> io::Result<Self> {
        let settings: ProjectSettings =
            toml::from_str(contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    // ======================================================
    // ===================== Getters =========================
    // ======================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.settings.project.name
    }

    #[inline]
    pub fn version(&self) -> &str {
        &self.settings.project.version
    }

    #[inline]
    pub fn main_scene(&self) -> &str {
        &self.settings.project.main_scene
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All `[[scenes]]` entries, enabled or not, in listed order.
    #[inline]
    pub fn scenes(&self) -> &[SceneEntry] {
        &self.settings.scenes
    }

    /// Enabled scene paths in listed order.
    pub fn enabled_scenes(&self) -> impl Iterator<Item = &str> {
        self.settings
            .scenes
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [project]
        name = "Demo"
        version = "0.3.1"
        main_scene = "res://scenes/main.scn"

        [[scenes]]
        path = "res://scenes/main.scn"

        [[scenes]]
        path = "res://scenes/level_1.scn"
        enabled = true

        [[scenes]]
        path = "res://scenes/broken_wip.scn"
        enabled = false
    "#;

    #[test]
    fn parse_manifest_sections() {
        let project = Project::parse(Path::new("/tmp/demo"), MANIFEST).unwrap();

        assert_eq!(project.name(), "Demo");
        assert_eq!(project.version(), "0.3.1");
        assert_eq!(project.main_scene(), "res://scenes/main.scn");
        assert_eq!(project.scenes().len(), 3);
    }

    #[test]
    fn enabled_scenes_keep_listed_order_and_skip_disabled() {
        let project = Project::parse(Path::new("/tmp/demo"), MANIFEST).unwrap();

        let enabled: Vec<&str> = project.enabled_scenes().collect();
        assert_eq!(
            enabled,
            vec!["res://scenes/main.scn", "res://scenes/level_1.scn"]
        );
    }

    #[test]
    fn version_and_scene_list_are_optional() {
        let project = Project::parse(
            Path::new("/tmp/demo"),
            r#"
                [project]
                name = "Bare"
                main_scene = "res://main.scn"
            "#,
        )
        .unwrap();

        assert_eq!(project.version(), "0.1.0");
        assert!(project.scenes().is_empty());
        assert_eq!(project.enabled_scenes().count(), 0);
    }
}

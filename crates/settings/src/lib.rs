use directories::ProjectDirs;
use label_document::ObjectClass;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, warn};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "boxlabel";
const APPLICATION: &str = "boxlabel";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no platform config directory available for boxlabel")]
    MissingProjectDirs,
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub camera: CameraSettings,
    pub editor: EditorSettings,
    pub export: ExportSettings,
}

impl UserSettings {
    /// Replace values that would break the camera or history with usable ones.
    pub fn sanitized(self) -> Self {
        Self {
            camera: self.camera.sanitized(),
            editor: self.editor.sanitized(),
            export: self.export,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub orbit_button: MouseButtonSetting,
    pub orbit_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub invert_zoom: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// View the session starts in.
    pub initial_view: CameraView,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            orbit_button: MouseButtonSetting::Right,
            orbit_sensitivity: 0.4,
            zoom_sensitivity: 1.0,
            invert_zoom: false,
            min_distance: 2.0,
            max_distance: 200.0,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            initial_view: CameraView::Perspective,
        }
    }
}

impl CameraSettings {
    /// Orders the zoom bounds and keeps projection values positive and finite.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut min_distance = positive_or(self.min_distance, defaults.min_distance);
        let mut max_distance = positive_or(self.max_distance, defaults.max_distance);
        if min_distance > max_distance {
            std::mem::swap(&mut min_distance, &mut max_distance);
        }
        let fov_degrees = if self.fov_degrees.is_finite()
            && self.fov_degrees > 0.0
            && self.fov_degrees < 180.0
        {
            self.fov_degrees
        } else {
            defaults.fov_degrees
        };
        let near = positive_or(self.near, defaults.near);
        let far = positive_or(self.far, defaults.far);
        let far = if far > near { far } else { defaults.far.max(near * 2.0) };
        Self {
            orbit_sensitivity: finite_or(self.orbit_sensitivity, defaults.orbit_sensitivity),
            zoom_sensitivity: finite_or(self.zoom_sensitivity, defaults.zoom_sensitivity),
            min_distance,
            max_distance,
            fov_degrees,
            near,
            far,
            ..self
        }
    }
}

/// Named camera framings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CameraView {
    #[default]
    Perspective,
    Top,
    Side,
}

impl CameraView {
    pub const ALL: [CameraView; 3] = [CameraView::Perspective, CameraView::Top, CameraView::Side];

    pub const fn label(self) -> &'static str {
        match self {
            CameraView::Perspective => "3D View",
            CameraView::Top => "Top View",
            CameraView::Side => "Side View",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pick radius of resize handles in world units.
    pub handle_radius: f32,
    /// Snapshots kept for undo, including the current one.
    pub history_limit: usize,
    /// Class armed when a session starts.
    pub default_class: ObjectClass,
    pub wireframe: bool,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            handle_radius: 0.2,
            history_limit: 100,
            default_class: ObjectClass::Car,
            wireframe: true,
        }
    }
}

impl EditorSettings {
    pub fn sanitized(self) -> Self {
        Self {
            handle_radius: positive_or(self.handle_radius, Self::default().handle_radius),
            history_limit: self.history_limit.max(1),
            ..self
        }
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory label files are written to. `None` means the working directory.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MouseButtonSetting {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at `settings.json` in the per-user config directory.
    pub fn new() -> Result<Self, SettingsError> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| Self::with_path(dirs.config_dir().join(SETTINGS_FILE)))
            .ok_or(SettingsError::MissingProjectDirs)
    }

    /// Store backed by an explicit file, e.g. one passed on the command line.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file or missing fields fall back to defaults.
    pub fn load(&self) -> Result<UserSettings, SettingsError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(UserSettings::default()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Like [`SettingsStore::load`], but logs the failure and falls back to defaults.
    pub fn load_or_default(&self) -> UserSettings {
        self.load().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), "using default settings: {err}");
            UserSettings::default()
        })
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, settings)?;
        writer.flush()?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn scratch_store() -> (TempDir, SettingsStore) {
        let dir = tempdir().unwrap();
        let store = SettingsStore::with_path(dir.path().join("nested").join(SETTINGS_FILE));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (_dir, store) = scratch_store();
        assert_eq!(store.load().unwrap(), UserSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = scratch_store();
        let mut settings = UserSettings::default();
        settings.camera.initial_view = CameraView::Top;
        settings.editor.default_class = ObjectClass::Cyclist;
        settings.export.output_dir = Some(PathBuf::from("/tmp/labels"));

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: UserSettings =
            serde_json::from_str(r#"{ "editor": { "history_limit": 5 } }"#).unwrap();
        assert_eq!(parsed.editor.history_limit, 5);
        assert_eq!(parsed.editor.handle_radius, 0.2);
        assert_eq!(parsed.camera, CameraSettings::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[1, 2, 3]").unwrap();
        let store = SettingsStore::with_path(&path);
        assert_eq!(store.load_or_default(), UserSettings::default());
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        let err = SettingsStore::with_path(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn inverted_zoom_bounds_are_swapped() {
        let parsed: UserSettings = serde_json::from_str(
            r#"{ "camera": { "min_distance": 300.0, "max_distance": 200.0 } }"#,
        )
        .unwrap();
        let camera = parsed.sanitized().camera;
        assert_eq!(camera.min_distance, 200.0);
        assert_eq!(camera.max_distance, 300.0);
    }

    #[test]
    fn non_finite_or_non_positive_values_fall_back() {
        let defaults = CameraSettings::default();
        let camera = CameraSettings {
            min_distance: f32::NAN,
            max_distance: f32::INFINITY,
            fov_degrees: -10.0,
            near: 0.0,
            far: 0.05,
            ..defaults.clone()
        }
        .sanitized();
        assert_eq!(camera.min_distance, defaults.min_distance);
        assert_eq!(camera.max_distance, defaults.max_distance);
        assert_eq!(camera.fov_degrees, defaults.fov_degrees);
        assert_eq!(camera.near, defaults.near);
        assert!(camera.far > camera.near);

        let editor = EditorSettings {
            handle_radius: f32::NAN,
            history_limit: 0,
            ..EditorSettings::default()
        }
        .sanitized();
        assert_eq!(editor.handle_radius, 0.2);
        assert_eq!(editor.history_limit, 1);
    }
}

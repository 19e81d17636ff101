//! Alarm sound sources and asset lookup.
//!
//! The alarm is a single bundled file with a fixed name. It is looked up on
//! every playback so a missing or replaced asset is picked up without a
//! restart.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// File name of the bundled alarm.
pub const ALARM_FILE_NAME: &str = "four_alarms.wav";

/// Represents the source of the alarm sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmSource {
    /// The alarm asset shipped with the application.
    Bundled {
        /// Full path to the asset.
        path: PathBuf,
    },
    /// A user-supplied sound file.
    Custom {
        /// Full path to the sound file.
        path: PathBuf,
    },
}

impl AlarmSource {
    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bundled { .. } => "bundled",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns the file path of the sound.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Bundled { path } | Self::Custom { path } => path,
        }
    }

    /// Returns true if this is the bundled asset.
    #[must_use]
    pub fn is_bundled(&self) -> bool {
        matches!(self, Self::Bundled { .. })
    }
}

// ============================================================================
// AlarmLocator
// ============================================================================

/// Finds the alarm sound on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlarmLocator {
    override_path: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl AlarmLocator {
    /// Creates a locator searching the default bundle locations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            override_path: None,
            search_dirs: default_search_dirs(),
        }
    }

    /// Creates a locator that only looks in `dirs`.
    #[must_use]
    pub fn with_search_dirs(dirs: Vec<PathBuf>) -> Self {
        Self {
            override_path: None,
            search_dirs: dirs,
        }
    }

    /// Uses `path` instead of the bundled asset.
    #[must_use]
    pub fn with_override(mut self, path: Option<PathBuf>) -> Self {
        self.override_path = path;
        self
    }

    /// Directories searched for the bundled asset, in order.
    #[must_use]
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Resolves the alarm source.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the override path does not exist
    /// or, without an override, no search directory holds the asset.
    pub fn resolve(&self) -> Result<AlarmSource, SoundError> {
        if let Some(path) = &self.override_path {
            return if path.is_file() {
                Ok(AlarmSource::Custom { path: path.clone() })
            } else {
                Err(SoundError::FileNotFound(path.display().to_string()))
            };
        }

        self.search_dirs
            .iter()
            .map(|dir| dir.join(ALARM_FILE_NAME))
            .find(|candidate| candidate.is_file())
            .map(|path| AlarmSource::Bundled { path })
            .ok_or_else(|| {
                SoundError::FileNotFound(format!(
                    "{} in {} location(s)",
                    ALARM_FILE_NAME,
                    self.search_dirs.len()
                ))
            })
    }
}

/// Bundle locations, in order of priority:
/// - next to the executable
/// - `../Resources` (inside a macOS `.app` bundle)
/// - `assets/` next to the executable
/// - the crate's `assets/` directory (development builds)
fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.clone());
        dirs.push(exe_dir.join("..").join("Resources"));
        dirs.push(exe_dir.join("assets"));
    }

    dirs.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"));
    dirs
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Named file-system roles used by the consuming data-reduction pipeline.
///
/// All roles except `home` are stored relative to `home` in the document;
/// the `*_dir`/`*_file` accessors return the joined absolute paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDirectories {
    /// Root directory under which the other roles are resolved
    pub home: PathBuf,

    /// Processing-script root, stored under the `python` key in the document
    #[serde(rename = "python")]
    pub code: PathBuf,

    /// Method data directory, relative to `home`
    #[serde(rename = "method_data_directory")]
    pub method_data: PathBuf,

    /// Path to the reference-materials file, relative to `home`
    pub standards: PathBuf,
}

impl LocalDirectories {
    /// Absolute path of the processing-script root.
    pub fn code_dir(&self) -> PathBuf {
        self.home.join(&self.code)
    }

    /// Absolute path of the method data directory.
    pub fn method_data_dir(&self) -> PathBuf {
        self.home.join(&self.method_data)
    }

    /// Absolute path of the reference-materials file.
    ///
    /// This crate only records the path; the reference-materials document
    /// itself is parsed elsewhere.
    pub fn standards_file(&self) -> PathBuf {
        self.home.join(&self.standards)
    }

    /// The home root as a path.
    pub fn home(&self) -> &Path {
        &self.home
    }
}

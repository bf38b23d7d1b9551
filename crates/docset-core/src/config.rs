//! Run configuration
//!
//! Every component receives a `DocsetConfig` explicitly; nothing reads
//! process-global state. All docset paths are derived from `docset_root`.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::CoreError;

pub const DEFAULT_DOCSET_NAME: &str = "LLVM.docset";
pub const DEFAULT_TAGFILE: &str = "llvm.tags";
pub const INDEX_FILE_NAME: &str = "docSet.dsidx";
pub const PLIST_FILE_NAME: &str = "Info.plist";
pub const DOXYGEN_DIR: &str = "doxygen";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DocsetConfig {
    /// Bundle name, e.g. `LLVM.docset`
    pub docset_name: String,
    /// The `<name>.docset` directory
    pub docset_root: PathBuf,
    /// Documentation version label
    pub version: String,
    /// Doxygen tag file name inside `Documents/doxygen`
    pub tagfile: String,
    pub skip_standard: bool,
    pub skip_doxygen: bool,
    /// One progress line per entry instead of an in-place counter
    pub debug: bool,
}

impl Default for DocsetConfig {
    fn default() -> Self {
        Self {
            docset_name: DEFAULT_DOCSET_NAME.to_string(),
            docset_root: PathBuf::new(),
            version: String::new(),
            tagfile: DEFAULT_TAGFILE.to_string(),
            skip_standard: false,
            skip_doxygen: false,
            debug: false,
        }
    }
}

impl DocsetConfig {
    pub fn new(docset_root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            docset_root: normalize_path(&docset_root.into()),
            version: version.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: DocsetConfig = serde_json::from_str(&content)?;
        config.docset_root = normalize_path(&config.docset_root);
        Ok(config)
    }

    /// Reject configs that cannot produce a docset.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.docset_root.as_os_str().is_empty() {
            return Err(CoreError::Config("docset root is required".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(CoreError::Config("documentation version is required".to_string()));
        }
        if self.docset_name.trim().is_empty() {
            return Err(CoreError::Config("docset name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Name shown by the viewer: the bundle name up to the first `.`
    pub fn short_name(&self) -> &str {
        self.docset_name
            .split('.')
            .next()
            .unwrap_or(&self.docset_name)
    }

    pub fn contents_dir(&self) -> PathBuf {
        self.docset_root.join("Contents")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.contents_dir().join("Resources")
    }

    /// Documentation root: every indexed path is relative to this directory
    pub fn documents_dir(&self) -> PathBuf {
        self.resources_dir().join("Documents")
    }

    pub fn index_path(&self) -> PathBuf {
        self.resources_dir().join(INDEX_FILE_NAME)
    }

    pub fn plist_path(&self) -> PathBuf {
        self.contents_dir().join(PLIST_FILE_NAME)
    }

    pub fn doxygen_dir(&self) -> PathBuf {
        self.documents_dir().join(DOXYGEN_DIR)
    }

    pub fn tagfile_path(&self) -> PathBuf {
        self.doxygen_dir().join(&self.tagfile)
    }
}

/// Lexically normalize a path: drop `.` segments and fold `..` into the
/// preceding segment. Does not touch the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

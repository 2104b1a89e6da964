use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub mod error;
pub use error::ConfigError;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MaskFile {
    pub name: String,
    pub path: PathBuf,
}

/// What a batch does when one file fails to decode.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Abort,
    Skip,
}

/// Batch manifest: explicit files, glob patterns and directories to scan.
#[derive(Debug, Clone)]
pub struct Config {
    masks: Vec<MaskFile>,
    patterns: Vec<String>,
    directories: Vec<PathBuf>,
    on_error: OnError,
}

// Rejects manifests with no source and patterns that do not parse.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            #[serde(default)]
            masks: Vec<MaskFile>,
            #[serde(default)]
            patterns: Vec<String>,
            #[serde(default)]
            directories: Vec<PathBuf>,
            #[serde(default)]
            on_error: OnError,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        if helper.masks.is_empty() && helper.patterns.is_empty() && helper.directories.is_empty()
        {
            return Err(D::Error::custom(ConfigError::EmptyManifest));
        }

        for pattern in &helper.patterns {
            glob::Pattern::new(pattern)
                .map_err(|e| D::Error::custom(format!("Invalid pattern '{}': {}", pattern, e)))?;
        }

        Ok(Config {
            masks: helper.masks,
            patterns: helper.patterns,
            directories: helper.directories,
            on_error: helper.on_error,
        })
    }
}

impl Config {
    pub fn new(masks: Vec<MaskFile>, on_error: OnError) -> Self {
        Self {
            masks,
            patterns: Vec::new(),
            directories: Vec::new(),
            on_error,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader).map_err(ConfigError::from)?;

        Ok(config)
    }

    pub fn with_patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn with_directories(mut self, directories: Vec<PathBuf>) -> Self {
        self.directories = directories;
        self
    }

    pub fn on_error(&self) -> OnError {
        self.on_error
    }

    pub fn masks(&self) -> &[MaskFile] {
        &self.masks
    }

    /// Every file named by the manifest, explicit entries first, then each pattern's
    /// matches, then each directory's regular files. Patterns and directories are sorted.
    pub fn mask_files(&self) -> Result<Vec<MaskFile>, ConfigError> {
        let mut files = self.masks.clone();

        for pattern in &self.patterns {
            let mut matched = Vec::new();
            for entry in glob::glob(pattern)? {
                let path = entry.map_err(|e| e.into_error())?;
                if path.is_file() {
                    matched.push(path);
                }
            }
            matched.sort();
            log::debug!("pattern '{}' matched {} file(s)", pattern, matched.len());
            files.extend(matched.into_iter().map(named_by_file));
        }

        for directory in &self.directories {
            let mut found = Vec::new();
            for entry in WalkDir::new(directory).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_file() {
                    found.push(entry.into_path());
                }
            }
            log::debug!("directory {:?} holds {} file(s)", directory, found.len());
            files.extend(found.into_iter().map(named_by_file));
        }

        Ok(files)
    }
}

fn named_by_file(path: PathBuf) -> MaskFile {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    MaskFile { name, path }
}

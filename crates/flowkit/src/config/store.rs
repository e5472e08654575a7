// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::{json, Config},
    error::{Error, Result},
};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

/// File system access used for the configuration and contract sources
pub trait ReaderWriter: Debug + Send + Sync {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn mkdir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OsReaderWriter;

impl ReaderWriter for OsReaderWriter {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|err| Error::io(path.display().to_string(), err))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        fs::write(path, data).map_err(|err| Error::io(path.display().to_string(), err))
    }

    fn mkdir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|err| Error::io(path.display().to_string(), err))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Where a project configuration is loaded from and saved to
pub trait ConfigStore: Debug + Send + Sync {
    fn load(&self) -> Result<Config>;

    fn save(&self, config: &Config) -> Result<()>;

    /// Directory relative contract locations are resolved against
    fn base_dir(&self) -> PathBuf;
}

/// A configuration stored as a single JSON document
#[derive(Clone, Debug)]
pub struct FileConfigStore {
    path: PathBuf,
    reader_writer: Arc<dyn ReaderWriter>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>, reader_writer: Arc<dyn ReaderWriter>) -> Self {
        FileConfigStore {
            path: path.into(),
            reader_writer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.reader_writer.exists(&self.path)
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Config> {
        debug!("loading configuration from {}", self.path.display());
        let bytes = self.reader_writer.read_file(&self.path)?;
        json::from_json(&bytes)
    }

    fn save(&self, config: &Config) -> Result<()> {
        let bytes = json::to_json(config)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.reader_writer.mkdir_all(parent)?;
        }
        self.reader_writer.write_file(&self.path, &bytes)?;
        debug!("saved configuration to {}", self.path.display());
        Ok(())
    }

    fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Contract;
    use claims::assert_err;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested/flow.json"), Arc::new(OsReaderWriter));
        assert!(!store.exists());
        assert_err!(store.load());

        let mut config = Config::default_config();
        config.contracts.add_or_update(Contract::new("Foo", "./Foo.cdc"));
        store.save(&config).unwrap();

        assert!(store.exists());
        assert_eq!(store.load().unwrap(), config);
        assert_eq!(store.base_dir(), dir.path().join("nested"));
    }

    #[test]
    fn test_base_dir_of_bare_file_name() {
        let store = FileConfigStore::new("flow.json", Arc::new(OsReaderWriter));
        assert_eq!(store.base_dir(), PathBuf::from("."));
    }
}

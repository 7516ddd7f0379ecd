use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Durable destination for named fixture bytes
pub trait FixtureSink {
    /// Store `bytes` under `name`, replacing anything already there
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes each fixture to `<dir>/<name>`
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a fixture name resolves to
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

impl FixtureSink for DirectorySink {
    fn store(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let persist = |source| Error::Persist { name: name.to_string(), source };

        // Names are plain file names; anything else could escape the directory
        if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
            return Err(persist(io::Error::new(
                io::ErrorKind::InvalidInput,
                "fixture name must be a plain file name",
            )));
        }

        fs::create_dir_all(&self.dir).map_err(persist)?;
        fs::write(self.path_for(name), bytes).map_err(persist)?;
        Ok(())
    }
}

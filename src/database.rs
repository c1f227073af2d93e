use std::path::{Path, PathBuf};

use crate::error::Result;

/// A bindings file as the database sees it.
#[salsa::input(debug)]
pub struct BindingsFile {
    #[returns(ref)]
    pub path: PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[derive(Default, Clone)]
#[salsa::db]
pub struct StrandDatabaseImpl {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for StrandDatabaseImpl {}

impl StrandDatabaseImpl {
    /// Read `path` from disk into a new input.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<BindingsFile> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(BindingsFile::new(self, path.to_path_buf(), text))
    }
}

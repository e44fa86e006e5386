use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Filesystem-backed document storage rooted at the plugin's working
/// directory. The template source is read from here and the rendered
/// deployment document written back next to it. Reads decode as UTF-8; a
/// non-text file surfaces as an IO error.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> std::path::PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_text(&self, path: &str) -> Result<String> {
        let contents = fs::read_to_string(self.resolve(path))?;
        Ok(contents)
    }

    async fn write_text(&self, path: &str, contents: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, contents)?;
        Ok(())
    }
}

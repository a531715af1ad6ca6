use std::io::ErrorKind;
use std::path::PathBuf;

/// Source of raw config text. `Ok(None)` means "nothing stored yet".
pub trait ConfigContentProvider {
    fn read_content(&self) -> Result<Option<String>, String>;
}

pub struct FileContentConfigProvider {
    path: PathBuf,
}

impl FileContentConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn read_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(format!(
                "Failed to read config file {}: {}",
                self.path.display(),
                err
            )),
        }
    }
}

/// Serves fixed config text, for tests that skip the file system.
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryConfigProvider {
    content: Option<String>,
}

#[cfg(test)]
impl InMemoryConfigProvider {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
        }
    }
}

#[cfg(test)]
impl ConfigContentProvider for InMemoryConfigProvider {
    fn read_content(&self) -> Result<Option<String>, String> {
        Ok(self.content.clone())
    }
}

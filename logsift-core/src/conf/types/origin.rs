use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a config value was declared, for error messages.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Origin {
    pub(crate) file: PathBuf,
    pub(crate) section: String,
    pub(crate) index: Option<usize>,
}

impl Origin {
    pub fn new(file: &Path, section: &str, index: Option<usize>) -> Self {
        Self {
            file: file.to_path_buf(),
            section: section.to_owned(),
            index,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}: {}[{}] block", self.file.display(), self.section, i),
            None => write!(f, "{}: {} block", self.file.display(), self.section),
        }
    }
}

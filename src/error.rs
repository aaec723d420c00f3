use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("Folder '{}' does not exist or is not a directory", .0.display())]
    Input(PathBuf),

    #[error("No .json file found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("Multiple .json files found: {}. Keep only one or rename the desired file to 'annotations.json'.", .candidates.join(", "))]
    AmbiguousInput { candidates: Vec<String> },

    #[error("COCO file missing '{0}' section")]
    Schema(String),

    #[error("Failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render '{}': {reason}", .path.display())]
    Render { path: PathBuf, reason: String },
}

impl OverlayError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn render(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Render { path: path.into(), reason: reason.to_string() }
    }

    /// Per-image failures are reported and skipped; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Render { .. })
    }
}

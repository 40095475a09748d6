use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Chart,
    Report,
}

impl ArtifactKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Chart => "chart",
            Self::Report => "report",
        }
    }
}

/// Handle to one rendered single-page document on disk.
#[derive(Debug, PartialEq, Eq)]
pub struct Artifact {
    kind: ArtifactKind,
    path: PathBuf,
}

impl Artifact {
    pub(crate) fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

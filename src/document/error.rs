use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no artifacts to merge")]
    NoArtifacts,
    #[error("{kind} artifact is missing: {path}")]
    MissingArtifact { kind: &'static str, path: String },
    #[error("{kind} artifact {path} is unreadable: {message}")]
    UnreadableArtifact {
        kind: &'static str,
        path: String,
        message: String,
    },
    #[error("failed to write merged document {path}: {message}")]
    Write { path: String, message: String },
    #[error("failed to move merged document into {path}: {source}")]
    Persist {
        path: String,
        source: std::io::Error,
    },
}

impl MergeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoArtifacts => "MERGE_NO_ARTIFACTS",
            Self::MissingArtifact { .. } => "MERGE_MISSING_ARTIFACT",
            Self::UnreadableArtifact { .. } => "MERGE_UNREADABLE_ARTIFACT",
            Self::Write { .. } => "MERGE_WRITE_ERROR",
            Self::Persist { .. } => "MERGE_PERSIST_ERROR",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Write { .. } | Self::Persist { .. } => {
                "Could not write the merged report. Check the output directory."
            }
            _ => "Could not merge the report pages. Please try again.",
        }
    }
}

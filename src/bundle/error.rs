use std::path::PathBuf;
use thiserror::Error;

/// Why a bundle contributed no dependency to the report.
///
/// Every variant is recoverable: the condition is logged with the bundle
/// path and the scan moves on to the next file.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Not a readable archive ({reason}): {}", path.display())]
    ArchiveOpen { path: PathBuf, reason: String },

    #[error("Cannot read entry {entry} ({reason}): {}", path.display())]
    EntryRead {
        path: PathBuf,
        entry: String,
        reason: String,
    },

    #[error("Bad manifest data (no artifactId or version metadata provided): {}", path.display())]
    MetadataMissing { path: PathBuf },

    #[error("Bad artifactId syntax: {artifact}. Path: {}", path.display())]
    MalformedArtifact { path: PathBuf, artifact: String },

    #[error("Failed to find pom.xml for {artifact}: {}", path.display())]
    MissingDescriptor { path: PathBuf, artifact: String },

    #[error("Unparseable pom.xml ({reason}): {}", path.display())]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("pom.xml has no {field}, even after checking <parent>: {}", path.display())]
    MetadataIncomplete { path: PathBuf, field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_condition_and_path() {
        let err = BundleError::MalformedArtifact {
            path: PathBuf::from("/deploy/foo.jar"),
            artifact: "foo".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Bad artifactId syntax: foo. Path: /deploy/foo.jar"
        );
    }
}

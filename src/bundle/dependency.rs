use std::fmt;
use std::path::PathBuf;

/// Group every bundle built by the vendor belongs to.
pub const VENDOR_GROUP: &str = "com.liferay";

/// Token left behind when the build did not expand a property.
const PLACEHOLDER: &str = "${";

/// Appended to a field that still holds a placeholder, followed by the bundle path.
const UNRESOLVED_MARKER: &str = "     **************************************************************";

/// One Maven coordinate recovered from a bundle.
///
/// Field order matters: the derived ordering sorts by group, then artifact,
/// with a missing group before any present one. Version and bundle path only
/// break ties so that output stays stable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Dependency {
    group: Option<String>,
    artifact: String,
    version: String,
    bundle_path: PathBuf,
}

impl Dependency {
    pub fn new(
        group: Option<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
        bundle_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            group,
            artifact: artifact.into(),
            version: version.into(),
            bundle_path: bundle_path.into(),
        }
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn has_unresolved_artifact(&self) -> bool {
        self.artifact.contains(PLACEHOLDER)
    }

    pub fn has_unresolved_version(&self) -> bool {
        self.version.contains(PLACEHOLDER)
    }

    fn write_marker(&self, f: &mut fmt::Formatter<'_>, unresolved: bool) -> fmt::Result {
        if unresolved {
            write!(f, "{} {}", UNRESOLVED_MARKER, self.bundle_path.display())?;
        }
        writeln!(f)
    }
}

/// Renders a `<dependency>` block with `provided` scope, preceded by a blank line.
impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "<dependency>")?;
        writeln!(
            f,
            "    <groupId>{}</groupId>",
            self.group.as_deref().unwrap_or("null")
        )?;
        write!(f, "    <artifactId>{}</artifactId>", self.artifact)?;
        self.write_marker(f, self.has_unresolved_artifact())?;
        write!(f, "    <version>{}</version>", self.version)?;
        self.write_marker(f, self.has_unresolved_version())?;
        writeln!(f, "    <scope>provided</scope>")?;
        writeln!(f, "</dependency>")
    }
}

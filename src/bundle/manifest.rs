//! `META-INF/MANIFEST.MF` parsing and bundle identity extraction.

use std::path::Path;

use super::dependency::{Dependency, VENDOR_GROUP};
use super::error::BundleError;

pub const MANIFEST_NAME: &str = "META-INF/MANIFEST.MF";

const SYMBOLIC_NAME: &str = "Bundle-SymbolicName";
const BUNDLE_VERSION: &str = "Bundle-Version";

/// Main attributes of a JAR manifest.
///
/// Only the main section is kept: parsing stops at the first blank line,
/// where the per-entry sections begin. Header lines longer than 72 bytes are
/// wrapped by the writer onto continuation lines that start with one space.
#[derive(Debug, Default)]
pub struct Manifest {
    attributes: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes)
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        let mut attributes: Vec<(String, String)> = Vec::new();

        for line in text.split('\n') {
            if line.is_empty() {
                break;
            }

            if let Some(continued) = line.strip_prefix(' ') {
                if let Some((_, value)) = attributes.last_mut() {
                    value.push_str(continued);
                }
            } else if let Some((name, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                attributes.push((name.trim().to_string(), value.to_string()));
            }
        }

        Self { attributes }
    }

    /// Attribute value by case-insensitive name; a repeated header keeps its last value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub fn is_manifest(entry_name: &str) -> bool {
    entry_name.eq_ignore_ascii_case(MANIFEST_NAME)
}

/// Build a candidate dependency from the bundle manifest.
///
/// Vendor bundles come back complete. Any other well-formed bundle comes
/// back with no group: its artifact and version are known, but the group has
/// to be taken from the embedded pom.xml.
pub fn dependency_from_manifest(bytes: &[u8], path: &Path) -> Result<Dependency, BundleError> {
    let manifest = Manifest::parse(bytes);

    let artifact = manifest.get(SYMBOLIC_NAME).map(symbolic_name);
    let version = manifest
        .get(BUNDLE_VERSION)
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let (Some(artifact), Some(version)) = (artifact, version) else {
        return Err(BundleError::MetadataMissing {
            path: path.to_path_buf(),
        });
    };

    if artifact.contains(char::is_whitespace) || !artifact.contains('.') {
        return Err(BundleError::MalformedArtifact {
            path: path.to_path_buf(),
            artifact: artifact.to_string(),
        });
    }

    let group = artifact
        .starts_with(VENDOR_GROUP)
        .then(|| VENDOR_GROUP.to_string());

    Ok(Dependency::new(group, artifact, version, path))
}

/// `Bundle-SymbolicName` without its directives, e.g. `;singleton:=true`.
fn symbolic_name(value: &str) -> &str {
    value.split(';').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/deploy/bundle.jar";

    fn extract(text: &str) -> Result<Dependency, BundleError> {
        dependency_from_manifest(text.as_bytes(), Path::new(PATH))
    }

    #[test]
    fn vendor_bundle_gets_vendor_group() {
        let dep = extract(
            "Manifest-Version: 1.0\nBundle-SymbolicName: com.liferay.foo\nBundle-Version: 1.0.0\n",
        )
        .unwrap();
        assert_eq!(dep.group(), Some("com.liferay"));
        assert_eq!(dep.artifact(), "com.liferay.foo");
        assert_eq!(dep.version(), "1.0.0");
    }

    #[test]
    fn other_bundle_has_no_group_yet() {
        let dep = extract("Bundle-SymbolicName: org.acme.widget\r\nBundle-Version: 2.1.0\r\n")
            .unwrap();
        assert_eq!(dep.group(), None);
        assert_eq!(dep.artifact(), "org.acme.widget");
        assert_eq!(dep.version(), "2.1.0");
    }

    #[test]
    fn missing_version_is_rejected() {
        let err = extract("Bundle-SymbolicName: com.liferay.foo\n").unwrap_err();
        assert!(matches!(err, BundleError::MetadataMissing { .. }));
    }

    #[test]
    fn missing_symbolic_name_is_rejected() {
        let err = extract("Bundle-Version: 1.0\n").unwrap_err();
        assert!(matches!(err, BundleError::MetadataMissing { .. }));
    }

    #[test]
    fn artifact_without_separator_is_malformed() {
        let err = extract("Bundle-SymbolicName: foo\nBundle-Version: 1.0\n").unwrap_err();
        assert!(matches!(err, BundleError::MalformedArtifact { ref artifact, .. } if artifact == "foo"));
    }

    #[test]
    fn artifact_with_space_is_malformed() {
        let err = extract("Bundle-SymbolicName: com.liferay foo\nBundle-Version: 1.0\n").unwrap_err();
        assert!(matches!(err, BundleError::MalformedArtifact { .. }));
    }

    #[test]
    fn directives_are_stripped_from_symbolic_name() {
        let dep = extract(
            "Bundle-SymbolicName: com.liferay.portal.kernel;singleton:=true\nBundle-Version: 7.0.0\n",
        )
        .unwrap();
        assert_eq!(dep.artifact(), "com.liferay.portal.kernel");
    }

    #[test]
    fn continuation_lines_are_joined() {
        let manifest = Manifest::parse(
            b"Bundle-SymbolicName: com.liferay.very.long.bundle.name.that.wraps.past.se\r\n venty.two.bytes\r\nBundle-Version: 1.0\r\n",
        );
        assert_eq!(
            manifest.get("bundle-symbolicname"),
            Some("com.liferay.very.long.bundle.name.that.wraps.past.seventy.two.bytes")
        );
        assert_eq!(manifest.get("Bundle-Version"), Some("1.0"));
    }

    #[test]
    fn per_entry_sections_are_ignored() {
        let manifest = Manifest::parse(
            b"Manifest-Version: 1.0\n\nName: org/acme/Foo.class\nBundle-Version: 9.9\n",
        );
        assert_eq!(manifest.get("Manifest-Version"), Some("1.0"));
        assert_eq!(manifest.get("Bundle-Version"), None);
    }

    #[test]
    fn old_mac_line_endings() {
        let manifest = Manifest::parse(b"Bundle-Version: 3.0\rBundle-SymbolicName: a.b\r");
        assert_eq!(manifest.get("Bundle-Version"), Some("3.0"));
        assert_eq!(manifest.get("Bundle-SymbolicName"), Some("a.b"));
    }

    #[test]
    fn manifest_name_matches_any_case() {
        assert!(is_manifest("META-INF/MANIFEST.MF"));
        assert!(is_manifest("meta-inf/manifest.mf"));
        assert!(!is_manifest("META-INF/MANIFEST.MF.bak"));
    }
}

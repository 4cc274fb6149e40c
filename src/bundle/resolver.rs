use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::io::{LocalFileReader, ReadAt};
use crate::zip::{ZipExtractor, ZipFileEntry};

use super::dependency::Dependency;
use super::descriptor::{dependency_from_descriptor, is_descriptor, is_own_descriptor};
use super::error::BundleError;
use super::manifest::{dependency_from_manifest, is_manifest};

/// Resolve the dependency declared by the bundle at `path`.
///
/// `Ok(None)` means the file is an archive without a manifest, which is
/// not worth a diagnostic. The file handle is closed before returning on
/// every path.
pub async fn resolve_bundle(path: &Path) -> Result<Option<Dependency>, BundleError> {
    let reader = LocalFileReader::new(path).map_err(|e| BundleError::ArchiveOpen {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })?;
    resolve_archive(Arc::new(reader), path).await
}

/// Resolve the dependency declared by an archive read from `reader`.
///
/// The manifest is authoritative whenever it names a vendor bundle. For any
/// other bundle the manifest only proves that the bundle is a real one, and
/// the coordinates are taken from the embedded pom.xml, which also supplies
/// the group the manifest cannot.
pub async fn resolve_archive<R: ReadAt + 'static>(
    reader: Arc<R>,
    path: &Path,
) -> Result<Option<Dependency>, BundleError> {
    let extractor = ZipExtractor::new(reader);
    let entries = extractor
        .list_files()
        .await
        .map_err(|e| BundleError::ArchiveOpen {
            path: path.to_path_buf(),
            reason: format!("{e:#}"),
        })?;

    let mut manifest = None;
    let mut descriptors = Vec::new();
    for entry in entries.iter().filter(|e| !e.is_directory) {
        if is_descriptor(&entry.file_name) {
            descriptors.push(entry);
        }
        if is_manifest(&entry.file_name) {
            manifest = Some(entry);
        }
    }

    let Some(manifest) = manifest else {
        debug!("No manifest in {}", path.display());
        return Ok(None);
    };

    let bytes = read_entry(&extractor, manifest, path).await?;
    let candidate = dependency_from_manifest(&bytes, path)?;
    if candidate.group().is_some() {
        return Ok(Some(candidate));
    }

    info!(
        "Non-vendor artifact {}, taking coordinates from pom.xml: {}",
        candidate.artifact(),
        path.display()
    );

    let Some(descriptor) = choose_descriptor(&descriptors, candidate.artifact()) else {
        return Err(BundleError::MissingDescriptor {
            path: path.to_path_buf(),
            artifact: candidate.artifact().to_string(),
        });
    };

    debug!("Using {} for {}", descriptor.file_name, path.display());
    let bytes = read_entry(&extractor, descriptor, path).await?;
    dependency_from_descriptor(&bytes, path).map(Some)
}

/// Pick the pom.xml describing the bundle itself.
///
/// Bundles that embed their dependencies carry one descriptor per embedded
/// jar. The one at the bundle's own coordinate path wins; failing that, the
/// last one listed is used.
fn choose_descriptor<'e>(
    descriptors: &[&'e ZipFileEntry],
    artifact: &str,
) -> Option<&'e ZipFileEntry> {
    descriptors
        .iter()
        .find(|e| is_own_descriptor(&e.file_name, artifact))
        .or_else(|| descriptors.last())
        .copied()
}

async fn read_entry<R: ReadAt + 'static>(
    extractor: &ZipExtractor<R>,
    entry: &ZipFileEntry,
    path: &Path,
) -> Result<Vec<u8>, BundleError> {
    extractor
        .extract_to_memory(entry)
        .await
        .map_err(|e| BundleError::EntryRead {
            path: path.to_path_buf(),
            entry: entry.file_name.clone(),
            reason: format!("{e:#}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const PATH: &str = "/deploy/bundle.jar";

    fn jar(entries: &[(&str, &str)]) -> Arc<Vec<u8>> {
        let entries: Vec<_> = entries.iter().map(|(n, t)| (*n, t.as_bytes())).collect();
        jar_bytes(&entries)
    }

    fn jar_bytes(entries: &[(&str, &[u8])]) -> Arc<Vec<u8>> {
        let mut writer = ::zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, ::zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        Arc::new(writer.finish().unwrap().into_inner())
    }

    fn manifest(name: &str, version: &str) -> String {
        format!("Manifest-Version: 1.0\r\nBundle-SymbolicName: {name}\r\nBundle-Version: {version}\r\n\r\n")
    }

    fn pom(group: &str, artifact: &str, version: &str) -> String {
        format!(
            "<project><groupId>{group}</groupId><artifactId>{artifact}</artifactId><version>{version}</version></project>"
        )
    }

    async fn resolve(entries: &[(&str, &str)]) -> Result<Option<Dependency>, BundleError> {
        resolve_archive(jar(entries), Path::new(PATH)).await
    }

    #[tokio::test]
    async fn vendor_manifest_wins_over_descriptor() {
        let dep = resolve(&[
            ("META-INF/MANIFEST.MF", &*manifest("com.liferay.foo", "1.0.0")),
            ("META-INF/maven/other/thing/pom.xml", &*pom("other", "thing", "9")),
        ])
        .await
        .unwrap()
        .unwrap();

        assert_eq!(dep.group(), Some("com.liferay"));
        assert_eq!(dep.artifact(), "com.liferay.foo");
        assert_eq!(dep.version(), "1.0.0");
    }

    #[tokio::test]
    async fn descriptor_fills_missing_group() {
        let dep = resolve(&[
            ("META-INF/MANIFEST.MF", &*manifest("org.acme.widget", "2.1.0")),
            (
                "META-INF/maven/org.acme/org.acme.widget/pom.xml",
                &*pom("org.acme", "org.acme.widget", "2.1.0"),
            ),
        ])
        .await
        .unwrap()
        .unwrap();

        assert_eq!(dep.group(), Some("org.acme"));
        assert_eq!(dep.artifact(), "org.acme.widget");
        assert_eq!(dep.version(), "2.1.0");
    }

    #[tokio::test]
    async fn non_vendor_without_descriptor_yields_nothing() {
        let err = resolve(&[("META-INF/MANIFEST.MF", &*manifest("org.acme.widget", "2.1.0"))])
            .await
            .unwrap_err();
        assert!(matches!(err, BundleError::MissingDescriptor { .. }));
    }

    #[tokio::test]
    async fn descriptor_without_manifest_yields_nothing() {
        let dep = resolve(&[("META-INF/maven/g/a/pom.xml", &*pom("g", "a", "1"))])
            .await
            .unwrap();
        assert!(dep.is_none());
    }

    #[tokio::test]
    async fn incomplete_manifest_is_reported() {
        let err = resolve(&[("META-INF/MANIFEST.MF", "Bundle-SymbolicName: com.liferay.foo\n")])
            .await
            .unwrap_err();
        assert!(matches!(err, BundleError::MetadataMissing { .. }));
    }

    #[tokio::test]
    async fn own_descriptor_preferred_over_embedded_ones() {
        let dep = resolve(&[
            ("META-INF/MANIFEST.MF", &*manifest("org.acme.widget", "2.1.0")),
            (
                "META-INF/maven/org.acme/widget/pom.xml",
                &*pom("org.acme", "widget", "2.1.0"),
            ),
            (
                "META-INF/maven/commons-io/commons-io/pom.xml",
                &*pom("commons-io", "commons-io", "2.6"),
            ),
        ])
        .await
        .unwrap()
        .unwrap();

        assert_eq!(dep.group(), Some("org.acme"));
        assert_eq!(dep.artifact(), "widget");
    }

    #[tokio::test]
    async fn last_descriptor_used_when_none_is_own() {
        let dep = resolve(&[
            ("META-INF/MANIFEST.MF", &*manifest("org.acme.widget", "2.1.0")),
            ("META-INF/maven/x/first/pom.xml", &*pom("x", "first", "1")),
            ("META-INF/maven/y/second/pom.xml", &*pom("y", "second", "2")),
        ])
        .await
        .unwrap()
        .unwrap();

        assert_eq!(dep.group(), Some("y"));
    }

    #[tokio::test]
    async fn latin1_descriptor_resolves() {
        let manifest = manifest("org.a.b", "1");
        let mut pom = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<project>".to_vec();
        pom.extend_from_slice(b"<name>caf\xe9</name><groupId>org.a</groupId>");
        pom.extend_from_slice(b"<artifactId>b</artifactId><version>1</version></project>");

        let archive = jar_bytes(&[
            ("META-INF/MANIFEST.MF", manifest.as_bytes()),
            ("META-INF/maven/org.a/b/pom.xml", &pom),
        ]);
        let dep = resolve_archive(archive, Path::new(PATH))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dep.group(), Some("org.a"));
        assert_eq!(dep.artifact(), "b");
        assert_eq!(dep.version(), "1");
    }

    #[tokio::test]
    async fn non_archive_is_an_open_error() {
        let err = resolve_archive(Arc::new(b"not a zip".to_vec()), Path::new(PATH))
            .await
            .unwrap_err();
        assert!(matches!(err, BundleError::ArchiveOpen { .. }));
    }
}

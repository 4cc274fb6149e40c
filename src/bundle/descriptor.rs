//! Embedded `pom.xml` (Maven build descriptor) parsing.

use encoding_rs::Encoding;
use roxmltree::{Document, Node, ParsingOptions};
use std::borrow::Cow;
use std::path::Path;

use super::dependency::Dependency;
use super::error::BundleError;

const DESCRIPTOR_PREFIX: &str = "META-INF/maven";
const DESCRIPTOR_SUFFIX: &str = "pom.xml";

pub fn is_descriptor(entry_name: &str) -> bool {
    entry_name.starts_with(DESCRIPTOR_PREFIX) && entry_name.ends_with(DESCRIPTOR_SUFFIX)
}

/// Whether a descriptor entry sits at the coordinate path of `artifact`,
/// i.e. `META-INF/maven/<group>/<artifact>/pom.xml`.
///
/// OSGi symbolic names are frequently `<group>.<artifact>`, so that
/// spelling counts too.
pub fn is_own_descriptor(entry_name: &str, artifact: &str) -> bool {
    let segments: Vec<_> = entry_name.split('/').collect();
    match segments.as_slice() {
        ["META-INF", "maven", group, id, "pom.xml"] => {
            *id == artifact
                || artifact
                    .strip_prefix(group)
                    .and_then(|rest| rest.strip_prefix('.'))
                    .is_some_and(|rest| rest == *id)
        }
        _ => false,
    }
}

#[derive(Default)]
struct Coordinates<'a, 'input> {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    parent: Option<Node<'a, 'input>>,
}

/// Build a dependency from the coordinates declared by a `pom.xml`.
///
/// `groupId` and `version` fall back to the `<parent>` element when the
/// project does not declare them itself; `artifactId` never inherits.
pub fn dependency_from_descriptor(bytes: &[u8], path: &Path) -> Result<Dependency, BundleError> {
    let invalid = |reason: String| BundleError::InvalidDescriptor {
        path: path.to_path_buf(),
        reason,
    };

    let text = decode(bytes).map_err(invalid)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(text, options).map_err(|e| invalid(e.to_string()))?;

    let mut coords = scan(doc.root_element());
    if (coords.group_id.is_none() || coords.version.is_none())
        && let Some(parent) = coords.parent
    {
        let inherited = scan(parent);
        coords.group_id = coords.group_id.or(inherited.group_id);
        coords.version = coords.version.or(inherited.version);
    }

    let incomplete = |field| BundleError::MetadataIncomplete {
        path: path.to_path_buf(),
        field,
    };
    let group = coords.group_id.ok_or_else(|| incomplete("groupId"))?;
    let artifact = coords.artifact_id.ok_or_else(|| incomplete("artifactId"))?;
    let version = coords.version.ok_or_else(|| incomplete("version"))?;

    Ok(Dependency::new(Some(group), artifact, version, path))
}

/// Descriptor text in the encoding its XML declaration names.
///
/// UTF-8 needs no declaration; older poms are often ISO-8859-1.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    let label = declared_encoding(bytes).ok_or("not UTF-8 and no encoding declared")?;
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| format!("unknown encoding {label}"))?;
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(format!("malformed {} text", encoding.name()));
    }
    Ok(text)
}

/// The `encoding` pseudo-attribute of the `<?xml ...?>` declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&str> {
    let end = bytes.windows(2).position(|w| w == b"?>")?;
    let prolog = std::str::from_utf8(&bytes[..end]).ok()?.strip_prefix("<?xml")?;
    let rest = &prolog[prolog.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    Some(&rest[..rest.find(quote)?])
}

/// Collect coordinate fields among the direct children of `node`.
fn scan<'a, 'input>(node: Node<'a, 'input>) -> Coordinates<'a, 'input> {
    let mut coords = Coordinates::default();

    for child in node.children().filter(Node::is_element) {
        let slot = match child.tag_name().name() {
            "groupId" => &mut coords.group_id,
            "artifactId" => &mut coords.artifact_id,
            "version" => &mut coords.version,
            "parent" => {
                if coords.parent.is_none() {
                    coords.parent = Some(child);
                }
                continue;
            }
            _ => continue,
        };
        if slot.is_none() {
            *slot = text_content(child);
        }
    }

    coords
}

/// Concatenated, trimmed text below `node`; blank text counts as absent.
fn text_content(node: Node<'_, '_>) -> Option<String> {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

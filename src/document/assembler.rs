use std::io::Write;
use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use tempfile::NamedTempFile;

use crate::render::Artifact;

use super::error::MergeError;

const MERGED_TITLE: &str = "Carbon Footprint Report";
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"Resources", b"CropBox", b"Rotate"];
const MAX_PAGE_TREE_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRetention {
    Keep,
    /// Delete the single-page files once the merged document is persisted.
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub path: PathBuf,
    pub page_count: usize,
}

/// Appends every artifact's pages, in the given order, into one document at
/// `destination`. The destination is only replaced once the merge has fully
/// succeeded.
pub fn assemble(
    artifacts: Vec<Artifact>,
    destination: &Path,
    retention: ArtifactRetention,
) -> Result<OutputDocument, MergeError> {
    if artifacts.is_empty() {
        return Err(MergeError::NoArtifacts);
    }

    let mut merged = Document::with_version("1.5");
    let mut next_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();

    for artifact in &artifacts {
        let mut source = load_artifact(artifact)?;
        source.renumber_objects_with(next_id);
        next_id = source.max_id + 1;

        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();
        for page_id in &source_pages {
            inherit_page_attributes(&mut source, *page_id);
        }
        page_ids.extend(source_pages);

        for (object_id, object) in source.objects {
            if !is_document_root(&object) {
                merged.objects.insert(object_id, object);
            }
        }
        log::info!(
            "artifact_appended kind={} path={}",
            artifact.kind().name(),
            artifact.path().display()
        );
    }

    merged.max_id = next_id - 1;
    let pages_id = merged.new_object_id();
    for page_id in &page_ids {
        if let Ok(page) = merged
            .get_object_mut(*page_id)
            .and_then(Object::as_dict_mut)
        {
            page.set("Parent", pages_id);
        }
    }

    let kids: Vec<Object> = page_ids.iter().copied().map(Object::Reference).collect();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = merged.add_object(dictionary! {
        "Title" => Object::string_literal(MERGED_TITLE),
        "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
    });
    merged.trailer.set("Root", catalog_id);
    merged.trailer.set("Info", info_id);
    merged.compress();

    write_atomically(&mut merged, destination)?;

    if retention == ArtifactRetention::Remove {
        for artifact in &artifacts {
            if let Err(error) = std::fs::remove_file(artifact.path()) {
                log::warn!(
                    "artifact_cleanup_failed kind={} path={} error={}",
                    artifact.kind().name(),
                    artifact.path().display(),
                    error
                );
            }
        }
    }

    Ok(OutputDocument {
        path: destination.to_path_buf(),
        page_count: page_ids.len(),
    })
}

fn load_artifact(artifact: &Artifact) -> Result<Document, MergeError> {
    let kind = artifact.kind().name();
    let path = artifact.path();
    if !path.is_file() {
        return Err(MergeError::MissingArtifact {
            kind,
            path: path.display().to_string(),
        });
    }

    let document = Document::load(path).map_err(|error| MergeError::UnreadableArtifact {
        kind,
        path: path.display().to_string(),
        message: error.to_string(),
    })?;
    if document.get_pages().is_empty() {
        return Err(MergeError::UnreadableArtifact {
            kind,
            path: path.display().to_string(),
            message: "document has no pages".to_string(),
        });
    }

    Ok(document)
}

/// Catalog and page-tree nodes are rebuilt for the merged document.
fn is_document_root(object: &Object) -> bool {
    let Ok(dictionary) = object.as_dict() else {
        return false;
    };
    matches!(
        dictionary.get(b"Type").and_then(Object::as_name),
        Ok(b"Catalog") | Ok(b"Pages")
    )
}

/// Copies attributes a page inherits from its page-tree ancestors onto the
/// page itself, since those ancestors are dropped during the merge.
fn inherit_page_attributes(document: &mut Document, page_id: ObjectId) {
    for key in INHERITABLE_KEYS {
        let inherited = match document.get_dictionary(page_id) {
            Ok(page) if !page.has(key) => inherited_value(document, page, key),
            _ => None,
        };
        if let Some(value) = inherited {
            if let Ok(page) = document
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
            {
                page.set(key, value);
            }
        }
    }
}

fn inherited_value(document: &Document, page: &Dictionary, key: &[u8]) -> Option<Object> {
    let mut parent_id = page.get(b"Parent").and_then(Object::as_reference).ok();
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let node = document.get_dictionary(parent_id?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        parent_id = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

fn write_atomically(document: &mut Document, destination: &Path) -> Result<(), MergeError> {
    let path = destination.display().to_string();
    let write_error = |message: String| MergeError::Write {
        path: path.clone(),
        message,
    };

    let directory = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged =
        NamedTempFile::new_in(directory).map_err(|error| write_error(error.to_string()))?;
    document
        .save_to(&mut staged)
        .map_err(|error| write_error(error.to_string()))?;
    staged
        .flush()
        .map_err(|error| write_error(error.to_string()))?;

    // A failed write drops `staged`, which deletes the partial file.
    staged
        .persist(destination)
        .map_err(|error| MergeError::Persist {
            path: path.clone(),
            source: error.error,
        })?;

    Ok(())
}

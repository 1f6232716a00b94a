use crate::error::{PdfSplitError, Result};
use crate::types::SectionRange;
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A loaded source PDF. Immutable once read; sections are materialized as
/// new documents, never by mutating the source in place.
pub struct SourcePdf {
    document: Document,
    path: PathBuf,
    page_numbers: Vec<u32>,
}

impl SourcePdf {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PdfSplitError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let document = Document::load(path)?;
        let page_numbers: Vec<u32> = document.get_pages().into_keys().collect();

        Ok(Self {
            document,
            path: path.to_path_buf(),
            page_numbers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    /// Extracted text of the page at the given zero-based index. A page
    /// with no extractable text (scanned images, extraction failures)
    /// yields an empty string, never an error.
    pub fn page_text(&self, index: usize) -> String {
        let Some(&page_number) = self.page_numbers.get(index) else {
            return String::new();
        };

        match self.document.extract_text(&[page_number]) {
            Ok(text) => text,
            Err(e) => {
                debug!("No extractable text on page {}: {}", index + 1, e);
                String::new()
            }
        }
    }

    /// New document holding the pages of `range`, in order. The source
    /// document is copied and the pages outside the range are dropped.
    pub fn extract_section(&self, range: SectionRange) -> Result<Document> {
        if range.start >= range.end || range.end > self.page_count() {
            return Err(PdfSplitError::PageRange {
                reason: format!(
                    "section range {}..{} is outside the document's {} pages",
                    range.start,
                    range.end,
                    self.page_count()
                ),
            });
        }

        let mut section = self.document.clone();
        let pages_to_remove: Vec<u32> = self
            .page_numbers
            .iter()
            .enumerate()
            .filter(|(index, _)| *index < range.start || *index >= range.end)
            .map(|(_, &page_number)| page_number)
            .collect();

        if !pages_to_remove.is_empty() {
            section.delete_pages(&pages_to_remove);
        }

        Ok(section)
    }
}

/// Number of pages in an in-memory document.
pub fn page_count_of(document: &Document) -> usize {
    document.get_pages().len()
}

/// Concatenate the pages of the given documents, in order, into one new
/// document. Pages keep the order they have in their source documents;
/// passing the same file's document twice duplicates its pages.
pub fn concatenate(documents: Vec<Document>) -> Result<Document> {
    if documents.is_empty() {
        return Err(PdfSplitError::Merge {
            reason: "no documents to concatenate".to_string(),
        });
    }

    let mut max_id = 1;
    // Page objects in concatenation order; an ordered list rather than an
    // id-keyed map so selection order and repeats survive.
    let mut page_objects: Vec<(ObjectId, Object)> = Vec::new();
    let mut all_objects: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut merged = Document::with_version("1.5");

    for mut document in documents {
        document.renumber_objects_with(max_id);
        max_id = document.max_id + 1;

        for (_page_number, object_id) in document.get_pages() {
            let object = document
                .get_object(object_id)
                .map_err(|e| PdfSplitError::Merge {
                    reason: format!("missing page object: {}", e),
                })?
                .to_owned();
            page_objects.push((object_id, object));
        }

        all_objects.extend(document.objects);
    }

    // One "Catalog" and one "Pages" node carry over; every "Page" is
    // reparented below. Outlines reference pages across documents and are
    // dropped.
    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;

    for (object_id, object) in all_objects.iter() {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                catalog_object = Some((
                    if let Some((id, _)) = catalog_object {
                        id
                    } else {
                        *object_id
                    },
                    object.clone(),
                ));
            }
            "Pages" => {
                if let Ok(dictionary) = object.as_dict() {
                    let mut dictionary = dictionary.clone();
                    if let Some((_, ref existing)) = pages_object {
                        if let Ok(existing_dictionary) = existing.as_dict() {
                            dictionary.extend(existing_dictionary);
                        }
                    }
                    pages_object = Some((
                        if let Some((id, _)) = pages_object {
                            id
                        } else {
                            *object_id
                        },
                        Object::Dictionary(dictionary),
                    ));
                }
            }
            "Page" => {}
            "Outlines" => {}
            "Outline" => {}
            _ => {
                merged.objects.insert(*object_id, object.clone());
            }
        }
    }

    let pages_object = pages_object.ok_or_else(|| PdfSplitError::Merge {
        reason: "no Pages object found in the selected documents".to_string(),
    })?;
    let catalog_object = catalog_object.ok_or_else(|| PdfSplitError::Merge {
        reason: "no Catalog object found in the selected documents".to_string(),
    })?;

    for (object_id, object) in page_objects.iter() {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", pages_object.0);
            merged.objects.insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    if let Ok(dictionary) = pages_object.1.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Count", page_objects.len() as u32);
        dictionary.set(
            "Kids",
            page_objects
                .iter()
                .map(|(object_id, _)| Object::Reference(*object_id))
                .collect::<Vec<_>>(),
        );
        merged
            .objects
            .insert(pages_object.0, Object::Dictionary(dictionary));
    }

    if let Ok(dictionary) = catalog_object.1.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Pages", pages_object.0);
        dictionary.remove(b"Outlines");
        merged
            .objects
            .insert(catalog_object.0, Object::Dictionary(dictionary));
    }

    merged.trailer.set("Root", catalog_object.0);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();

    Ok(merged)
}

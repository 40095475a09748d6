use std::path::Path;

use lopdf::{content::Content, dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageSize {
    pub(crate) width: i64,
    pub(crate) height: i64,
}

impl PageSize {
    pub(crate) const LETTER: PageSize = PageSize {
        width: 612,
        height: 792,
    };

    fn media_box(self) -> Vec<Object> {
        vec![0.into(), 0.into(), self.width.into(), self.height.into()]
    }
}

/// A PDF holding exactly one page, written once.
pub(crate) struct SinglePageDocument {
    document: Document,
    pages_id: ObjectId,
}

impl SinglePageDocument {
    pub(crate) fn new(title: &str) -> Self {
        let mut document = Document::with_version("1.5");
        let info_id = document.add_object(dictionary! {
            "Title" => Object::string_literal(title),
            "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
        });
        document.trailer.set("Info", info_id);
        let pages_id = document.new_object_id();

        Self { document, pages_id }
    }

    pub(crate) fn add_object<T: Into<Object>>(&mut self, object: T) -> ObjectId {
        self.document.add_object(object)
    }

    pub(crate) fn write(
        mut self,
        size: PageSize,
        resources: Dictionary,
        content: Content,
        destination: &Path,
    ) -> Result<(), RenderError> {
        let encoded = content
            .encode()
            .map_err(|error| RenderError::Encoding(error.to_string()))?;
        let content_id = self.document.add_object(Stream::new(dictionary! {}, encoded));

        // MediaBox and Resources sit on the page itself so it survives being
        // re-parented by the assembler.
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => size.media_box(),
            "Resources" => resources,
            "Contents" => content_id,
        });
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        self.document.compress();

        self.document
            .save(destination)
            .map_err(|error| RenderError::Write {
                path: destination.display().to_string(),
                message: error.to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn write_blank_page(destination: &Path, size: PageSize) -> Result<(), RenderError> {
    SinglePageDocument::new("blank").write(
        size,
        Dictionary::new(),
        Content { operations: vec![] },
        destination,
    )
}

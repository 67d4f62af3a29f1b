//! Document source backed by a local directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::knowledge_base::{Document, DocumentSource};
use crate::domain::DomainError;

/// Reads every text or PDF file in a directory as one document.
///
/// A non-empty corpus id selects a subdirectory of the root.
#[derive(Debug, Clone)]
pub struct DirectoryDocumentSource {
    root: PathBuf,
}

impl DirectoryDocumentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn corpus_dir(&self, corpus_id: &str) -> PathBuf {
        let corpus_id = corpus_id.trim();
        if corpus_id.is_empty() {
            self.root.clone()
        } else {
            self.root.join(corpus_id)
        }
    }
}

/// How a corpus file is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Text,
    Pdf,
    Unsupported,
}

fn file_kind(path: &Path) -> FileKind {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    if mime.type_() == mime_guess::mime::TEXT
        || matches!(mime.subtype().as_str(), "json" | "xml" | "markdown" | "csv")
    {
        FileKind::Text
    } else if mime.subtype() == mime_guess::mime::PDF {
        FileKind::Pdf
    } else {
        FileKind::Unsupported
    }
}

/// Text of every page, separated by newlines.
///
/// Pages without extractable text are skipped; a PDF with no text at all is
/// an error.
fn extract_pdf_text(data: &[u8]) -> Result<String, DomainError> {
    let doc = lopdf::Document::load_mem(data)
        .map_err(|e| DomainError::validation(format!("not a readable PDF: {}", e)))?;

    let mut text = String::new();
    for page in doc.get_pages().into_keys() {
        match doc.extract_text(&[page]) {
            Ok(page_text) => {
                if !text.is_empty() && !page_text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&page_text);
            }
            Err(e) => debug!(page, error = %e, "No text on PDF page"),
        }
    }

    if text.trim().is_empty() {
        return Err(DomainError::validation("PDF contains no extractable text"));
    }

    Ok(text)
}

async fn read_text(kind: FileKind, path: &Path) -> Result<Option<String>, DomainError> {
    let bytes = tokio::fs::read(path).await?;

    match kind {
        FileKind::Text => Ok(String::from_utf8(bytes).ok()),
        FileKind::Pdf => {
            // lopdf is CPU bound; keep it off the async workers
            let extracted = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
                .await
                .map_err(|e| DomainError::internal(format!("PDF extraction task failed: {}", e)))?;
            Ok(extracted
                .inspect_err(|e| debug!(file = %path.display(), error = %e, "PDF extraction failed"))
                .ok())
        }
        FileKind::Unsupported => Ok(None),
    }
}

#[async_trait]
impl DocumentSource for DirectoryDocumentSource {
    async fn load(&self, corpus_id: &str) -> Result<Vec<Document>, DomainError> {
        let dir = self.corpus_dir(corpus_id);

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
            DomainError::io(format!("Cannot read corpus directory {}: {}", dir.display(), e))
        })?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            files.push((name, entry.path()));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut documents = Vec::with_capacity(files.len());
        for (name, path) in files {
            let kind = file_kind(&path);
            if kind == FileKind::Unsupported {
                debug!(file = %name, "Skipping unsupported file");
                continue;
            }

            match read_text(kind, &path).await? {
                Some(text) => documents.push(Document::new(name, text)),
                None => warn!(file = %name, ?kind, "Skipping file whose text cannot be decoded"),
            }
        }

        info!(directory = %dir.display(), documents = documents.len(), "Loaded corpus");

        Ok(documents)
    }

    fn source_name(&self) -> &'static str {
        "directory"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn corpus() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b-faq.md"), "# FAQ\nStart light and build.").unwrap();
        fs::write(dir.path().join("a-guide.txt"), "RUKVEST weights").unwrap();
        fs::write(dir.path().join("photo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
        fs::write(dir.path().join("broken.txt"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join(".hidden.txt"), "secret").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_loads_text_files_sorted_by_name() {
        let dir = corpus();
        let source = DirectoryDocumentSource::new(dir.path());

        let documents = source.load("").await.unwrap();

        let names: Vec<&str> = documents.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["a-guide.txt", "b-faq.md"]);
        assert_eq!(documents[0].text(), "RUKVEST weights");
    }

    #[tokio::test]
    async fn test_corpus_id_selects_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("store")).unwrap();
        fs::write(dir.path().join("store").join("returns.txt"), "30 days").unwrap();
        fs::write(dir.path().join("root.txt"), "ignored").unwrap();

        let documents = DirectoryDocumentSource::new(dir.path())
            .load("store")
            .await
            .unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name(), "returns.txt");
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryDocumentSource::new(dir.path().join("missing"));

        let err = source.load("").await.unwrap_err();

        assert!(matches!(err, DomainError::Io { .. }));
    }

    #[test]
    fn test_file_kind_detection() {
        assert_eq!(file_kind(Path::new("notes.txt")), FileKind::Text);
        assert_eq!(file_kind(Path::new("faq.md")), FileKind::Text);
        assert_eq!(file_kind(Path::new("data.json")), FileKind::Text);
        assert_eq!(file_kind(Path::new("RUKVEST Guide.pdf")), FileKind::Pdf);
        assert_eq!(file_kind(Path::new("image.png")), FileKind::Unsupported);
        assert_eq!(file_kind(Path::new("no_extension")), FileKind::Unsupported);
    }

    fn write_pdf(path: &Path, line: &str) {
        use lopdf::content::{Content, Operation};
        use lopdf::{dictionary, Object, Stream};

        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_pdf_text_is_extracted() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("RUKVEST Guide.pdf"), "RUKVEST weights start at 3kg");
        fs::write(dir.path().join("faq.txt"), "Start light").unwrap();

        let documents = DirectoryDocumentSource::new(dir.path()).load("").await.unwrap();

        let names: Vec<&str> = documents.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["RUKVEST Guide.pdf", "faq.txt"]);
        assert!(documents[0].text().contains("RUKVEST weights start at 3kg"));
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("corrupt.pdf"), b"%PDF-1.5 truncated").unwrap();
        fs::write(dir.path().join("returns.txt"), "30 days").unwrap();

        let documents = DirectoryDocumentSource::new(dir.path()).load("").await.unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].name(), "returns.txt");
    }
}

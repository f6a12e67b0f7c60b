//! Page text from the input document.
//!
//! PDFs go through `pdf-extract`; anything else is read as UTF-8 text with
//! form feeds between pages (the layout `pdftotext` produces).

use std::path::{Path, PathBuf};

use benchforge_core::ConvertError;
use tracing::{debug, info};

const PAGE_BREAK: char = '\x0c';

/// Load every page of `path`. Extraction runs on the blocking pool.
pub async fn load_pages(path: &Path) -> Result<Vec<String>, ConvertError> {
    let owned: PathBuf = path.to_path_buf();
    let pages = tokio::task::spawn_blocking(move || read_pages(&owned))
        .await
        .map_err(|err| {
            ConvertError::ExtractionUnavailable(format!("{}: extractor crashed: {err}", path.display()))
        })??;
    info!(path = %path.display(), pages = pages.len(), "Extracted document text");
    Ok(pages)
}

fn read_pages(path: &Path) -> Result<Vec<String>, ConvertError> {
    let unavailable =
        |reason: String| ConvertError::ExtractionUnavailable(format!("{}: {reason}", path.display()));

    if !path.is_file() {
        return Err(unavailable("no such file".to_string()));
    }

    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    let pages = if is_pdf {
        debug!(path = %path.display(), "Reading PDF");
        pdf_extract::extract_text_by_pages(path).map_err(|err| unavailable(err.to_string()))?
    } else {
        debug!(path = %path.display(), "Reading text export");
        let text = std::fs::read_to_string(path).map_err(|err| unavailable(err.to_string()))?;
        split_pages(&text)
    };

    if pages.iter().all(|p| p.trim().is_empty()) {
        return Err(unavailable("document has no extractable text".to_string()));
    }
    Ok(pages)
}

/// Split a text export on form feeds. A trailing empty page is dropped.
pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        assert_eq!(split_pages("cover\x0ccontents\x0cbody\x0c"), vec!["cover", "contents", "body"]);
        assert_eq!(split_pages("single page"), vec!["single page"]);
    }

    #[tokio::test]
    async fn missing_file_is_extraction_unavailable() {
        let err = load_pages(Path::new("/definitely/not/here.pdf")).await.unwrap_err();
        assert!(matches!(err, ConvertError::ExtractionUnavailable(_)));
    }

    #[tokio::test]
    async fn blank_text_is_extraction_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "\x0c \x0c").unwrap();
        let err = load_pages(&path).await.unwrap_err();
        assert!(err.to_string().contains("no extractable text"));
    }

    #[tokio::test]
    async fn reads_text_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchmark.txt");
        std::fs::write(&path, "CIS Benchmark\x0c1.1 Ensure x (Automated)").unwrap();
        let pages = load_pages(&path).await.unwrap();
        assert_eq!(pages.len(), 2);
    }
}

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a markdown source file and return its content
pub fn read_source(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Write rendered markup, creating parent directories as needed
pub fn write_html(path: &Path, html: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::write(path, html)?)
}

/// Where the rendering of `input` goes inside `out_dir`: `<stem>.html`
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "index".into(), |s| s.to_string_lossy());
    out_dir.join(format!("{stem}.html"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_dir, create_test_file};

    #[test]
    fn test_read_source_success() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "test.md", "# Test Content\n\nParagraph");

        let content = read_source(&path).unwrap();
        assert_eq!(content, "# Test Content\n\nParagraph");
    }

    #[test]
    fn test_read_source_not_found() {
        let dir = create_test_dir();
        let result = read_source(&dir.path().join("nonexistent.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
        assert!(result.unwrap_err().to_string().contains("nonexistent.md"));
    }

    #[test]
    fn test_write_html_creates_parent_directories() {
        let dir = create_test_dir();
        let path = dir.path().join("site").join("nested").join("page.html");

        write_html(&path, "<h1>hi</h1>\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<h1>hi</h1>\n");
        assert!(dir.path().join("site").join("nested").is_dir());
    }

    #[test]
    fn test_write_html_overwrites_existing() {
        let dir = create_test_dir();
        let path = create_test_file(&dir, "page.html", "old");

        write_html(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_output_path_uses_file_stem() {
        let out = output_path_for(Path::new("notes/journal.md"), Path::new("/tmp/site"));
        assert_eq!(out, PathBuf::from("/tmp/site/journal.html"));
    }

    #[test]
    fn test_output_path_without_extension() {
        let out = output_path_for(Path::new("README"), Path::new("out"));
        assert_eq!(out, PathBuf::from("out/README.html"));
    }
}

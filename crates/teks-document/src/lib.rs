use std::fs;
use std::path::{Path, PathBuf};

use teks_buffer::{NewlineStyle, NewlineStyleSet, TextBuffer};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document has no path to save to")]
    NoPath,
}

/// A buffer together with where it came from and how its newlines were encoded.
///
/// The buffer always holds LF-normalized text; the recorded newline styles
/// decide how it is written back out.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    buffer: TextBuffer,
    path: Option<PathBuf>,
    newline_styles: NewlineStyleSet,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty, unsaved document using LF newlines.
    pub fn new() -> Self {
        Self::from_buffer(TextBuffer::new())
    }

    pub fn from_buffer(buffer: TextBuffer) -> Self {
        Self::from_parts(buffer, None, NewlineStyleSet::of(&[NewlineStyle::Lf]))
    }

    pub fn with_path(buffer: TextBuffer, path: impl Into<PathBuf>) -> Self {
        Self::from_parts(
            buffer,
            Some(path.into()),
            NewlineStyleSet::of(&[NewlineStyle::Lf]),
        )
    }

    pub fn from_parts(
        buffer: TextBuffer,
        path: Option<PathBuf>,
        newline_styles: NewlineStyleSet,
    ) -> Self {
        Self {
            buffer,
            path,
            newline_styles,
        }
    }

    /// Ingest raw bytes, recording the newline styles they used.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let (buffer, newline_styles) = TextBuffer::from_raw_text(bytes);
        Self::from_parts(buffer, None, newline_styles)
    }

    /// Read a file as raw bytes. No text encoding is assumed.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DocumentError::NotFound(path.to_path_buf()));
        }

        let bytes = fs::read(path)?;
        let mut document = Self::from_bytes(&bytes);
        document.path = Some(path.to_path_buf());

        log::info!(
            "opened {} ({} bytes, {:?})",
            path.display(),
            bytes.len(),
            document.newline_styles.iter().collect::<Vec<_>>()
        );
        Ok(document)
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn newline_styles(&self) -> NewlineStyleSet {
        self.newline_styles
    }

    /// Style to write newlines in: the one the file consistently used, else LF.
    pub fn preferred_newline(&self) -> NewlineStyle {
        self.newline_styles.single().unwrap_or(NewlineStyle::Lf)
    }

    /// Buffer content with every newline encoded as `style`.
    pub fn to_bytes(&self, style: NewlineStyle) -> Vec<u8> {
        let content = self.buffer.as_bytes();
        if style == NewlineStyle::Lf {
            return content.to_vec();
        }

        let newline = style.as_bytes();
        let mut out = Vec::with_capacity(content.len() + self.buffer.lines().line_count());
        for (index, line) in content.split(|b| *b == b'\n').enumerate() {
            if index > 0 {
                out.extend_from_slice(newline);
            }
            out.extend_from_slice(line);
        }
        out
    }

    /// Write to the document's own path.
    pub fn save(&mut self, style: NewlineStyle) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;
        self.save_as(path, style)
    }

    /// Write to `path`, which becomes the document's path.
    ///
    /// Afterwards the document reports `style` as its only newline style.
    pub fn save_as(
        &mut self,
        path: impl Into<PathBuf>,
        style: NewlineStyle,
    ) -> Result<(), DocumentError> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let bytes = self.to_bytes(style);
        fs::write(&path, &bytes)?;
        log::debug!("saved {} ({} bytes, {style:?})", path.display(), bytes.len());

        self.path = Some(path);
        self.newline_styles = NewlineStyleSet::of(&[style]);
        Ok(())
    }
}

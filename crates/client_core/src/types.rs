use std::{fs, io, path::Path, sync::Arc};

use shared::{
    domain::{ArtifactKind, PageNumber, MAX_UPLOAD_BYTES},
    protocol::PageArtifact,
};

use crate::codec::format_base64_size;

/// A file picked by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    size: u64,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Builds a candidate from disk, guessing the media type from the
    /// extension. Content of files over the upload limit is never read; the
    /// declared size alone is enough for validation to reject them.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document.pdf")
            .to_string();
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        let size = metadata.len();
        let bytes = if size <= MAX_UPLOAD_BYTES {
            fs::read(path)?
        } else {
            Vec::new()
        };

        Ok(Self {
            name,
            media_type,
            size,
            bytes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Danger,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Something a result card lets the user do. Each action owns the payload of
/// the page it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    Download {
        kind: ArtifactKind,
        page_number: PageNumber,
        base64: Arc<str>,
    },
    Copy {
        kind: ArtifactKind,
        base64: Arc<str>,
    },
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::Download {
                kind: ArtifactKind::Pdf,
                ..
            } => "Download PDF",
            CardAction::Download {
                kind: ArtifactKind::Png,
                ..
            } => "Download PNG",
            CardAction::Copy {
                kind: ArtifactKind::Pdf,
                ..
            } => "Copy PDF Base64",
            CardAction::Copy {
                kind: ArtifactKind::Png,
                ..
            } => "Copy Image Base64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCard {
    pub page_number: PageNumber,
    pub size_label: String,
    pub preview_png_base64: Option<Arc<str>>,
    pub actions: Vec<CardAction>,
}

impl PageCard {
    pub fn from_artifact(artifact: PageArtifact) -> Self {
        let pdf: Arc<str> = Arc::from(artifact.pdf_base64);
        let image: Option<Arc<str>> = artifact.image_base64.map(Arc::from);
        let page_number = artifact.page_number;

        let mut actions = vec![CardAction::Download {
            kind: ArtifactKind::Pdf,
            page_number,
            base64: Arc::clone(&pdf),
        }];
        if let Some(image) = &image {
            actions.push(CardAction::Download {
                kind: ArtifactKind::Png,
                page_number,
                base64: Arc::clone(image),
            });
        }
        actions.push(CardAction::Copy {
            kind: ArtifactKind::Pdf,
            base64: Arc::clone(&pdf),
        });
        if let Some(image) = &image {
            actions.push(CardAction::Copy {
                kind: ArtifactKind::Png,
                base64: Arc::clone(image),
            });
        }

        Self {
            page_number,
            size_label: format_base64_size(&pdf),
            preview_png_base64: image,
            actions,
        }
    }

    pub fn has_image(&self) -> bool {
        self.preview_png_base64.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub total_pages: u32,
    pub cards: Vec<PageCard>,
}

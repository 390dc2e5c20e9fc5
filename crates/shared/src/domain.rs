use std::fmt;

use serde::{Deserialize, Serialize};

/// Only media type accepted by the split endpoint.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Upload ceiling enforced before any network call (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const SPLIT_ENDPOINT_PATH: &str = "/api/split-pdf";

macro_rules! number_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

number_newtype!(PageNumber);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Pdf,
    Png,
}

impl ArtifactKind {
    pub fn media_type(self) -> &'static str {
        match self {
            ArtifactKind::Pdf => PDF_MEDIA_TYPE,
            ArtifactKind::Png => PNG_MEDIA_TYPE,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Pdf => "pdf",
            ArtifactKind::Png => "png",
        }
    }

    /// Local file name for a saved page, e.g. `page_3.pdf`.
    pub fn file_name(self, page_number: PageNumber) -> String {
        format!("page_{page_number}.{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_page_number() {
        assert_eq!(ArtifactKind::Pdf.file_name(PageNumber(1)), "page_1.pdf");
        assert_eq!(ArtifactKind::Png.file_name(PageNumber(12)), "page_12.png");
    }

    #[test]
    fn upload_limit_is_ten_mebibytes() {
        assert_eq!(MAX_UPLOAD_BYTES, 10_485_760);
    }
}

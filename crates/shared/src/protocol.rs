use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{domain::PageNumber, error::ProtocolError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitPdfRequest {
    pub pdf_base64: String,
}

/// Raw body of a `/api/split-pdf` response, before contract checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitPdfResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<PageWire>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One page as it appears on the wire. Older servers name the PDF payload
/// `base64` instead of `pdf_base64`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageWire {
    pub page_number: PageNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageArtifact {
    pub page_number: PageNumber,
    pub pdf_base64: String,
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitResult {
    Split {
        total_pages: u32,
        pages: Vec<PageArtifact>,
    },
    Rejected {
        error: String,
    },
}

pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

impl TryFrom<PageWire> for PageArtifact {
    type Error = ProtocolError;

    fn try_from(value: PageWire) -> Result<Self, Self::Error> {
        if value.page_number.0 == 0 {
            return Err(ProtocolError::ZeroPageNumber);
        }
        let pdf_base64 = value
            .pdf_base64
            .or(value.base64)
            .ok_or(ProtocolError::MissingPagePayload(value.page_number))?;
        Ok(Self {
            page_number: value.page_number,
            pdf_base64,
            image_base64: value.image_base64.filter(|image| !image.is_empty()),
        })
    }
}

impl SplitPdfResponse {
    /// Applies the response contract. Page order is kept exactly as sent.
    pub fn into_result(self) -> Result<SplitResult, ProtocolError> {
        if !self.success {
            return Ok(SplitResult::Rejected {
                error: self
                    .error
                    .filter(|error| !error.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            });
        }

        let wire_pages = self.pages.ok_or(ProtocolError::MissingPages)?;
        let mut seen = HashSet::with_capacity(wire_pages.len());
        let mut pages = Vec::with_capacity(wire_pages.len());
        for wire in wire_pages {
            let page = PageArtifact::try_from(wire)?;
            if !seen.insert(page.page_number) {
                return Err(ProtocolError::DuplicatePage(page.page_number));
            }
            pages.push(page);
        }

        let total_pages = self.total_pages.unwrap_or(pages.len() as u32);
        Ok(SplitResult::Split { total_pages, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<SplitResult, ProtocolError> {
        serde_json::from_str::<SplitPdfResponse>(body)
            .expect("json body")
            .into_result()
    }

    #[test]
    fn accepts_both_pdf_payload_keys_in_server_order() {
        let result = parse(
            r#"{"success":true,"total_pages":2,"pages":[
                {"page_number":2,"base64":"BB==","image_base64":"CC=="},
                {"page_number":1,"pdf_base64":"AA==","image_base64":null}
            ]}"#,
        )
        .expect("valid response");

        let SplitResult::Split { total_pages, pages } = result else {
            panic!("expected split result");
        };
        assert_eq!(total_pages, 2);
        assert_eq!(pages[0].page_number, PageNumber(2));
        assert_eq!(pages[0].pdf_base64, "BB==");
        assert_eq!(pages[0].image_base64.as_deref(), Some("CC=="));
        assert_eq!(pages[1].page_number, PageNumber(1));
        assert_eq!(pages[1].image_base64, None);
    }

    #[test]
    fn prefers_pdf_base64_when_both_keys_exist() {
        let result = parse(
            r#"{"success":true,"pages":[{"page_number":1,"pdf_base64":"AA==","base64":"ZZ=="}]}"#,
        )
        .expect("valid response");
        let SplitResult::Split { total_pages, pages } = result else {
            panic!("expected split result");
        };
        assert_eq!(total_pages, 1);
        assert_eq!(pages[0].pdf_base64, "AA==");
    }

    #[test]
    fn failure_body_keeps_server_message() {
        let result = parse(r#"{"success":false,"error":"corrupt file"}"#).expect("failure body");
        assert_eq!(
            result,
            SplitResult::Rejected {
                error: "corrupt file".to_string()
            }
        );
    }

    #[test]
    fn failure_without_message_gets_placeholder() {
        let result = parse(r#"{"success":false}"#).expect("failure body");
        assert_eq!(
            result,
            SplitResult::Rejected {
                error: UNKNOWN_SERVER_ERROR.to_string()
            }
        );
    }

    #[test]
    fn rejects_page_without_payload() {
        let err = parse(r#"{"success":true,"pages":[{"page_number":4}]}"#)
            .expect_err("missing payload");
        assert_eq!(err, ProtocolError::MissingPagePayload(PageNumber(4)));
    }

    #[test]
    fn rejects_success_without_pages() {
        let err = parse(r#"{"success":true,"total_pages":3}"#).expect_err("missing pages");
        assert_eq!(err, ProtocolError::MissingPages);
    }

    #[test]
    fn rejects_duplicate_page_numbers() {
        let err = parse(
            r#"{"success":true,"pages":[
                {"page_number":1,"pdf_base64":"AA=="},
                {"page_number":1,"pdf_base64":"BB=="}
            ]}"#,
        )
        .expect_err("duplicate page");
        assert_eq!(err, ProtocolError::DuplicatePage(PageNumber(1)));
    }

    #[test]
    fn request_serializes_single_field() {
        let body = serde_json::to_value(SplitPdfRequest {
            pdf_base64: "JVBERi0=".to_string(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "pdf_base64": "JVBERi0=" }));
    }
}

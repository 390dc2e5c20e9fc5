use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use shared::{
    domain::{ArtifactKind, PageNumber, MAX_UPLOAD_BYTES, PDF_MEDIA_TYPE},
    protocol::{SplitPdfRequest, SplitResult},
};
use tracing::{debug, info, warn};

use crate::{
    codec::{decode_base64, encode_base64},
    error::{SplitError, UploadError},
    sinks::{ClipboardSink, DownloadSink},
    transport::SplitApi,
    types::{CardAction, Notice, NoticeLevel, PageCard, ResultsView, SelectedFile},
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Busy { started_at: Instant },
}

/// One prepared split request. Owns everything it needs so it can run on a
/// different thread than the controller that issued it.
#[derive(Debug, Clone)]
pub struct SplitJob {
    request: SplitPdfRequest,
    timeout: Duration,
}

impl SplitJob {
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn run(&self, api: &dyn SplitApi) -> Result<SplitResult, SplitError> {
        match tokio::time::timeout(self.timeout, api.split(&self.request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(SplitError::Timeout(self.timeout)),
        }
    }
}

/// Owns the selected file, the Idle/Busy request state, the single notice
/// slot and the rendered results. Front ends read its accessors and feed user
/// intents back through its methods.
pub struct UploadController {
    selected: Option<SelectedFile>,
    request: RequestState,
    notice: Option<Notice>,
    results: Option<ResultsView>,
    request_timeout: Duration,
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl UploadController {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            selected: None,
            request: RequestState::Idle,
            notice: None,
            results: None,
            request_timeout,
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.request, RequestState::Busy { .. })
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.selected.is_some() && !self.is_busy()
    }

    pub fn clear_enabled(&self) -> bool {
        self.selected.is_some() && !self.is_busy()
    }

    pub fn picker_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Shows a message raised by the front end itself, e.g. an unreadable
    /// file on disk.
    pub fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Replaces the current selection. `None` models the user emptying the
    /// picker.
    pub fn select(&mut self, file: Option<SelectedFile>) -> Result<(), UploadError> {
        if self.is_busy() {
            return Err(self.report(UploadError::Busy));
        }

        let Some(file) = file else {
            self.selected = None;
            return Ok(());
        };

        if file.media_type() != PDF_MEDIA_TYPE {
            self.selected = None;
            return Err(self.report(UploadError::InvalidType {
                declared: file.media_type().to_string(),
            }));
        }
        if file.size() > MAX_UPLOAD_BYTES {
            self.selected = None;
            return Err(self.report(UploadError::TooLarge {
                size: file.size(),
                limit: MAX_UPLOAD_BYTES,
            }));
        }

        debug!(name = file.name(), bytes = file.size(), "pdf selected");
        self.selected = Some(file);
        self.notice = None;
        self.results = None;
        Ok(())
    }

    /// Idle -> Busy. The returned job must be handed back through
    /// [`UploadController::finish_submit`] once it completes.
    pub fn begin_submit(&mut self) -> Result<SplitJob, UploadError> {
        if self.is_busy() {
            return Err(self.report(UploadError::Busy));
        }
        let Some(file) = self.selected.as_ref() else {
            return Err(self.report(UploadError::NoFileSelected));
        };

        let request = SplitPdfRequest {
            pdf_base64: encode_base64(file.bytes()),
        };
        info!(name = file.name(), bytes = file.size(), "submitting pdf for splitting");
        self.request = RequestState::Busy {
            started_at: Instant::now(),
        };

        Ok(SplitJob {
            request,
            timeout: self.request_timeout,
        })
    }

    /// Busy -> Idle. Returns the number of rendered cards on success. An
    /// outcome arriving while Idle is dropped and leaves the view untouched.
    pub fn finish_submit(
        &mut self,
        outcome: Result<SplitResult, SplitError>,
    ) -> Result<usize, UploadError> {
        match std::mem::replace(&mut self.request, RequestState::Idle) {
            RequestState::Busy { started_at } => {
                debug!(elapsed_ms = started_at.elapsed().as_millis() as u64, "split finished");
            }
            RequestState::Idle => {
                warn!("split outcome arrived with no request in flight");
                return Err(UploadError::NoRequestInFlight);
            }
        }

        match outcome {
            Ok(SplitResult::Split { total_pages, pages }) => {
                let cards: Vec<PageCard> = pages.into_iter().map(PageCard::from_artifact).collect();
                let rendered = cards.len();
                self.notice = Some(Notice::new(
                    NoticeLevel::Success,
                    format!("Split PDF into {total_pages} page(s)."),
                ));
                self.results = Some(ResultsView { total_pages, cards });
                Ok(rendered)
            }
            Ok(SplitResult::Rejected { error }) => {
                Err(self.report(UploadError::ServerReportedError(error)))
            }
            Err(err) => Err(self.report(err.into())),
        }
    }

    pub async fn submit(&mut self, api: &dyn SplitApi) -> Result<usize, UploadError> {
        let job = self.begin_submit()?;
        let outcome = job.run(api).await;
        self.finish_submit(outcome)
    }

    pub fn clear_all(&mut self) {
        if self.is_busy() {
            self.report(UploadError::Busy);
            return;
        }
        self.selected = None;
        self.notice = None;
        self.results = None;
    }

    pub fn download_pdf_page(
        &mut self,
        page_number: PageNumber,
        base64_pdf: &str,
        sink: &mut dyn DownloadSink,
    ) -> Result<Option<PathBuf>, UploadError> {
        self.download_page(ArtifactKind::Pdf, page_number, base64_pdf, sink)
    }

    pub fn download_image_page(
        &mut self,
        page_number: PageNumber,
        base64_png: &str,
        sink: &mut dyn DownloadSink,
    ) -> Result<Option<PathBuf>, UploadError> {
        self.download_page(ArtifactKind::Png, page_number, base64_png, sink)
    }

    fn download_page(
        &mut self,
        kind: ArtifactKind,
        page_number: PageNumber,
        base64_text: &str,
        sink: &mut dyn DownloadSink,
    ) -> Result<Option<PathBuf>, UploadError> {
        let decode_failed = |reason: String| UploadError::DownloadDecodeError {
            page_number,
            reason,
        };

        let bytes = match decode_base64(base64_text) {
            Ok(bytes) => bytes,
            Err(err) => return Err(self.report(decode_failed(err.to_string()))),
        };
        let file_name = kind.file_name(page_number);
        let saved = match sink.save(&file_name, kind.media_type(), &bytes) {
            Ok(saved) => saved,
            Err(err) => return Err(self.report(decode_failed(err.to_string()))),
        };

        let what = match kind {
            ArtifactKind::Pdf => "PDF",
            ArtifactKind::Png => "image",
        };
        self.notice = Some(match &saved {
            Some(path) => Notice::new(
                NoticeLevel::Success,
                format!("Saved page {page_number} {what} to {}.", path.display()),
            ),
            None => Notice::new(
                NoticeLevel::Info,
                format!("Download of page {page_number} {what} cancelled."),
            ),
        });
        Ok(saved)
    }

    pub fn copy_to_clipboard(
        &mut self,
        base64_text: &str,
        clipboard: &mut dyn ClipboardSink,
    ) -> Result<(), UploadError> {
        if let Err(reason) = clipboard.write_text(base64_text) {
            return Err(self.report(UploadError::ClipboardError { reason }));
        }
        self.notice = Some(Notice::new(
            NoticeLevel::Success,
            "Base64 data copied to clipboard.",
        ));
        Ok(())
    }

    /// Dispatches a card action to the matching download or copy operation.
    pub fn perform(
        &mut self,
        action: &CardAction,
        downloads: &mut dyn DownloadSink,
        clipboard: &mut dyn ClipboardSink,
    ) -> Result<(), UploadError> {
        match action {
            CardAction::Download {
                kind,
                page_number,
                base64,
            } => self
                .download_page(*kind, *page_number, base64, downloads)
                .map(|_| ()),
            CardAction::Copy { base64, .. } => self.copy_to_clipboard(base64, clipboard),
        }
    }

    fn report(&mut self, err: UploadError) -> UploadError {
        match err.notice_level() {
            NoticeLevel::Danger => warn!(error = %err, "upload operation failed"),
            _ => debug!(error = %err, "upload operation declined"),
        }
        if let UploadError::ClipboardError { reason } = &err {
            warn!(%reason, "clipboard write failed");
        }
        self.notice = Some(Notice::new(err.notice_level(), err.to_string()));
        err
    }
}

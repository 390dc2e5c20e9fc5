//! Destinations for card actions: local file saves and the system clipboard.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use arboard::Clipboard;
use tracing::debug;

pub trait DownloadSink {
    /// Stores one decoded artifact. `Ok(None)` means the user declined to
    /// pick a destination.
    fn save(&mut self, file_name: &str, media_type: &str, bytes: &[u8])
        -> io::Result<Option<PathBuf>>;
}

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// Saves every artifact into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(
        &mut self,
        file_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> io::Result<Option<PathBuf>> {
        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(file_name);
        write_via_partial(&target, bytes)?;
        debug!(path = %target.display(), media_type, bytes = bytes.len(), "saved artifact");
        Ok(Some(target))
    }
}

/// Writes to `<target>.part` and renames into place. The partial file is
/// removed on every failure path.
pub fn write_via_partial(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut partial = target.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let written = fs::write(&partial, bytes).and_then(|()| fs::rename(&partial, target));
    if written.is_err() {
        let _ = fs::remove_file(&partial);
    }
    written
}

/// Clipboard backed by the desktop session. The handle is kept alive so the
/// copied text survives on platforms where the owning process serves it.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        if self.handle.is_none() {
            self.handle = Some(Clipboard::new().map_err(|err| err.to_string())?);
        }
        let clipboard = self
            .handle
            .as_mut()
            .ok_or_else(|| "clipboard unavailable".to_string())?;
        clipboard
            .set_text(text.to_string())
            .map_err(|err| err.to_string())
    }
}

use std::{
    io,
    path::{Path, PathBuf},
};

use client_core::{sinks::write_via_partial, DownloadSink};

/// Asks the user where each artifact goes, starting in the last directory
/// used.
pub struct SaveDialogSink {
    last_dir: Option<PathBuf>,
}

impl SaveDialogSink {
    pub fn new(start_dir: Option<PathBuf>) -> Self {
        Self {
            last_dir: start_dir,
        }
    }
}

impl DownloadSink for SaveDialogSink {
    fn save(
        &mut self,
        file_name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> io::Result<Option<PathBuf>> {
        let extension = file_name.rsplit('.').next().unwrap_or_default();
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(file_name)
            .add_filter(media_type, &[extension]);
        if let Some(dir) = &self.last_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return Ok(None);
        };

        write_via_partial(&path, bytes)?;
        self.last_dir = path.parent().map(Path::to_path_buf);
        Ok(Some(path))
    }
}

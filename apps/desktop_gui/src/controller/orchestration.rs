//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{SplitError, UploadController};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Starts a split on the backend. When the job cannot be queued the
/// controller is moved straight back to idle with the failure shown.
pub fn dispatch_split(cmd_tx: &Sender<BackendCommand>, controller: &mut UploadController) {
    let Ok(job) = controller.begin_submit() else {
        return;
    };

    let failure = match cmd_tx.try_send(BackendCommand::Split(job)) {
        Ok(()) => {
            tracing::debug!(command = "split", "queued ui->backend command");
            return;
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "Backend command processor disconnected (possible startup/runtime failure)"
        }
    };
    let _ = controller.finish_submit(Err(SplitError::Transport(failure.to_string())));
}

#[cfg(test)]
mod tests {
    use client_core::{NoticeLevel, SelectedFile};
    use crossbeam_channel::bounded;

    use super::*;

    fn ready_controller() -> UploadController {
        let mut controller = UploadController::default();
        controller
            .select(Some(SelectedFile::new(
                "doc.pdf",
                "application/pdf",
                b"%PDF".to_vec(),
            )))
            .expect("select");
        controller
    }

    #[test]
    fn queued_split_leaves_controller_busy() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut controller = ready_controller();

        dispatch_split(&cmd_tx, &mut controller);

        assert!(controller.is_busy());
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Split(_))));
    }

    #[test]
    fn disconnected_backend_returns_controller_to_idle() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut controller = ready_controller();

        dispatch_split(&cmd_tx, &mut controller);

        assert!(!controller.is_busy());
        let notice = controller.notice().expect("notice");
        assert_eq!(notice.level, NoticeLevel::Danger);
        assert!(notice.text.contains("disconnected"));
    }

    #[test]
    fn full_queue_returns_controller_to_idle() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        cmd_tx.try_send(BackendCommand::Shutdown).expect("fill queue");
        let mut controller = ready_controller();

        dispatch_split(&cmd_tx, &mut controller);

        assert!(!controller.is_busy());
        assert!(controller
            .notice()
            .is_some_and(|notice| notice.text.contains("queue is full")));
    }

    #[test]
    fn missing_file_never_reaches_backend() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut controller = UploadController::default();

        dispatch_split(&cmd_tx, &mut controller);

        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(
            controller.notice().map(|notice| notice.level),
            Some(NoticeLevel::Warning)
        );
    }
}

//! Runtime bridge between UI command queue and backend event intake.

use std::thread::{self, JoinHandle};

use client_core::{HttpSplitClient, SplitError};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    server_url: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let client = HttpSplitClient::new(&server_url).map_err(|err| err.to_string());
        if let Err(reason) = &client {
            tracing::error!(%reason, "split client unavailable");
            let _ = ui_tx.try_send(UiEvent::BackendUnavailable(reason.clone()));
        }

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend received command");
                match cmd {
                    BackendCommand::Split(job) => {
                        tracing::debug!(timeout_secs = job.timeout().as_secs(), "running split job");
                        let outcome = match &client {
                            Ok(client) => job.run(client).await,
                            Err(reason) => Err(SplitError::Transport(format!(
                                "split client unavailable: {reason}"
                            ))),
                        };
                        if ui_tx.send(UiEvent::SplitFinished(outcome)).is_err() {
                            tracing::warn!("ui event queue closed; dropping split outcome");
                            break;
                        }
                    }
                    BackendCommand::Shutdown => break,
                }
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use std::{net::TcpListener, time::Duration};

    use client_core::{SelectedFile, UploadController};
    use crossbeam_channel::bounded;

    use super::*;

    fn prepared_job() -> client_core::SplitJob {
        let mut controller = UploadController::new(Duration::from_secs(5));
        controller
            .select(Some(SelectedFile::new(
                "doc.pdf",
                "application/pdf",
                b"%PDF".to_vec(),
            )))
            .expect("select");
        controller.begin_submit().expect("begin")
    }

    #[test]
    fn invalid_server_url_fails_jobs_instead_of_hanging() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let handle = launch("not a url".to_string(), cmd_rx, ui_tx);

        let first = ui_rx.recv_timeout(Duration::from_secs(5)).expect("event");
        assert!(matches!(first, UiEvent::BackendUnavailable(_)));

        cmd_tx
            .send(BackendCommand::Split(prepared_job()))
            .expect("queue job");
        let finished = ui_rx.recv_timeout(Duration::from_secs(5)).expect("event");
        assert!(matches!(
            finished,
            UiEvent::SplitFinished(Err(SplitError::Transport(_)))
        ));

        cmd_tx.send(BackendCommand::Shutdown).expect("shutdown");
        handle.join().expect("backend thread");
    }

    #[test]
    fn unreachable_server_reports_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let handle = launch(format!("http://{addr}"), cmd_rx, ui_tx);

        cmd_tx
            .send(BackendCommand::Split(prepared_job()))
            .expect("queue job");
        let finished = ui_rx.recv_timeout(Duration::from_secs(10)).expect("event");
        assert!(matches!(finished, UiEvent::SplitFinished(Err(_))));

        drop(cmd_tx);
        handle.join().expect("backend thread");
    }
}

use tokio::sync::watch::Sender;
use crate::error::SessionError;
use crate::transfer_status::TransferStatus;

pub struct TransferSender {
    pub progress_sender: Sender<f64>,
    pub status_line_sender: Sender<String>,
    pub status_sender: Sender<TransferStatus>,
    pub error_sender: Sender<SessionError>,
}

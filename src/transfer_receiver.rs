use tokio::sync::watch::Receiver;
use crate::error::SessionError;
use crate::transfer_status::TransferStatus;

pub struct TransferReceiver {
    pub progress_receiver: Receiver<f64>,
    pub status_line_receiver: Receiver<String>,
    pub status_receiver: Receiver<TransferStatus>,
    pub error_receiver: Receiver<SessionError>,
}

use tokio::sync::watch::channel;
use crate::error::SessionError;
use crate::transfer_receiver::TransferReceiver;
use crate::transfer_sender::TransferSender;
use crate::transfer_status::TransferStatus;

pub fn new() -> (TransferSender, TransferReceiver) {
    let (progress_sender, progress_receiver) = channel(0f64);
    let (status_line_sender, status_line_receiver) = channel(String::new());
    let (status_sender, status_receiver) = channel(TransferStatus::Idle);
    let (error_sender, error_receiver) = channel(SessionError::None);
    let sender = TransferSender {
        progress_sender,
        status_line_sender,
        status_sender,
        error_sender,
    };
    let receiver = TransferReceiver {
        progress_receiver,
        status_line_receiver,
        status_receiver,
        error_receiver,
    };
    return (sender, receiver);
}

use std::fmt::{Display, Formatter};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum TransferStatus {
    Idle,
    Transfer,
    Complete,
    Cancelled,
    Failed,
}

impl Display for TransferStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferStatus::Idle => write!(f, "Idle"),
            TransferStatus::Transfer => write!(f, "Transfer"),
            TransferStatus::Complete => write!(f, "Complete"),
            TransferStatus::Cancelled => write!(f, "Cancelled"),
            TransferStatus::Failed => write!(f, "Failed"),
        }
    }
}

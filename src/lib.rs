//! # webget
//!
//! One http(s) transfer per invocation, with live progress for an operator
//! and cooperative cancellation.
//!
//! Features:
//! - Single background transfer worker streaming to an output sink
//! - Epsilon-throttled progress reporting, raw counters always current
//! - Periodic status line with cumulative-average throughput
//! - Cooperative abort on termination signals, no hard kill
//! - Interactive configuration commands on stdin

mod transfer_sender;
mod transfer_receiver;
pub mod abort;
pub mod cmdline;
pub mod error;
pub mod interactive;
pub mod progress_reporter;
pub mod session_context;
pub mod status_poller;
pub mod stream;
pub mod transfer_status;
pub mod transfer_task;
pub mod transfer_tracker;
pub mod unit_format;

pub use transfer_receiver::TransferReceiver;
pub use transfer_sender::TransferSender;

//! Transport-invoked progress accounting.
//!
//! The reporter is called once per received chunk, at whatever rate the
//! transport produces them. It is the sole cancellation checkpoint: once
//! the session token is cancelled every call returns an abort signal.
//! Visible progress updates are throttled by a 1% epsilon against the last
//! displayed fraction; the raw counters are stored unconditionally.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use crate::session_context::SessionContext;
use crate::transfer_sender::TransferSender;

pub const PCT_EPS: f64 = 0.01;

pub struct ProgressReporter {
    ctx: Arc<SessionContext>,
    sender: Arc<TransferSender>,
    last_fraction: f64,
}

impl ProgressReporter {
    pub fn new(ctx: Arc<SessionContext>, sender: Arc<TransferSender>) -> ProgressReporter {
        ProgressReporter {
            ctx,
            sender,
            last_fraction: 0f64,
        }
    }

    /// Records one progress sample. Returns false when the transfer must
    /// stop; the caller is expected to abort promptly.
    pub fn report(&mut self, total: u64, transferred: u64) -> bool {
        if self.ctx.cancel_token.is_cancelled() {
            return false;
        }

        let fraction = fraction(total, transferred);
        if self.ctx.config.progress && (fraction - self.last_fraction).abs() > PCT_EPS {
            self.last_fraction = fraction;
            let _ = self.sender.progress_sender.send(fraction);
        }

        self.ctx.transferred.store(transferred, Ordering::Relaxed);
        self.ctx.total.store(total, Ordering::Relaxed);
        true
    }
}

/// Completion fraction clamped to 1. A total of 0 means the size is
/// unknown and is displayed as complete rather than dividing by zero.
pub fn fraction(total: u64, transferred: u64) -> f64 {
    if total == 0 {
        return 1f64;
    }
    (transferred as f64 / total as f64).min(1f64)
}

#[cfg(test)]
mod test {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use crate::progress_reporter::{fraction, ProgressReporter};
    use crate::session_context::{SessionConfiguration, SessionContext};
    use crate::transfer_tracker;

    fn context(progress: bool) -> Arc<SessionContext> {
        let mut config = SessionConfiguration::new();
        config.progress = progress;
        Arc::new(SessionContext::new(config, String::new()))
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(100, 0), 0.0);
        assert_eq!(fraction(100, 50), 0.5);
        assert_eq!(fraction(100, 100), 1.0);
        assert_eq!(fraction(100, 150), 1.0);
        assert_eq!(fraction(0, 12345), 1.0);
        assert_eq!(fraction(0, 0), 1.0);
    }

    #[test]
    fn test_epsilon_throttles_against_last_displayed() {
        let ctx = context(true);
        let (sender, mut receiver) = transfer_tracker::new();
        let mut reporter = ProgressReporter::new(ctx, Arc::new(sender));

        // fractions 0.000, 0.004, 0.011 against a last-displayed baseline
        // of 0.0 must produce exactly one visible update
        let mut updates = 0;
        for transferred in [0u64, 4, 11] {
            assert!(reporter.report(1000, transferred));
            if receiver.progress_receiver.has_changed().unwrap() {
                updates += 1;
                receiver.progress_receiver.borrow_and_update();
            }
        }
        assert_eq!(updates, 1);
        assert_eq!(*receiver.progress_receiver.borrow(), 0.011);
    }

    #[test]
    fn test_quarter_steps_update_four_times() {
        let n = 1 << 20;
        let ctx = context(true);
        let (sender, mut receiver) = transfer_tracker::new();
        let mut reporter = ProgressReporter::new(ctx.clone(), Arc::new(sender));

        let mut updates = 0;
        for transferred in [0, n / 4, n / 2, 3 * n / 4, n] {
            assert!(reporter.report(n, transferred));
            if receiver.progress_receiver.has_changed().unwrap() {
                updates += 1;
                receiver.progress_receiver.borrow_and_update();
            }
        }
        assert_eq!(updates, 4);
        assert_eq!(ctx.transferred.load(Ordering::Relaxed), n);
        assert_eq!(ctx.total.load(Ordering::Relaxed), n);
    }

    #[test]
    fn test_counters_stored_even_when_display_suppressed() {
        let ctx = context(false);
        let (sender, receiver) = transfer_tracker::new();
        let mut reporter = ProgressReporter::new(ctx.clone(), Arc::new(sender));

        assert!(reporter.report(1000, 500));
        assert_eq!(ctx.transferred.load(Ordering::Relaxed), 500);
        assert_eq!(ctx.total.load(Ordering::Relaxed), 1000);
        assert!(!receiver.progress_receiver.has_changed().unwrap());
    }

    #[test]
    fn test_cancelled_reporter_signals_abort() {
        let ctx = context(true);
        let (sender, _receiver) = transfer_tracker::new();
        let mut reporter = ProgressReporter::new(ctx.clone(), Arc::new(sender));

        assert!(reporter.report(100, 10));
        ctx.cancel_token.cancel();
        assert!(!reporter.report(100, 20));
        // the flag is monotonic, every later observation still aborts
        assert!(!reporter.report(100, 30));
        // the aborting sample is not recorded
        assert_eq!(ctx.transferred.load(Ordering::Relaxed), 10);
    }
}

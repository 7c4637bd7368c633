//! Periodic throughput rendering.
//!
//! Armed when the transfer begins and disarmed through the timer token,
//! either by the worker on completion or by the abort coordinator. The
//! rate is a cumulative average over the whole transfer, not an
//! instantaneous sample.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use crate::session_context::SessionContext;
use crate::transfer_sender::TransferSender;
use crate::unit_format::format_value;

pub const STATUS_DELTA: Duration = Duration::from_millis(100);

pub fn start(ctx: Arc<SessionContext>, sender: Arc<TransferSender>) -> JoinHandle<()> {
    tokio::spawn(run(ctx, sender))
}

async fn run(ctx: Arc<SessionContext>, sender: Arc<TransferSender>) {
    let mut ticker = tokio::time::interval(STATUS_DELTA);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = ctx.timer_token.cancelled() => {
                break;
            }
            _ = ticker.tick() => {
                let begin = match *ctx.started_at.lock() {
                    Some(begin) => begin,
                    None => continue,
                };
                let elapsed = begin.elapsed().as_secs_f64();
                if elapsed <= 0f64 {
                    continue;
                }
                let transferred = ctx.transferred.load(Ordering::Relaxed) as f64;
                let total = ctx.total.load(Ordering::Relaxed) as f64;
                let _ = sender.status_line_sender.send(compose_status_line(
                    &ctx,
                    transferred / elapsed,
                    transferred,
                    total,
                ));
            }
        }
    }
}

fn compose_status_line(ctx: &SessionContext, rate: f64, transferred: f64, total: f64) -> String {
    let unit = &ctx.config.unit;
    let binary = ctx.config.binary;
    format!(
        "{} ({}/{})",
        format_value(rate, unit, binary, "ps"),
        format_value(transferred, unit, binary, ""),
        format_value(total, unit, binary, "")
    )
}

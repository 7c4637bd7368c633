//! Cooperative shutdown on termination signals or a front-end close.
//!
//! The trigger never kills the worker: it cancels the session token, which
//! the progress reporter observes at its next invocation, and asks the
//! controller loop to exit. The worker is joined afterwards as part of the
//! normal shutdown ordering.

use std::sync::Arc;
use crate::error::SessionError;
use crate::session_context::SessionContext;

/// Requests session shutdown. Idempotent; the cancellation flag is
/// monotonic and cancelling the token also disarms the status timer.
pub fn request_abort(ctx: &SessionContext) {
    ctx.cancel_token.cancel();
    ctx.quit_token.cancel();
}

/// Installs handlers for interrupt, terminate and quit. Failure to install
/// any of them is fatal to the process, before any transfer starts.
#[cfg(unix)]
pub fn install(ctx: &Arc<SessionContext>) -> crate::error::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())
        .map_err(|e| SessionError::Signal(e.to_string()))?;
    let mut terminate = signal(SignalKind::terminate())
        .map_err(|e| SessionError::Signal(e.to_string()))?;
    let mut quit = signal(SignalKind::quit())
        .map_err(|e| SessionError::Signal(e.to_string()))?;

    let ctx = ctx.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
            _ = quit.recv() => {}
        }
        tracing::debug!("termination signal received");
        request_abort(&ctx);
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn install(ctx: &Arc<SessionContext>) -> crate::error::Result<()> {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("termination signal received");
            request_abort(&ctx);
        }
    });
    Ok(())
}

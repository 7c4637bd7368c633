//! Shared state for one transfer session.
//!
//! The configuration half is write-once: it is filled by the command line
//! and, optionally, the interactive command stream before any network or
//! file-system side effect. The transfer half is mutated concurrently by
//! the worker and read by the pollers, so counters are atomics and the
//! cancellation flag is a token that never un-cancels.

use std::sync::atomic::AtomicU64;
use std::time::Instant;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use crate::unit_format;
use crate::unit_format::Unit;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum IpFamily {
    Any,
    V4,
    V6,
}

pub struct SessionConfiguration {
    pub url: String,
    pub output: String,
    pub referer: Option<String>,
    pub http_auth: Option<String>,
    pub proxy: Option<String>,
    pub proxy_auth: Option<String>,
    pub interface: Option<String>,
    pub ip_family: IpFamily,
    pub cookies: Vec<String>,
    pub cookie_files: Vec<String>,
    pub user_agent: String,
    pub unit: Unit,
    pub binary: bool,
    pub verbose: bool,
    pub status: bool,
    pub progress: bool,
    pub close_on_finish: bool,
    pub interactive: bool,
    pub width: u32,
    pub height: u32,
    pub fixed: bool,
}

impl SessionConfiguration {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            output: String::from("."),
            referer: None,
            http_auth: None,
            proxy: None,
            proxy_auth: None,
            interface: None,
            ip_family: IpFamily::Any,
            cookies: Vec::new(),
            cookie_files: Vec::new(),
            user_agent: default_user_agent(),
            unit: unit_format::BYTES,
            binary: false,
            verbose: false,
            status: false,
            progress: false,
            close_on_finish: false,
            interactive: false,
            width: 0,
            height: 0,
            fixed: false,
        }
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self::new()
    }
}

fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (compatible; {}/{}; reqwest)",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub struct SessionContext {
    pub config: SessionConfiguration,
    pub title: String,
    /// Raw counters written by the progress reporter, read by the poller.
    pub transferred: AtomicU64,
    pub total: AtomicU64,
    /// Set by the worker when the transfer begins.
    pub started_at: Mutex<Option<Instant>>,
    /// Monotonic cancellation flag, the only abort mechanism.
    pub cancel_token: CancellationToken,
    /// Child of `cancel_token`; also cancelled alone when the worker ends.
    pub timer_token: CancellationToken,
    /// Controller loop exit request.
    pub quit_token: CancellationToken,
}

impl SessionContext {
    pub fn new(config: SessionConfiguration, title: String) -> SessionContext {
        let cancel_token = CancellationToken::new();
        let timer_token = cancel_token.child_token();
        SessionContext {
            config,
            title,
            transferred: AtomicU64::new(0),
            total: AtomicU64::new(0),
            started_at: Mutex::new(None),
            cancel_token,
            timer_token,
            quit_token: CancellationToken::new(),
        }
    }
}

/// Window title in the shape the display layer expects.
pub fn compose_title(output: &str) -> String {
    format!(
        "{} - {}-{}",
        output,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

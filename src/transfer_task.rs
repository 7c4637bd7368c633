//! The background transfer worker.
//!
//! Runs exactly once per session. The transport is invoked a single time
//! and streams the body through the output sink; every received chunk
//! passes through the progress reporter, which is the sole cancellation
//! checkpoint. On completion the worker disarms the status timer, logs a
//! transport error if there was one (a cancellation is not an error) and,
//! when close-on-finish was configured, asks the controller loop to exit.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE, REFERER};
use reqwest::{redirect, Client};
use tokio::task::JoinHandle;
use crate::error::SessionError;
use crate::progress_reporter::ProgressReporter;
use crate::session_context::{IpFamily, SessionConfiguration, SessionContext};
use crate::stream::Stream;
use crate::transfer_sender::TransferSender;
use crate::transfer_status::TransferStatus;

pub struct TransferWorker {
    ctx: Arc<SessionContext>,
    sender: Arc<TransferSender>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TransferWorker {
    pub fn new(ctx: Arc<SessionContext>, sender: Arc<TransferSender>) -> TransferWorker {
        TransferWorker {
            ctx,
            sender,
            thread_handle: None,
        }
    }

    pub fn start_transfer(&mut self, sink: Stream) {
        let handle = tokio::spawn(async_start_transfer(
            self.ctx.clone(),
            self.sender.clone(),
            sink,
        ));
        self.thread_handle = Some(handle);
    }

    pub fn is_done(&self) -> bool {
        if let Some(handle) = &self.thread_handle {
            return handle.is_finished();
        }
        return false;
    }

    pub async fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.await;
        }
    }
}

/// Effective output path: an existing directory is joined with the final
/// path segment of the url, anything else is used verbatim.
pub fn resolve_output_path(output: &str, url: &str) -> PathBuf {
    let path = Path::new(output);
    if !path.is_dir() {
        return path.to_path_buf();
    }
    let segment = url.rsplit('/').next().unwrap_or(url);
    path.join(segment)
}

async fn async_start_transfer(
    ctx: Arc<SessionContext>,
    sender: Arc<TransferSender>,
    mut sink: Stream,
) {
    if ctx.cancel_token.is_cancelled() {
        ctx.timer_token.cancel();
        let _ = sender.status_sender.send(TransferStatus::Cancelled);
        return;
    }

    *ctx.started_at.lock() = Some(Instant::now());
    let _ = sender.status_sender.send(TransferStatus::Transfer);

    let mut reporter = ProgressReporter::new(ctx.clone(), sender.clone());
    let status = match perform_transfer(&ctx, &mut reporter, &mut sink).await {
        Ok(status) => status,
        Err(e) => {
            tracing::error!("{}", e);
            let _ = sender.error_sender.send(e);
            TransferStatus::Failed
        }
    };

    ctx.timer_token.cancel();
    let _ = sender.status_sender.send(status);
    if ctx.config.close_on_finish {
        ctx.quit_token.cancel();
    }
}

async fn perform_transfer(
    ctx: &SessionContext,
    reporter: &mut ProgressReporter,
    sink: &mut Stream,
) -> crate::error::Result<TransferStatus> {
    let config = &ctx.config;
    let client = build_client(config)?;

    let mut request = client.get(&config.url);
    if let Some(referer) = &config.referer {
        request = request.header(REFERER, referer);
    }
    if let Some(credentials) = &config.http_auth {
        request = match credentials.split_once(':') {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request.basic_auth(credentials, Option::<&str>::None),
        };
    }

    let response = request
        .send()
        .await
        .map_err(|e| SessionError::Request(e.to_string()))?;
    let response = response
        .error_for_status()
        .map_err(|e| SessionError::Response(e.to_string()))?;

    let total = response.content_length().unwrap_or(0);
    let mut transferred = 0u64;
    if !reporter.report(total, transferred) {
        return Ok(TransferStatus::Cancelled);
    }

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                if let Err(e) = sink.write_async(&bytes).await {
                    // a failing sink stops the transfer like an operator abort
                    tracing::error!("{}", e);
                    return Ok(TransferStatus::Cancelled);
                }
                transferred += bytes.len() as u64;
                if !reporter.report(total, transferred) {
                    return Ok(TransferStatus::Cancelled);
                }
            }
            Err(e) => {
                return Err(SessionError::ResponseChunk(e.to_string()));
            }
        }
    }

    sink.flush_async().await?;
    Ok(TransferStatus::Complete)
}

fn build_client(config: &SessionConfiguration) -> crate::error::Result<Client> {
    let mut headers = HeaderMap::new();
    for cookie in &config.cookies {
        if let Ok(value) = HeaderValue::from_str(cookie) {
            headers.append(COOKIE, value);
        }
    }
    for path in &config.cookie_files {
        for cookie in read_cookie_file(path) {
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                headers.append(COOKIE, value);
            }
        }
    }

    let mut builder = Client::builder()
        .user_agent(config.user_agent.clone())
        .referer(true)
        .redirect(redirect::Policy::limited(16))
        .default_headers(headers)
        .connection_verbose(config.verbose);

    if let Some(proxy) = &config.proxy {
        let mut proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| SessionError::Request(e.to_string()))?;
        if let Some(credentials) = &config.proxy_auth {
            if let Some((user, password)) = credentials.split_once(':') {
                proxy = proxy.basic_auth(user, password);
            }
        }
        builder = builder.proxy(proxy);
    }

    if let Some(interface) = &config.interface {
        match interface.parse::<IpAddr>() {
            Ok(address) => builder = builder.local_address(address),
            Err(_) => tracing::warn!("ignoring unparsable interface address {}", interface),
        }
    } else {
        match config.ip_family {
            IpFamily::V4 => {
                builder = builder.local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
            }
            IpFamily::V6 => {
                builder = builder.local_address(IpAddr::V6(Ipv6Addr::UNSPECIFIED));
            }
            IpFamily::Any => {}
        }
    }

    builder
        .build()
        .map_err(|e| SessionError::Request(e.to_string()))
}

/// Reads a Netscape-format cookie jar into `name=value` strings. A missing
/// or malformed file is skipped, not fatal.
fn read_cookie_file(path: &str) -> Vec<String> {
    let mut cookies = Vec::new();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!("cannot read cookies file {}: {}", path, e);
            return cookies;
        }
    };
    for line in contents.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() == 7 {
            cookies.push(format!("{}={}", fields[5], fields[6]));
        }
    }
    cookies
}

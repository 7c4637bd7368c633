use std::process;
use std::sync::Arc;
use clap::Parser;
use webget::abort;
use webget::cmdline::Cli;
use webget::interactive;
use webget::session_context::{compose_title, SessionConfiguration, SessionContext};
use webget::status_poller;
use webget::stream::Stream;
use webget::transfer_status::TransferStatus;
use webget::transfer_task::{resolve_output_path, TransferWorker};
use webget::transfer_tracker;
use webget::TransferReceiver;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = SessionConfiguration::new();
    if args.apply(&mut config).is_err() {
        process::exit(1);
    }

    if config.interactive {
        let stdin = std::io::stdin();
        interactive::parse_commands(&mut config, stdin.lock());
    }

    let output_path = resolve_output_path(&config.output, &config.url);
    let title = compose_title(&output_path.display().to_string());
    let ctx = Arc::new(SessionContext::new(config, title));

    if let Err(e) = abort::install(&ctx) {
        tracing::error!("{}", e);
        process::exit(1);
    }

    let sink = match Stream::create(&output_path).await {
        Ok(sink) => sink,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    tracing::info!("{}", ctx.title);
    tracing::debug!("session started at {}", chrono::Local::now().to_rfc3339());

    let (sender, receiver) = transfer_tracker::new();
    let sender = Arc::new(sender);

    let mut worker = TransferWorker::new(ctx.clone(), sender.clone());
    worker.start_transfer(sink);

    let poller = match ctx.config.status {
        true => Some(status_poller::start(ctx.clone(), sender.clone())),
        false => None,
    };

    run_controller(&ctx, receiver).await;

    // shutdown ordering: controller exit, worker join, then the sink and
    // transport owned by the worker task are released
    worker.join().await;
    if let Some(handle) = poller {
        let _ = handle.await;
    }
}

async fn run_controller(ctx: &Arc<SessionContext>, mut receiver: TransferReceiver) {
    loop {
        tokio::select! {
            _ = ctx.quit_token.cancelled() => {
                break;
            }
            changed = receiver.progress_receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let fraction = *receiver.progress_receiver.borrow();
                if ctx.config.progress {
                    println!("{:3.0}%", fraction * 100.);
                }
            }
            changed = receiver.status_line_receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                let line = receiver.status_line_receiver.borrow().clone();
                println!("{}", line);
            }
            changed = receiver.status_receiver.changed() => {
                if changed.is_err() {
                    break;
                }
                match *receiver.status_receiver.borrow() {
                    TransferStatus::Complete => tracing::info!("transfer complete"),
                    TransferStatus::Cancelled => tracing::info!("transfer cancelled"),
                    _ => {}
                }
            }
        }
    }
}

#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Error;
use owo_colors::OwoColorize;
use owo_colors::Stream;

use crate::application::cli;
use crate::application::console;
use crate::domain::models::BackendHandle;
use crate::domain::services::ConversationController;
use crate::domain::services::SessionStore;
use crate::infrastructure::backends::FloatChatApi;

fn handle_error(err: Error) {
    let message = format!(
        "Oh no! FloatChat has failed with the following app version and error.\n\nVersion: {}\nError: {}",
        env!("CARGO_PKG_VERSION"),
        err
    );
    eprintln!(
        "{}",
        message.if_supports_color(Stream::Stderr, |text| return text.red())
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("floatchat")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    match cli::parse().await {
        Ok(true) => {}
        Ok(false) => process::exit(0),
        Err(ready_err) => {
            handle_error(ready_err);
            return;
        }
    }

    let backend: BackendHandle = Arc::new(FloatChatApi::default());
    let controller = ConversationController::new(SessionStore::new().shared(), backend);
    tracing::info!("Starting FloatChat console");

    if let Err(err) = console::start(controller).await {
        handle_error(err);
    }

    process::exit(0);
}

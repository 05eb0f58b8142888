// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Boots a `Runtime` from an optional config file, registers two demo
//! channels (a plain handler and a throttled one), fires a couple of calls,
//! then blocks until a shutdown signal arrives. The demo itself is a
//! teaching aid, not a feature of the crate.

use cyre::infrastructure::logging::{self, LogFormat as InfraLogFormat, LoggingConfig};
use cyre::{ChannelConfig, Runtime};
use cyre_bootstrap::cli::{LogFormatArg, ValidatedCommand};
use cyre_bootstrap::config::BootstrapConfig;
use cyre_bootstrap::exit_code::result_to_exit_code;
use cyre_bootstrap::logger::{BootstrapLogger, ConsoleLogger};
use cyre_bootstrap::shutdown::ShutdownCoordinator;
use cyre_bootstrap::signals;
use serde_json::{json, Value};

#[tokio::main]
async fn main() {
    let result = run().await;
    if let Err(ref err) = result {
        eprintln!("cyre-demo: {err:#}");
    }
    std::process::exit(result_to_exit_code(&result).as_i32());
}

async fn run() -> anyhow::Result<()> {
    let logger = ConsoleLogger::with_prefix("cyre-demo");
    let cli = cyre_bootstrap::bootstrap_cli()?;

    let bootstrap_config = BootstrapConfig::load(cli.config.as_deref())?;
    logging::init(LoggingConfig {
        filter: bootstrap_config.tracing_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => InfraLogFormat::Pretty,
            LogFormatArg::Json => InfraLogFormat::Json,
        },
    });

    match cli.command {
        ValidatedCommand::Validate { config } => {
            logger.info(&format!("configuration at {} is valid", config.display()));
            Ok(())
        }
        ValidatedCommand::Run => run_demo(&logger, bootstrap_config).await,
    }
}

async fn run_demo(logger: &dyn BootstrapLogger, bootstrap_config: BootstrapConfig) -> anyhow::Result<()> {
    let platform = cyre_bootstrap::platform::create_platform();
    logger.info(&format!(
        "starting on {} ({} cpus){}",
        platform.platform_name(),
        platform.cpu_count(),
        if platform.is_elevated() { ", running elevated" } else { "" }
    ));

    let runtime = Runtime::new(bootstrap_config.runtime);

    let greet = runtime.action(ChannelConfig { id: "demo/greet".into(), ..Default::default() })?.id;
    runtime.on(&greet, |payload: Value| async move { Ok(payload) })?;

    let sensor = runtime
        .action(ChannelConfig { id: "demo/sensor".into(), throttle_ms: Some(1_000), ..Default::default() })?
        .id;
    runtime.on(&sensor, |payload: Value| async move { Ok(payload) })?;

    let response = runtime.call(&greet, json!({"hello": "cyre"})).await;
    logger.info(&format!("demo/greet call ok={}", response.ok));

    let response = runtime.call(&sensor, json!({"temp_c": 21.5})).await;
    logger.info(&format!("demo/sensor call ok={}", response.ok));

    let coordinator = ShutdownCoordinator::default();
    let coordinator_for_signal = coordinator.clone();
    tokio::spawn(async move {
        let handler = signals::create_signal_handler();
        handler.wait_for_signal(Box::new(move || coordinator_for_signal.initiate_shutdown())).await;
    });

    coordinator.token().cancelled().await;
    logger.info("shutdown signal received, exiting");
    coordinator.complete_shutdown();

    Ok(())
}

use anyhow::{Context, Result};
use tracing::info;

use phyassist_config::{log_report, validate_service, ServiceConfig};
use phyassist_gateway::{start_server, GatewayState};
use phyassist_logging::init_logger;
use phyassist_tutor::FeedbackTutor;

pub async fn run(port: Option<u16>) -> Result<()> {
    let mut config = ServiceConfig::from_env().context("invalid service configuration")?;
    if let Some(port) = port {
        config.port = port;
    }
    init_logger(&config.logging, "phyassist-service.log");

    let report = validate_service(&config);
    log_report(&report);
    if !report.is_valid() {
        anyhow::bail!("service configuration has {} error(s)", report.errors.len());
    }

    info!(config = %config.redacted(), "Starting PhyAssist feedback service");

    let tutor = FeedbackTutor::from_config(&config)?;
    start_server(GatewayState::new(config, tutor)).await
}

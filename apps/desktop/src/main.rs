#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::Context;
use leadform::domain::config::DesktopConfig;
use leadform::features::registration::FormPolicy;
use leadform::features::registration::client::HttpTransport;
use leadform::kernel::config::load_config;
use leadform_desktop::{DesktopApp, FormContext, RegistrationPage};
use leadform_logger::Logger;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    let cfg: DesktopConfig =
        load_config(Some("desktop")).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.log)?;
    tracing::info!(endpoint = %cfg.endpoint, policy = ?cfg.policy, "Configuration loaded");

    let transport = HttpTransport::new(&cfg.endpoint).context("Invalid registration endpoint")?;
    let context = FormContext::new(FormPolicy::from(cfg.policy), Arc::new(transport));

    DesktopApp::from_config(&cfg.window).launch(context, RegistrationPage);
    Ok(())
}

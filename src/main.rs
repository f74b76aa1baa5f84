//! PresentAI Coach
//!
//! Desktop client for AI presentation coaching: upload a recorded talk, wait
//! for the analysis, then review timestamped feedback on the video timeline.

mod api;
mod app;
mod components;
mod config;
mod constants;
mod core;
mod error;
mod hotkeys;
mod state;
mod timeline;
mod utils;

use std::sync::Arc;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

use crate::api::{CoachApi, HttpCoachApi};
use crate::config::ClientConfig;

/// Long-lived services shared with every component through context.
#[derive(Clone)]
pub struct AppServices {
    pub config: Arc<ClientConfig>,
    pub api: Arc<dyn CoachApi>,
}

fn main() {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let client_config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    let api = match HttpCoachApi::new(&client_config.api.base_url, client_config.request_timeout()) {
        Ok(api) => api,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    log::info!("PresentAI Coach starting, backend at {}", api.base_url());

    // Configure the window
    let window = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("PresentAI Coach")
                .with_inner_size(LogicalSize::new(
                    client_config.window.width,
                    client_config.window.height,
                ))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    let services = AppServices {
        config: Arc::new(client_config),
        api: Arc::new(api),
    };

    // Launch the Dioxus desktop application
    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .with_context(services)
        .launch(app::App);
}

use std::str::FromStr;

use dashboard::debug::{self, DebugConfig};
use dashboard::{AppError, ClientConfig, DashboardEvent, DashboardModel, DashboardView, Session};
use shared::dto::Role;

const USAGE: &str = "usage: dashboard <admin|faculty|parent|student>";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = debug::init_logger(&DebugConfig::from_env());

    let role = match std::env::args().nth(1) {
        Some(raw) => Role::from_str(&raw).map_err(|e| AppError::Config(format!("{} ({})", e, USAGE)))?,
        None => return Err(AppError::Config(USAGE.to_string())),
    };

    let config = ClientConfig::from_env()?;
    tracing::info!(%role, api_url = %config.api_url, "Starting dashboard");

    let session = Session::from_config(config)?;
    let view = DashboardView::mount(session.facade(role));

    if !view.is_refreshing_periodically() {
        if let Some(model) = view.refresh().await {
            print_model(&model)?;
        }
        return Ok(());
    }

    let events = view.events();
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(DashboardEvent::Updated(model)) => print_model(&model)?,
                Ok(DashboardEvent::Loading) => {}
                Err(_) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                break;
            }
        }
    }

    view.dispose();
    tracing::info!(active_tasks = debug::active_task_count(), "Dashboard stopped");
    Ok(())
}

fn print_model(model: &DashboardModel) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(model)?);
    Ok(())
}

mod app;
mod config;
mod sim;

use std::process::ExitCode;

use tracing::error;

fn main() -> ExitCode {
    match app::build_app() {
        Ok(wiring) => app::run(wiring),
        Err(err) => {
            error!(error = %err, "config_invalid");
            ExitCode::FAILURE
        }
    }
}

mod bootstrap;
mod render;
mod scene;

use std::process::ExitCode;

use engine::run_app;
use tracing::error;

pub(crate) use bootstrap::{build_app, AppWiring};

pub(crate) fn run(app: AppWiring) -> ExitCode {
    match run_app(app.config, app.scene) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "startup_failed");
            ExitCode::FAILURE
        }
    }
}

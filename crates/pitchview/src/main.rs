//! `pitchview [config.json]`
//!
//! Opens the viewer with the given scene configuration, or with the
//! defaults when no file is named.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    pitchview::init_logging();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let result = pitchview::SceneConfig::load_or_default(config_path.as_deref())
        .map_err(pitchview::AppError::from)
        .and_then(pitchview::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

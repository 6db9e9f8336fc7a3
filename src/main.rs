use std::process::ExitCode;

fn main() -> ExitCode {
    match clockface::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "clockface failed");
            ExitCode::FAILURE
        }
    }
}

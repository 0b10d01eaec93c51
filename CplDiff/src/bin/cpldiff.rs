use std::process::ExitCode;

fn main() -> ExitCode {
    match cpldiff::cli::run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

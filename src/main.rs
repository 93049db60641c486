use std::process::ExitCode;

fn main() -> ExitCode {
    match fred_overlay::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The message goes to stderr once; the log only records the exit code.
            tracing::debug!(exit_code = err.exit_code(), "{err}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

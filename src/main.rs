use std::process::ExitCode;

fn main() -> ExitCode {
    match ascii_charts::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

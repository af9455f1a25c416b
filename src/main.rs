use std::process::ExitCode;

fn main() -> ExitCode {
    match sales_report::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to generate report: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

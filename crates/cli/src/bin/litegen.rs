use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match litegen_cli::main_entry().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

mod cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::get().get_matches();
    match cli::initialize_and_run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::from(error.exit_code())
        }
    }
}

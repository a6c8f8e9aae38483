use std::process::ExitCode;

fn main() -> ExitCode {
    codeatlas::cli::run()
}

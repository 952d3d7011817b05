use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = fs_facade::cli::parse();
    app::run(args)
}

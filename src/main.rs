use std::process::ExitCode;

use atomic_fs::output as out;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = atomic_fs::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            out::print_error(&app::describe_error(&e));
            ExitCode::from(app::EXIT_ERROR)
        }
    }
}

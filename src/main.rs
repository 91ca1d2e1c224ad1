// Entrypoint for the CLI application.
// - Parses arguments; missing or extra positionals print the usage line,
//   other argument errors print clap's message. Both exit 1.
// - Hands the rest to `ui::run` and maps every failure to exit status 1.

use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tableau_move_workbook::config::{is_usage_error, Args, USAGE};
use tableau_move_workbook::{logging, ui};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) if is_usage_error(err.kind()) => {
            eprintln!("{USAGE}");
            return ExitCode::from(1);
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    logging::init(args.verbose);

    match ui::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::report_failure(&err);
            ExitCode::from(1)
        }
    }
}

use clap::Parser;
use colored::Colorize;
use registry_centrality::cli::{self, Cli};
use registry_centrality::exit::CentralityExit;
use registry_centrality::telemetry;

fn main() -> CentralityExit {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, cli.config.as_deref())
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(CentralityExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            CentralityExit::for_error(&e)
        }
    }
}

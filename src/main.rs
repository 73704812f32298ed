use std::process::ExitCode;

use clap::Parser;
use miette::Report;
use tracing::info;

use colorpath::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand, ModelArgs};
use colorpath::adapter::inbound::cli::output::{self, OutputConfig};
use colorpath::adapter::inbound::cli::{config, diagnostic, input, inspect, solve};
use colorpath::domain::graph::Instance;
use colorpath::error::Result;
use colorpath::infrastructure::config::settings::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose, cli.color));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            if output::is_json() {
                output::error(&report.to_string());
            } else {
                eprintln!("{}", diagnostic::render(&report, output::is_colored()));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> std::result::Result<(), Report> {
    match cli.command {
        Commands::Solve(args) => run_model(&args, solve::execute),
        Commands::Inspect(args) => run_model(&args, inspect::execute),
        Commands::Config(ConfigCommand::Show(arg)) => {
            config::execute_show(arg.config.as_deref()).map_err(|e| input::report(&e))
        }
    }
}

fn run_model(
    args: &ModelArgs,
    handler: fn(&ModelArgs, &Config, &Instance) -> Result<()>,
) -> std::result::Result<(), Report> {
    let settings = config::load(args.config.config.as_deref()).map_err(|e| input::report(&e))?;
    config::init_logging(&settings);
    info!(file = %args.file.display(), "colorpath starting");

    let instance = input::read_instance(args)?;
    handler(args, &settings, &instance).map_err(|e| input::report(&e))
}

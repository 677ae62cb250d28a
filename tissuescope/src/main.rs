mod commands;
mod handlers;
mod output;

use clap::Parser;
use commands::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    log::debug!("cli arguments: {cli:?}");

    if let Err(err) = handlers::handle_command(cli) {
        output::print_error(&err.to_string());
        return Err(err);
    }
    Ok(())
}

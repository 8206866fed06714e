//! testforge CLI entry point.

use clap::Parser;

use testforge::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    testforge::infrastructure::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => {
            testforge::cli::commands::run::execute(args, &cli.config, cli.json).await
        }
        Commands::Signatures(args) => {
            testforge::cli::commands::signatures::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        testforge::cli::handle_error(err, cli.json);
    }
}

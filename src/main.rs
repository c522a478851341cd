use clap::Parser;
use mums::cli::{Cli, Commands};
use mums::errors::MumsError;

fn main() {
    // Argument errors exit with 1; --help and --version exit with 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let result = match cli.command {
        Commands::Show => mums::cli::commands::show::execute(&cli),
        Commands::Store {
            ref name,
            ref value,
        } => mums::cli::commands::store::execute(&cli, name, value),
        Commands::Remove { ref name } => mums::cli::commands::remove::execute(&cli, name),
        Commands::Run {
            clean_env,
            ref command,
        } => mums::cli::commands::run::execute(&cli, command, clean_env),
        Commands::List => mums::cli::commands::list::execute(&cli),
    };

    match result {
        Ok(()) => {}
        // The child already reported its own failure; just pass the code on.
        Err(MumsError::ChildProcessFailed(code)) => std::process::exit(code),
        Err(e) => {
            mums::cli::output::error(&e.to_string());
            if e.is_wrong_key_or_corrupt() {
                mums::cli::output::status(
                    "Check that --key-file points at the keyfile this vault was written with.",
                );
            }
            std::process::exit(1);
        }
    }
}

use clap::Parser;
use keysafe::cli::{output, Cli, Commands};
use keysafe::config::Settings;

fn main() {
    let cli = Cli::parse();

    // Load .keysafe.toml from the working directory (defaults if absent).
    let settings = match std::env::current_dir()
        .map_err(keysafe::errors::StoreError::from)
        .and_then(|dir| Settings::load(&dir))
    {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    };

    keysafe::logging::init(&settings.log_level, cli.verbose);

    let result = match cli.command {
        Commands::Set { ref key, ref value } => {
            keysafe::cli::commands::set::execute(&cli, &settings, key, value.as_deref())
        }
        Commands::Get { ref key } => keysafe::cli::commands::get::execute(&cli, &settings, key),
        Commands::List { json } => keysafe::cli::commands::list::execute(&cli, &settings, json),
        Commands::Delete { ref key, force } => {
            keysafe::cli::commands::delete::execute(&cli, &settings, key, force)
        }
        Commands::Completions { shell } => keysafe::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

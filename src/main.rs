use clap::Parser;
use festive_banner::cli::{self, Args, Command};
use festive_banner::genai::API_KEY_ENV;

/// Load .env file and check for the API key
///
/// Loads environment variables from .env file in the project root.
/// Does not override existing environment variables.
/// Warns if the API key is not set.
fn load_env() {
    // dotenv::dotenv() returns Err if .env doesn't exist, which is fine
    let _ = dotenv::dotenv();

    if let Some(warning) = missing_key_warning(API_KEY_ENV) {
        log::warn!("{}", warning);
    }
}

fn missing_key_warning(var: &str) -> Option<String> {
    std::env::var(var).is_err().then(|| {
        format!(
            "{} environment variable not set; use /key in a session or add it to .env",
            var
        )
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Load .env file before anything else
    load_env();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let result = match args.command {
        Command::Generate(generate) => cli::run_generate(generate, config_path),
        Command::Session(session) => cli::run_session(session, config_path),
        Command::Config { action } => cli::handle_config_action(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_warning_names_variable() {
        let var = "FESTIVE_BANNER_TEST_MAIN_NEVER_SET";
        let warning = missing_key_warning(var).unwrap();
        assert!(warning.starts_with(&format!("{} environment variable not set", var)));
    }

    #[test]
    fn test_no_warning_when_variable_is_set() {
        // PATH is present in any test environment.
        assert_eq!(missing_key_warning("PATH"), None);
    }
}

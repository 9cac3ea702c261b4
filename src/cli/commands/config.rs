use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::error::Result;

/// Execute config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("✅ Configuration updated: {} = {}", key, value);
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{}: {}", key, value),
                None => println!("Configuration key '{}' not found", key),
            }
            Ok(())
        }
        ConfigCommand::List => {
            let config = Config::load()?;
            for key in Config::keys() {
                println!("{}: {}", key, config.get(key).unwrap_or_default());
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
        ConfigCommand::Init => {
            Config::initialize()?;
            println!("✅ Configuration initialized");
            println!();
            println!("To point the client at your document service, run:");
            println!("  hukuk config set api.base_url https://your-service.example.com");
            Ok(())
        }
    }
}

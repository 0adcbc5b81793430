use clap::Subcommand;
use wren_core::storage::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print all settings as TOML
    Show,
    /// Read one value by dot-path key, e.g. privacy.auto_clear_interval
    Get { key: String },
    /// Set one value by dot-path key and persist
    Set { key: String, value: String },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load_or_default();
            print!("{}", toml::to_string_pretty(&settings)?);
        }
        ConfigAction::Get { key } => {
            let settings = Settings::load_or_default();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown settings key '{key}'").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_or_default();
            settings.set(&key, &value)?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiURL,
    ConfigFile,
    Username,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiURL => return "http://localhost:8000".to_string(),
            ConfigKey::ConfigFile => {
                let config_path = dirs::config_dir()
                    .map(|dir| return dir.join("floatchat").join("config.toml"))
                    .unwrap_or_else(|| return path::PathBuf::from("floatchat.toml"));

                return config_path.to_string_lossy().to_string();
            }
            ConfigKey::Username => {
                let user = env::var("USER").unwrap_or_default();
                if user.is_empty() {
                    return "User".to_string();
                }

                return user;
            }
        }
    }

    fn validate(key: ConfigKey, val: &str) -> Result<()> {
        if key == ConfigKey::ApiURL {
            if let Err(err) = reqwest::Url::parse(val) {
                bail!(format!("Invalid value for '{key}': {val} ({err})"));
            }
        }

        return Ok(());
    }

    /// Loads configuration with the following precedence, lowest first:
    /// defaults, the TOML config file, then environment variables and CLI
    /// flags.
    pub async fn load(clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    let val_str = match val.as_str() {
                        Some(val_str) => val_str,
                        None => {
                            bail!(format!(
                                "{} has an invalid value for key '{key}': expected a string",
                                config_path.display()
                            ));
                        }
                    };
                    if val_str.is_empty() {
                        continue;
                    }

                    Config::validate(key, val_str)?;
                    Config::set(key, val_str);
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::validate(key, val)?;
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            config_file = Config::get(ConfigKey::ConfigFile),
            username = Config::get(ConfigKey::Username),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your name as displayed next to your messages.\n# username = \"\""
                            .to_string(),
                    );
                }

                let description = cmd
                    .get_arguments()
                    .find(|arg| return arg.get_id().as_str() == key.to_string())
                    .and_then(|arg| return arg.get_help())
                    .map(|help| {
                        return help
                            .to_string()
                            .split("[default:")
                            .next()
                            .unwrap_or_default()
                            .trim()
                            .to_string();
                    })
                    .unwrap_or_default();

                let val = format!("{key} = \"{}\"", Config::default(key));

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " ", env!("FI_GIT_DESCRIBE"));

#[derive(Parser)]
#[command(name = "fi")]
#[command(version = VERSION)]
#[command(about = "Founder intake: web form submissions filed into Notion")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.config/founder-intake/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the intake and follow-up endpoints
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Submit a form to a running site
    Submit {
        /// Form id (field-questionnaire, followup-24h-form, followup-7d-form)
        #[arg(long)]
        form: String,

        /// Site base URL, e.g. http://127.0.0.1:8888
        #[arg(long)]
        url: String,

        /// Form field as key=value; repeatable, later values win
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// JSON object file with field values; --field entries override it
        #[arg(long)]
        json: Option<PathBuf>,

        /// Page to go to after a successful submit
        #[arg(long)]
        redirect: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show effective configuration (API key masked)
    Show,
    /// Print a commented configuration template
    Init,
    /// Print the configuration file location
    Path,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field_splits_on_first_equals() {
        assert_eq!(
            parse_field("q1=a=b").unwrap(),
            ("q1".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_field("email=").unwrap(),
            ("email".to_string(), String::new())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn submit_collects_repeated_fields() {
        let cli = Cli::try_parse_from([
            "fi",
            "submit",
            "--form",
            "followup-7d-form",
            "--url",
            "http://localhost:8888",
            "--field",
            "email=a@b.com",
            "--field",
            "q1=steady",
        ])
        .unwrap();

        match cli.command {
            Commands::Submit { form, fields, .. } => {
                assert_eq!(form, "followup-7d-form");
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1], ("q1".to_string(), "steady".to_string()));
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["fi", "config", "show", "--config", "/tmp/fi.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/fi.toml")));
    }
}

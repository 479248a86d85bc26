use anyhow::Result;
use clap::Parser;

mod cli;
mod config_cmds;
mod submit_cmd;

use cli::{Cli, Commands, ConfigCommands};
use submit_cmd::SubmitArgs;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (output to stderr, initialize only once)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { bind, port } => {
            let mut config = config_cmds::load_config(config_path)?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            fi_server::run_server(config).await?;
        }
        Commands::Submit {
            form,
            url,
            fields,
            json,
            redirect,
        } => {
            submit_cmd::handle_submit(SubmitArgs {
                form,
                url,
                fields,
                json,
                redirect,
            })
            .await?;
        }
        Commands::Config { cmd } => match cmd {
            ConfigCommands::Show => config_cmds::handle_config_show(config_path)?,
            ConfigCommands::Init => config_cmds::handle_config_init(),
            ConfigCommands::Path => config_cmds::handle_config_path(config_path)?,
        },
    }

    Ok(())
}

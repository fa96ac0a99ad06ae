use std::io::{self, Write};
use std::process;

use anyhow::Result;
use clap::Parser;

use deploy_push::cli::{run_deploy_workflow, DeployWorkflowArgs};
use deploy_push::{config, git, ui};

#[derive(clap::Parser)]
#[command(
    name = "deploy-push",
    version,
    about = "Commit all changes and push them to trigger an automatic deployment"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Commit message (skips the prompt)")]
    message: Option<String>,

    #[arg(long, help = "Exit with status 1 when the push fails")]
    strict_exit: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    install_tracing();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            process::exit(1);
        }
    };

    let cwd = std::env::current_dir()?;
    let workspace = match git::open_workspace(&cwd, config.behavior.backend) {
        Ok(workspace) => workspace,
        Err(e) if e.is_not_a_repository() => {
            ui::display_error(&e.to_string());
            print!(
                "{}",
                ui::format_not_a_repository(&cwd, &config.remote.name, &config.remote.branch)
            );
            io::stdout().flush()?;
            process::exit(1);
        }
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            process::exit(1);
        }
    };

    let workflow_args = DeployWorkflowArgs {
        message: args.message,
    };
    let result = {
        let mut input = io::stdin().lock();
        let mut out = io::stdout().lock();
        run_deploy_workflow(
            &*workspace,
            &config,
            &workflow_args,
            &mut input,
            &mut out,
        )?
    };

    if !result.pushed && (args.strict_exit || config.behavior.strict_exit) {
        process::exit(1);
    }

    Ok(())
}

/// Diagnostic logs go to stderr and stay quiet unless `RUST_LOG` asks for more.
fn install_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

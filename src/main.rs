use clap::Parser;
use tracing::error;

use linkshrink::cli::{Cli, Commands, run_decode, run_encode, run_hash_password};
use linkshrink::config::AppConfig;
use linkshrink::errors::LinkError;
use linkshrink::runtime::run_server;
use linkshrink::system::init_logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command() {
        Commands::Serve => serve(&cli).await,
        Commands::HashPassword { password } => run_hash_password(password).map_err(Into::into),
        Commands::Encode { id } => {
            run_encode(id);
            Ok(())
        }
        Commands::Decode { code } => run_decode(&code).map_err(Into::into),
    };

    if let Err(e) = result {
        match e.downcast_ref::<LinkError>() {
            Some(link_err) => eprintln!("{}", link_err.format_colored()),
            None => eprintln!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn serve(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(&cli.config)?;

    // guard 必须存活到进程结束
    let _log_guard = init_logging(&config.logging)?;

    run_server(config).await.inspect_err(|e| {
        error!("Server exited with error: {:#}", e);
    })
}

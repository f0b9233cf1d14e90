//! Cart CLI - a terminal storefront over the GoMarketplace cart.
//!
//! Commands:
//! - `cart show` - List the cart and its totals
//! - `cart add` - Add a product
//! - `cart inc` - Increase a product's quantity
//! - `cart dec` - Decrease a product's quantity, confirming removal
//! - `cart clear` - Empty the cart

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, DecArgs, IncArgs};

/// Cart CLI - manage the GoMarketplace shopping cart
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add a product to the cart
    Add(AddArgs),

    /// Increase a product's quantity
    Inc(IncArgs),

    /// Decrease a product's quantity
    Dec(DecArgs),

    /// Remove every product
    Clear(ClearArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = ctx
        .provider
        .scope(async {
            match cli.command {
                Commands::Show => commands::show::run(&ctx).await,
                Commands::Add(args) => commands::add::run(args, &ctx).await,
                Commands::Inc(args) => commands::quantity::increment(args, &ctx).await,
                Commands::Dec(args) => commands::quantity::decrement(args, &ctx).await,
                Commands::Clear(args) => commands::clear::run(args, &ctx).await,
            }
        })
        .await;

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    ctx.shutdown().await;
    Ok(())
}

//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod quantity;
pub mod show;

use clap::Args;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product identifier.
    #[arg(long)]
    pub id: String,

    /// Product title.
    #[arg(short, long)]
    pub title: String,

    /// Product image URL.
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Unit price, e.g. 49.90.
    #[arg(short, long)]
    pub price: String,
}

/// Arguments for the inc command.
#[derive(Args)]
pub struct IncArgs {
    /// Product identifier.
    pub id: String,
}

/// Arguments for the dec command.
#[derive(Args)]
pub struct DecArgs {
    /// Product identifier.
    pub id: String,

    /// Remove the last unit without asking.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

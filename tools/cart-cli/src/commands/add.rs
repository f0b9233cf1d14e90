//! Add command - put a product in the cart.

use anyhow::{Context as _, Result};
use marketplace_cart::prelude::{AddOutcome, NewCartItem, Price};
use marketplace_cart::use_cart;

use crate::commands::AddArgs;
use crate::context::Context;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let price: Price = args.price.parse().context("Invalid price")?;
    let cart = use_cart();

    let candidate = NewCartItem::new(args.id.as_str(), args.title, args.image_url, price);
    match cart.add_to_cart(candidate).await? {
        AddOutcome::Added => ctx.output.success(&format!("Added {}", args.id)),
        AddOutcome::Incremented { quantity } => ctx
            .output
            .success(&format!("{} already in cart, quantity now {}", args.id, quantity)),
    }

    ctx.output.cart(&cart.snapshot());
    Ok(())
}

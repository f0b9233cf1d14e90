//! Clear command - empty the cart.

use anyhow::Result;
use dialoguer::Confirm;
use marketplace_cart::use_cart;

use crate::commands::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub async fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let cart = use_cart();

    if cart.items().is_empty() {
        ctx.output.info("The cart is already empty");
        ctx.output.cart(&cart.snapshot());
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = tokio::task::spawn_blocking(|| {
            Confirm::new()
                .with_prompt("Remove every product from the cart?")
                .default(false)
                .interact()
        })
        .await??;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    let removed = cart.clear().await?;
    ctx.output.success(&format!("Removed {} product(s)", removed));
    ctx.output.cart(&cart.snapshot());
    Ok(())
}

//! Show command - list the cart and its totals.

use anyhow::Result;
use marketplace_cart::use_cart;

use crate::context::Context;

/// Run the show command.
pub async fn run(ctx: &Context) -> Result<()> {
    ctx.output.debug(&format!(
        "Storage key {} in {}",
        ctx.config.cart.storage_key,
        ctx.config.storage.data_dir.display()
    ));

    ctx.output.cart(&use_cart().snapshot());
    Ok(())
}

//! Inc and dec commands - change a product's quantity.

use anyhow::{bail, Result};
use async_trait::async_trait;
use dialoguer::Confirm;
use marketplace_cart::prelude::{ConfirmRemoval, Confirmation, FixedAnswer, RemovalPrompt};
use marketplace_cart::{use_cart, DecrementResult};

use crate::commands::{DecArgs, IncArgs};
use crate::context::Context;

/// Asks on the terminal before the last unit of a product is removed.
struct TerminalConfirm;

#[async_trait]
impl ConfirmRemoval for TerminalConfirm {
    async fn confirm(&self, prompt: &RemovalPrompt) -> Confirmation {
        let text = format!(
            "{}: {} ({})",
            prompt.title, prompt.message, prompt.pending.title
        );
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(text)
                .default(false)
                .interact_opt()
        })
        .await;

        match answer {
            Ok(Ok(Some(true))) => Confirmation::Accepted,
            Ok(Ok(Some(false))) => Confirmation::Declined,
            // Escape, a closed terminal or a panicked prompt all count as dismissal.
            _ => Confirmation::Dismissed,
        }
    }
}

/// Run the inc command.
pub async fn increment(args: IncArgs, ctx: &Context) -> Result<()> {
    let cart = use_cart();

    match cart.increment(&args.id).await? {
        Some(quantity) => ctx
            .output
            .success(&format!("{} quantity now {}", args.id, quantity)),
        None => bail!("Product {} is not in the cart", args.id),
    }

    ctx.output.cart(&cart.snapshot());
    Ok(())
}

/// Run the dec command.
pub async fn decrement(args: DecArgs, ctx: &Context) -> Result<()> {
    let cart = use_cart();

    // JSON mode has no interactive terminal to prompt on.
    let result = if args.yes {
        cart.decrement_with(&args.id, &FixedAnswer(Confirmation::Accepted))
            .await?
    } else if ctx.output.is_json() {
        cart.decrement_with(&args.id, &FixedAnswer(Confirmation::Dismissed))
            .await?
    } else {
        cart.decrement_with(&args.id, &TerminalConfirm).await?
    };

    match result {
        DecrementResult::Decremented { quantity } => ctx
            .output
            .success(&format!("{} quantity now {}", args.id, quantity)),
        DecrementResult::Removed => ctx.output.success(&format!("Removed {}", args.id)),
        DecrementResult::Kept => ctx.output.warn(&format!("Kept {} in the cart", args.id)),
        DecrementResult::NotFound => bail!("Product {} is not in the cart", args.id),
    }

    ctx.output.cart(&cart.snapshot());
    Ok(())
}

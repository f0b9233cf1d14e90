//! User confirmation for removing the last unit of a product.

use async_trait::async_trait;

use crate::cart::PendingRemoval;

/// Text shown when asking whether to remove a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPrompt {
    /// Dialog title.
    pub title: String,
    /// Dialog body.
    pub message: String,
    /// Label of the affirmative action.
    pub accept_label: String,
    /// Label of the cancelling action.
    pub decline_label: String,
    /// The removal being confirmed.
    pub pending: PendingRemoval,
}

impl RemovalPrompt {
    /// Default prompt for `pending`.
    pub fn for_removal(pending: PendingRemoval) -> Self {
        Self {
            title: "Confirm deletion".to_string(),
            message: "Are you sure you want to remove this product from the cart?".to_string(),
            accept_label: "Yes".to_string(),
            decline_label: "No".to_string(),
            pending,
        }
    }
}

/// The user's answer to a [`RemovalPrompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user chose the affirmative action.
    Accepted,
    /// The user chose the cancelling action.
    Declined,
    /// The prompt was closed without a choice.
    Dismissed,
}

impl Confirmation {
    /// Whether the removal should go ahead.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Confirmation::Accepted)
    }
}

/// Presents a removal prompt and reports the user's choice.
#[async_trait]
pub trait ConfirmRemoval: Send + Sync {
    /// Ask the user; resolve once they have answered or dismissed the prompt.
    async fn confirm(&self, prompt: &RemovalPrompt) -> Confirmation;
}

/// Answers every prompt the same way.
///
/// Useful for non-interactive callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub Confirmation);

#[async_trait]
impl ConfirmRemoval for FixedAnswer {
    async fn confirm(&self, _prompt: &RemovalPrompt) -> Confirmation {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    #[test]
    fn test_default_prompt_text() {
        let prompt = RemovalPrompt::for_removal(PendingRemoval {
            id: ProductId::new("b"),
            title: "Camiseta".to_string(),
        });
        assert_eq!(prompt.title, "Confirm deletion");
        assert_eq!(prompt.accept_label, "Yes");
        assert_eq!(prompt.decline_label, "No");
        assert_eq!(prompt.pending.title, "Camiseta");
    }

    #[test]
    fn test_only_accepted_is_accepted() {
        assert!(Confirmation::Accepted.is_accepted());
        assert!(!Confirmation::Declined.is_accepted());
        assert!(!Confirmation::Dismissed.is_accepted());
    }
}

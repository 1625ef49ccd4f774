//! Interactive one-of-N selection as a capability.
//!
//! A terminal prompt is abstracted behind [`Prompter`] so that resolution
//! stays testable without a real terminal: production wires a
//! dialoguer-backed prompter, tests wire a scripted one. The future a
//! prompter returns is what call sites race against cancellation.

use async_trait::async_trait;

use fleetsh_core::{Error, Result};

/// Capability to ask the operator to pick one item from a list.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Present `items` and return the index of the chosen one.
    async fn select_one(&self, prompt: &str, items: &[String]) -> Result<usize>;
}

/// Terminal prompter backed by `dialoguer::Select`.
#[derive(Debug, Default)]
pub struct TermPrompter;

#[async_trait]
impl Prompter for TermPrompter {
    async fn select_one(&self, prompt: &str, items: &[String]) -> Result<usize> {
        let prompt = prompt.to_string();
        let items = items.to_vec();
        // interact() blocks on terminal reads; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            dialoguer::Select::new()
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact()
                .map_err(|e| Error::Prompt(e.to_string()))
        })
        .await
        .map_err(|e| Error::Prompt(e.to_string()))?
    }
}

/// Deterministic prompter for tests and non-interactive harnesses.
///
/// Returns the configured index, clamped to the item list, and records how
/// many times it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    choice: usize,
    asked: std::sync::atomic::AtomicUsize,
}

impl ScriptedPrompter {
    /// A prompter that always picks `choice`.
    pub fn choosing(choice: usize) -> Self {
        Self {
            choice,
            asked: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// How many times a selection was requested.
    pub fn times_asked(&self) -> usize {
        self.asked.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn select_one(&self, _prompt: &str, items: &[String]) -> Result<usize> {
        self.asked.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if items.is_empty() {
            return Err(Error::Prompt("nothing to select from".to_string()));
        }
        Ok(self.choice.min(items.len() - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_prompter_picks_choice() {
        let prompter = ScriptedPrompter::choosing(1);
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(prompter.select_one("pick:", &items).await.unwrap(), 1);
        assert_eq!(prompter.times_asked(), 1);
    }

    #[tokio::test]
    async fn test_scripted_prompter_clamps() {
        let prompter = ScriptedPrompter::choosing(10);
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompter.select_one("pick:", &items).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scripted_prompter_empty_list() {
        let prompter = ScriptedPrompter::choosing(0);
        let result = prompter.select_one("pick:", &[]).await;
        assert!(matches!(result, Err(Error::Prompt(_))));
    }
}

//! One-call wrappers around a fresh [`Vault`]: extract, transform, restore.

use std::future::Future;

use crate::matcher::Matcher;
use crate::vault::Vault;

/// Run `transform` over `text` with every match of `matcher` shielded from it.
pub fn protect<M, F>(matcher: M, text: &str, transform: F) -> String
where
    M: Matcher,
    F: FnOnce(String) -> String,
{
    let mut vault = Vault::new(matcher);
    let extracted = vault.extract(text);
    vault.into_restored(&transform(extracted))
}

/// [`protect`] for transforms that can fail. The transform's error is returned as is.
pub fn try_protect<M, F, E>(matcher: M, text: &str, transform: F) -> Result<String, E>
where
    M: Matcher,
    F: FnOnce(String) -> Result<String, E>,
{
    let mut vault = Vault::new(matcher);
    let extracted = vault.extract(text);
    let transformed = transform(extracted)?;
    Ok(vault.into_restored(&transformed))
}

/// [`try_protect`] for async transforms. Restoration starts only once the
/// transform's future has resolved.
pub async fn protect_async<M, F, Fut, E>(matcher: M, text: &str, transform: F) -> Result<String, E>
where
    M: Matcher,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, E>>,
{
    let mut vault = Vault::new(matcher);
    let extracted = vault.extract(text);
    let transformed = transform(extracted).await?;
    Ok(vault.into_restored(&transformed))
}

//! Extension hooks around node visits.
//!
//! For every visited node the evaluator:
//!
//! 1. awaits each extension's [`Extension::before_visit`] in registration order,
//! 2. offers the node to every registered [`Extension::claim`] hook; a claimed
//!    node skips default handling and evaluates to the claimed value,
//! 3. awaits each extension's [`Extension::after_visit`] in registration order.
//!
//! How step 2 picks a winner depends on [`ClaimPolicy`]. Under
//! [`ClaimPolicy::Race`] the claims run concurrently and the first one to
//! settle successfully decides, even if it settles by declining. The outcome
//! is non-deterministic when two extensions can claim the same node. Losing
//! claim futures are dropped, not run to completion.

use std::fmt;
use std::sync::Arc;

use futures_util::future::{select_ok, BoxFuture};
use futures_util::TryFutureExt;

use super::context::{ClaimPolicy, Context};
use super::value::Value;
use crate::sql::NodeRef;

/// Future returned by extension hooks.
pub type HookFuture<'a, T> = BoxFuture<'a, Result<T, ExtensionError>>;

/// Error raised by an extension hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionError {
    /// Name of the failing extension.
    pub extension: String,
    pub message: String,
}

impl ExtensionError {
    /// Creates a new extension error.
    pub fn new(extension: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extension \"{}\": {}", self.extension, self.message)
    }
}

impl std::error::Error for ExtensionError {}

/// A plugin that can observe or override node handling.
///
/// Every hook is optional. Hooks receive the node being visited and the
/// evaluation context of the current run.
pub trait Extension: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        "extension"
    }

    /// Runs before the node is handled. An error aborts the run.
    fn before_visit<'a>(&'a self, _node: NodeRef<'a>, _ctx: &'a mut Context) -> HookFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }

    /// Offers to handle the node instead of the evaluator.
    ///
    /// Return `None` if this extension has no claim hook. Otherwise the future
    /// resolves to `Ok(Some(value))` to claim the node, `Ok(None)` to decline,
    /// or an error, which counts as not having settled.
    fn claim<'a>(
        &'a self,
        _node: NodeRef<'a>,
        _ctx: &'a Context,
    ) -> Option<HookFuture<'a, Option<Value>>> {
        None
    }

    /// Runs after the node is handled, claimed or not. An error aborts the run.
    fn after_visit<'a>(&'a self, _node: NodeRef<'a>, _ctx: &'a mut Context) -> HookFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }
}

/// Runs every `before_visit` hook in registration order.
pub(crate) async fn before_visit(
    extensions: &[Arc<dyn Extension>],
    node: NodeRef<'_>,
    ctx: &mut Context,
) -> Result<(), ExtensionError> {
    for extension in extensions {
        extension.before_visit(node, ctx).await?;
    }
    Ok(())
}

/// Runs every `after_visit` hook in registration order.
pub(crate) async fn after_visit(
    extensions: &[Arc<dyn Extension>],
    node: NodeRef<'_>,
    ctx: &mut Context,
) -> Result<(), ExtensionError> {
    for extension in extensions {
        extension.after_visit(node, ctx).await?;
    }
    Ok(())
}

/// Offers `node` to the registered claim hooks.
///
/// Returns the claimed value, or `None` if default handling should proceed.
pub(crate) async fn claim(
    extensions: &[Arc<dyn Extension>],
    node: NodeRef<'_>,
    ctx: &Context,
) -> Option<Value> {
    let claims: Vec<_> = extensions
        .iter()
        .filter_map(|ext| ext.claim(node, ctx).map(|fut| (ext.name(), fut)))
        .collect();

    if claims.is_empty() {
        return None;
    }

    match ctx.options.claim_policy {
        ClaimPolicy::Race => {
            let racers = claims.into_iter().map(|(name, fut)| {
                fut.map_err(move |e| {
                    log::warn!("claim hook of {name} rejected: {e}");
                    e
                })
            });
            match select_ok(racers).await {
                Ok((claimed, _rest)) => claimed,
                Err(_) => None,
            }
        }
        ClaimPolicy::Ordered => {
            for (name, fut) in claims {
                match fut.await {
                    Ok(Some(value)) => return Some(value),
                    Ok(None) => continue,
                    Err(e) => log::warn!("claim hook of {name} rejected: {e}"),
                }
            }
            None
        }
    }
}

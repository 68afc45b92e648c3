use anyhow::{Context, Result, bail};
use mindful_application::{AppProviders, LoadState};
use serde_json::json;

use super::{print_json, user_error};

fn load_state_name(state: LoadState) -> &'static str {
    match state {
        LoadState::Unloaded => "unloaded",
        LoadState::Loading => "loading",
        LoadState::Loaded => "loaded",
        LoadState::Error => "error",
    }
}

pub fn status(providers: &AppProviders) -> Result<()> {
    let snapshot = providers.subscription.snapshot();
    print_json(&json!({
        "loadState": load_state_name(snapshot.load_state),
        "premium": snapshot.is_premium(),
        "subscription": snapshot.info,
        "features": snapshot.info.features(),
        "lastError": snapshot.last_error,
    }))
}

pub fn offerings(providers: &AppProviders) -> Result<()> {
    if let Some(err) = providers.subscription.last_error() {
        bail!(err);
    }
    let offerings = providers
        .subscription
        .offerings()
        .context("No offerings loaded; sign in first")?;
    print_json(&serde_json::to_value(offerings)?)
}

pub async fn purchase(providers: &AppProviders, package_id: &str) -> Result<()> {
    let package = providers
        .subscription
        .offerings()
        .and_then(|o| o.find_package(package_id).cloned())
        .with_context(|| format!("Unknown package '{}'", package_id))?;

    providers
        .subscription
        .purchase_package(&package)
        .await
        .map_err(user_error)?;
    status(providers)
}

pub async fn restore(providers: &AppProviders) -> Result<()> {
    let restored = providers.subscription.restore_purchases().await;
    if let Some(err) = providers.subscription.last_error() {
        bail!(err);
    }
    print_json(&json!({
        "restored": restored,
        "premium": providers.subscription.is_premium(),
    }))
}

pub async fn cancel(providers: &AppProviders, reason: Option<&str>) -> Result<()> {
    providers
        .subscription
        .cancel_subscription(reason)
        .await
        .map_err(user_error)?;
    status(providers)
}

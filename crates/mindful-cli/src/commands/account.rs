use anyhow::{Result, bail};
use mindful_application::AppProviders;
use mindful_core::user::{Credentials, RegistrationData};
use serde_json::json;

use super::{print_json, user_error};

pub async fn login(providers: &AppProviders, email: String, password: String) -> Result<()> {
    providers
        .session
        .login(&Credentials::new(email, password))
        .await
        .map_err(user_error)?;
    providers.subscription.refresh_status_only().await;
    whoami(providers)
}

pub async fn register(
    providers: &AppProviders,
    name: String,
    email: String,
    password: String,
) -> Result<()> {
    providers
        .session
        .register(&RegistrationData::new(name, email, password))
        .await
        .map_err(user_error)?;
    providers.subscription.refresh_status_only().await;
    whoami(providers)
}

pub async fn logout(providers: &AppProviders) -> Result<()> {
    providers.session.logout().await;
    println!("Signed out");
    Ok(())
}

pub fn whoami(providers: &AppProviders) -> Result<()> {
    let Some(user) = providers.session.user() else {
        bail!("Not signed in");
    };
    print_json(&json!({
        "user": user,
        "premium": providers.subscription.is_premium(),
    }))
}

use anyhow::Result;
use mindful_application::AppProviders;
use mindful_core::MindfulError;
use serde_json::Value;

use crate::Commands;

mod account;
mod meditation;
mod subscription;

pub async fn run(command: Commands, providers: &AppProviders) -> Result<()> {
    match command {
        Commands::Login { email, password } => account::login(providers, email, password).await,
        Commands::Register {
            name,
            email,
            password,
        } => account::register(providers, name, email, password).await,
        Commands::Logout => account::logout(providers).await,
        Commands::Whoami => account::whoami(providers),
        Commands::Status => subscription::status(providers),
        Commands::Offerings => subscription::offerings(providers),
        Commands::Purchase { package_id } => subscription::purchase(providers, &package_id).await,
        Commands::Restore => subscription::restore(providers).await,
        Commands::Cancel { reason } => subscription::cancel(providers, reason.as_deref()).await,
        Commands::Meditations => meditation::list(providers).await,
        Commands::Play { meditation_id } => meditation::play(providers, &meditation_id).await,
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turns a store error into the message a person should read.
fn user_error(err: MindfulError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

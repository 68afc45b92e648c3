use anyhow::Result;
use mindful_application::AppProviders;
use mindful_application::meditation::PlaybackState;
use serde_json::json;

use super::{print_json, user_error};

pub async fn list(providers: &AppProviders) -> Result<()> {
    let entries = providers.library.list().await.map_err(user_error)?;
    let rows: Vec<_> = entries
        .into_iter()
        .map(|entry| {
            json!({
                "id": entry.meditation.id,
                "title": entry.meditation.title,
                "category": entry.meditation.category,
                "durationSecs": entry.meditation.duration_secs,
                "locked": entry.locked,
            })
        })
        .collect();
    print_json(&json!(rows))
}

pub async fn play(providers: &AppProviders, id: &str) -> Result<()> {
    let meditation = providers.library.open(id).await.map_err(user_error)?;
    let mut status = providers.player.subscribe();
    providers.player.start(&meditation);
    eprintln!("Playing '{}' ({}s)", meditation.title, meditation.duration_secs);

    loop {
        tokio::select! {
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = status.borrow_and_update().clone();
                match current.state {
                    PlaybackState::Completed => {
                        providers.player.finished().await;
                        eprintln!("\nDone");
                        break;
                    }
                    PlaybackState::Playing => {
                        eprint!("\r{}s remaining ", current.remaining().as_secs());
                    }
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                providers.player.stop().await;
                eprintln!("Stopped");
                break;
            }
        }
    }
    Ok(())
}

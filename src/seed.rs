//! Sample discussions for a fresh store.

use chrono::Utc;

use crate::error::LobbyError;
use crate::models::{NewThread, ThreadId, User};
use crate::store::DiscussionStore;

fn sample_user(n: u32, color: &str) -> User {
    User {
        id: format!("anon_{n}"),
        display_name: format!("Anonymous{n}"),
        color: color.to_string(),
        joined_at: Utc::now(),
    }
}

/// Creates the sample threads through the regular command path and returns
/// their ids, most recently active last.
pub fn seed_demo(store: &mut DiscussionStore) -> Result<Vec<ThreadId>, LobbyError> {
    let a = sample_user(123, "#FF6B6B");
    let b = sample_user(456, "#4ECDC4");
    let c = sample_user(789, "#45B7D1");

    let esports = store.create_thread(
        NewThread::new(
            "CS2 Major Championship Predictions",
            "Esports",
            "I think Team Liquid has a real shot this time. \
             Their recent performance has been incredible.",
        )
        .with_description("Who will win the upcoming major tournament?"),
        &c,
    )?;

    let elden = store.create_thread(
        NewThread::new(
            "New Elden Ring DLC Discussion",
            "Action RPG",
            "The new DLC looks amazing! Has anyone tried the new bosses yet?",
        )
        .with_description("Discussing the latest DLC content and strategies"),
        &a,
    )?;
    store.post_message(
        &elden,
        &b,
        "Yeah! The difficulty is insane but so rewarding. The new areas are beautiful.",
    )?;

    Ok(vec![esports, elden])
}

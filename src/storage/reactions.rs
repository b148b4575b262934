use super::{load_json, save_json, KeyValueStore};
use crate::models::{LikeCounts, Reaction};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const REACTIONS_KEY: &str = "nomad-user-reactions";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct StoredReaction {
    city_id: String,
    reaction: Reaction,
}

/// Anonymous like/dislike state per city. At most one reaction per city.
pub struct ReactionStore<S> {
    store: S,
}

impl<S: KeyValueStore> ReactionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<StoredReaction> {
        match load_json(&self.store, REACTIONS_KEY) {
            Ok(reactions) => reactions.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load user reactions");
                Vec::new()
            }
        }
    }

    pub fn reaction(&self, city_id: &str) -> Option<Reaction> {
        self.load()
            .into_iter()
            .find(|r| r.city_id == city_id)
            .map(|r| r.reaction)
    }

    /// Record a button press. Pressing the current reaction again clears it;
    /// pressing the other one replaces it. Returns the new reaction.
    pub fn toggle(&self, city_id: &str, pressed: Reaction) -> Option<Reaction> {
        let mut reactions = self.load();
        let index = reactions.iter().position(|r| r.city_id == city_id);

        let next = match index.map(|i| reactions[i].reaction) {
            Some(current) if current == pressed => None,
            _ => Some(pressed),
        };

        match (index, next) {
            (Some(i), None) => {
                reactions.remove(i);
            }
            (Some(i), Some(reaction)) => reactions[i].reaction = reaction,
            (None, Some(reaction)) => reactions.push(StoredReaction {
                city_id: city_id.to_string(),
                reaction,
            }),
            (None, None) => {}
        }

        if let Err(e) = save_json(&self.store, REACTIONS_KEY, &reactions) {
            warn!(error = %e, city_id, "Failed to save user reaction");
        }

        next
    }

    /// Toggle `pressed` and report what to display. `backend` must be the
    /// server totals, which never include this visitor's local reaction.
    pub fn press(&self, city_id: &str, pressed: Reaction, backend: LikeCounts) -> ReactionUpdate {
        let reaction = self.toggle(city_id, pressed);
        ReactionUpdate {
            reaction,
            counts: optimistic_counts(backend, None, reaction),
        }
    }
}

/// Outcome of a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReactionUpdate {
    pub reaction: Option<Reaction>,
    pub counts: LikeCounts,
}

/// Counters to display right after a reaction change, before the backend
/// confirms. Never drops below zero.
pub fn optimistic_counts(
    current: LikeCounts,
    previous: Option<Reaction>,
    next: Option<Reaction>,
) -> LikeCounts {
    let mut counts = current;
    match previous {
        Some(Reaction::Like) => counts.likes = counts.likes.saturating_sub(1),
        Some(Reaction::Dislike) => counts.dislikes = counts.dislikes.saturating_sub(1),
        None => {}
    }
    match next {
        Some(Reaction::Like) => counts.likes += 1,
        Some(Reaction::Dislike) => counts.dislikes += 1,
        None => {}
    }
    counts
}

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::resolver::result::FieldState;

struct Slot {
    state: FieldState,
    generation: u64,
}

/// Latest state per dynamic field, tagged with the generation that produced it.
///
/// A write from an older generation never replaces a newer one, so a slow cascade
/// finishing late cannot overwrite the result of a later change.
#[derive(Default)]
pub struct FieldStateStore {
    slots: RwLock<HashMap<String, Slot>>,
}

impl FieldStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, field_id: &str) -> FieldState {
        self.slots
            .read()
            .await
            .get(field_id)
            .map(|s| s.state.clone())
            .unwrap_or(FieldState::Unresolved)
    }

    /// Returns `false` when a newer generation already owns the slot.
    pub async fn commit(&self, field_id: &str, state: FieldState, generation: u64) -> bool {
        let mut slots = self.slots.write().await;
        match slots.get_mut(field_id) {
            Some(slot) if slot.generation > generation => false,
            Some(slot) => {
                slot.state = state;
                slot.generation = generation;
                true
            }
            None => {
                slots.insert(field_id.to_string(), Slot { state, generation });
                true
            }
        }
    }

    pub async fn snapshot(&self) -> BTreeMap<String, FieldState> {
        self.slots
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.state.clone()))
            .collect()
    }
}

//! PlayerTable: player records keyed by id, kept in first-seen order.

use crate::models::player::{PlayerId, PlayerRecord};
use std::collections::HashMap;

/// Player records built by one aggregation pass.
///
/// Records stay in the order their players first appeared, which keeps
/// every later pass (and the final sort for exact ties) deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerTable {
    index: HashMap<PlayerId, usize>,
    records: Vec<PlayerRecord>,
}

impl PlayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the player's record, inserting an all-zero record on first sight.
    pub fn ensure(&mut self, id: &PlayerId) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.records.len();
        self.records.push(PlayerRecord::new(id.clone()));
        self.index.insert(id.clone(), idx);
        idx
    }

    /// Mutable record for a player, created if missing.
    pub fn entry(&mut self, id: &PlayerId) -> &mut PlayerRecord {
        let idx = self.ensure(id);
        &mut self.records[idx]
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order.
    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PlayerRecord> {
        self.records
    }
}

//! In-memory Balance Store
//!
//! Each record lives behind its own mutex; the map only hands out `Arc`s to
//! those cells. A lock is held just for the compare-and-write instant, so
//! transfers on disjoint records never wait on each other.
//!
//! # Lock ordering
//! Whenever more than one record is locked (pair writes, snapshots), cells
//! are locked in ascending id order. This keeps pair writes and snapshot
//! reads deadlock-free against each other.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::error::StoreError;
use super::models::{Benefit, NewBenefit};
use super::store::{BalanceStore, ensure_storable};
use crate::core_types::{BenefitId, Version};

type Cell = Arc<Mutex<Benefit>>;

/// Lock a record cell. A poisoned cell still holds a consistent record
/// because writes never panic halfway through.
fn lock(cell: &Cell) -> MutexGuard<'_, Benefit> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

fn check_version(slot: &Benefit, expected: Version) -> Result<(), StoreError> {
    if slot.version != expected {
        return Err(StoreError::VersionConflict {
            id: slot.id,
            expected,
            actual: slot.version,
        });
    }
    Ok(())
}

/// Copy mutable fields into the slot and bump its version. `id` is kept.
fn overwrite(slot: &mut Benefit, incoming: &Benefit, expected: Version) {
    slot.name.clone_from(&incoming.name);
    slot.description.clone_from(&incoming.description);
    slot.amount = incoming.amount;
    slot.active = incoming.active;
    slot.version = expected + 1;
}

/// Process-local store, used by tests and when no database is configured.
pub struct MemoryStore {
    records: DashMap<BenefitId, Cell>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    fn cell(&self, id: BenefitId) -> Result<Cell, StoreError> {
        self.records
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(StoreError::NotFound(id))
    }

    /// Consistent view of every record, in id order.
    ///
    /// Holds all record locks at once, so a pair write is either fully
    /// visible or not at all.
    pub fn snapshot(&self) -> Vec<Benefit> {
        let mut cells: Vec<(BenefitId, Cell)> = self
            .records
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        cells.sort_unstable_by_key(|(id, _)| *id);

        let guards: Vec<MutexGuard<'_, Benefit>> = cells.iter().map(|(_, c)| lock(c)).collect();
        guards.iter().map(|g| (**g).clone()).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BalanceStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, new: NewBenefit) -> Result<Benefit, StoreError> {
        ensure_storable(new.amount)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let benefit = Benefit {
            id,
            name: new.name,
            description: new.description,
            amount: new.amount,
            active: true,
            version: 0,
        };
        self.records
            .insert(id, Arc::new(Mutex::new(benefit.clone())));

        debug!(id = id, amount = %benefit.amount, "Benefit created");
        Ok(benefit)
    }

    async fn get(&self, id: BenefitId) -> Result<Benefit, StoreError> {
        let cell = self.cell(id)?;
        let current = lock(&cell).clone();
        Ok(current)
    }

    async fn list_active(&self) -> Result<Vec<Benefit>, StoreError> {
        Ok(self.snapshot().into_iter().filter(|b| b.active).collect())
    }

    async fn put(
        &self,
        benefit: &Benefit,
        expected_version: Version,
    ) -> Result<Benefit, StoreError> {
        ensure_storable(benefit.amount)?;
        let cell = self.cell(benefit.id)?;

        let mut slot = lock(&cell);
        check_version(&slot, expected_version)?;
        overwrite(&mut slot, benefit, expected_version);

        debug!(id = benefit.id, version = slot.version, "Benefit written");
        Ok(slot.clone())
    }

    async fn put_pair(
        &self,
        first: &Benefit,
        first_expected: Version,
        second: &Benefit,
        second_expected: Version,
    ) -> Result<(Benefit, Benefit), StoreError> {
        if first.id == second.id {
            return Err(StoreError::DuplicateWrite(first.id));
        }
        ensure_storable(first.amount)?;
        ensure_storable(second.amount)?;

        let first_cell = self.cell(first.id)?;
        let second_cell = self.cell(second.id)?;

        let first_is_lower = first.id < second.id;
        let (mut lower, mut upper) = if first_is_lower {
            (lock(&first_cell), lock(&second_cell))
        } else {
            let lower = lock(&second_cell);
            (lower, lock(&first_cell))
        };
        let (first_slot, second_slot) = if first_is_lower {
            (&mut *lower, &mut *upper)
        } else {
            (&mut *upper, &mut *lower)
        };

        // Validate both sides before touching either.
        check_version(first_slot, first_expected)?;
        check_version(second_slot, second_expected)?;

        overwrite(first_slot, first, first_expected);
        overwrite(second_slot, second, second_expected);

        debug!(
            first = first.id,
            second = second.id,
            "Pair write committed"
        );
        Ok((first_slot.clone(), second_slot.clone()))
    }
}

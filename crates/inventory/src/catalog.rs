//! Ordered, lock-guarded collection of shared entity handles.
//!
//! One `RwLock` covers both the id counter and the entries, so id issuance and
//! structural changes are serialized together.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_core::{DomainError, DomainResult, Entity, SequentialId};

/// A structural change made to a catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CatalogChange<Id> {
    Added { id: Id, position: usize },
    Replaced { position: usize, replaced_id: Id, id: Id },
    Removed { id: Id, position: usize },
}

#[derive(Debug)]
struct CatalogState<T> {
    last_id: u32,
    entries: Vec<Arc<T>>,
}

#[derive(Debug)]
pub struct Catalog<T> {
    state: RwLock<CatalogState<T>>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(CatalogState {
                last_id: 0,
                entries: Vec::new(),
            }),
        }
    }
}

impl<T> Catalog<T>
where
    T: Entity,
    T::Id: SequentialId,
{
    pub fn new() -> Self {
        Self::default()
    }

    // Every critical section leaves the state consistent, so a panic in
    // another holder does not invalidate it.
    fn read(&self) -> RwLockReadGuard<'_, CatalogState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pre-increment the counter and return the new id (first id is 1).
    ///
    /// Once `u32::MAX` has been issued every further call fails with
    /// `IdsExhausted` and the counter stays put, so no id is handed out twice.
    pub fn next_id(&self) -> DomainResult<T::Id> {
        let mut state = self.write();
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| DomainError::ids_exhausted(<T::Id as SequentialId>::KIND))?;
        state.last_id = next;
        Ok(<T::Id as SequentialId>::from_sequence(next))
    }

    /// Order-preserving copy of the handles.
    pub fn snapshot(&self) -> Vec<Arc<T>> {
        self.read().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    /// Append `entry`. `notify` runs while the catalog is still locked.
    pub fn push(&self, entry: Arc<T>, notify: impl FnOnce(CatalogChange<T::Id>)) {
        let mut state = self.write();
        let id = entry.id();
        state.entries.push(entry);
        let position = state.entries.len() - 1;
        notify(CatalogChange::Added { id, position });
    }

    /// Linear scan that keeps the *last* entry carrying `id`.
    pub fn find_by_id(&self, id: T::Id) -> Option<Arc<T>> {
        let state = self.read();
        let mut found = None;
        for entry in state.entries.iter() {
            if entry.id() == id {
                found = Some(Arc::clone(entry));
            }
        }
        found
    }

    /// Position of the entry `find_by_id` would return.
    pub fn position_of(&self, id: T::Id) -> Option<usize> {
        self.read().entries.iter().rposition(|entry| entry.id() == id)
    }

    /// Exact, case-sensitive name match, in collection order.
    pub fn find_by_name(&self, name: &str) -> Vec<Arc<T>> {
        self.filter(|entry| entry.name() == name)
    }

    /// Case-insensitive substring match, in collection order.
    pub fn find_by_name_fragment(&self, fragment: &str) -> Vec<Arc<T>> {
        let needle = fragment.to_lowercase();
        self.filter(|entry| entry.name().to_lowercase().contains(&needle))
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<Arc<T>> {
        self.read()
            .entries
            .iter()
            .filter(|&entry| predicate(entry))
            .cloned()
            .collect()
    }

    /// Replace the entry at `position`. Out of range leaves the catalog untouched.
    pub fn replace(
        &self,
        position: usize,
        entry: Arc<T>,
        notify: impl FnOnce(CatalogChange<T::Id>),
    ) -> DomainResult<()> {
        let mut state = self.write();
        let len = state.entries.len();
        let id = entry.id();
        let slot = state
            .entries
            .get_mut(position)
            .ok_or_else(|| DomainError::index_out_of_bounds(position, len))?;
        let replaced = std::mem::replace(slot, entry);
        notify(CatalogChange::Replaced {
            position,
            replaced_id: replaced.id(),
            id,
        });
        Ok(())
    }

    /// Remove the first entry that is `entry` itself (same allocation).
    pub fn remove(&self, entry: &Arc<T>, notify: impl FnOnce(CatalogChange<T::Id>)) -> bool {
        let mut state = self.write();
        let Some(position) = state
            .entries
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, entry))
        else {
            return false;
        };
        let removed = state.entries.remove(position);
        notify(CatalogChange::Removed {
            id: removed.id(),
            position,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::Part;
    use stockroom_core::PartId;

    fn part(id: u32, name: &str) -> Arc<Part> {
        Arc::new(Part::outsourced(PartId::new(id), name, 1.0, 1, 0, 5, "Acme"))
    }

    fn ignore(_: CatalogChange<PartId>) {}

    #[test]
    fn next_id_starts_at_one_and_increments() {
        let catalog: Catalog<Part> = Catalog::new();
        assert_eq!(catalog.next_id(), Ok(PartId::new(1)));
        assert_eq!(catalog.next_id(), Ok(PartId::new(2)));
        assert_eq!(catalog.next_id(), Ok(PartId::new(3)));
    }

    #[test]
    fn next_id_fails_once_counter_is_exhausted() {
        let catalog: Catalog<Part> = Catalog {
            state: RwLock::new(CatalogState {
                last_id: u32::MAX - 1,
                entries: Vec::new(),
            }),
        };

        assert_eq!(catalog.next_id(), Ok(PartId::new(u32::MAX)));
        assert_eq!(catalog.next_id(), Err(DomainError::ids_exhausted("part")));
        assert_eq!(catalog.next_id(), Err(DomainError::ids_exhausted("part")));
    }

    #[test]
    fn push_reports_position_of_new_entry() {
        let catalog = Catalog::new();
        let mut changes = Vec::new();
        catalog.push(part(1, "A"), |c| changes.push(c));
        catalog.push(part(2, "B"), |c| changes.push(c));

        assert_eq!(
            changes,
            vec![
                CatalogChange::Added { id: PartId::new(1), position: 0 },
                CatalogChange::Added { id: PartId::new(2), position: 1 },
            ]
        );
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn find_by_id_and_position_agree_on_last_duplicate() {
        let catalog = Catalog::new();
        let first = part(4, "First");
        let other = part(5, "Other");
        let second = part(4, "Second");
        catalog.push(first, ignore);
        catalog.push(other, ignore);
        catalog.push(second.clone(), ignore);

        let found = catalog.find_by_id(PartId::new(4)).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert_eq!(catalog.position_of(PartId::new(4)), Some(2));
        assert_eq!(catalog.position_of(PartId::new(9)), None);
    }

    #[test]
    fn fragment_search_ignores_case() {
        let catalog = Catalog::new();
        catalog.push(part(1, "Brake Pad"), ignore);
        catalog.push(part(2, "brake cable"), ignore);
        catalog.push(part(3, "Wheel"), ignore);

        let names: Vec<String> = catalog
            .find_by_name_fragment("BRAKE")
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Brake Pad", "brake cable"]);
        assert!(catalog.find_by_name("brake pad").is_empty());
    }

    #[test]
    fn replace_out_of_range_does_not_notify_or_mutate() {
        let catalog = Catalog::new();
        let kept = part(1, "A");
        catalog.push(kept.clone(), ignore);

        let mut notified = false;
        let err = catalog
            .replace(1, part(2, "B"), |_| notified = true)
            .unwrap_err();

        assert_eq!(err, DomainError::index_out_of_bounds(1, 1));
        assert!(!notified);
        assert!(Arc::ptr_eq(&catalog.snapshot()[0], &kept));
    }

    #[test]
    fn replace_reports_old_and_new_ids() {
        let catalog = Catalog::new();
        catalog.push(part(1, "A"), ignore);

        let mut change = None;
        catalog.replace(0, part(7, "B"), |c| change = Some(c)).unwrap();

        assert_eq!(
            change,
            Some(CatalogChange::Replaced {
                position: 0,
                replaced_id: PartId::new(1),
                id: PartId::new(7),
            })
        );
    }

    #[test]
    fn remove_matches_identity_not_value() {
        let catalog = Catalog::new();
        let original = part(1, "A");
        let copy = Arc::new((*original).clone());
        catalog.push(original.clone(), ignore);

        assert!(!catalog.remove(&copy, ignore));
        assert!(catalog.remove(&original, ignore));
        assert!(catalog.is_empty());
    }
}

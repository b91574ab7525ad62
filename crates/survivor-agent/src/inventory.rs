use serde::{Deserialize, Serialize};

use crate::facts::{ItemInfo, ItemKind};

/// The agent's view of its fixed-capacity inventory.
///
/// Refreshed from the host every tick by perception; the actions that grab,
/// use and drop items keep it current within the tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemInfo>>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, slot: usize) -> Option<&ItemInfo> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots, in slot order.
    pub fn items(&self) -> impl Iterator<Item = (usize, &ItemInfo)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.as_ref().map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn free_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, item)| item.is_none().then_some(slot))
    }

    pub fn has_free_slot(&self) -> bool {
        self.first_free_slot().is_some()
    }

    pub fn slots_of_kind(&self, kind: ItemKind) -> Vec<usize> {
        self.items()
            .filter(|(_, item)| item.kind == kind)
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn count_of(&self, kind: ItemKind) -> usize {
        self.items().filter(|(_, item)| item.kind == kind).count()
    }

    pub fn contains_kind(&self, kind: ItemKind) -> bool {
        self.items().any(|(_, item)| item.kind == kind)
    }

    /// Store `item` in `slot`. Fails when the slot is taken or out of range.
    pub fn put(&mut self, slot: usize, item: ItemInfo) -> bool {
        match self.slots.get_mut(slot) {
            Some(entry @ None) => {
                *entry = Some(item);
                true
            }
            _ => false,
        }
    }

    pub fn take(&mut self, slot: usize) -> Option<ItemInfo> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Replace the contents with what the host reports. Capacity is kept:
    /// missing slots become empty and extra ones are ignored. Returns whether
    /// anything changed.
    pub fn sync<I>(&mut self, reported: I) -> bool
    where
        I: IntoIterator<Item = Option<ItemInfo>>,
    {
        let mut reported = reported.into_iter();
        let mut changed = false;
        for entry in &mut self.slots {
            let next = reported.next().flatten();
            if *entry != next {
                *entry = next;
                changed = true;
            }
        }
        changed
    }

    pub fn set_charge(&mut self, slot: usize, charge: i32) {
        if let Some(Some(item)) = self.slots.get_mut(slot) {
            item.charge = charge;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::EntityId;
    use survivor_nav::Vec2;

    fn item(id: u64, kind: ItemKind) -> ItemInfo {
        ItemInfo {
            entity: EntityId(id),
            kind,
            location: Vec2::ZERO,
            charge: 1,
        }
    }

    #[test]
    fn put_fills_free_slots_only() {
        let mut inv = Inventory::new(2);
        assert!(inv.put(1, item(1, ItemKind::Food)));
        assert!(!inv.put(1, item(2, ItemKind::Food)));
        assert!(!inv.put(5, item(3, ItemKind::Food)));
        assert_eq!(inv.first_free_slot(), Some(0));
    }

    #[test]
    fn kind_queries_and_take() {
        let mut inv = Inventory::new(4);
        inv.put(0, item(1, ItemKind::Food));
        inv.put(2, item(2, ItemKind::Pistol));
        inv.put(3, item(3, ItemKind::Food));

        assert_eq!(inv.slots_of_kind(ItemKind::Food), vec![0, 3]);
        assert_eq!(inv.count_of(ItemKind::Food), 2);
        assert!(!inv.contains_kind(ItemKind::Medkit));

        assert_eq!(inv.take(0).map(|i| i.entity), Some(EntityId(1)));
        assert_eq!(inv.take(0), None);
        assert_eq!(inv.count_of(ItemKind::Food), 1);
        assert!(inv.has_free_slot());
    }

    #[test]
    fn sync_mirrors_reported_slots_within_capacity() {
        let mut inv = Inventory::new(3);
        inv.put(0, item(1, ItemKind::Food));

        let reported = vec![None, Some(item(2, ItemKind::Medkit)), None, Some(item(3, ItemKind::Pistol))];
        assert!(inv.sync(reported.clone()));
        assert_eq!(inv.get(0), None);
        assert_eq!(inv.get(1).map(|i| i.kind), Some(ItemKind::Medkit));
        assert_eq!(inv.capacity(), 3);
        assert_eq!(inv.free_slots().collect::<Vec<_>>(), vec![0, 2]);

        assert!(!inv.sync(reported));
        assert!(inv.sync(Vec::new()));
        assert!(inv.is_empty());
    }
}

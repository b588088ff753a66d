//! The item store
//!
//! [`ItemStore`] owns the packing list and is the only place it changes.
//! Every effective mutation builds a new snapshot and swaps it in, so a
//! caller holding an older [`Arc`] can detect a change with [`Arc::ptr_eq`].
//! Operations on a missing id or an empty description do nothing: the
//! snapshot, the revision and the subscribers are left alone.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::id::{IdAllocator, IdError, ItemId};
use super::item::{Item, Quantity, QuantityError};

/// A mutation request, one variant per store operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        description: String,
        quantity: Quantity,
    },
    TogglePacked(ItemId),
    SetQuantity(ItemId, Quantity),
    Delete(ItemId),
}

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Id(#[from] IdError),

    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

impl FromStr for Action {
    type Err = ActionError;

    /// Parses a shell command line
    ///
    /// `add [QTY] DESCRIPTION...`, `toggle ID`, `qty ID N`, `delete ID`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(ActionError::Empty)?;

        match command.to_lowercase().as_str() {
            "add" => {
                let rest: Vec<&str> = words.collect();
                // A leading number is the quantity, unless it is the whole description
                let (quantity, description) = match rest.split_first() {
                    Some((first, tail)) if !tail.is_empty() && is_number(first) => {
                        (first.parse::<Quantity>()?, tail.join(" "))
                    }
                    _ => (Quantity::default(), rest.join(" ")),
                };
                if description.is_empty() {
                    return Err(ActionError::MissingArgument("description"));
                }
                Ok(Action::Add {
                    description,
                    quantity,
                })
            }
            "toggle" | "pack" => {
                let id = next_arg(&mut words, "id")?.parse::<ItemId>()?;
                no_more(&mut words)?;
                Ok(Action::TogglePacked(id))
            }
            "qty" | "quantity" => {
                let id = next_arg(&mut words, "id")?.parse::<ItemId>()?;
                let quantity = next_arg(&mut words, "quantity")?.parse::<Quantity>()?;
                no_more(&mut words)?;
                Ok(Action::SetQuantity(id, quantity))
            }
            "delete" | "rm" => {
                let id = next_arg(&mut words, "id")?.parse::<ItemId>()?;
                no_more(&mut words)?;
                Ok(Action::Delete(id))
            }
            _ => Err(ActionError::UnknownCommand(command.to_string())),
        }
    }
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

fn next_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, ActionError> {
    words.next().ok_or(ActionError::MissingArgument(name))
}

fn no_more<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(), ActionError> {
    match words.next() {
        Some(extra) => Err(ActionError::UnexpectedArgument(extra.to_string())),
        None => Ok(()),
    }
}

/// Handle returned by [`ItemStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&[Item])>;

/// Ordered, in-memory packing list
pub struct ItemStore {
    /// Current snapshot, replaced wholesale on every change
    items: Arc<[Item]>,

    /// Source of fresh item ids
    ids: IdAllocator,

    /// Number of effective changes so far
    revision: u64,

    /// Change observers, in registration order
    listeners: Vec<(SubscriptionId, Listener)>,

    next_subscription: u64,
}

impl ItemStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a store holding the example items
    pub fn seeded() -> Self {
        Self::with_items(seed_items())
    }

    /// Creates a store holding the given items, in order
    ///
    /// Fresh ids continue after the largest id present.
    pub fn with_items(items: Vec<Item>) -> Self {
        let ids = IdAllocator::after(items.iter().map(|item| &item.id));
        Self {
            items: items.into(),
            ids,
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Appends a new unpacked item
    ///
    /// Returns the new id, or `None` when the description is empty or no
    /// id is left to hand out.
    pub fn add(&mut self, description: impl Into<String>, quantity: Quantity) -> Option<ItemId> {
        let description = description.into();
        if description.is_empty() {
            return None;
        }

        let id = self.ids.allocate()?;
        let mut next = Vec::with_capacity(self.items.len() + 1);
        next.extend(self.items.iter().cloned());
        next.push(Item::new(id, description, quantity));
        self.replace(next);

        Some(id)
    }

    /// Flips the packed flag of one item
    pub fn toggle_packed(&mut self, id: ItemId) -> bool {
        self.update(id, Item::toggled)
    }

    /// Replaces the quantity of one item
    ///
    /// Setting the quantity it already has changes nothing.
    pub fn set_quantity(&mut self, id: ItemId, quantity: Quantity) -> bool {
        if self.get(id).map(|item| item.quantity) == Some(quantity) {
            return false;
        }
        self.update(id, |item| item.with_quantity(quantity))
    }

    /// Removes one item
    pub fn delete(&mut self, id: ItemId) -> bool {
        if !self.contains(id) {
            return false;
        }

        let next = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.replace(next);
        true
    }

    /// Applies an action, returning true if the list changed
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Add {
                description,
                quantity,
            } => self.add(description, quantity).is_some(),
            Action::TogglePacked(id) => self.toggle_packed(id),
            Action::SetQuantity(id, quantity) => self.set_quantity(id, quantity),
            Action::Delete(id) => self.delete(id),
        }
    }

    /// Registers a listener called with the new list after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&[Item]) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != len_before
    }

    /// Current items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Shared handle to the current snapshot
    pub fn snapshot(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    /// Number of effective changes since creation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the matching item to a new value, copying the rest
    fn update(&mut self, id: ItemId, change: impl Fn(&Item) -> Item) -> bool {
        if !self.contains(id) {
            return false;
        }

        let next = self
            .items
            .iter()
            .map(|item| if item.id == id { change(item) } else { item.clone() })
            .collect();
        self.replace(next);
        true
    }

    fn replace(&mut self, next: Vec<Item>) {
        self.items = next.into();
        self.revision += 1;

        let items = Arc::clone(&self.items);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&items);
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemStore")
            .field("items", &self.items)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// The example list a new session starts with
fn seed_items() -> Vec<Item> {
    vec![
        Item::new(ItemId::new(1), "Shirt", quantity(5)),
        Item::new(ItemId::new(2), "Pants", quantity(2)).into_packed(),
    ]
}

fn quantity(value: u32) -> Quantity {
    Quantity::new(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::domain::compute_stats;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn ids(store: &ItemStore) -> Vec<u64> {
        store.items().iter().map(|item| item.id.get()).collect()
    }

    // ==========================================================================
    // add
    // ==========================================================================

    #[test]
    fn add_appends_one_unpacked_item() {
        let mut store = ItemStore::seeded();
        let before: Vec<Item> = store.items().to_vec();

        let id = store.add("Socks", qty(3)).unwrap();

        assert_eq!(store.len(), before.len() + 1);
        assert_eq!(&store.items()[..before.len()], &before[..]);
        let added = store.items().last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.description, "Socks");
        assert_eq!(added.quantity, qty(3));
        assert!(!added.packed);
    }

    #[test]
    fn add_empty_description_is_noop() {
        let mut store = ItemStore::seeded();
        let before = store.snapshot();

        assert_eq!(store.add("", qty(2)), None);

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn add_keeps_whitespace_descriptions() {
        // Trimming is the caller's job
        let mut store = ItemStore::new();
        assert!(store.add(" ", Quantity::MIN).is_some());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = ItemStore::seeded();
        let socks = store.add("Socks", qty(1)).unwrap();
        assert_eq!(socks, ItemId::new(3));

        store.delete(socks);
        let hat = store.add("Hat", qty(1)).unwrap();

        assert_eq!(hat, ItemId::new(4));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = ItemStore::new();
        store.add("Zebra costume", qty(1));
        store.add("Apples", qty(6));
        store.add("Map", qty(1));

        let names: Vec<&str> = store
            .items()
            .iter()
            .map(|item| item.description.as_str())
            .collect();
        assert_eq!(names, vec!["Zebra costume", "Apples", "Map"]);
    }

    // ==========================================================================
    // toggle_packed
    // ==========================================================================

    #[test]
    fn toggle_flips_only_the_matching_item() {
        let mut store = ItemStore::seeded();
        let before: Vec<Item> = store.items().to_vec();

        assert!(store.toggle_packed(ItemId::new(1)));

        let after = store.items();
        assert!(after[0].packed);
        assert_eq!(after[0].description, before[0].description);
        assert_eq!(after[0].quantity, before[0].quantity);
        assert_eq!(after[1], before[1]);
    }

    #[test]
    fn toggle_twice_restores_the_list() {
        let mut store = ItemStore::seeded();
        let before: Vec<Item> = store.items().to_vec();

        store.toggle_packed(ItemId::new(2));
        store.toggle_packed(ItemId::new(2));

        assert_eq!(store.items(), &before[..]);
    }

    #[test]
    fn toggle_missing_id_is_noop() {
        let mut store = ItemStore::seeded();
        let before = store.snapshot();

        assert!(!store.toggle_packed(ItemId::new(99)));
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    // ==========================================================================
    // set_quantity
    // ==========================================================================

    #[test]
    fn set_quantity_replaces_only_quantity() {
        let mut store = ItemStore::seeded();

        assert!(store.set_quantity(ItemId::new(2), qty(7)));

        let pants = store.get(ItemId::new(2)).unwrap();
        assert_eq!(pants.quantity, qty(7));
        assert!(pants.packed);
        assert_eq!(store.get(ItemId::new(1)).unwrap().quantity, qty(5));
    }

    #[test]
    fn set_quantity_accepts_values_above_ui_range() {
        let mut store = ItemStore::seeded();
        assert!(store.set_quantity(ItemId::new(1), qty(42)));
        assert_eq!(store.get(ItemId::new(1)).unwrap().quantity.get(), 42);
    }

    #[test]
    fn set_quantity_missing_id_is_noop() {
        let mut store = ItemStore::seeded();
        assert!(!store.set_quantity(ItemId::new(5), qty(3)));
        assert_eq!(store.revision(), 0);
    }

    // ==========================================================================
    // delete
    // ==========================================================================

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = ItemStore::seeded();
        store.add("Socks", qty(2));

        assert!(store.delete(ItemId::new(2)));

        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn delete_missing_id_is_noop() {
        let mut store = ItemStore::seeded();
        let before = store.snapshot();

        assert!(!store.delete(ItemId::new(3)));

        assert_eq!(store.len(), 2);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    // ==========================================================================
    // Snapshots and subscriptions
    // ==========================================================================

    #[test]
    fn mutation_leaves_old_snapshot_intact() {
        let mut store = ItemStore::seeded();
        let before = store.snapshot();

        store.toggle_packed(ItemId::new(1));

        assert!(!before[0].packed);
        assert!(store.items()[0].packed);
        assert!(!Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn subscribers_see_every_change_but_no_noops() {
        let mut store = ItemStore::seeded();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |items| sink.borrow_mut().push(items.len()));

        store.add("Socks", qty(1));
        store.add("", qty(1));
        store.delete(ItemId::new(99));
        store.delete(ItemId::new(1));

        assert_eq!(*seen.borrow(), vec![3, 2]);
    }

    #[test]
    fn same_quantity_is_a_noop() {
        let mut store = ItemStore::seeded();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);
        let before = store.snapshot();

        assert!(!store.set_quantity(ItemId::new(1), qty(5)));
        assert!(!store.dispatch(Action::SetQuantity(ItemId::new(2), qty(2))));

        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(store.revision(), 0);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn add_after_largest_possible_id_is_ignored() {
        let mut store =
            ItemStore::with_items(vec![Item::new(ItemId::new(u64::MAX), "Shirt", qty(1))]);

        assert_eq!(store.add("Socks", qty(1)), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = ItemStore::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.add("Socks", qty(1));
        assert!(store.unsubscribe(sub));
        store.add("Hat", qty(1));

        assert_eq!(*count.borrow(), 1);
        assert!(!store.unsubscribe(sub));
    }

    // ==========================================================================
    // Actions
    // ==========================================================================

    #[test]
    fn dispatch_routes_each_action() {
        let mut store = ItemStore::seeded();

        assert!(store.dispatch(Action::Add {
            description: "Socks".to_string(),
            quantity: qty(4),
        }));
        assert!(store.dispatch(Action::TogglePacked(ItemId::new(3))));
        assert!(store.dispatch(Action::SetQuantity(ItemId::new(1), qty(2))));
        assert!(store.dispatch(Action::Delete(ItemId::new(2))));
        assert!(!store.dispatch(Action::Delete(ItemId::new(2))));

        assert_eq!(ids(&store), vec![1, 3]);
        assert_eq!(
            compute_stats(store.items()).summary(),
            "You have 2 items in the list. You already packed 1 (50%)."
        );
    }

    #[test]
    fn parse_add_with_quantity() {
        assert_eq!(
            "add 3 Wool socks".parse::<Action>().unwrap(),
            Action::Add {
                description: "Wool socks".to_string(),
                quantity: qty(3),
            }
        );
    }

    #[test]
    fn parse_add_without_quantity() {
        assert_eq!(
            "add Passport".parse::<Action>().unwrap(),
            Action::Add {
                description: "Passport".to_string(),
                quantity: Quantity::MIN,
            }
        );
    }

    #[test]
    fn parse_add_number_only_is_description() {
        assert_eq!(
            "add 42".parse::<Action>().unwrap(),
            Action::Add {
                description: "42".to_string(),
                quantity: Quantity::MIN,
            }
        );
    }

    #[test]
    fn parse_add_requires_description() {
        assert_eq!(
            "add".parse::<Action>(),
            Err(ActionError::MissingArgument("description"))
        );
    }

    #[test]
    fn parse_add_zero_quantity_fails() {
        assert_eq!(
            "add 0 Socks".parse::<Action>(),
            Err(ActionError::Quantity(QuantityError::Zero))
        );
    }

    #[test]
    fn parse_id_commands() {
        assert_eq!(
            "toggle 2".parse::<Action>().unwrap(),
            Action::TogglePacked(ItemId::new(2))
        );
        assert_eq!(
            "PACK #2".parse::<Action>().unwrap(),
            Action::TogglePacked(ItemId::new(2))
        );
        assert_eq!(
            "qty 1 8".parse::<Action>().unwrap(),
            Action::SetQuantity(ItemId::new(1), qty(8))
        );
        assert_eq!(
            "rm 1".parse::<Action>().unwrap(),
            Action::Delete(ItemId::new(1))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Action>(), Err(ActionError::Empty));
        assert_eq!(
            "fly 1".parse::<Action>(),
            Err(ActionError::UnknownCommand("fly".to_string()))
        );
        assert_eq!(
            "delete".parse::<Action>(),
            Err(ActionError::MissingArgument("id"))
        );
        assert_eq!(
            "qty 1".parse::<Action>(),
            Err(ActionError::MissingArgument("quantity"))
        );
        assert_eq!(
            "toggle 1 2".parse::<Action>(),
            Err(ActionError::UnexpectedArgument("2".to_string()))
        );
        assert!(matches!("toggle x".parse::<Action>(), Err(ActionError::Id(_))));
    }

    #[test]
    fn seed_has_shirt_and_pants() {
        let store = ItemStore::seeded();
        let items = store.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].to_string(), "5x Shirt");
        assert!(!items[0].packed);
        assert_eq!(items[1].to_string(), "2x Pants");
        assert!(items[1].packed);
    }
}

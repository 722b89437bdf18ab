//! Inventory domain module.
//!
//! This crate contains the business rules for inventory items, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Item
//! *code* acceptance is decided elsewhere (the validation dispatcher); this
//! crate only enforces the shape of the input.

pub mod item;

pub use item::{
    InventoryItem, ItemChanges, ItemId, NewItem, MAX_CODE_LEN, MAX_NAME_LEN,
};

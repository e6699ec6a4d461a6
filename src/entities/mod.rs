//! Entity module - SeaORM entity definitions for the database.
//! TravelBuddy keeps a single key-value table; domain records live inside its
//! JSON values rather than in tables of their own.

pub mod kv_entry;

pub use kv_entry::{Column as KvEntryColumn, Entity as KvEntry, Model as KvEntryModel};

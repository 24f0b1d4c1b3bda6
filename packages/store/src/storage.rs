//! Key/value storage abstraction mirroring the browser's `Storage` interface.
//!
//! Browser storage is synchronous, so unlike most I/O in this workspace the
//! trait is not async. Implementations swallow backend errors: an unavailable
//! storage reads as empty and ignores writes.

pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    /// Remove every key.
    fn clear(&self);
}

use crate::error::StorageError;

type Result<T> = std::result::Result<T, StorageError>;

/// A durable string slot store, in the shape of a browser's local storage.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`.
    /// It is not an error if the key does not exist.
    fn remove(&self, key: &str) -> Result<()>;

    /// Checks that `key` can be written at all.
    ///
    /// Callers check this up front so that a key the backend will never
    /// accept fails before any other work is done. Backends that accept
    /// every key keep the default.
    fn validate_key(&self, key: &str) -> Result<()> {
        let _ = key;
        Ok(())
    }
}

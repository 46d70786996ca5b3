use std::sync::Mutex;

use liftlog_domain::Snapshot;
use log::debug;

use crate::{StateRepository, StorageError, json};

/// Keeps the encoded state in memory. Used for tests and as the store of
/// last resort when no durable backend is available.
#[derive(Debug, Default)]
pub struct Memory {
    blob: Mutex<Option<String>>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateRepository for Memory {
    fn read_state(&self) -> Result<Option<Snapshot>, StorageError> {
        let blob = self
            .blob
            .lock()
            .map_err(|err| StorageError::Unknown(err.to_string()))?;
        match blob.as_deref() {
            Some(value) => Ok(Some(json::decode(value)?)),
            None => {
                debug!("no stored state");
                Ok(None)
            }
        }
    }

    fn write_state(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let encoded = json::encode(snapshot)?;
        *self
            .blob
            .lock()
            .map_err(|err| StorageError::Unknown(err.to_string()))? = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use liftlog_domain as domain;
    use pretty_assertions::assert_eq;

    use crate::tests::data::SNAPSHOT;

    use super::*;

    #[test]
    fn test_read_state_before_first_write() {
        let storage = Memory::new();
        assert_eq!(storage.read_state().unwrap(), None);
    }

    #[test]
    fn test_write_and_read_state() {
        let storage = Memory::new();
        storage.write_state(&SNAPSHOT).unwrap();
        assert_eq!(storage.read_state().unwrap(), Some(SNAPSHOT.clone()));
    }

    #[test]
    fn test_write_state_replaces_previous_state() {
        let storage = Memory::new();
        storage.write_state(&SNAPSHOT).unwrap();
        storage.write_state(&domain::Snapshot::default()).unwrap();
        assert_eq!(
            storage.read_state().unwrap(),
            Some(domain::Snapshot::default())
        );
    }
}

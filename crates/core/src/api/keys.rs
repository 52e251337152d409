//! Access key operations

use tracing::instrument;

use super::{Ack, KeyRepository, MockApi};
use crate::error::Result;
use crate::models::{AccessKey, AccessKeyPatch, NewAccessKey};

impl KeyRepository for MockApi<'_> {
    fn get_keys(&self) -> Result<Vec<AccessKey>> {
        Ok(self.store.keys.all().to_vec())
    }

    #[instrument(skip(self, key), fields(key_number = %key.key_number))]
    fn create_key(&mut self, key: NewAccessKey) -> Result<AccessKey> {
        self.store.keys.insert_with(|id, _| Ok(key.into_key(id)))
    }

    #[instrument(skip(self, patch))]
    fn update_key(&mut self, id: u64, patch: AccessKeyPatch) -> Result<AccessKey> {
        self.store.keys.update_with(id, |key| {
            patch.apply(key);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn delete_key(&mut self, id: u64) -> Result<Ack> {
        self.store.keys.remove(id)?;
        Ok(Ack::ok())
    }
}

//! Reader hardware and guard assignment operations

use tracing::{info, instrument};

use super::{DeviceRepository, MockApi};
use crate::error::{Error, Result};
use crate::models::{Adam, GuardReaderMapping, GuardReaderMappingForm, Reader};

impl DeviceRepository for MockApi<'_> {
    fn get_readers(&self) -> Result<Vec<Reader>> {
        Ok(self.store.readers.clone())
    }

    fn get_adams(&self) -> Result<Vec<Adam>> {
        Ok(self.store.adams.clone())
    }

    fn get_guard_reader_mappings(&self) -> Result<Vec<GuardReaderMapping>> {
        Ok(self.store.guard_reader_mappings.all().to_vec())
    }

    #[instrument(skip(self, form))]
    fn create_guard_reader_mapping(
        &mut self,
        form: &GuardReaderMappingForm,
    ) -> Result<GuardReaderMapping> {
        let (user_id, reader_id) = form.validate()?;

        if !self.store.users.contains(user_id) {
            return Err(Error::not_found("User", user_id));
        }
        if !self.store.readers.iter().any(|r| r.id == reader_id) {
            return Err(Error::not_found("Reader", reader_id));
        }

        let mapping = self
            .store
            .guard_reader_mappings
            .insert_with(|id, now| {
                Ok(GuardReaderMapping {
                    id,
                    user_id,
                    reader_id,
                    created_on: now,
                })
            })?;
        info!(user_id, reader_id, "Guard mapped to reader");
        Ok(mapping)
    }
}

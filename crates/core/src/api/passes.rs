//! Pass operations

use tracing::instrument;

use super::{Ack, MockApi, PassRepository};
use crate::error::Result;
use crate::invariants::assert_pass_invariants;
use crate::models::{NewPass, Pass, PassPatch};

impl PassRepository for MockApi<'_> {
    fn get_passes(&self) -> Result<Vec<Pass>> {
        Ok(self.store.passes.all().to_vec())
    }

    #[instrument(skip(self, pass), fields(visitor_id = pass.visitor_id, zone_id = pass.zone_id))]
    fn create_pass(&mut self, pass: NewPass) -> Result<Pass> {
        let created = self
            .store
            .passes
            .insert_with(|id, now| pass.into_pass(id, now))?;
        assert_pass_invariants(&created);
        Ok(created)
    }

    #[instrument(skip(self, patch))]
    fn update_pass(&mut self, id: u64, patch: PassPatch) -> Result<Pass> {
        let updated = self
            .store
            .passes
            .update_with(id, |pass| patch.apply(pass))?;
        assert_pass_invariants(&updated);
        Ok(updated)
    }

    #[instrument(skip(self))]
    fn delete_pass(&mut self, id: u64) -> Result<Ack> {
        self.store.passes.remove(id)?;
        Ok(Ack::ok())
    }
}

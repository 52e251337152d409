//! Zone operations

use tracing::instrument;

use super::{Ack, MockApi, ZoneRepository};
use crate::error::Result;
use crate::models::{NewZone, Zone, ZonePatch};

impl ZoneRepository for MockApi<'_> {
    fn get_zones(&self) -> Result<Vec<Zone>> {
        Ok(self.store.zones.all().to_vec())
    }

    #[instrument(skip(self, zone), fields(name = %zone.name))]
    fn create_zone(&mut self, zone: NewZone) -> Result<Zone> {
        self.store
            .zones
            .insert_with(|id, now| Ok(zone.into_zone(id, now)))
    }

    #[instrument(skip(self, patch))]
    fn update_zone(&mut self, id: u64, patch: ZonePatch) -> Result<Zone> {
        self.store.zones.update_with(id, |zone| {
            patch.apply(zone);
            Ok(())
        })
    }

    #[instrument(skip(self))]
    fn delete_zone(&mut self, id: u64) -> Result<Ack> {
        self.store.zones.remove(id)?;
        Ok(Ack::ok())
    }
}

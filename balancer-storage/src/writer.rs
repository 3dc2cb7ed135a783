//! Insert and update paths.

use balancer_db::{Database, DbError};
use balancer_model::{
    Device, Entity, EntityId, EntityKind, LoadBalancer, Probe, RealServer, SessionPersistence,
};
use tracing::debug;

use crate::persist::{table_for, Persist};
use crate::{StorageError, StorageResult};

/// Write handle bound to one backend connection.
///
/// Obtain it from [`crate::Storage::get_writer`] and drop it when the
/// logical operation is done.
pub struct Writer {
    db: Database,
}

impl Writer {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn write_device(&self, device: &Device) -> StorageResult<()> {
        self.insert(device)
    }

    pub fn write_load_balancer(&self, lb: &LoadBalancer) -> StorageResult<()> {
        self.insert(lb)
    }

    pub fn write_probe(&self, probe: &Probe) -> StorageResult<()> {
        self.insert(probe)
    }

    /// Inserts a real server. Its probe ids are stored as given; they are not
    /// checked against the probes table.
    pub fn write_rserver(&self, rs: &RealServer) -> StorageResult<()> {
        self.insert(rs)
    }

    pub fn write_sticky(&self, sticky: &SessionPersistence) -> StorageResult<()> {
        self.insert(sticky)
    }

    /// Inserts any entity, dispatching on its kind.
    pub fn write_entity(&self, entity: &Entity) -> StorageResult<()> {
        match entity {
            Entity::Device(e) => self.insert(e),
            Entity::LoadBalancer(e) => self.insert(e),
            Entity::RealServer(e) => self.insert(e),
            Entity::Probe(e) => self.insert(e),
            Entity::SessionPersistence(e) => self.insert(e),
        }
    }

    /// Rewrites the stored row of `entity` with all of its current values.
    ///
    /// Fails with [`StorageError::NotFound`] if no row has the entity's id.
    pub fn update_object_in_table(&self, entity: &Entity) -> StorageResult<()> {
        match entity {
            Entity::Device(e) => self.update(e),
            Entity::LoadBalancer(e) => self.update(e),
            Entity::RealServer(e) => self.update(e),
            Entity::Probe(e) => self.update(e),
            Entity::SessionPersistence(e) => self.update(e),
        }
    }

    /// Removes a session-persistence policy.
    pub fn delete_sticky(&self, id: impl Into<EntityId>) -> StorageResult<()> {
        let id = id.into();
        let kind = EntityKind::SessionPersistence;
        if self.db.delete(table_for(kind), id.get())? {
            debug!(kind = %kind, id = %id, "Deleted entity");
            Ok(())
        } else {
            Err(StorageError::NotFound { kind, id })
        }
    }

    fn insert<T: Persist>(&self, record: &T) -> StorageResult<()> {
        record.validate()?;
        let row = record.to_row()?;
        match self.db.insert(&row) {
            Ok(()) => {
                debug!(kind = %T::KIND, id = %record.id(), "Wrote entity");
                Ok(())
            }
            Err(DbError::Duplicate { .. }) => Err(StorageError::AlreadyExists {
                kind: T::KIND,
                id: record.id(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    fn update<T: Persist>(&self, record: &T) -> StorageResult<()> {
        record.validate()?;
        let row = record.to_row()?;
        if self.db.update(&row)? {
            debug!(kind = %T::KIND, id = %record.id(), "Updated entity");
            Ok(())
        } else {
            Err(StorageError::NotFound {
                kind: T::KIND,
                id: record.id(),
            })
        }
    }
}

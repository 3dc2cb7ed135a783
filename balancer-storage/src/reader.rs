//! Lookup and listing paths.

use balancer_db::{Database, Row};
use balancer_model::{
    Device, Entity, EntityId, EntityKind, LoadBalancer, Probe, RealServer, SessionPersistence,
};
use tracing::debug;

use crate::persist::Persist;
use crate::{StorageError, StorageResult};

/// Read handle bound to one backend connection.
///
/// Never writes. Sees whatever was most recently committed by any writer on
/// the same store.
pub struct Reader {
    db: Database,
}

impl Reader {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get_device_by_id(&self, id: impl Into<EntityId>) -> StorageResult<Device> {
        self.get(id.into())
    }

    pub fn get_load_balancer_by_id(&self, id: impl Into<EntityId>) -> StorageResult<LoadBalancer> {
        self.get(id.into())
    }

    pub fn get_rserver_by_id(&self, id: impl Into<EntityId>) -> StorageResult<RealServer> {
        self.get(id.into())
    }

    pub fn get_probe_by_id(&self, id: impl Into<EntityId>) -> StorageResult<Probe> {
        self.get(id.into())
    }

    pub fn get_sticky_by_id(&self, id: impl Into<EntityId>) -> StorageResult<SessionPersistence> {
        self.get(id.into())
    }

    /// Looks up an entity of any kind.
    pub fn get_entity(&self, kind: EntityKind, id: impl Into<EntityId>) -> StorageResult<Entity> {
        let id = id.into();
        Ok(match kind {
            EntityKind::Device => Entity::Device(self.get(id)?),
            EntityKind::LoadBalancer => Entity::LoadBalancer(self.get(id)?),
            EntityKind::RealServer => Entity::RealServer(self.get(id)?),
            EntityKind::Probe => Entity::Probe(self.get(id)?),
            EntityKind::SessionPersistence => Entity::SessionPersistence(self.get(id)?),
        })
    }

    /// Every load balancer, ordered by id. An empty store yields an empty list.
    pub fn get_load_balancers(&self) -> StorageResult<Vec<LoadBalancer>> {
        self.all()
    }

    pub fn get_load_balancers_for_tenant(&self, tenant_id: &str) -> StorageResult<Vec<LoadBalancer>> {
        self.filtered("tenant_id", tenant_id.to_string())
    }

    pub fn get_devices(&self) -> StorageResult<Vec<Device>> {
        self.all()
    }

    pub fn get_probes(&self) -> StorageResult<Vec<Probe>> {
        self.all()
    }

    pub fn get_rservers_for_lb(&self, lb_id: impl Into<EntityId>) -> StorageResult<Vec<RealServer>> {
        self.filtered("sf_id", lb_id.into().get())
    }

    pub fn get_stickies_for_lb(&self, lb_id: impl Into<EntityId>) -> StorageResult<Vec<SessionPersistence>> {
        self.filtered("lb_id", lb_id.into().get())
    }

    /// Resolves a real server's probe ids. Ids with no probe row are skipped.
    pub fn get_probes_for_rserver(&self, rs_id: impl Into<EntityId>) -> StorageResult<Vec<Probe>> {
        let rs: RealServer = self.get(rs_id.into())?;
        let mut probes = Vec::with_capacity(rs.probes.len());
        for probe_id in &rs.probes {
            match self.get::<Probe>(*probe_id) {
                Ok(probe) => probes.push(probe),
                Err(StorageError::NotFound { .. }) => {
                    debug!(rserver = %rs.id, probe = %probe_id, "Skipping dangling probe reference");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(probes)
    }

    fn get<T: Persist>(&self, id: EntityId) -> StorageResult<T> {
        let row = self
            .db
            .select_by_id(T::TABLE, id.get())?
            .ok_or(StorageError::NotFound { kind: T::KIND, id })?;
        T::from_row(&row)
    }

    fn all<T: Persist>(&self) -> StorageResult<Vec<T>> {
        decode_rows(&self.db.select_all(T::TABLE)?)
    }

    fn filtered<T: Persist>(&self, column: &str, value: impl Into<balancer_db::Value>) -> StorageResult<Vec<T>> {
        decode_rows(&self.db.select_where(T::TABLE, column, value)?)
    }
}

fn decode_rows<T: Persist>(rows: &[Row]) -> StorageResult<Vec<T>> {
    rows.iter().map(T::from_row).collect()
}

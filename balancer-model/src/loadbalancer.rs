use serde::{Deserialize, Serialize};

use crate::record::impl_record;
use crate::{Algorithm, EntityId, EntityKind, ExtraAttrs, LbStatus, Timestamp};

/// A tenant's load balancer.
///
/// `tenant_id` is stored so callers can scope queries; the store itself never
/// checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadBalancer {
    pub id: EntityId,
    pub name: String,
    pub tenant_id: String,
    /// Hosting device, if assigned. Not enforced against the devices table.
    pub device_id: Option<EntityId>,
    pub algorithm: Algorithm,
    pub status: LbStatus,
    pub created: Timestamp,
    pub updated: Timestamp,
    #[serde(default)]
    pub extra: ExtraAttrs,
}

impl LoadBalancer {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            name: name.into(),
            tenant_id: String::new(),
            device_id: None,
            algorithm: Algorithm::default(),
            status: LbStatus::default(),
            created: now,
            updated: now,
            extra: ExtraAttrs::new(),
        }
    }
}

impl_record!(LoadBalancer, EntityKind::LoadBalancer);

use serde::{Deserialize, Serialize};

use crate::record::impl_record;
use crate::{EntityId, EntityKind, ExtraAttrs};

/// A physical or virtual balancer appliance.
///
/// The capability flags describe hardware constraints consumed by
/// provisioning logic; the store treats them as plain columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: EntityId,
    pub name: String,
    /// Vendor/model tag, e.g. `"ACE"`.
    #[serde(rename = "type")]
    pub device_type: String,
    pub version: String,
    pub requires_vip_ip: bool,
    pub has_acl: bool,
    pub supports_vlan: bool,
    #[serde(default)]
    pub extra: ExtraAttrs,
}

impl Device {
    /// Creates a device with no capabilities and an empty extra bag.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            device_type: String::new(),
            version: String::new(),
            requires_vip_ip: false,
            has_acl: false,
            supports_vlan: false,
            extra: ExtraAttrs::new(),
        }
    }
}

impl_record!(Device, EntityKind::Device);

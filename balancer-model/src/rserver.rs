use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{EntityId, EntityKind, ExtraAttrs, IpType, LbStatus, ModelError, ModelResult, Record, ServerState, Timestamp};

/// A backend target behind a load balancer.
///
/// `sf_id` and `probes` are soft references: the store keeps the
/// identifiers but never checks that the load balancer or probes exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealServer {
    pub id: EntityId,
    /// Owning load balancer.
    pub sf_id: EntityId,
    pub name: String,
    /// Server type, e.g. `"Host"` or `"Redirect"`.
    #[serde(rename = "type")]
    pub server_type: String,
    pub web_host_redir: String,
    pub redirection_code: String,
    pub ip_type: IpType,
    pub address: String,
    pub port: Option<u16>,
    /// Administrative state.
    pub state: ServerState,
    /// Operational state as last reported by the device.
    pub opstate: ServerState,
    pub description: String,
    pub fail_on_all: Option<bool>,
    pub min_con: u32,
    pub max_con: u32,
    pub weight: u32,
    pub probes: BTreeSet<EntityId>,
    pub rate_bandwidth: Option<u64>,
    pub rate_connection: Option<u64>,
    pub backup_rs: Option<String>,
    pub backup_rs_port: Option<u16>,
    pub created: Timestamp,
    pub updated: Timestamp,
    pub status: LbStatus,
    pub cookie_str: Option<String>,
    pub condition: String,
    #[serde(default)]
    pub extra: ExtraAttrs,
}

impl RealServer {
    pub fn new(id: impl Into<EntityId>, sf_id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: id.into(),
            sf_id: sf_id.into(),
            name: name.into(),
            server_type: "Host".to_string(),
            web_host_redir: String::new(),
            redirection_code: String::new(),
            ip_type: IpType::default(),
            address: String::new(),
            port: None,
            state: ServerState::default(),
            opstate: ServerState::default(),
            description: String::new(),
            fail_on_all: None,
            min_con: 0,
            max_con: 0,
            weight: 1,
            probes: BTreeSet::new(),
            rate_bandwidth: None,
            rate_connection: None,
            backup_rs: None,
            backup_rs_port: None,
            created: now,
            updated: now,
            status: LbStatus::default(),
            cookie_str: None,
            condition: "ENABLED".to_string(),
            extra: ExtraAttrs::new(),
        }
    }

    /// Attaches a probe by identifier. Returns `false` if it was already attached.
    pub fn attach_probe(&mut self, probe_id: impl Into<EntityId>) -> bool {
        self.probes.insert(probe_id.into())
    }

    pub fn detach_probe(&mut self, probe_id: EntityId) -> bool {
        self.probes.remove(&probe_id)
    }
}

impl Record for RealServer {
    const KIND: EntityKind = EntityKind::RealServer;

    fn id(&self) -> EntityId {
        self.id
    }

    fn extra(&self) -> &ExtraAttrs {
        &self.extra
    }

    fn extra_mut(&mut self) -> &mut ExtraAttrs {
        &mut self.extra
    }

    fn validate(&self) -> ModelResult<()> {
        let invalid = |reason: String| ModelError::Invalid {
            kind: Self::KIND.as_str(),
            reason,
        };
        if !self.id.is_valid() {
            return Err(invalid(format!("identifier must be positive, got {}", self.id)));
        }
        if self.min_con > self.max_con && self.max_con != 0 {
            return Err(invalid(format!(
                "min_con {} exceeds max_con {}",
                self.min_con, self.max_con
            )));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::record::impl_record;
use crate::{EntityId, EntityKind, ExtraAttrs};

/// Extra-bag key holding the persistence type (e.g. `"HTTPCookie"`).
pub const STICKY_TYPE_KEY: &str = "type";
/// Extra-bag key holding the cookie name for cookie-based persistence.
pub const COOKIE_NAME_KEY: &str = "cookieName";

/// A session-persistence ("sticky") policy attached to a load balancer.
///
/// Only identity and ownership are fixed; the policy itself is entirely
/// described by the extra bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPersistence {
    pub id: EntityId,
    pub lb_id: EntityId,
    #[serde(default)]
    pub extra: ExtraAttrs,
}

impl SessionPersistence {
    pub fn new(id: impl Into<EntityId>, lb_id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            lb_id: lb_id.into(),
            extra: ExtraAttrs::new(),
        }
    }

    #[must_use]
    pub fn sticky_type(&self) -> Option<&str> {
        self.extra.get_str(STICKY_TYPE_KEY)
    }

    #[must_use]
    pub fn cookie_name(&self) -> Option<&str> {
        self.extra.get_str(COOKIE_NAME_KEY)
    }
}

impl_record!(SessionPersistence, EntityKind::SessionPersistence);

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{
    Device, EntityId, ExtraAttrs, LoadBalancer, ModelError, ModelResult, Probe, RealServer, Record,
    SessionPersistence,
};

/// Discriminant of the persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "device")]
    Device,
    #[serde(rename = "loadbalancer")]
    LoadBalancer,
    #[serde(rename = "rserver")]
    RealServer,
    #[serde(rename = "probe")]
    Probe,
    #[serde(rename = "sticky")]
    SessionPersistence,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Device,
        EntityKind::LoadBalancer,
        EntityKind::RealServer,
        EntityKind::Probe,
        EntityKind::SessionPersistence,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Device => "device",
            EntityKind::LoadBalancer => "loadbalancer",
            EntityKind::RealServer => "rserver",
            EntityKind::Probe => "probe",
            EntityKind::SessionPersistence => "sticky",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" => Ok(EntityKind::Device),
            "loadbalancer" | "lb" => Ok(EntityKind::LoadBalancer),
            "rserver" | "realserver" => Ok(EntityKind::RealServer),
            "probe" => Ok(EntityKind::Probe),
            "sticky" | "sessionpersistence" => Ok(EntityKind::SessionPersistence),
            other => Err(ModelError::UnknownVariant {
                field: "entity kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Any persisted entity, tagged by kind.
///
/// The writer's generic update path matches on this enum; adding a kind means
/// adding a variant here and an arm there. The `kind` tag uses the names of
/// [`EntityKind::as_str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Entity {
    #[serde(rename = "device")]
    Device(Device),
    #[serde(rename = "loadbalancer")]
    LoadBalancer(LoadBalancer),
    #[serde(rename = "rserver")]
    RealServer(RealServer),
    #[serde(rename = "probe")]
    Probe(Probe),
    #[serde(rename = "sticky")]
    SessionPersistence(SessionPersistence),
}

impl Entity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Entity::Device(_) => EntityKind::Device,
            Entity::LoadBalancer(_) => EntityKind::LoadBalancer,
            Entity::RealServer(_) => EntityKind::RealServer,
            Entity::Probe(_) => EntityKind::Probe,
            Entity::SessionPersistence(_) => EntityKind::SessionPersistence,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Device(e) => e.id(),
            Entity::LoadBalancer(e) => e.id(),
            Entity::RealServer(e) => e.id(),
            Entity::Probe(e) => e.id(),
            Entity::SessionPersistence(e) => e.id(),
        }
    }

    #[must_use]
    pub fn extra(&self) -> &ExtraAttrs {
        match self {
            Entity::Device(e) => e.extra(),
            Entity::LoadBalancer(e) => e.extra(),
            Entity::RealServer(e) => e.extra(),
            Entity::Probe(e) => e.extra(),
            Entity::SessionPersistence(e) => e.extra(),
        }
    }

    pub fn extra_mut(&mut self) -> &mut ExtraAttrs {
        match self {
            Entity::Device(e) => e.extra_mut(),
            Entity::LoadBalancer(e) => e.extra_mut(),
            Entity::RealServer(e) => e.extra_mut(),
            Entity::Probe(e) => e.extra_mut(),
            Entity::SessionPersistence(e) => e.extra_mut(),
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Entity::Device(e) => e.validate(),
            Entity::LoadBalancer(e) => e.validate(),
            Entity::RealServer(e) => e.validate(),
            Entity::Probe(e) => e.validate(),
            Entity::SessionPersistence(e) => e.validate(),
        }
    }

    /// Splits the entity into its fixed fields and its extra bag.
    ///
    /// `fields` never contains an `extra` key. Side-effect free.
    pub fn unpack(&self) -> ModelResult<Unpacked> {
        let value = match self {
            Entity::Device(e) => serde_json::to_value(e)?,
            Entity::LoadBalancer(e) => serde_json::to_value(e)?,
            Entity::RealServer(e) => serde_json::to_value(e)?,
            Entity::Probe(e) => serde_json::to_value(e)?,
            Entity::SessionPersistence(e) => serde_json::to_value(e)?,
        };
        let mut fields = match value {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        fields.remove("extra");
        Ok(Unpacked {
            fields,
            extra: self.extra().clone(),
        })
    }
}

/// An entity split for response serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Unpacked {
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub extra: ExtraAttrs,
}

impl Unpacked {
    /// Merges the extra bag into the field object, fixed fields taking
    /// precedence on key collisions.
    #[must_use]
    pub fn flatten(self) -> serde_json::Map<String, serde_json::Value> {
        let mut merged = self.extra.to_json_map();
        merged.extend(self.fields);
        merged
    }
}

macro_rules! entity_from {
    ($($ty:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Entity {
                fn from(e: $ty) -> Self {
                    Entity::$variant(e)
                }
            }
        )+
    };
}

entity_from! {
    Device => Device,
    LoadBalancer => LoadBalancer,
    RealServer => RealServer,
    Probe => Probe,
    SessionPersistence => SessionPersistence,
}

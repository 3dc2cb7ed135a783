//! Entity model for the balancer persistence core.
//!
//! Defines the records the control plane persists:
//! - [`Device`]: a physical or virtual balancer appliance
//! - [`LoadBalancer`]: a tenant's load balancer (server farm)
//! - [`RealServer`]: a backend target, with a soft reference to its probes
//! - [`Probe`]: a health probe; variant fields ride in the extra bag
//! - [`SessionPersistence`]: a sticky policy, identity plus extra bag only
//!
//! Every record carries an [`ExtraAttrs`] bag for attributes that have no
//! fixed column. [`Entity`] is the tagged union the writer dispatches on.

mod device;
mod entity;
mod enums;
mod error;
mod extra;
mod loadbalancer;
mod probe;
mod record;
mod rserver;
mod sticky;

pub use device::Device;
pub use entity::{Entity, EntityKind, Unpacked};
pub use enums::{Algorithm, IpType, LbStatus, ProbeType, ServerState};
pub use error::{ModelError, ModelResult};
pub use extra::ExtraAttrs;
pub use loadbalancer::LoadBalancer;
pub use probe::{Probe, DOMAIN_NAME_KEY, PATH_KEY, REQUEST_METHOD_KEY, SCRIPT_NAME_KEY};
pub use record::Record;
pub use rserver::RealServer;
pub use sticky::{SessionPersistence, COOKIE_NAME_KEY, STICKY_TYPE_KEY};

pub use balancer_types::{EntityId, ExtraValue, Timestamp};

use serde::{Deserialize, Serialize};

use crate::record::impl_record;
use crate::{EntityId, EntityKind, ExtraAttrs, ProbeType};

/// Extra-bag key for the domain a DNS probe resolves.
pub const DOMAIN_NAME_KEY: &str = "domainName";
/// Extra-bag key for the request path of HTTP(S) probes.
pub const PATH_KEY: &str = "path";
/// Extra-bag key for the request method of HTTP(S) probes.
pub const REQUEST_METHOD_KEY: &str = "requestMethodType";
/// Extra-bag key for the script name of scripted probes.
pub const SCRIPT_NAME_KEY: &str = "scriptName";

/// A health probe.
///
/// The columns hold the envelope every probe type shares. Settings that only
/// make sense for one [`ProbeType`] are kept in `extra` and read through the
/// typed accessors below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub id: EntityId,
    /// Owning load balancer, if the probe was created under one.
    pub sf_id: Option<EntityId>,
    pub name: String,
    #[serde(rename = "type")]
    pub probe_type: ProbeType,
    pub description: String,
    /// Seconds between probes while the server is healthy.
    pub probe_interval: u32,
    /// Seconds between probes while the server is failed.
    pub pass_detect_interval: u32,
    /// Seconds to wait for a reply.
    pub receive_timeout: u32,
    pub pass_detect_count: u32,
    pub fail_detect: u32,
    pub is_routed: bool,
    pub port: Option<u16>,
    #[serde(default)]
    pub extra: ExtraAttrs,
}

impl Probe {
    /// Creates a probe with the usual device defaults.
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, probe_type: ProbeType) -> Self {
        Self {
            id: id.into(),
            sf_id: None,
            name: name.into(),
            probe_type,
            description: String::new(),
            probe_interval: 15,
            pass_detect_interval: 60,
            receive_timeout: 10,
            pass_detect_count: 3,
            fail_detect: 3,
            is_routed: false,
            port: None,
            extra: ExtraAttrs::new(),
        }
    }

    /// Domain name queried by a DNS probe.
    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        match self.probe_type {
            ProbeType::Dns => self.extra.get_str(DOMAIN_NAME_KEY),
            _ => None,
        }
    }

    /// Request path of an HTTP(S) probe.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self.probe_type {
            ProbeType::Http | ProbeType::Https => self.extra.get_str(PATH_KEY),
            _ => None,
        }
    }

    /// Request method of an HTTP(S) probe.
    #[must_use]
    pub fn request_method(&self) -> Option<&str> {
        match self.probe_type {
            ProbeType::Http | ProbeType::Https => self.extra.get_str(REQUEST_METHOD_KEY),
            _ => None,
        }
    }

    #[must_use]
    pub fn script_name(&self) -> Option<&str> {
        match self.probe_type {
            ProbeType::Scripted => self.extra.get_str(SCRIPT_NAME_KEY),
            _ => None,
        }
    }
}

impl_record!(Probe, EntityKind::Probe);

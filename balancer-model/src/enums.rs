//! Enumerated column values.
//!
//! Each enum has a fixed text form used both in the store and in unpacked
//! output. Parsing is case-insensitive so rows written by older tooling
//! still load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The stored text form.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($text) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ModelError::UnknownVariant {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

text_enum! {
    /// Load-distribution algorithm of a load balancer.
    #[derive(Default)]
    Algorithm, "algorithm" {
        #[default]
        RoundRobin => "ROUND_ROBIN",
        LeastConnection => "LEAST_CONNECTION",
        HashIp => "HASH_IP",
        HashCookie => "HASH_COOKIE",
        HashUrl => "HASH_URL",
        WeightedRoundRobin => "WEIGHTED_ROUND_ROBIN",
    }
}

text_enum! {
    /// Provisioning status shared by load balancers and real servers.
    #[derive(Default)]
    LbStatus, "status" {
        #[default]
        Build => "BUILD",
        Active => "ACTIVE",
        PendingUpdate => "PENDING_UPDATE",
        Down => "DOWN",
        Error => "ERROR",
    }
}

text_enum! {
    /// Administrative or operational state of a real server.
    #[derive(Default)]
    ServerState, "state" {
        #[default]
        InService => "inservice",
        Standby => "standby",
        OutOfService => "outofservice",
    }
}

text_enum! {
    #[derive(Default)]
    IpType, "ip_type" {
        #[default]
        V4 => "IPv4",
        V6 => "IPv6",
    }
}

text_enum! {
    /// Health-probe variant. Variant-specific settings live in the probe's
    /// extra bag.
    ProbeType, "probe_type" {
        Dns => "DNSprobe",
        Http => "HTTPprobe",
        Https => "HTTPSprobe",
        Icmp => "ICMPprobe",
        Tcp => "TCPprobe",
        Udp => "UDPprobe",
        Scripted => "SCRIPTEDprobe",
    }
}

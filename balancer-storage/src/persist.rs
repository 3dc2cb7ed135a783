//! Entity ↔ row mapping.
//!
//! Each entity kind implements [`Persist`], which names its table and
//! converts between the typed record and a backend [`Row`]. Enumerations are
//! stored by their text form, timestamps as RFC 3339 text, booleans as 0/1
//! and the real server's probe set as a JSON array of ids in ascending order.

use balancer_db::{Row, Table};
use balancer_model::{
    Device, EntityId, EntityKind, ExtraAttrs, LoadBalancer, ModelError, Probe, RealServer, Record,
    SessionPersistence, Timestamp,
};
use balancer_types::{MAX_YEAR, MIN_YEAR};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::{StorageError, StorageResult};

/// A record type with a table of its own.
pub trait Persist: Record + Sized {
    const TABLE: Table;

    fn to_row(&self) -> StorageResult<Row>;

    fn from_row(row: &Row) -> StorageResult<Self>;
}

/// Table holding entities of `kind`.
#[must_use]
pub const fn table_for(kind: EntityKind) -> Table {
    match kind {
        EntityKind::Device => Table::Devices,
        EntityKind::LoadBalancer => Table::LoadBalancers,
        EntityKind::RealServer => Table::RealServers,
        EntityKind::Probe => Table::Probes,
        EntityKind::SessionPersistence => Table::Stickies,
    }
}

fn new_row<T: Persist>(record: &T) -> StorageResult<Row> {
    Ok(Row::new(T::TABLE, record.id().get()).with_extra(record.extra().encode()?))
}

fn extra(row: &Row) -> StorageResult<ExtraAttrs> {
    Ok(ExtraAttrs::decode(Some(row.extra()))?)
}

fn text(row: &Row, column: &str) -> StorageResult<String> {
    Ok(row.get_text(column)?.to_string())
}

fn opt_text(row: &Row, column: &str) -> StorageResult<Option<String>> {
    Ok(row.get_opt_text(column)?.map(str::to_string))
}

fn parsed<T: FromStr<Err = ModelError>>(row: &Row, column: &str) -> StorageResult<T> {
    Ok(row.get_text(column)?.parse()?)
}

fn timestamp(row: &Row, column: &str) -> StorageResult<Timestamp> {
    Ok(Timestamp::parse(row.get_text(column)?)?)
}

fn stamp(column: &str, ts: Timestamp) -> StorageResult<String> {
    if ts.is_storable() {
        Ok(ts.to_rfc3339())
    } else {
        Err(StorageError::Validation(format!(
            "{column} = {ts} is outside years {MIN_YEAR}..={MAX_YEAR}"
        )))
    }
}

fn id(row: &Row, column: &str) -> StorageResult<EntityId> {
    Ok(EntityId::new(row.get_i64(column)?))
}

fn opt_id(row: &Row, column: &str) -> StorageResult<Option<EntityId>> {
    Ok(row.get_opt_i64(column)?.map(EntityId::new))
}

fn narrow<T: TryFrom<i64>>(row: &Row, column: &str, value: i64) -> StorageResult<T> {
    T::try_from(value).map_err(|_| {
        StorageError::InvalidData(format!(
            "{}.{column} = {value} is out of range",
            row.table()
        ))
    })
}

fn unsigned<T: TryFrom<i64>>(row: &Row, column: &str) -> StorageResult<T> {
    let value = row.get_i64(column)?;
    narrow(row, column, value)
}

fn opt_unsigned<T: TryFrom<i64>>(row: &Row, column: &str) -> StorageResult<Option<T>> {
    row.get_opt_i64(column)?
        .map(|value| narrow(row, column, value))
        .transpose()
}

fn widen(column: &str, value: Option<u64>) -> StorageResult<Option<i64>> {
    value
        .map(|v| {
            i64::try_from(v)
                .map_err(|_| StorageError::Validation(format!("{column} = {v} is too large to store")))
        })
        .transpose()
}

fn encode_probe_ids(ids: &BTreeSet<EntityId>) -> StorageResult<String> {
    Ok(serde_json::to_string(ids)?)
}

fn decode_probe_ids(column: &str) -> StorageResult<BTreeSet<EntityId>> {
    if column.trim().is_empty() {
        return Ok(BTreeSet::new());
    }
    Ok(serde_json::from_str(column)?)
}

impl Persist for Device {
    const TABLE: Table = Table::Devices;

    fn to_row(&self) -> StorageResult<Row> {
        Ok(new_row(self)?
            .set("name", self.name.clone())
            .set("type", self.device_type.clone())
            .set("version", self.version.clone())
            .set("requires_vip_ip", self.requires_vip_ip)
            .set("has_acl", self.has_acl)
            .set("supports_vlan", self.supports_vlan))
    }

    fn from_row(row: &Row) -> StorageResult<Self> {
        Ok(Self {
            id: EntityId::new(row.id()),
            name: text(row, "name")?,
            device_type: text(row, "type")?,
            version: text(row, "version")?,
            requires_vip_ip: row.get_bool("requires_vip_ip")?,
            has_acl: row.get_bool("has_acl")?,
            supports_vlan: row.get_bool("supports_vlan")?,
            extra: extra(row)?,
        })
    }
}

impl Persist for LoadBalancer {
    const TABLE: Table = Table::LoadBalancers;

    fn to_row(&self) -> StorageResult<Row> {
        Ok(new_row(self)?
            .set("name", self.name.clone())
            .set("tenant_id", self.tenant_id.clone())
            .set("device_id", self.device_id.map(|d| d.get()))
            .set("algorithm", self.algorithm.as_str().to_string())
            .set("status", self.status.as_str().to_string())
            .set("created", stamp("created", self.created)?)
            .set("updated", stamp("updated", self.updated)?))
    }

    fn from_row(row: &Row) -> StorageResult<Self> {
        Ok(Self {
            id: EntityId::new(row.id()),
            name: text(row, "name")?,
            tenant_id: text(row, "tenant_id")?,
            device_id: opt_id(row, "device_id")?,
            algorithm: parsed(row, "algorithm")?,
            status: parsed(row, "status")?,
            created: timestamp(row, "created")?,
            updated: timestamp(row, "updated")?,
            extra: extra(row)?,
        })
    }
}

impl Persist for RealServer {
    const TABLE: Table = Table::RealServers;

    fn to_row(&self) -> StorageResult<Row> {
        Ok(new_row(self)?
            .set("sf_id", self.sf_id.get())
            .set("name", self.name.clone())
            .set("type", self.server_type.clone())
            .set("web_host_redir", self.web_host_redir.clone())
            .set("redirection_code", self.redirection_code.clone())
            .set("ip_type", self.ip_type.as_str().to_string())
            .set("address", self.address.clone())
            .set("port", self.port)
            .set("state", self.state.as_str().to_string())
            .set("opstate", self.opstate.as_str().to_string())
            .set("description", self.description.clone())
            .set("fail_on_all", self.fail_on_all)
            .set("min_con", self.min_con)
            .set("max_con", self.max_con)
            .set("weight", self.weight)
            .set("probes", encode_probe_ids(&self.probes)?)
            .set("rate_bandwidth", widen("rate_bandwidth", self.rate_bandwidth)?)
            .set("rate_connection", widen("rate_connection", self.rate_connection)?)
            .set("backup_rs", self.backup_rs.clone())
            .set("backup_rs_port", self.backup_rs_port)
            .set("created", stamp("created", self.created)?)
            .set("updated", stamp("updated", self.updated)?)
            .set("status", self.status.as_str().to_string())
            .set("cookie_str", self.cookie_str.clone())
            .set("condition", self.condition.clone()))
    }

    fn from_row(row: &Row) -> StorageResult<Self> {
        Ok(Self {
            id: EntityId::new(row.id()),
            sf_id: id(row, "sf_id")?,
            name: text(row, "name")?,
            server_type: text(row, "type")?,
            web_host_redir: text(row, "web_host_redir")?,
            redirection_code: text(row, "redirection_code")?,
            ip_type: parsed(row, "ip_type")?,
            address: text(row, "address")?,
            port: opt_unsigned(row, "port")?,
            state: parsed(row, "state")?,
            opstate: parsed(row, "opstate")?,
            description: text(row, "description")?,
            fail_on_all: row.get_opt_bool("fail_on_all")?,
            min_con: unsigned(row, "min_con")?,
            max_con: unsigned(row, "max_con")?,
            weight: unsigned(row, "weight")?,
            probes: decode_probe_ids(row.get_text("probes")?)?,
            rate_bandwidth: opt_unsigned(row, "rate_bandwidth")?,
            rate_connection: opt_unsigned(row, "rate_connection")?,
            backup_rs: opt_text(row, "backup_rs")?,
            backup_rs_port: opt_unsigned(row, "backup_rs_port")?,
            created: timestamp(row, "created")?,
            updated: timestamp(row, "updated")?,
            status: parsed(row, "status")?,
            cookie_str: opt_text(row, "cookie_str")?,
            condition: text(row, "condition")?,
            extra: extra(row)?,
        })
    }
}

impl Persist for Probe {
    const TABLE: Table = Table::Probes;

    fn to_row(&self) -> StorageResult<Row> {
        Ok(new_row(self)?
            .set("sf_id", self.sf_id.map(|id| id.get()))
            .set("name", self.name.clone())
            .set("type", self.probe_type.as_str().to_string())
            .set("description", self.description.clone())
            .set("probe_interval", self.probe_interval)
            .set("pass_detect_interval", self.pass_detect_interval)
            .set("receive_timeout", self.receive_timeout)
            .set("pass_detect_count", self.pass_detect_count)
            .set("fail_detect", self.fail_detect)
            .set("is_routed", self.is_routed)
            .set("port", self.port))
    }

    fn from_row(row: &Row) -> StorageResult<Self> {
        Ok(Self {
            id: EntityId::new(row.id()),
            sf_id: opt_id(row, "sf_id")?,
            name: text(row, "name")?,
            probe_type: parsed(row, "type")?,
            description: text(row, "description")?,
            probe_interval: unsigned(row, "probe_interval")?,
            pass_detect_interval: unsigned(row, "pass_detect_interval")?,
            receive_timeout: unsigned(row, "receive_timeout")?,
            pass_detect_count: unsigned(row, "pass_detect_count")?,
            fail_detect: unsigned(row, "fail_detect")?,
            is_routed: row.get_bool("is_routed")?,
            port: opt_unsigned(row, "port")?,
            extra: extra(row)?,
        })
    }
}

impl Persist for SessionPersistence {
    const TABLE: Table = Table::Stickies;

    fn to_row(&self) -> StorageResult<Row> {
        Ok(new_row(self)?.set("lb_id", self.lb_id.get()))
    }

    fn from_row(row: &Row) -> StorageResult<Self> {
        Ok(Self {
            id: EntityId::new(row.id()),
            lb_id: id(row, "lb_id")?,
            extra: extra(row)?,
        })
    }
}

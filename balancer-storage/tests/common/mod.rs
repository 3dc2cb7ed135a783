//! Shared test helpers for storage tests.

#![allow(dead_code)]

use balancer_model::{
    Algorithm, Device, IpType, LbStatus, LoadBalancer, Probe, ProbeType, RealServer, ServerState,
    SessionPersistence, Timestamp,
};
use balancer_storage::{Storage, StorageConfig};
use tempfile::TempDir;

/// Runs SQL directly against the file behind [`temp_storage`].
pub fn raw_execute(temp: &TempDir, sql: &str) {
    let conn = rusqlite::Connection::open(temp.path().join("db").join("testdb.db")).unwrap();
    conn.execute_batch(sql).unwrap();
}

/// Storage on a fresh file inside a temp dir. Keep the dir alive for the test.
pub fn temp_storage() -> (TempDir, Storage) {
    let temp = TempDir::new().unwrap();
    let storage = Storage::new(StorageConfig::new(temp.path().join("db").join("testdb.db")));
    (temp, storage)
}

pub fn ts(day: u32, month: u32) -> Timestamp {
    Timestamp::from_ymd_hms(2012, month, day, 11, 22, 33).unwrap()
}

pub fn make_device() -> Device {
    let mut device = Device::new(111, "DeviceName001");
    device.device_type = "ACE".to_string();
    device.version = "1.0".to_string();
    device.requires_vip_ip = true;
    device.has_acl = true;
    device.supports_vlan = false;
    device
}

pub fn make_lb(id: i64, name: &str) -> LoadBalancer {
    let mut lb = LoadBalancer::new(id, name);
    lb.tenant_id = "tenant1".to_string();
    lb.algorithm = Algorithm::RoundRobin;
    lb.status = LbStatus::Active;
    lb.created = ts(1, 1);
    lb.updated = ts(2, 2);
    lb
}

pub fn make_dns_probe() -> Probe {
    let mut probe = Probe::new(1234, "testProbe", ProbeType::Dns);
    probe.description = "Test Probe".to_string();
    probe.probe_interval = 20;
    probe.is_routed = true;
    probe.pass_detect_interval = 60;
    probe.receive_timeout = 10;
    probe.port = Some(8080);
    probe.pass_detect_count = 4;
    probe.fail_detect = 6;
    probe.extra.insert("domainName", "domainname");
    probe
}

pub fn make_rserver() -> RealServer {
    let mut rs = RealServer::new(123, 123, "testRS");
    rs.server_type = "Host".to_string();
    rs.ip_type = IpType::V4;
    rs.address = "10.10.10.10".to_string();
    rs.port = Some(8080);
    rs.state = ServerState::InService;
    rs.opstate = ServerState::InService;
    rs.description = "Test rserver save in DB".to_string();
    rs.min_con = 4_000_000;
    rs.max_con = 4_000_000;
    rs.weight = 8;
    rs.attach_probe(1);
    rs.attach_probe(23);
    rs.created = ts(1, 1);
    rs.updated = ts(2, 4);
    rs.status = LbStatus::Active;
    rs.cookie_str = None;
    rs.condition = "ENABLED".to_string();
    rs
}

pub fn make_sticky(id: i64, lb_id: i64) -> SessionPersistence {
    let mut sticky = SessionPersistence::new(id, lb_id);
    sticky.extra.insert("type", "HTTPCookie");
    sticky.extra.insert("cookieName", "JSESSIONID");
    sticky
}

use balancer_model::{
    Algorithm, Device, Entity, EntityId, EntityKind, ExtraAttrs, ExtraValue, IpType, LbStatus,
    LoadBalancer, ModelError, Probe, ProbeType, RealServer, Record, ServerState, SessionPersistence,
    Timestamp,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_device() -> Device {
    let mut device = Device::new(111, "DeviceName001");
    device.device_type = "ACE".to_string();
    device.version = "1.0".to_string();
    device.requires_vip_ip = true;
    device.has_acl = true;
    device.supports_vlan = false;
    device
}

fn make_rserver() -> RealServer {
    let mut rs = RealServer::new(123, 123, "testRS");
    rs.ip_type = IpType::V4;
    rs.address = "10.10.10.10".to_string();
    rs.port = Some(8080);
    rs.min_con = 4_000_000;
    rs.max_con = 4_000_000;
    rs.weight = 8;
    rs.attach_probe(1);
    rs.attach_probe(23);
    rs
}

// ── Entity dispatch ──────────────────────────────────────────────

#[test]
fn kind_follows_variant() {
    assert_eq!(Entity::from(make_device()).kind(), EntityKind::Device);
    assert_eq!(Entity::from(LoadBalancer::new(1, "lb")).kind(), EntityKind::LoadBalancer);
    assert_eq!(Entity::from(make_rserver()).kind(), EntityKind::RealServer);
    assert_eq!(
        Entity::from(Probe::new(5, "p", ProbeType::Dns)).kind(),
        EntityKind::Probe
    );
    assert_eq!(
        Entity::from(SessionPersistence::new(9, 1)).kind(),
        EntityKind::SessionPersistence
    );
}

#[test]
fn id_and_extra_are_delegated() {
    let mut entity = Entity::from(make_device());
    assert_eq!(entity.id(), EntityId::new(111));
    assert!(entity.extra().is_empty());

    entity.extra_mut().insert("rack", "r12");
    match &entity {
        Entity::Device(d) => assert_eq!(d.extra.get_str("rack"), Some("r12")),
        other => panic!("unexpected variant {:?}", other.kind()),
    }
}

#[test]
fn record_kind_constants_match_entity_kind() {
    assert_eq!(<Device as Record>::KIND, EntityKind::Device);
    assert_eq!(<RealServer as Record>::KIND, EntityKind::RealServer);
    assert_eq!(<SessionPersistence as Record>::KIND, EntityKind::SessionPersistence);
}

#[test]
fn entity_kind_parses_aliases() {
    assert_eq!("lb".parse::<EntityKind>().unwrap(), EntityKind::LoadBalancer);
    assert_eq!("RServer".parse::<EntityKind>().unwrap(), EntityKind::RealServer);
    assert_eq!("sticky".parse::<EntityKind>().unwrap(), EntityKind::SessionPersistence);
    assert!("vip".parse::<EntityKind>().is_err());
    for kind in EntityKind::ALL {
        assert_eq!(kind.as_str().parse::<EntityKind>().unwrap(), kind);
    }
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn non_positive_id_is_invalid() {
    let err = Device::new(0, "x").validate().unwrap_err();
    assert!(matches!(err, ModelError::Invalid { kind: "device", .. }));
    assert!(Entity::from(LoadBalancer::new(-1, "lb")).validate().is_err());
    assert!(Entity::from(make_device()).validate().is_ok());
}

#[test]
fn rserver_connection_limits_checked() {
    let mut rs = make_rserver();
    rs.min_con = 10;
    rs.max_con = 5;
    assert!(rs.validate().is_err());

    rs.max_con = 0;
    assert!(rs.validate().is_ok(), "zero max_con means unlimited");
}

// ── Soft references ──────────────────────────────────────────────

#[test]
fn probe_set_ignores_duplicates() {
    let mut rs = make_rserver();
    assert!(!rs.attach_probe(23));
    assert_eq!(rs.probes.len(), 2);
    assert!(rs.detach_probe(EntityId::new(1)));
    assert_eq!(rs.probes.iter().copied().collect::<Vec<_>>(), vec![EntityId::new(23)]);
}

// ── Probe variant accessors ──────────────────────────────────────

#[test]
fn dns_probe_exposes_domain_name() {
    let mut probe = Probe::new(1234, "testProbe", ProbeType::Dns);
    probe.extra.insert("domainName", "domainname");
    assert_eq!(probe.domain_name(), Some("domainname"));
    assert_eq!(probe.path(), None);
}

#[test]
fn http_accessors_ignore_other_types() {
    let mut probe = Probe::new(7, "web", ProbeType::Http);
    probe.extra.insert("path", "/health");
    probe.extra.insert("requestMethodType", "GET");
    assert_eq!(probe.path(), Some("/health"));
    assert_eq!(probe.request_method(), Some("GET"));

    probe.probe_type = ProbeType::Icmp;
    assert_eq!(probe.path(), None);
    assert_eq!(probe.script_name(), None);
}

#[test]
fn sticky_policy_lives_in_extra() {
    let mut sticky = SessionPersistence::new(3, 123);
    sticky.extra.insert("type", "HTTPCookie");
    sticky.extra.insert("cookieName", "JSESSIONID");
    assert_eq!(sticky.sticky_type(), Some("HTTPCookie"));
    assert_eq!(sticky.cookie_name(), Some("JSESSIONID"));
}

// ── Enumerations ─────────────────────────────────────────────────

#[test]
fn enum_text_forms() {
    assert_eq!(Algorithm::RoundRobin.as_str(), "ROUND_ROBIN");
    assert_eq!("down".parse::<LbStatus>().unwrap(), LbStatus::Down);
    assert_eq!("outofservice".parse::<ServerState>().unwrap(), ServerState::OutOfService);
    assert_eq!("IPv6".parse::<IpType>().unwrap(), IpType::V6);
    assert_eq!("DNSprobe".parse::<ProbeType>().unwrap(), ProbeType::Dns);
}

#[test]
fn unknown_enum_text_is_rejected() {
    let err = "RANDOM".parse::<Algorithm>().unwrap_err();
    assert!(err.to_string().contains("RANDOM"));
    assert!("maintenance".parse::<ServerState>().is_err());
}

#[test]
fn every_variant_parses_its_own_text() {
    for v in Algorithm::ALL {
        assert_eq!(v.as_str().parse::<Algorithm>().unwrap(), *v);
    }
    for v in ProbeType::ALL {
        assert_eq!(v.to_string().parse::<ProbeType>().unwrap(), *v);
    }
}

#[test]
fn enum_defaults() {
    assert_eq!(Algorithm::default(), Algorithm::RoundRobin);
    assert_eq!(LbStatus::default(), LbStatus::Build);
    assert_eq!(ServerState::default(), ServerState::InService);
    assert_eq!(IpType::default(), IpType::V4);

    let rs = RealServer::new(1, 2, "rs");
    assert_eq!((rs.state, rs.opstate, rs.ip_type), (ServerState::InService, ServerState::InService, IpType::V4));
}

// ── Unpack ───────────────────────────────────────────────────────

#[test]
fn unpack_splits_fields_and_extra() {
    let mut device = make_device();
    device.extra.insert("location", "dc1");
    let unpacked = Entity::from(device).unpack().unwrap();

    assert!(!unpacked.fields.contains_key("extra"));
    assert_eq!(unpacked.fields["name"], json!("DeviceName001"));
    assert_eq!(unpacked.fields["type"], json!("ACE"));
    assert_eq!(unpacked.fields["requires_vip_ip"], json!(true));
    assert_eq!(unpacked.extra.get("location"), Some(&ExtraValue::from("dc1")));
}

#[test]
fn unpack_renders_probe_set_as_sorted_array() {
    let unpacked = Entity::from(make_rserver()).unpack().unwrap();
    assert_eq!(unpacked.fields["probes"], json!([1, 23]));
    assert_eq!(unpacked.fields["ip_type"], json!("IPv4"));
    assert_eq!(unpacked.fields["cookie_str"], json!(null));
}

#[test]
fn flatten_prefers_fixed_fields() {
    let mut lb = LoadBalancer::new(123, "testLB");
    lb.created = Timestamp::from_ymd_hms(2012, 1, 1, 11, 22, 33).unwrap();
    lb.extra.insert("name", "shadowed");
    lb.extra.insert("port", 80);
    let flat = Entity::from(lb).unpack().unwrap().flatten();

    assert_eq!(flat["name"], json!("testLB"));
    assert_eq!(flat["port"], json!(80));
    assert_eq!(flat["created"], json!("2012-01-01T11:22:33Z"));
    assert!(!flat.contains_key("extra"));
}

#[test]
fn entity_json_is_tagged_by_kind() {
    let json = serde_json::to_value(Entity::from(SessionPersistence::new(3, 9))).unwrap();
    assert_eq!(json["kind"], json!("sticky"));
    assert_eq!(json["lb_id"], json!(9));

    let back: Entity = serde_json::from_value(json).unwrap();
    assert_eq!(back.kind(), EntityKind::SessionPersistence);
}

#[test]
fn kind_has_one_spelling() {
    for kind in EntityKind::ALL {
        let text = kind.as_str();
        assert_eq!(serde_json::to_value(kind).unwrap(), json!(text));
        assert_eq!(text.parse::<EntityKind>().unwrap(), kind);
        assert_eq!(serde_json::from_value::<EntityKind>(json!(text)).unwrap(), kind);
    }

    let lb = Entity::from(LoadBalancer::new(1, "lb"));
    let json = serde_json::to_value(&lb).unwrap();
    assert_eq!(json["kind"], json!(lb.kind().as_str()));
}

#[test]
fn missing_extra_deserializes_as_empty_bag() {
    let device: Device = serde_json::from_value(json!({
        "id": 5,
        "name": "d",
        "type": "ACE",
        "version": "2.0",
        "requires_vip_ip": false,
        "has_acl": false,
        "supports_vlan": true
    }))
    .unwrap();
    assert_eq!(device.extra, ExtraAttrs::new());
}

mod common;

use balancer_model::{Device, Entity, EntityId, EntityKind, LoadBalancer, RealServer, Timestamp};
use balancer_storage::StorageError;
use common::*;
use pretty_assertions::assert_eq;

// ── Duplicates ───────────────────────────────────────────────────

#[test]
fn duplicate_write_is_rejected() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    wr.write_load_balancer(&make_lb(123, "first")).unwrap();

    let err = wr.write_load_balancer(&make_lb(123, "second")).unwrap_err();
    assert!(matches!(
        err,
        StorageError::AlreadyExists { kind: EntityKind::LoadBalancer, id } if id == EntityId::new(123)
    ));

    // First write wins
    let lb = stor.get_reader().unwrap().get_load_balancer_by_id(123).unwrap();
    assert_eq!(lb.name, "first");
}

#[test]
fn same_id_in_different_kinds_is_allowed() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    wr.write_device(&Device::new(1, "dev")).unwrap();
    wr.write_load_balancer(&make_lb(1, "lb")).unwrap();
    wr.write_sticky(&make_sticky(1, 1)).unwrap();

    let read = stor.get_reader().unwrap();
    assert_eq!(read.get_device_by_id(1).unwrap().name, "dev");
    assert_eq!(read.get_load_balancer_by_id(1).unwrap().name, "lb");
}

// ── Validation ───────────────────────────────────────────────────

#[test]
fn non_positive_id_is_rejected() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();

    for id in [0, -5] {
        let err = wr.write_device(&Device::new(id, "bad")).unwrap_err();
        assert!(matches!(err, StorageError::Validation(_)), "id {id}: {err}");
    }
    assert!(stor.get_reader().unwrap().get_devices().unwrap().is_empty());
}

#[test]
fn inverted_connection_limits_are_rejected() {
    let (_temp, stor) = temp_storage();
    let mut rs = make_rserver();
    rs.min_con = 10;
    rs.max_con = 5;

    let err = stor.get_writer().unwrap().write_rserver(&rs).unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
    assert!(!err.is_fault());
}

#[test]
fn unbounded_max_con_is_accepted() {
    let (_temp, stor) = temp_storage();
    let mut rs = make_rserver();
    rs.min_con = 10;
    rs.max_con = 0;
    stor.get_writer().unwrap().write_rserver(&rs).unwrap();
}

#[test]
fn non_finite_extra_is_rejected() {
    let (_temp, stor) = temp_storage();
    let mut device = make_device();
    device.extra.insert("load", f64::NAN);

    let err = stor.get_writer().unwrap().write_device(&device).unwrap_err();
    assert!(!err.is_not_found());
    assert!(stor.get_reader().unwrap().get_device_by_id(111).unwrap_err().is_not_found());
}

#[test]
fn oversized_rate_is_rejected() {
    let (_temp, stor) = temp_storage();
    let mut rs = make_rserver();
    rs.rate_bandwidth = Some(u64::MAX);

    let err = stor.get_writer().unwrap().write_rserver(&rs).unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)));
}

#[test]
fn unstorable_timestamp_is_rejected_before_commit() {
    use chrono::TimeZone;

    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    wr.write_load_balancer(&make_lb(6, "kept")).unwrap();

    let far_future =
        Timestamp::from_datetime(chrono::Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap());
    let mut lb = make_lb(7, "far");
    lb.updated = far_future;
    let err = wr.write_load_balancer(&lb).unwrap_err();
    assert!(matches!(err, StorageError::Validation(_)), "{err}");

    let mut rs = make_rserver();
    rs.created = far_future;
    assert!(matches!(wr.write_rserver(&rs), Err(StorageError::Validation(_))));

    // Same check on the update path
    let mut kept = make_lb(6, "kept");
    kept.created = far_future;
    assert!(matches!(
        wr.update_object_in_table(&Entity::from(kept)),
        Err(StorageError::Validation(_))
    ));

    let read = stor.get_reader().unwrap();
    assert!(read.get_load_balancer_by_id(7).unwrap_err().is_not_found());
    assert_eq!(read.get_load_balancers().unwrap(), vec![make_lb(6, "kept")]);
}

#[test]
fn last_storable_year_round_trips() {
    let (_temp, stor) = temp_storage();
    let mut lb = make_lb(8, "edge");
    lb.updated = Timestamp::from_ymd_hms(9999, 12, 31, 23, 59, 59).unwrap();
    stor.get_writer().unwrap().write_load_balancer(&lb).unwrap();
    assert_eq!(stor.get_reader().unwrap().get_load_balancer_by_id(8).unwrap(), lb);
}

// ── Updates ──────────────────────────────────────────────────────

#[test]
fn update_of_absent_id_is_not_found() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();

    let err = wr
        .update_object_in_table(&Entity::LoadBalancer(make_lb(999, "ghost")))
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::NotFound { kind: EntityKind::LoadBalancer, .. }
    ));
    // Update never inserts
    assert!(stor.get_reader().unwrap().get_load_balancers().unwrap().is_empty());
}

#[test]
fn update_rewrites_extra_bag() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    let mut device = make_device();
    device.extra.insert("rack", "r1");
    device.extra.insert("slot", 3);
    wr.write_device(&device).unwrap();

    device.extra.remove("slot");
    device.extra.insert("rack", "r2");
    wr.update_object_in_table(&device.clone().into()).unwrap();

    let stored = stor.get_reader().unwrap().get_device_by_id(111).unwrap();
    assert_eq!(stored.extra, device.extra);
    assert_eq!(stored.extra.get_str("rack"), Some("r2"));
    assert!(!stored.extra.contains_key("slot"));
}

#[test]
fn update_dispatches_on_entity_kind() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    wr.write_device(&make_device()).unwrap();
    wr.write_probe(&make_dns_probe()).unwrap();
    wr.write_sticky(&make_sticky(5, 123)).unwrap();

    let mut device = make_device();
    device.version = "2.0".to_string();
    let mut sticky = make_sticky(5, 124);
    sticky.extra.insert("cookieName", "SID");

    for entity in [Entity::from(device), Entity::from(sticky)] {
        wr.update_object_in_table(&entity).unwrap();
    }

    let read = stor.get_reader().unwrap();
    assert_eq!(read.get_device_by_id(111).unwrap().version, "2.0");
    let sticky = read.get_sticky_by_id(5).unwrap();
    assert_eq!(sticky.lb_id, EntityId::new(124));
    assert_eq!(sticky.cookie_name(), Some("SID"));
    assert_eq!(read.get_probe_by_id(1234).unwrap(), make_dns_probe());
}

// ── Generic writes ───────────────────────────────────────────────

#[test]
fn write_entity_stores_each_kind() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    let entities = vec![
        Entity::from(make_device()),
        Entity::from(make_lb(123, "testLB")),
        Entity::from(make_rserver()),
        Entity::from(make_dns_probe()),
        Entity::from(make_sticky(9, 123)),
    ];
    for entity in &entities {
        wr.write_entity(entity).unwrap();
    }

    let read = stor.get_reader().unwrap();
    for entity in &entities {
        assert_eq!(&read.get_entity(entity.kind(), entity.id()).unwrap(), entity);
    }
}

// ── Stickies ─────────────────────────────────────────────────────

#[test]
fn sticky_delete() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();
    wr.write_sticky(&make_sticky(1, 123)).unwrap();
    wr.write_sticky(&make_sticky(2, 123)).unwrap();

    wr.delete_sticky(1).unwrap();

    let read = stor.get_reader().unwrap();
    assert!(read.get_sticky_by_id(1).unwrap_err().is_not_found());
    assert_eq!(read.get_stickies_for_lb(123).unwrap().len(), 1);
}

#[test]
fn sticky_delete_of_absent_id_is_not_found() {
    let (_temp, stor) = temp_storage();
    let err = stor.get_writer().unwrap().delete_sticky(EntityId::new(77)).unwrap_err();
    assert!(matches!(
        err,
        StorageError::NotFound { kind: EntityKind::SessionPersistence, .. }
    ));
}

// ── Soft references ──────────────────────────────────────────────

#[test]
fn references_are_not_enforced() {
    let (_temp, stor) = temp_storage();
    let wr = stor.get_writer().unwrap();

    let mut lb = LoadBalancer::new(1, "orphan");
    lb.device_id = Some(EntityId::new(4242));
    wr.write_load_balancer(&lb).unwrap();

    let mut rs = RealServer::new(2, 9999, "orphan-rs");
    rs.attach_probe(31337);
    wr.write_rserver(&rs).unwrap();

    let read = stor.get_reader().unwrap();
    assert_eq!(read.get_load_balancer_by_id(1).unwrap().device_id, Some(EntityId::new(4242)));
    assert_eq!(read.get_rserver_by_id(2).unwrap().sf_id, EntityId::new(9999));
}

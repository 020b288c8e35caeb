//! Touch readings and contact flags against scripted engine contacts.

use approx::assert_relative_eq;

use homunculus_core::types::Side;
use homunculus_skin::{BodyId, ContactForceSensor, JointKind, TouchSensorMap};
use homunculus_test_utils::ScriptedContacts;

#[test]
fn contact_depends_on_joint_kind_only() {
    let contacts = ScriptedContacts::new()
        .with_contact(BodyId(1), [0.0, 0.0, 0.0])
        .with_contact(BodyId(2), [500.0, 0.0, 0.0])
        .with_joint(BodyId(3), JointKind::Hinge);

    let sensor = ContactForceSensor::default();
    assert!(sensor.has_contact(&contacts, BodyId(1)));
    assert!(sensor.has_contact(&contacts, BodyId(2)));
    assert!(!sensor.has_contact(&contacts, BodyId(3)));
    assert!(!sensor.has_contact(&contacts, BodyId(4)));
}

#[test]
fn no_contact_reads_zero() {
    let contacts = ScriptedContacts::new().with_joint(BodyId(3), JointKind::Universal);
    let sensor = ContactForceSensor::default();
    assert_relative_eq!(sensor.body_touch_value(&contacts, BodyId(3)), 0.0);
    assert_relative_eq!(sensor.body_touch_value(&contacts, BodyId(9)), 0.0);
}

#[test]
fn contact_force_is_normalized_and_saturates() {
    let contacts = ScriptedContacts::new()
        .with_contact(BodyId(1), [30.0, 40.0, 0.0])
        .with_contact(BodyId(2), [0.0, 0.0, 1.0e6]);
    let sensor = ContactForceSensor::default();
    assert_relative_eq!(sensor.body_touch_value(&contacts, BodyId(1)), 0.5);
    assert_relative_eq!(sensor.body_touch_value(&contacts, BodyId(2)), 1.0);
}

#[test]
fn fused_fingertips_read_one_body() {
    let mut map = TouchSensorMap::new();
    map.fuse_fingertips(Side::Left, BodyId(70));
    map.fuse_fingertips(Side::Right, BodyId(71));
    let contacts = ScriptedContacts::new().with_contact(BodyId(70), [0.0, 25.0, 0.0]);
    let sensor = ContactForceSensor::new(map);

    assert_relative_eq!(sensor.touch_value_at(&contacts, 26), 0.25);
    assert_relative_eq!(sensor.touch_value_at(&contacts, 27), 0.25);
    assert!(sensor.has_contact_at(&contacts, 27));
    assert!(!sensor.has_contact_at(&contacts, 45));
    assert!(!sensor.has_contact_at(&contacts, 1000));
    assert_relative_eq!(sensor.touch_value_at(&contacts, 1000), 0.0);
}

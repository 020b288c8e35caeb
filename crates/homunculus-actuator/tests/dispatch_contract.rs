//! Dispatcher behaviour against the recording actuator stand-in.

use homunculus_actuator::prelude::*;
use homunculus_core::types::BodyRegion;
use homunculus_test_utils::{ActuatorCall, RecordingActuators, actuator_test_app};

fn commands_with_torque() -> CommandBuffer {
    let mut commands = CommandBuffer::new();
    for region in BodyRegion::DISPATCH_ORDER {
        for command in commands.region_mut(region) {
            command.velocity = 0.25;
            command.velocity2 = -0.25;
            command.torque = 7.0;
        }
    }
    commands
}

#[test]
fn regions_follow_dispatch_order() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&ControlModeTables::default(), &CommandBuffer::new(), &mut rec);
    assert_eq!(
        rec.region_order(),
        vec![
            BodyRegion::LeftLeg,
            BodyRegion::RightLeg,
            BodyRegion::Torso,
            BodyRegion::LeftArm,
            BodyRegion::RightArm,
            BodyRegion::Head,
        ]
    );
}

#[test]
fn region_without_table_is_velocity_controlled() {
    let mut tables = ControlModeTables::default();
    tables.set(BodyRegion::Torso, vec![ControlMode::Torque; 5]);

    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&tables, &commands_with_torque(), &mut rec);

    for region in BodyRegion::DISPATCH_ORDER {
        let calls = rec.region(region);
        let torques = calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Torque(..)))
            .count();
        if region == BodyRegion::Torso {
            assert_eq!(torques, 5);
        } else {
            assert_eq!(torques, 0, "{region}");
        }
    }
}

#[test]
fn universal_joints_ignore_torque_mode() {
    let mut tables = ControlModeTables::default();
    tables.set(BodyRegion::LeftArm, vec![ControlMode::Torque; 25]);

    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&tables, &commands_with_torque(), &mut rec);

    let wrist = JointRef::new(BodyRegion::LeftArm, 5);
    let thumb = JointRef::new(BodyRegion::LeftArm, 22);
    assert!(rec.calls.contains(&ActuatorCall::Universal(wrist, [0.25, -0.25])));
    assert!(rec.calls.contains(&ActuatorCall::Universal(thumb, [0.25, -0.25])));
    assert_eq!(rec.torque_count(), 5);
}

#[test]
fn each_joint_is_actuated_once_per_step() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&(), &commands_with_torque(), &mut rec);
    let mut joints: Vec<JointRef> = rec.calls.iter().map(ActuatorCall::joint).collect();
    let total = joints.len();
    joints.sort_by_key(|j| (j.region.id(), j.index));
    joints.dedup();
    assert_eq!(joints.len(), total);
}

#[test]
fn plugin_resources_drive_dispatch() {
    let mut app = actuator_test_app();
    app.world_mut()
        .resource_mut::<ControlModeTables>()
        .set(BodyRegion::Head, vec![ControlMode::Torque; 6]);
    app.world_mut()
        .resource_mut::<CommandBuffer>()
        .set_torque(BodyRegion::Head, 4, -1.5)
        .unwrap();

    let tables = app.world().resource::<ControlModeTables>();
    let commands = app.world().resource::<CommandBuffer>();
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(tables, commands, &mut rec);
    assert!(
        rec.calls
            .contains(&ActuatorCall::Torque(JointRef::new(BodyRegion::Head, 4), -1.5))
    );
}

fn loaded_commands() -> CommandBuffer {
    let mut commands = CommandBuffer::new();
    for region in BodyRegion::DISPATCH_ORDER {
        for (i, c) in commands.region_mut(region).iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let v = i as f32;
            *c = ActuatorCommand {
                velocity: v + 0.5,
                velocity2: -v,
                torque: 10.0 + v,
            };
        }
    }
    commands
}

#[test]
fn one_call_per_occupied_slot() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&(), &CommandBuffer::new(), &mut rec);
    // legs 2x6, torso 5, arms 2x(25 - 4 vacant), head 6
    assert_eq!(rec.calls.len(), 12 + 5 + 42 + 6);
}

#[test]
fn no_table_means_velocity_even_with_torque_pending() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&ControlModeTables::default(), &loaded_commands(), &mut rec);
    assert_eq!(rec.torque_count(), 0);
    assert!(
        rec.calls
            .contains(&ActuatorCall::Velocity(JointRef::new(BodyRegion::Torso, 2), 2.5))
    );
}

#[test]
fn torque_table_adds_torque_on_hinges() {
    let mut tables = ControlModeTables::default();
    tables.set(BodyRegion::LeftLeg, vec![ControlMode::Torque; 6]);
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&tables, &loaded_commands(), &mut rec);

    let left_leg = rec.region(BodyRegion::LeftLeg);
    assert_eq!(left_leg.len(), 6);
    assert_eq!(
        left_leg[3],
        ActuatorCall::Torque(JointRef::new(BodyRegion::LeftLeg, 3), 13.0)
    );
    assert!(
        rec.calls
            .contains(&ActuatorCall::Velocity(JointRef::new(BodyRegion::RightLeg, 3), 3.5))
    );
}

#[test]
fn mixed_table_is_honoured_per_joint() {
    let mut tables = ControlModeTables::default();
    tables.set(
        BodyRegion::Head,
        vec![
            ControlMode::Torque,
            ControlMode::Velocity,
            ControlMode::Torque,
        ],
    );
    let mut rec = RecordingActuators::new();
    let commands = loaded_commands();
    ControlModeDispatcher.apply_region(
        BodyRegion::Head,
        &tables,
        commands.region(BodyRegion::Head),
        &mut rec,
    );
    let head = |i| JointRef::new(BodyRegion::Head, i);
    assert_eq!(
        rec.calls,
        vec![
            ActuatorCall::Torque(head(0), 10.0),
            ActuatorCall::Velocity(head(1), 1.5),
            ActuatorCall::Torque(head(2), 12.0),
            ActuatorCall::Velocity(head(3), 3.5),
            ActuatorCall::Velocity(head(4), 4.5),
            ActuatorCall::Velocity(head(5), 5.5),
        ]
    );
}

#[test]
fn hand_slots_follow_their_own_arm() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&(), &loaded_commands(), &mut rec);

    let position = |call: ActuatorCall| rec.calls.iter().position(|c| *c == call).unwrap();
    let left_wrist = position(ActuatorCall::Universal(
        JointRef::new(BodyRegion::LeftArm, 5),
        [5.5, -5.0],
    ));
    let right_shoulder = position(ActuatorCall::Velocity(
        JointRef::new(BodyRegion::RightArm, 0),
        0.5,
    ));
    assert!(left_wrist < right_shoulder);
}

#[test]
fn hand_joints_ignore_torque_mode() {
    let mut tables = ControlModeTables::default();
    tables.set(BodyRegion::RightArm, vec![ControlMode::Torque; 25]);
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&tables, &loaded_commands(), &mut rec);

    let arm = |i| JointRef::new(BodyRegion::RightArm, i);
    assert!(rec.calls.contains(&ActuatorCall::Torque(arm(4), 14.0)));
    assert!(rec.calls.contains(&ActuatorCall::Universal(arm(5), [5.5, -5.0])));
    assert!(rec.calls.contains(&ActuatorCall::Universal(arm(22), [22.5, -22.0])));
    assert!(rec.calls.contains(&ActuatorCall::Velocity(arm(6), 6.5)));
    assert!(rec.calls.contains(&ActuatorCall::Velocity(arm(24), 24.5)));
    assert!(
        !rec.calls
            .iter()
            .any(|c| matches!(c, ActuatorCall::Torque(j, _) if j.index > 4))
    );
}

#[test]
fn vacant_slots_receive_nothing() {
    let mut rec = RecordingActuators::new();
    ControlModeDispatcher.apply_step(&(), &loaded_commands(), &mut rec);
    for vacant in [9, 13, 17, 21] {
        for side in [BodyRegion::LeftArm, BodyRegion::RightArm] {
            assert!(!rec.calls.iter().any(|c| c.joint() == JointRef::new(side, vacant)));
        }
    }
}

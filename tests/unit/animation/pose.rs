use super::*;

#[test]
fn standing_pose_puts_feet_on_floor() {
    let pose = Pose::standing(120.0, 360.0);
    assert_eq!(pose[JointName::FootL].y, 360.0);
    assert_eq!(pose[JointName::FootR].y, 360.0);
    assert_eq!(pose[JointName::Pelvis], Point::new(120.0, 280.0));
    assert!(pose[JointName::Head].y < pose[JointName::Neck].y);
    assert!(pose[JointName::HandL].x < pose[JointName::HandR].x);
}

#[test]
fn interpolation_is_jointwise_and_unclamped() {
    let a = Pose::standing(0.0, 100.0);
    let b = a.translated(Vec2::new(10.0, -20.0));
    let mid = interpolate_pose(&a, &b, 0.5);
    for (joint, p) in mid.iter() {
        assert_eq!(p, a[joint] + Vec2::new(5.0, -10.0));
    }
    let over = interpolate_pose(&a, &b, 2.0);
    assert_eq!(over[JointName::Head], a[JointName::Head] + Vec2::new(20.0, -40.0));
    assert_eq!(interpolate_pose(&a, &b, 0.0), a);
    assert_eq!(interpolate_pose(&a, &b, 1.0), b);
}

#[test]
fn with_offsets_only_moves_named_joints() {
    let idle = Pose::standing(50.0, 200.0);
    let pelvis = idle[JointName::Pelvis];
    let raised = idle.with_offsets(pelvis, &[(JointName::HandR, 40.0, -60.0)]);
    assert_eq!(raised[JointName::HandR], Point::new(90.0, 60.0));
    assert_eq!(raised[JointName::HandL], idle[JointName::HandL]);
}

#[test]
fn joint_names_roundtrip_through_interchange_names() {
    for joint in JointName::ALL {
        assert_eq!(joint.as_str().parse::<JointName>(), Ok(joint));
    }
    assert!("wrist".parse::<JointName>().is_err());
}

#[test]
fn pose_serializes_as_named_map() {
    let pose = Pose::standing(0.0, 80.0);
    let v = serde_json::to_value(pose).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), JointName::COUNT);
    assert_eq!(obj["pelvis"], serde_json::json!({ "x": 0.0, "y": 0.0 }));
    assert_eq!(obj["footR"], serde_json::json!({ "x": 12.0, "y": 80.0 }));
}

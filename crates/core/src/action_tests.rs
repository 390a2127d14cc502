// SPDX-License-Identifier: MIT

use super::*;

fn sample() -> ActionRecord {
    let mut record = ActionRecord::new(Version::new(2, 20, 0));
    record.deployment_actions.push(DeploymentAction::AddTrafficAgent {
        container_name: "web".to_string(),
        agent_image: "docker.io/telepresence/tel2:2.20.0".to_string(),
    });
    record
}

#[test]
fn round_trips_through_annotation_string() {
    let record = sample();
    let raw = record.to_annotation().unwrap();
    let parsed = ActionRecord::from_annotation(&raw, &Version::new(2, 20, 1)).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn newer_minor_record_with_same_major_is_rejected() {
    // sample() is 2.20.0; a manager running 2.19.x predates it.
    let record = sample();
    let raw = record.to_annotation().unwrap();
    let err = ActionRecord::from_annotation(&raw, &Version::new(2, 19, 0)).unwrap_err();
    assert!(matches!(err, ActionError::VersionMismatch { .. }));
}

#[test]
fn older_major_record_is_still_accepted() {
    // A record from an older manager major version is never a problem —
    // only a record newer than the reading manager is refused.
    let record = sample();
    let raw = record.to_annotation().unwrap();
    let parsed = ActionRecord::from_annotation(&raw, &Version::new(3, 0, 0)).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn malformed_annotation_is_an_error() {
    let err = ActionRecord::from_annotation("not json", &Version::new(2, 20, 0)).unwrap_err();
    assert!(matches!(err, ActionError::Malformed(_)));
}

#[test]
fn explain_describes_add_traffic_agent() {
    let action = DeploymentAction::AddTrafficAgent {
        container_name: "web".to_string(),
        agent_image: "img:1".to_string(),
    };
    assert!(action.explain().contains("web"));
    assert!(action.explain().contains("img:1"));
}

#[test]
fn empty_record_reports_empty() {
    assert!(ActionRecord::new(Version::new(2, 20, 0)).is_empty());
    assert!(!sample().is_empty());
}

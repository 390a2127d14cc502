// SPDX-License-Identifier: MIT

use super::*;

fn spec() -> InterceptSpec {
    InterceptSpec {
        name: "my-intercept".to_string(),
        agent_name: "svc".to_string(),
        namespace: "default".to_string(),
        mechanism: Mechanism::new("tcp", []),
    }
}

#[test]
fn new_intercept_starts_waiting() {
    let info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    assert_eq!(info.disposition, Disposition::Waiting);
    assert!(!info.is_active());
}

#[test]
fn transition_to_active_updates_disposition() {
    let mut info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    info.transition(Disposition::Active, "");
    assert!(info.is_active());
}

#[test]
fn agent_error_is_sticky_until_removed() {
    let mut info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    info.transition(Disposition::AgentError, "boom");
    info.transition(Disposition::Active, "");
    assert_eq!(info.disposition, Disposition::AgentError);
    assert_eq!(info.message, "boom");

    info.remove();
    assert_eq!(info.disposition, Disposition::Removed);
}

#[test]
fn transition_away_from_active_clears_pod_ip_and_port() {
    let mut info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    info.review(Disposition::Active, "", Some("10.1.2.3".to_string()), Some(9000));
    info.transition(Disposition::Waiting, "agent gone");
    assert_eq!(info.pod_ip, None);
    assert_eq!(info.manager_port, None);
}

#[test]
fn review_sets_active_with_pod_ip_and_port() {
    let mut info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    let agent_session = SessionId::new();
    info.set_agent_session(Some(agent_session));
    info.review(Disposition::Active, "", Some("10.1.2.3".to_string()), Some(9000));
    assert!(info.is_active());
    assert_eq!(info.pod_ip, Some("10.1.2.3".to_string()));
    assert_eq!(info.manager_port, Some(9000));
    assert_eq!(info.agent_session, Some(agent_session));
}

#[test]
fn agent_error_review_is_sticky_until_removed() {
    let mut info = InterceptInfo::new(InterceptId::new(), spec(), SessionId::new());
    info.review(Disposition::AgentError, "boom", None, None);
    info.review(Disposition::Active, "", Some("10.1.2.3".to_string()), Some(9000));
    assert_eq!(info.disposition, Disposition::AgentError);
    assert_eq!(info.message, "boom");
}

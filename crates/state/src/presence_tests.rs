// SPDX-License-Identifier: MIT

use super::*;
use tp_core::{Clock, FakeClock, Mechanism};

fn agent_info(name: &str) -> AgentInfo {
    AgentInfo {
        name: name.to_string(),
        namespace: "default".to_string(),
        pod_name: format!("{name}-abc"),
        pod_ip: "10.0.0.5".to_string(),
        version: "2.20.0".to_string(),
        product: "telepresence".to_string(),
        mechanisms: vec![Mechanism::new("tcp", [])],
    }
}

fn client_info() -> ClientInfo {
    ClientInfo {
        name: "laptop".to_string(),
        install_id: "abc".to_string(),
        product: "telepresence".to_string(),
        version: "2.20.0".to_string(),
        api_key: None,
    }
}

#[test]
fn arriving_agent_publishes_snapshot() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Agent, &clock);
    reg.arrive_agent(session, agent_info("svc"));
    assert_eq!(reg.snapshot_agents().len(), 1);
}

#[test]
fn client_sessions_are_not_in_the_agent_snapshot() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Client, &clock);
    reg.arrive_client(session, client_info());
    assert!(reg.snapshot_agents().is_empty());
}

#[test]
fn snapshot_agents_with_sessions_pairs_session_ids() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Agent, &clock);
    let id = session.id;
    reg.arrive_agent(session, agent_info("svc"));

    let pairs = reg.snapshot_agents_with_sessions();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].0, id);
    assert_eq!(pairs[0].1.name, "svc");
}

#[test]
fn agent_info_returns_none_for_a_client_session() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Client, &clock);
    let id = session.id;
    reg.arrive_client(session, client_info());
    assert!(reg.agent_info(&id).is_none());
}

#[test]
fn agent_info_resolves_an_agent_session() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Agent, &clock);
    let id = session.id;
    reg.arrive_agent(session, agent_info("svc"));
    assert_eq!(reg.agent_info(&id).map(|a| a.name), Some("svc".to_string()));
}

#[test]
fn mark_unknown_session_returns_false() {
    let reg = PresenceRegistry::new();
    assert!(!reg.mark(&SessionId::new(), 1000));
}

#[test]
fn mark_known_session_returns_true() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Client, &clock);
    let id = session.id;
    reg.arrive_client(session, client_info());
    assert!(reg.mark(&id, clock.epoch_ms() + 10));
}

#[test]
fn sweep_evicts_stale_sessions_and_republishes_agents() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Agent, &clock);
    let id = session.id;
    reg.arrive_agent(session, agent_info("svc"));

    let evicted = reg.sweep_stale(clock.epoch_ms() + 30_000, 10_000);
    assert_eq!(evicted, vec![id]);
    assert!(reg.snapshot_agents().is_empty());
    assert!(!reg.contains(&id));
}

#[test]
fn sweep_keeps_fresh_sessions() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Client, &clock);
    reg.arrive_client(session, client_info());

    let evicted = reg.sweep_stale(clock.epoch_ms() + 1_000, 10_000);
    assert!(evicted.is_empty());
}

#[test]
fn depart_removes_agent_and_republishes() {
    let reg = PresenceRegistry::new();
    let clock = FakeClock::new();
    let session = Session::new(SessionKind::Agent, &clock);
    let id = session.id;
    reg.arrive_agent(session, agent_info("svc"));
    reg.depart(&id);
    assert!(reg.snapshot_agents().is_empty());
}

// SPDX-License-Identifier: MIT

use super::*;
use k8s_openapi::api::core::v1::{ContainerPort, ServicePort};
use k8s_openapi::api::core::v1::ServiceSpec;

fn config() -> InstallerConfig {
    InstallerConfig::new("docker.io/telepresence", "2.20.0")
}

#[test]
fn add_traffic_agent_injects_container_once() {
    let mut containers = vec![Container { name: "web".to_string(), ..Default::default() }];
    let action = add_traffic_agent(&config(), &mut containers, 9900);
    assert!(action.is_some());
    assert_eq!(containers.len(), 2);

    let second = add_traffic_agent(&config(), &mut containers, 9900);
    assert!(second.is_none());
    assert_eq!(containers.len(), 2);
}

#[test]
fn hide_container_port_renames_and_records_action() {
    let mut containers = vec![Container {
        name: "web".to_string(),
        ports: Some(vec![ContainerPort { name: Some("http".to_string()), container_port: 8080, ..Default::default() }]),
        ..Default::default()
    }];
    let action = hide_container_port(&mut containers, "web", "http").unwrap();
    assert!(action.is_some());
    assert_eq!(containers[0].ports.as_ref().unwrap()[0].name, Some("tm-http".to_string()));
}

#[test]
fn hide_container_port_missing_container_is_error() {
    let mut containers: Vec<Container> = vec![];
    let err = hide_container_port(&mut containers, "web", "http").unwrap_err();
    assert!(matches!(err, InstallerError::NoSuchContainer { .. }));
}

#[test]
fn make_port_symbolic_rewrites_numeric_target() {
    let mut service = Service {
        spec: Some(ServiceSpec {
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                target_port: Some(IntOrString::Int(8080)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };
    let action = make_port_symbolic(&mut service, "http", "tm-http").unwrap();
    assert!(matches!(action, ServiceAction::MakePortSymbolic { .. }));
    let ports = service.spec.unwrap().ports.unwrap();
    assert_eq!(ports[0].target_port, Some(IntOrString::String("tm-http".to_string())));
}

#[test]
fn make_port_symbolic_is_idempotent() {
    let mut service = Service {
        spec: Some(ServiceSpec {
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                target_port: Some(IntOrString::String("tm-http".to_string())),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert!(make_port_symbolic(&mut service, "http", "tm-http").is_none());
}

#[test]
fn undo_service_actions_restores_numeric_target_port() {
    let mut service = Service {
        spec: Some(ServiceSpec {
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                target_port: Some(IntOrString::String("tm-http".to_string())),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };
    let record = ActionRecord {
        version: semver::Version::new(2, 20, 0),
        deployment_actions: vec![],
        service_actions: vec![ServiceAction::MakePortSymbolic {
            port_name: "http".to_string(),
            target_port: "8080".to_string(),
            symbolic_name: "tm-http".to_string(),
        }],
    };
    undo_service_actions(&mut service, &record);
    let ports = service.spec.unwrap().ports.unwrap();
    assert_eq!(ports[0].target_port, Some(IntOrString::Int(8080)));
}

#[test]
fn undo_service_actions_restores_symbolic_target_port() {
    let mut service = Service {
        spec: Some(ServiceSpec {
            ports: Some(vec![ServicePort {
                name: Some("http".to_string()),
                target_port: Some(IntOrString::String("tm-http".to_string())),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    };
    let record = ActionRecord {
        version: semver::Version::new(2, 20, 0),
        deployment_actions: vec![],
        service_actions: vec![ServiceAction::MakePortSymbolic {
            port_name: "http".to_string(),
            target_port: "web".to_string(),
            symbolic_name: "tm-http".to_string(),
        }],
    };
    undo_service_actions(&mut service, &record);
    let ports = service.spec.unwrap().ports.unwrap();
    assert_eq!(ports[0].target_port, Some(IntOrString::String("web".to_string())));
}

#[test]
fn undo_deployment_actions_removes_injected_container() {
    let mut containers = vec![
        Container { name: "web".to_string(), ..Default::default() },
        Container { name: AGENT_CONTAINER_NAME.to_string(), ..Default::default() },
    ];
    let record = ActionRecord {
        version: semver::Version::new(2, 20, 0),
        deployment_actions: vec![DeploymentAction::AddTrafficAgent {
            container_name: AGENT_CONTAINER_NAME.to_string(),
            agent_image: "img".to_string(),
        }],
        service_actions: vec![],
    };
    undo_deployment_actions(&mut containers, &record);
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].name, "web");
}

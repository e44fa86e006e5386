use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use drone_cfn_sg::core::pipeline::{RENDERED_TEMPLATE, TEMPLATE_SOURCE};
use drone_cfn_sg::core::{Deployer, DeployRequest, Storage};
use drone_cfn_sg::{DeployEngine, LocalStorage, PluginConfig, Result, SgPipeline};
use tokio::sync::Mutex;

/// The template that ships with the plugin, staged into the test workspace.
const TEMPLATE: &str = include_str!("../templates/security-group.yml.hbs");

#[derive(Clone, Default)]
struct RecordingDeployer {
    calls: Arc<Mutex<Vec<(DeployRequest, String)>>>,
    fail: bool,
}

impl RecordingDeployer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    async fn calls(&self) -> Vec<(DeployRequest, String)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl Deployer for RecordingDeployer {
    async fn deploy(&self, request: &DeployRequest, template_body: &str) -> Result<()> {
        let mut calls = self.calls.lock().await;
        calls.push((request.clone(), template_body.to_string()));
        if self.fail {
            return Err(drone_cfn_sg::PluginError::DeployError {
                message: "stack rollback".to_string(),
            });
        }
        Ok(())
    }
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn workspace() -> (tempfile::TempDir, LocalStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path().to_string_lossy().to_string());
    storage.write_text(TEMPLATE_SOURCE, TEMPLATE).await.unwrap();
    (dir, storage)
}

#[tokio::test]
async fn test_full_run_renders_and_deploys() {
    let (_dir, storage) = workspace().await;
    let deployer = RecordingDeployer::default();

    let config = PluginConfig::from_env(&env(&[
        ("PLUGIN_NAME", "sg1"),
        ("PLUGIN_DESCRIPTION", "web traffic"),
        ("PLUGIN_VPCID", "vpc-1"),
        ("PLUGIN_INGRESS_PORTS", "80,443"),
        ("PLUGIN_INGRESS_CIDRS", "10.0.0.0/24"),
    ]));
    let pipeline = SgPipeline::new(config, storage.clone(), deployer.clone());

    DeployEngine::new(pipeline).run().await.unwrap();

    // The rendered document landed in the workspace.
    let rendered = storage.read_text(RENDERED_TEMPLATE).await.unwrap();
    assert!(rendered.contains("GroupDescription: 'web traffic'"));
    assert!(rendered.contains("VpcId: vpc-1"));
    assert!(rendered.contains("SecurityGroupIngress:"));
    assert!(!rendered.contains("SecurityGroupEgress:"));
    assert_eq!(rendered.matches("- CidrIp: 10.0.0.0/24").count(), 2);
    assert!(rendered.contains("FromPort: 80"));
    assert!(rendered.contains("FromPort: 443"));
    assert!(rendered.contains("IpProtocol: '-1'"));
    assert!(rendered.contains("Name: sg1"));

    // The deployer received the same document, with defaulted settings.
    let calls = deployer.calls().await;
    assert_eq!(calls.len(), 1);
    let (request, body) = &calls[0];
    assert_eq!(request.name, "sg1");
    assert_eq!(request.region, "eu-west-1");
    assert!(request.credentials.is_none());
    assert_eq!(
        request.capabilities,
        &["CAPABILITY_NAMED_IAM", "CAPABILITY_IAM"]
    );
    assert_eq!(body, &rendered);
}

#[tokio::test]
async fn test_structured_ports_render_explicit_protocol() {
    let (_dir, storage) = workspace().await;
    let deployer = RecordingDeployer::default();

    let config = PluginConfig::from_env(&env(&[
        ("PLUGIN_NAME", "sg1"),
        ("PLUGIN_VPCID", "vpc-1"),
        (
            "PLUGIN_EGRESS_PORTS",
            r#"[{"from_port":80,"to_port":81,"protocol":"tcp"}]"#,
        ),
        ("PLUGIN_EGRESS_CIDRS", "10.0.0.0/24,10.0.1.0/24"),
    ]));
    let pipeline = SgPipeline::new(config, storage.clone(), deployer.clone());

    DeployEngine::new(pipeline).run().await.unwrap();

    let rendered = storage.read_text(RENDERED_TEMPLATE).await.unwrap();
    assert!(!rendered.contains("SecurityGroupIngress:"));
    assert!(rendered.contains("SecurityGroupEgress:"));
    assert_eq!(rendered.matches("IpProtocol: 'tcp'").count(), 2);
    assert!(rendered.contains("ToPort: 81"));
}

#[tokio::test]
async fn test_invalid_configuration_never_reaches_the_deployer() {
    let (_dir, storage) = workspace().await;
    let deployer = RecordingDeployer::default();

    let config = PluginConfig::from_env(&env(&[
        ("PLUGIN_NAME", "sg1"),
        ("PLUGIN_VPCID", "vpc-1"),
        ("PLUGIN_INGRESS_PORTS", "80,a12"),
        ("PLUGIN_INGRESS_CIDRS", "10.0.0.0/24"),
    ]));
    let pipeline = SgPipeline::new(config, storage.clone(), deployer.clone());

    let result = DeployEngine::new(pipeline).run().await;
    assert!(result.is_err());
    assert!(deployer.calls().await.is_empty());
    // Nothing was rendered either; validation failed first.
    assert!(storage.read_text(RENDERED_TEMPLATE).await.is_err());
}

#[tokio::test]
async fn test_deploy_failure_propagates() {
    let (_dir, storage) = workspace().await;
    let deployer = RecordingDeployer::failing();

    let config = PluginConfig::from_env(&env(&[
        ("PLUGIN_NAME", "sg1"),
        ("PLUGIN_VPCID", "vpc-1"),
    ]));
    let pipeline = SgPipeline::new(config, storage.clone(), deployer.clone());

    let result = DeployEngine::new(pipeline).run().await;
    assert!(matches!(
        result,
        Err(drone_cfn_sg::PluginError::DeployError { .. })
    ));
    // The rendered document is left behind; a failed run is re-run from scratch.
    assert!(storage.read_text(RENDERED_TEMPLATE).await.is_ok());
}

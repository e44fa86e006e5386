use std::collections::HashMap;

use drone_cfn_sg::utils::logger;
use drone_cfn_sg::{CloudFormationDeployer, DeployEngine, LocalStorage, PluginConfig, SgPipeline};

#[tokio::main]
async fn main() {
    let env: HashMap<String, String> = std::env::vars().collect();
    let config = PluginConfig::from_env(&env);
    logger::init_logger(config.debug);

    tracing::info!("Starting drone-cfn-sg plugin");

    let storage = LocalStorage::new(".".to_string());
    let deployer = CloudFormationDeployer::new();
    let pipeline = SgPipeline::new(config, storage, deployer);
    let engine = DeployEngine::new(pipeline);

    if let Err(err) = engine.run().await {
        tracing::error!("Deployment failed: {}", err);
        std::process::exit(1);
    }

    tracing::info!("Security group deployment finished");
}

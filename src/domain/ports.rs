use crate::domain::model::{DeployRequest, SecurityGroupSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Document storage for the plugin workspace. Everything the pipeline
/// touches is text (the template source and the rendered deployment
/// document), so the port is string-typed; adapters own the encoding
/// concerns of their backing store.
pub trait Storage: Send + Sync {
    fn read_text(&self, path: &str) -> impl std::future::Future<Output = Result<String>> + Send;
    fn write_text(
        &self,
        path: &str,
        contents: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait Deployer: Send + Sync {
    async fn deploy(&self, request: &DeployRequest, template_body: &str) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn validate(&self) -> Result<()>;
    fn assemble(&self) -> Result<SecurityGroupSpec>;
    async fn render(&self, spec: &SecurityGroupSpec) -> Result<String>;
    async fn deploy(&self, template_path: &str) -> Result<()>;
}

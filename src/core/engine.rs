use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Runs the pipeline stages strictly in order. Any stage error aborts the
/// rest of the run and propagates to the caller; the entry point alone turns
/// the outcome into a process exit code.
pub struct DeployEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DeployEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!("Validating plugin configuration");
        self.pipeline.validate()?;

        let spec = self.pipeline.assemble()?;
        tracing::info!(
            "Assembled security group '{}' ({} ingress, {} egress rules)",
            spec.name,
            spec.ingress.as_ref().map(Vec::len).unwrap_or(0),
            spec.egress.as_ref().map(Vec::len).unwrap_or(0)
        );

        let template_path = self.pipeline.render(&spec).await?;
        tracing::info!("Rendered deployment document to {}", template_path);

        self.pipeline.deploy(&template_path).await?;
        tracing::info!("Stack deployment completed");

        Ok(())
    }
}

use crate::config::PluginConfig;
use crate::core::{rules, validate};
use crate::domain::model::SecurityGroupSpec;
use crate::domain::ports::{Deployer, Pipeline, Storage};
use crate::utils::error::Result;
use handlebars::Handlebars;

/// Template shipped with the plugin image.
pub const TEMPLATE_SOURCE: &str = "templates/security-group.yml.hbs";
/// Where the rendered deployment document lands, relative to the workspace.
pub const RENDERED_TEMPLATE: &str = "template.yml";

/// The security-group deployment pipeline: validate the configuration,
/// assemble the renderer payload, render the CloudFormation document and
/// hand it to the deployer. Storage and deployer are injected so tests can
/// substitute both without touching the filesystem or AWS.
pub struct SgPipeline<S: Storage, D: Deployer> {
    config: PluginConfig,
    storage: S,
    deployer: D,
}

impl<S: Storage, D: Deployer> SgPipeline<S, D> {
    pub fn new(config: PluginConfig, storage: S, deployer: D) -> Self {
        Self {
            config,
            storage,
            deployer,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, D: Deployer> Pipeline for SgPipeline<S, D> {
    fn validate(&self) -> Result<()> {
        validate::validate_config(&self.config)
    }

    fn assemble(&self) -> Result<SecurityGroupSpec> {
        Ok(rules::build_spec(&self.config))
    }

    async fn render(&self, spec: &SecurityGroupSpec) -> Result<String> {
        let source = self.storage.read_text(TEMPLATE_SOURCE).await?;

        // The output is YAML, so HTML escaping must stay off.
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        let rendered = handlebars.render_template(&source, spec)?;

        tracing::debug!("Rendered deployment document ({} bytes)", rendered.len());
        self.storage.write_text(RENDERED_TEMPLATE, &rendered).await?;

        Ok(RENDERED_TEMPLATE.to_string())
    }

    async fn deploy(&self, template_path: &str) -> Result<()> {
        let request = self.config.deploy_request(template_path);
        let body = self.storage.read_text(template_path).await?;

        tracing::debug!(
            "Submitting stack {} to region {}",
            request.name,
            request.region
        );
        self.deployer.deploy(&request, &body).await
    }
}

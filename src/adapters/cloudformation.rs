use crate::domain::model::DeployRequest;
use crate::domain::ports::Deployer;
use crate::utils::error::{PluginError, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::config::Credentials;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::operation::create_stack::CreateStackError;
use aws_sdk_cloudformation::operation::update_stack::UpdateStackError;
use aws_sdk_cloudformation::types::{Capability, StackStatus};
use aws_sdk_cloudformation::Client;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Deploys the rendered document as a CloudFormation stack: create first,
/// fall back to update when the stack already exists, then poll until the
/// stack reaches a terminal state. A no-op update counts as success.
pub struct CloudFormationDeployer;

impl CloudFormationDeployer {
    pub fn new() -> Self {
        Self
    }

    async fn client(&self, request: &DeployRequest) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(request.region.clone()));

        if let Some(credentials) = &request.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                "drone-cfn-sg",
            ));
        }

        Client::new(&loader.load().await)
    }

    async fn wait_for(&self, client: &Client, stack_name: &str, target: StackStatus) -> Result<()> {
        loop {
            let described = client
                .describe_stacks()
                .stack_name(stack_name)
                .send()
                .await
                .map_err(deploy_error)?;

            let status = described
                .stacks()
                .first()
                .and_then(|stack| stack.stack_status().cloned())
                .ok_or_else(|| PluginError::DeployError {
                    message: format!("stack {} not found while waiting", stack_name),
                })?;

            if status == target {
                return Ok(());
            }

            if !is_in_progress(&status) {
                return Err(PluginError::DeployError {
                    message: format!("stack {} entered state {}", stack_name, status.as_str()),
                });
            }

            tracing::debug!("Stack {} is {}, waiting", stack_name, status.as_str());
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

impl Default for CloudFormationDeployer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Deployer for CloudFormationDeployer {
    async fn deploy(&self, request: &DeployRequest, template_body: &str) -> Result<()> {
        let client = self.client(request).await;
        let capabilities: Vec<Capability> = request
            .capabilities
            .iter()
            .map(|capability| Capability::from(*capability))
            .collect();

        let create = client
            .create_stack()
            .stack_name(&request.name)
            .template_body(template_body)
            .set_capabilities(Some(capabilities.clone()))
            .send()
            .await;

        match create {
            Ok(_) => {
                tracing::info!("Creating stack {}", request.name);
                self.wait_for(&client, &request.name, StackStatus::CreateComplete)
                    .await
            }
            Err(err) if is_already_exists(&err) => {
                tracing::info!("Stack {} already exists, updating", request.name);
                let update = client
                    .update_stack()
                    .stack_name(&request.name)
                    .template_body(template_body)
                    .set_capabilities(Some(capabilities))
                    .send()
                    .await;

                match update {
                    Ok(_) => {
                        self.wait_for(&client, &request.name, StackStatus::UpdateComplete)
                            .await
                    }
                    Err(err) if is_no_update(&err) => {
                        tracing::info!("No changes for stack {}", request.name);
                        Ok(())
                    }
                    Err(err) => Err(deploy_error(err)),
                }
            }
            Err(err) => Err(deploy_error(err)),
        }
    }
}

// Every transitional stack state carries the _IN_PROGRESS suffix; anything
// else is terminal and, unless it is the awaited target, a failed deploy.
fn is_in_progress(status: &StackStatus) -> bool {
    status.as_str().ends_with("_IN_PROGRESS")
}

fn is_already_exists<R>(err: &SdkError<CreateStackError, R>) -> bool {
    matches!(err.as_service_error(), Some(service) if service.is_already_exists_exception())
}

// CloudFormation reports a no-op update as a plain validation error; the
// message text is the only discriminator the API offers.
fn is_no_update<R>(err: &SdkError<UpdateStackError, R>) -> bool {
    err.message()
        .map(|message| message.contains("No updates are to be performed"))
        .unwrap_or(false)
}

fn deploy_error<E, R>(err: SdkError<E, R>) -> PluginError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    PluginError::DeployError {
        message: DisplayErrorContext(err).to_string(),
    }
}

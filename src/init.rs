//! Application wiring: one catalog client, the service bundle over it,
//! the tool registry, and the agent configuration — constructed once at
//! startup and shared from there.

use std::sync::Arc;

use crate::agent::{AgentConfig, AgentOrchestrator, AnthropicClient, ToolRegistry};
use crate::catalog::{CatalogClient, CatalogConfig};
use crate::services::{DashboardService, GalaxyServices};
use crate::HolocronError;

pub struct AppContext {
    pub client: Arc<CatalogClient>,
    pub services: Arc<GalaxyServices>,
    pub registry: Arc<ToolRegistry>,
    pub agent_config: AgentConfig,
}

impl AppContext {
    /// Build the context from the environment.
    pub fn new() -> Result<Self, HolocronError> {
        Self::with_configs(CatalogConfig::from_env(), AgentConfig::from_env())
    }

    pub fn with_configs(
        catalog: CatalogConfig,
        agent_config: AgentConfig,
    ) -> Result<Self, HolocronError> {
        let client = Arc::new(CatalogClient::new(catalog)?);
        let services = Arc::new(GalaxyServices::new(client.clone()));
        let registry = Arc::new(ToolRegistry::for_services(services.clone()));
        Ok(Self {
            client,
            services,
            registry,
            agent_config,
        })
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.services.clone())
    }

    /// Build the agent orchestrator. Fails when the model credential is
    /// missing, before any network call.
    pub fn orchestrator(&self) -> Result<AgentOrchestrator, HolocronError> {
        let llm = Arc::new(AnthropicClient::new(&self.agent_config)?);
        Ok(AgentOrchestrator::new(
            llm,
            self.registry.clone(),
            self.agent_config.clone(),
        ))
    }
}

use anyhow::{Context, Result};
use coltree::config::{AppConfig, ComingSoonSource};
use coltree::input;
use coltree::services::{
    FileOrgDetails, HttpOrgDetails, LanguageSelector, OrgDetailsService, Services, SessionUser,
    StaticOrgDetails,
};
use coltree::{CollectionTreeComponent, TreeInputs};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Input files named on the command line.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub nodes: PathBuf,
    pub status: Option<PathBuf>,
}

impl InputPaths {
    pub fn read(&self, config: &AppConfig) -> Result<TreeInputs> {
        let nodes = input::load_nodes(&self.nodes)?;
        let content_status = self
            .status
            .as_deref()
            .map(input::load_content_status)
            .transpose()?;

        Ok(TreeInputs {
            nodes: Some(nodes),
            options: config.tree.to_options(),
            content_status,
        })
    }
}

pub fn build_services(config: &AppConfig, language: Option<&str>) -> (Services, Arc<LanguageSelector>) {
    let initial = language.unwrap_or(&config.locale.default_language);
    let languages = Arc::new(LanguageSelector::new(
        initial,
        &config.coming_soon.default_message,
    ));

    let default_org = config.session.default_root_org_id.clone();
    let org: Arc<dyn OrgDetailsService> = match &config.coming_soon.source {
        ComingSoonSource::None => Arc::new(StaticOrgDetails::new(default_org, None)),
        ComingSoonSource::File { path } => Arc::new(FileOrgDetails::new(default_org, path.clone())),
        ComingSoonSource::Http { base_url } => Arc::new(HttpOrgDetails::new(base_url, default_org)),
    };

    let services = Services {
        user: Arc::new(SessionUser::from_config(&config.session)),
        org,
        resources: languages.clone(),
    };
    (services, languages)
}

/// Decorates once and prints the result as JSON, without a terminal UI.
pub async fn print_decorated(config: &AppConfig, paths: &InputPaths, language: Option<&str>) -> Result<()> {
    let inputs = paths.read(config)?;
    let (services, _languages) = build_services(config, language);
    let (mut component, _selections) =
        CollectionTreeComponent::new(services, inputs, config.coming_soon.parent_fallback);

    component.start();

    // First language emission triggers the initial rebuild
    component.next_event().await;

    // Give the org setting a moment so empty folders get the org message
    if config.coming_soon.source != ComingSoonSource::None {
        let wait = tokio::time::timeout(Duration::from_secs(3), async {
            while component.coming_soon().is_none() {
                if !component.next_event().await {
                    break;
                }
            }
        });
        if wait.await.is_err() {
            tracing::warn!("Coming soon setting did not arrive, using default message");
        }
    }

    let json = component
        .decorated()
        .map(|d| d.to_json())
        .unwrap_or(serde_json::Value::Null);
    component.teardown();

    println!(
        "{}",
        serde_json::to_string_pretty(&json).context("Failed to serialize decorated tree")?
    );
    Ok(())
}

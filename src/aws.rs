use std::env;

use aws_config::BehaviorVersion;
use aws_config::environment::region::EnvironmentVariableRegionProvider;
use aws_config::meta::region::ProvideRegion;
use aws_credential_types::Credentials;
use aws_sdk_dynamodb::config::Region;
use color_eyre::eyre::{Context, Result};

use crate::util::env_present;

pub const SAM_LOCAL_ENDPOINT: &str = "http://dynamo-local:8000";
pub const LOCAL_TEST_ENDPOINT: &str = "http://localhost:8000";
pub const LOCAL_REGION: &str = "localhost";
pub const DEFAULT_REGION: &str = "ap-northeast-2";

/// Where the client should point, picked from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Running under `sam local`; DynamoDB Local is reachable as `dynamo-local`.
    SamLocal,
    /// Local test run against DynamoDB Local on the host.
    LocalTest,
    Aws,
}

impl Target {
    /// Any non-empty `AWS_SAM_LOCAL` or `LOCAL_TEST` selects a local target,
    /// SAM first.
    pub fn from_env() -> Self {
        Self::select(env_present("AWS_SAM_LOCAL"), env_present("LOCAL_TEST"))
    }

    pub fn select(sam_local: bool, local_test: bool) -> Self {
        if sam_local {
            Target::SamLocal
        } else if local_test {
            Target::LocalTest
        } else {
            Target::Aws
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// Resolved client settings. `None` fields fall back to the SDK defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub region: String,
    pub endpoint_url: Option<String>,
    pub credentials: Option<StaticCredentials>,
}

impl Settings {
    /// `env_region` is the region found in the standard AWS variables, and
    /// `local_credentials` the keys exported for local test runs.
    pub fn resolve(
        target: Target,
        endpoint_url: Option<&str>,
        env_region: Option<String>,
        local_credentials: Option<StaticCredentials>,
    ) -> Self {
        let mut settings = match target {
            Target::SamLocal => Settings {
                region: LOCAL_REGION.to_string(),
                endpoint_url: Some(SAM_LOCAL_ENDPOINT.to_string()),
                credentials: None,
            },
            Target::LocalTest => Settings {
                region: LOCAL_REGION.to_string(),
                endpoint_url: Some(LOCAL_TEST_ENDPOINT.to_string()),
                credentials: local_credentials,
            },
            Target::Aws => Settings {
                region: env_region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
                endpoint_url: None,
                credentials: None,
            },
        };
        if let Some(url) = endpoint_url {
            settings.endpoint_url = Some(url.to_string());
        }
        settings
    }

    pub async fn from_env(endpoint_url: Option<&str>) -> Self {
        let target = Target::from_env();
        let env_region = EnvironmentVariableRegionProvider::new()
            .region()
            .await
            .map(|region| region.to_string());
        let local_credentials = match (
            env::var("aws_access_key_id"),
            env::var("aws_secret_access_key"),
        ) {
            (Ok(access_key_id), Ok(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };
        Self::resolve(target, endpoint_url, env_region, local_credentials)
    }
}

pub async fn new_client(endpoint_url: Option<&str>) -> aws_sdk_dynamodb::Client {
    let settings = Settings::from_env(endpoint_url).await;
    tracing::debug!(
        region = %settings.region,
        endpoint_url = ?settings.endpoint_url,
        static_credentials = settings.credentials.is_some(),
        "Configuring DynamoDB client"
    );
    client_from_settings(&settings).await
}

pub async fn client_from_settings(settings: &Settings) -> aws_sdk_dynamodb::Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(settings.region.clone()));

    if let Some(url) = &settings.endpoint_url {
        loader = loader.endpoint_url(url);
    }
    if let Some(credentials) = &settings.credentials {
        loader = loader.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "simple-dynamo-local",
        ));
    }

    let config = loader.load().await;
    aws_sdk_dynamodb::Client::new(&config)
}

pub async fn validate_connection(client: &aws_sdk_dynamodb::Client) -> Result<()> {
    client
        .list_tables()
        .limit(1)
        .send()
        .await
        .map(|_| ())
        .wrap_err("Failed to connect to DynamoDB")
}

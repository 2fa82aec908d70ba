//! # StatusCake SSL Test CLI
//!
//! Drives the `statuscake_ssl` resource lifecycle from the command line.
//! Desired configuration comes from a JSON file; the test id and the
//! attributes last read from StatusCake are kept in a JSON state file.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use statuscake_client::{SslApi, StatusCakeClient};
use statuscake_core::{Mode, Resource, ResourceData, ResourceId};
use statuscake_ssltest::{validate_config, SslTestResource, SSL_TEST_SCHEMA};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::ProviderConfig;

/// Manage a StatusCake SSL test
#[derive(Parser, Debug)]
#[command(name = "statuscake-ssltest", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resource schema as JSON
    Schema,
    /// Check a configuration file against the schema
    Validate {
        /// Configuration file
        config: PathBuf,
    },
    /// Create the SSL test described by a configuration file
    Create {
        /// Configuration file
        config: PathBuf,
        #[command(flatten)]
        state: StateFile,
    },
    /// Refresh state from StatusCake
    Read {
        #[command(flatten)]
        state: StateFile,
    },
    /// Apply the attributes in a configuration file to the tracked test
    Update {
        /// Configuration file
        config: PathBuf,
        #[command(flatten)]
        state: StateFile,
    },
    /// Delete the tracked test
    Delete {
        #[command(flatten)]
        state: StateFile,
    },
}

#[derive(Args, Debug)]
struct StateFile {
    /// State file holding the test id and last read attributes
    #[arg(
        long = "state",
        env = "STATUSCAKE_STATE_FILE",
        default_value = "statuscake_ssl.state.json"
    )]
    path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            let json = serde_json::to_string_pretty(&SSL_TEST_SCHEMA)
                .context("Failed to encode schema")?;
            println!("{json}");
        }
        Command::Validate { config } => validate(&config)?,
        Command::Create { config, state } => {
            let data = create(&connect()?, &config, &state.path).await?;
            print_state(&data)?;
        }
        Command::Read { state } => match read(&connect()?, &state.path).await? {
            ReadOutcome::Refreshed(data) => print_state(&data)?,
            ReadOutcome::Gone(id) => println!("SSL test {id} no longer exists"),
        },
        Command::Update { config, state } => {
            let data = update(&connect()?, &config, &state.path).await?;
            print_state(&data)?;
        }
        Command::Delete { state } => {
            let id = delete(&connect()?, &state.path).await?;
            println!("Deleted SSL test {id}");
        }
    }

    Ok(())
}

fn connect() -> Result<SslTestResource<StatusCakeClient>> {
    let config = ProviderConfig::from_env()?;
    tracing::debug!(?config, "Loaded provider configuration");

    let client = StatusCakeClient::new(config.to_client_config())
        .context("Failed to create StatusCake client")?;
    Ok(SslTestResource::new(client))
}

fn tracked_id(data: &ResourceData, path: &Path) -> Result<ResourceId> {
    data.id()
        .with_context(|| format!("State file {} does not track an SSL test", path.display()))
}

fn print_state(data: &ResourceData) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to encode state")?;
    println!("{json}");
    Ok(())
}

fn validate(config_path: &Path) -> Result<()> {
    let config = state::load_config(config_path)?;

    match validate_config(&config, Mode::Full) {
        Ok(()) => {
            println!("{} is valid", config_path.display());
            Ok(())
        }
        Err(err) => {
            for diagnostic in err.diagnostics() {
                println!("{diagnostic}");
            }
            anyhow::bail!(
                "{} has {} problem(s)",
                config_path.display(),
                err.diagnostics().len()
            )
        }
    }
}

async fn create<A: SslApi>(
    resource: &SslTestResource<A>,
    config_path: &Path,
    state_path: &Path,
) -> Result<ResourceData> {
    let existing = state::load(state_path)?;
    if let Some(id) = existing.id() {
        anyhow::bail!(
            "State file {} already tracks SSL test {id}",
            state_path.display()
        );
    }

    let mut data = state::load_config(config_path)?;
    resource.validate(&data, Mode::Full)?;

    let result = resource.create(&mut data).await;

    // Keep the id even if the follow-up read failed so the test is not orphaned
    if data.id().is_some() {
        state::save(state_path, &data)?;
    }
    result?;

    Ok(data)
}

enum ReadOutcome {
    Refreshed(ResourceData),
    Gone(ResourceId),
}

async fn read<A: SslApi>(
    resource: &SslTestResource<A>,
    state_path: &Path,
) -> Result<ReadOutcome> {
    let mut data = state::load(state_path)?;
    let id = tracked_id(&data, state_path)?;

    match resource.read(&mut data).await {
        Ok(()) => {
            state::save(state_path, &data)?;
            Ok(ReadOutcome::Refreshed(data))
        }
        Err(err) if err.is_not_found() => {
            tracing::warn!(%id, "SSL test no longer exists, removing it from state");
            data.clear();
            state::save(state_path, &data)?;
            Ok(ReadOutcome::Gone(id))
        }
        Err(err) => Err(err.into()),
    }
}

async fn update<A: SslApi>(
    resource: &SslTestResource<A>,
    config_path: &Path,
    state_path: &Path,
) -> Result<ResourceData> {
    let mut data = state::load(state_path)?;
    let id = tracked_id(&data, state_path)?;

    let config = state::load_config(config_path)?;
    resource.validate(&config, Mode::Partial)?;

    let mut patch = config.with_id(id);
    resource.update(&mut patch).await?;

    resource.read(&mut data).await?;
    state::save(state_path, &data)?;
    Ok(data)
}

async fn delete<A: SslApi>(
    resource: &SslTestResource<A>,
    state_path: &Path,
) -> Result<ResourceId> {
    let mut data = state::load(state_path)?;
    let id = tracked_id(&data, state_path)?;

    match resource.delete(&mut data).await {
        Ok(()) => tracing::info!(%id, "Deleted StatusCake SSL test"),
        Err(err) if err.is_not_found() => {
            tracing::warn!(%id, "SSL test already gone");
        }
        Err(err) => return Err(err.into()),
    }

    data.clear();
    state::save(state_path, &data)?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clap::CommandFactory;
    use serde_json::json;
    use statuscake_client::{ClientError, PartialSsl, Ssl};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tempfile::{tempdir, TempDir};

    /// In-memory StatusCake that records every upsert payload.
    #[derive(Default)]
    struct FakeApi {
        tests: Mutex<BTreeMap<u64, Ssl>>,
        upserts: Mutex<Vec<PartialSsl>>,
        failing_detail: Option<ClientError>,
    }

    impl FakeApi {
        fn with_test(ssl: Ssl) -> Self {
            let api = Self::default();
            api.tests.lock().unwrap().insert(ssl.id, ssl);
            api
        }

        fn upserts(&self) -> Vec<PartialSsl> {
            self.upserts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SslApi for FakeApi {
        async fn upsert(&self, test: &PartialSsl) -> Result<u64, ClientError> {
            self.upserts.lock().unwrap().push(test.clone());
            let mut tests = self.tests.lock().unwrap();
            let id = test.id.unwrap_or(12345);
            let ssl = tests.entry(id).or_insert_with(|| Ssl {
                id,
                ..Default::default()
            });
            if let Some(domain) = &test.domain {
                ssl.domain.clone_from(domain);
            }
            if let Some(check_rate) = test.check_rate {
                ssl.check_rate = check_rate;
            }
            if let Some(alert_at) = &test.alert_at {
                ssl.alert_at.clone_from(alert_at);
            }
            Ok(id)
        }

        async fn detail(&self, id: u64) -> Result<Ssl, ClientError> {
            if let Some(error) = &self.failing_detail {
                return Err(error.clone());
            }
            let tests = self.tests.lock().unwrap();
            tests.get(&id).cloned().ok_or(ClientError::NotFound(id))
        }

        async fn delete(&self, id: u64) -> Result<(), ClientError> {
            let mut tests = self.tests.lock().unwrap();
            tests.remove(&id).map(|_| ()).ok_or(ClientError::NotFound(id))
        }
    }

    fn remote(id: u64) -> Ssl {
        Ssl {
            id,
            domain: "example.com".to_string(),
            check_rate: 3600,
            alert_at: "1,2,3".to_string(),
            ..Default::default()
        }
    }

    fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn tracked_state(dir: &TempDir, id: u64) -> PathBuf {
        let path = dir.path().join("state.json");
        let mut data = ResourceData::new().with_id(ResourceId::new(id).unwrap());
        data.set("domain", "example.com");
        state::save(&path, &data).unwrap();
        path
    }

    fn full_config() -> serde_json::Value {
        json!({
            "domain": "example.com",
            "alert_at": "1,2,3",
            "alert_reminder": true,
            "alert_expiry": true,
            "alert_broken": true
        })
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_state_flag() {
        let cli = Cli::try_parse_from([
            "statuscake-ssltest",
            "update",
            "ssl.json",
            "--state",
            "prod.state.json",
        ])
        .unwrap();

        match cli.command {
            Command::Update { config, state } => {
                assert_eq!(config, PathBuf::from("ssl.json"));
                assert_eq!(state.path, PathBuf::from("prod.state.json"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_writes_state_with_new_id() {
        let dir = tempdir().unwrap();
        let config = write_json(&dir, "ssl.json", &full_config());
        let state_path = dir.path().join("state.json");
        let resource = SslTestResource::new(FakeApi::default());

        let data = create(&resource, &config, &state_path).await.unwrap();

        assert_eq!(data.id().map(ResourceId::get), Some(12345));
        assert_eq!(state::load(&state_path).unwrap(), data);
    }

    #[tokio::test]
    async fn create_refuses_when_state_already_tracks_a_test() {
        let dir = tempdir().unwrap();
        let config = write_json(&dir, "ssl.json", &full_config());
        let state_path = tracked_state(&dir, 777);
        let api = Arc::new(FakeApi::default());
        let resource = SslTestResource::new(Arc::clone(&api));

        let err = create(&resource, &config, &state_path).await.unwrap_err();

        assert!(err.to_string().contains("already tracks SSL test 777"));
        assert!(api.upserts().is_empty());
    }

    #[tokio::test]
    async fn create_keeps_id_when_follow_up_read_fails() {
        let dir = tempdir().unwrap();
        let config = write_json(&dir, "ssl.json", &full_config());
        let state_path = dir.path().join("state.json");
        let resource = SslTestResource::new(FakeApi {
            failing_detail: Some(ClientError::Request("connection reset".to_string())),
            ..Default::default()
        });

        assert!(create(&resource, &config, &state_path).await.is_err());

        let saved = state::load(&state_path).unwrap();
        assert_eq!(saved.id().map(ResourceId::get), Some(12345));
    }

    #[tokio::test]
    async fn create_rejects_computed_attributes_in_config() {
        let dir = tempdir().unwrap();
        let mut value = full_config();
        value["cert_score"] = json!("95");
        let config = write_json(&dir, "ssl.json", &value);
        let state_path = dir.path().join("state.json");
        let api = Arc::new(FakeApi::default());
        let resource = SslTestResource::new(Arc::clone(&api));

        assert!(create(&resource, &config, &state_path).await.is_err());
        assert!(api.upserts().is_empty());
        assert!(!state_path.exists());
    }

    #[tokio::test]
    async fn read_refreshes_state() {
        let dir = tempdir().unwrap();
        let state_path = tracked_state(&dir, 12345);
        let resource = SslTestResource::new(FakeApi::with_test(remote(12345)));

        let outcome = read(&resource, &state_path).await.unwrap();

        assert!(matches!(outcome, ReadOutcome::Refreshed(_)));
        let saved = state::load(&state_path).unwrap();
        assert_eq!(saved.get_i64("check_rate"), Some(3600));
        assert_eq!(saved.get_str("alert_at"), Some("1,2,3"));
    }

    #[tokio::test]
    async fn read_of_deleted_test_clears_state() {
        let dir = tempdir().unwrap();
        let state_path = tracked_state(&dir, 777);
        let resource = SslTestResource::new(FakeApi::default());

        let outcome = read(&resource, &state_path).await.unwrap();

        assert!(matches!(outcome, ReadOutcome::Gone(id) if id.get() == 777));
        assert_eq!(state::load(&state_path).unwrap(), ResourceData::new());
    }

    #[tokio::test]
    async fn read_failure_keeps_state() {
        let dir = tempdir().unwrap();
        let state_path = tracked_state(&dir, 12345);
        let before = state::load(&state_path).unwrap();
        let resource = SslTestResource::new(FakeApi {
            failing_detail: Some(ClientError::ApiError {
                status: 404,
                message: "no such endpoint".to_string(),
            }),
            ..Default::default()
        });

        assert!(read(&resource, &state_path).await.is_err());
        assert_eq!(state::load(&state_path).unwrap(), before);
    }

    #[tokio::test]
    async fn update_sends_only_config_attributes_then_refreshes() {
        let dir = tempdir().unwrap();
        let config = write_json(&dir, "patch.json", &json!({"check_rate": 600}));
        let state_path = tracked_state(&dir, 12345);
        let api = Arc::new(FakeApi::with_test(remote(12345)));
        let resource = SslTestResource::new(Arc::clone(&api));

        let data = update(&resource, &config, &state_path).await.unwrap();

        assert_eq!(
            api.upserts(),
            vec![PartialSsl {
                id: Some(12345),
                check_rate: Some(600),
                ..Default::default()
            }]
        );
        assert_eq!(data.get_i64("check_rate"), Some(600));
        assert_eq!(data.get_str("domain"), Some("example.com"));
        assert_eq!(state::load(&state_path).unwrap(), data);
    }

    #[tokio::test]
    async fn delete_clears_state() {
        let dir = tempdir().unwrap();
        let state_path = tracked_state(&dir, 12345);
        let api = Arc::new(FakeApi::with_test(remote(12345)));
        let resource = SslTestResource::new(Arc::clone(&api));

        let id = delete(&resource, &state_path).await.unwrap();

        assert_eq!(id.get(), 12345);
        assert!(api.tests.lock().unwrap().is_empty());
        assert_eq!(state::load(&state_path).unwrap(), ResourceData::new());
    }
}

//! Per-invocation wiring: settings, cache directory, backends.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use tracing::debug;

use mockdesk_core::list::{ListConfig, ListController};
use mockdesk_core::routes::{Navigation, resolve};
use mockdesk_core::{Authenticator, Resource, Route};
use mockdesk_file::FileStore;

use crate::backend::{CliCollection, CliCredentials};
use crate::cli::GlobalArgs;
use crate::config::{self, Overrides, Settings};

pub type CliAuthenticator = Authenticator<CliCredentials, FileStore>;
pub type CliController = ListController<CliCollection, FileStore>;

/// Everything a command needs, resolved once from flags, environment and
/// the config file.
#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    data_dir: PathBuf,
}

impl AppContext {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let file = config::load(args.config.as_deref()).context("Failed to load config")?;
        let overrides = Overrides {
            api_url: args.api_url.clone(),
            auth_url: args.auth_url.clone(),
        };
        let settings = Settings::resolve(file, &overrides).context("Invalid configuration")?;

        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        debug!(api = %settings.api_url, auth = %settings.auth_url, data_dir = %data_dir.display(), "Resolved context");

        Ok(Self { settings, data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }

    /// The auth gate with its persisted flag restored.
    pub fn authenticator(&self) -> Result<CliAuthenticator> {
        let source = CliCredentials::open(&self.settings.auth_url)?;
        let mut auth = Authenticator::new(source, self.store())
            .with_persistence(self.settings.persist_auth)
            .with_lookup_limit(self.settings.credential_limit);
        auth.restore().context("Failed to read login state")?;
        Ok(auth)
    }

    /// Refuse to continue unless `route` would render for this session.
    pub fn require_route(&self, route: Route) -> Result<()> {
        let authenticated = self.authenticator()?.is_authenticated();
        match resolve(route.path(), authenticated) {
            Navigation::Render(_) => Ok(()),
            Navigation::Redirect(_) => {
                bail!("Not logged in. Run 'mockdesk auth login' first.")
            }
        }
    }

    pub fn posts(&self) -> Result<CliController> {
        self.controller(Resource::posts(), self.settings.posts.clone())
    }

    pub fn users(&self) -> Result<CliController> {
        self.controller(Resource::users(), self.settings.users.clone())
    }

    fn controller(&self, resource: Resource, config: ListConfig) -> Result<CliController> {
        let collection = CliCollection::open(&self.settings.api_url, resource)?;
        Ok(ListController::new(collection, self.store(), config))
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "mockdesk").context("Could not determine data directory")?;
    Ok(dirs.data_dir().join("cache"))
}

use std::path::PathBuf;

use crate::config::Config;
use crate::dotenv;
use crate::env;
use crate::error::EnvfigError;
use crate::file;
use crate::infer::infer_schema;
use crate::ops::{self, ConfigResult};
use crate::resolve::{self, RawEnv};
use crate::schema::Schema;
use crate::types::{ConfigAction, SearchPath};

/// Entry point for building an envfig configuration.
pub struct Envfig;

impl Envfig {
    pub fn builder() -> EnvfigBuilder {
        EnvfigBuilder::new()
    }
}

/// Builder for locating sources and loading a typed configuration.
///
/// Two raw sources are read: the `.env` file (found by [`search_paths()`](Self::search_paths)
/// or given directly with [`file()`](Self::file)) and the process environment.
/// The environment wins for keys present in both.
///
/// With a [`schema()`](Self::schema), both sources are validated against it.
/// Without one, a schema is inferred from the file alone, since the process
/// environment holds many unrelated variables.
pub struct EnvfigBuilder {
    app_name: Option<String>,
    file_name: Option<String>,
    file: Option<PathBuf>,
    search_paths: Option<Vec<SearchPath>>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<Vec<(String, String)>>,
    schema: Option<Schema>,
}

impl EnvfigBuilder {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            file: None,
            search_paths: None,
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            schema: None,
        }
    }

    /// Set the application name, used by [`SearchPath::Platform`].
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the file name searched for (default: `".env"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Read this exact file instead of searching. A missing file is an empty source.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority, and the first directory (from that end) containing the
    /// file is used.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    /// If no paths have been set yet, starts from the default `[Cwd]`.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        self.search_paths
            .get_or_insert_with(|| vec![SearchPath::Cwd])
            .push(path);
        self
    }

    /// Only read environment variables starting with `prefix`, stripping it from the key.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Use these variables instead of the process environment.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    fn effective_file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(".env")
    }

    fn effective_search_paths(&self) -> Vec<SearchPath> {
        if let Some(paths) = &self.search_paths {
            return paths.clone();
        }
        vec![SearchPath::Cwd]
    }

    /// Read the `.env` source, explicit or discovered.
    fn file_source(&self) -> Result<RawEnv, EnvfigError> {
        if let Some(path) = &self.file {
            return match file::read_optional(path)? {
                Some(content) => {
                    tracing::debug!(path = %path.display(), "reading env file");
                    Ok(dotenv::parse(&content))
                }
                None => {
                    tracing::debug!(path = %path.display(), "env file missing, using empty source");
                    Ok(RawEnv::new())
                }
            };
        }

        let dirs = file::expand_search_paths(
            &self.effective_search_paths(),
            self.app_name.as_deref(),
            None,
        );
        match file::find_env_file(&dirs, self.effective_file_name())? {
            Some((_, content)) => Ok(dotenv::parse(&content)),
            None => {
                tracing::debug!(file_name = self.effective_file_name(), "no env file found");
                Ok(RawEnv::new())
            }
        }
    }

    fn env_source(&self) -> RawEnv {
        if !self.env_enabled {
            return RawEnv::new();
        }
        let vars: Vec<(String, String)> = match &self.env_vars {
            Some(vars) => vars.clone(),
            None => std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        };
        env::env_entries(vars, self.env_prefix.as_deref())
    }

    /// The merged raw source: the file, overlaid by the environment.
    pub fn raw(&self) -> Result<RawEnv, EnvfigError> {
        let mut raw = self.file_source()?;
        let env = self.env_source();
        tracing::debug!(file_keys = raw.len(), env_keys = env.len(), "merging sources");
        raw.overlay(env);
        Ok(raw)
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<Config, EnvfigError> {
        let config = match &self.schema {
            Some(schema) => resolve::load(&self.raw()?, schema)?,
            None => resolve::load_inferred(&self.file_source()?)?,
        };
        tracing::debug!(keys = config.len(), "configuration loaded");
        Ok(config)
    }

    /// Infer a schema from the `.env` file.
    pub fn infer(&self) -> Result<Schema, EnvfigError> {
        Ok(infer_schema(&self.file_source()?))
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), EnvfigError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (check / list / get / gen / infer).
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, EnvfigError> {
        match action {
            ConfigAction::Check => {
                let config = self.load()?;
                Ok(ConfigResult::Checked {
                    count: config.len(),
                })
            }
            ConfigAction::List => {
                let config = self.load()?;
                Ok(ops::list_values(&config, self.schema.as_ref()))
            }
            ConfigAction::Get { key } => {
                let config = self.load()?;
                ops::get_value(&config, self.schema.as_ref(), key)
            }
            ConfigAction::Gen { output } => {
                let schema = self.schema.as_ref().ok_or(EnvfigError::NoSchema)?;
                let template = ops::generate_template(schema)?;
                match output {
                    Some(path) => {
                        if let Some(parent) = path.parent()
                            && !parent.as_os_str().is_empty()
                        {
                            std::fs::create_dir_all(parent).map_err(|e| EnvfigError::Io {
                                path: parent.to_path_buf(),
                                source: e,
                            })?;
                        }
                        std::fs::write(path, &template).map_err(|e| EnvfigError::Io {
                            path: path.clone(),
                            source: e,
                        })?;
                        Ok(ConfigResult::TemplateWritten { path: path.clone() })
                    }
                    None => Ok(ConfigResult::Template(template)),
                }
            }
            ConfigAction::Infer => {
                let schema = self.infer()?;
                Ok(ConfigResult::Schema(schema.to_toml_string()?))
            }
        }
    }
}

use super::*;

const CONFIG_FILE: &str = "ord-stake.yaml";
const DEFAULT_EXPLORER_CONCURRENCY: usize = 12;
const DEFAULT_EXPLORER_TIMEOUT: u64 = 10;
const DEFAULT_EXPLORER_URL: &str = "https://blockstream.info/api";
const ENV_PREFIX: &str = "ORD_STAKE_";

#[derive(Debug, Clone)]
pub struct Settings {
  explorer_concurrency: usize,
  explorer_timeout: Duration,
  explorer_url: Url,
  http_port: Option<u16>,
}

impl Settings {
  /// Loads settings from `options`, the process environment, and the config
  /// file, in that order of precedence.
  pub(crate) fn load(options: Options) -> SnafuResult<Self> {
    let mut env = BTreeMap::<String, String>::new();

    for (variable, value) in env::vars_os() {
      let Some(variable) = variable.to_str() else {
        continue;
      };

      if variable != "PORT" && !variable.starts_with(ENV_PREFIX) {
        continue;
      }

      env.insert(
        variable.into(),
        value.into_string().map_err(|value| SnafuError::EnvVarUnicode {
          backtrace: Backtrace::capture(),
          value,
          variable: variable.into(),
        })?,
      );
    }

    Ok(Self::merge(options, env)?)
  }

  pub fn merge(options: Options, env: BTreeMap<String, String>) -> Result<Self> {
    let config = Self::config(&options)?;

    let explorer_url = Self::setting(
      &env,
      options.explorer_url,
      "EXPLORER_URL",
      config.explorer_url,
    )?
    .unwrap_or_else(|| DEFAULT_EXPLORER_URL.into());

    let explorer_url = explorer_url
      .parse::<Url>()
      .with_context(|| format!("invalid explorer url `{explorer_url}`"))?;

    ensure!(
      matches!(explorer_url.scheme(), "http" | "https"),
      "explorer url `{explorer_url}` must use http or https",
    );

    let explorer_timeout = Self::setting(
      &env,
      options.explorer_timeout,
      "EXPLORER_TIMEOUT",
      config.explorer_timeout,
    )?
    .unwrap_or(DEFAULT_EXPLORER_TIMEOUT);

    ensure!(
      explorer_timeout > 0,
      "explorer timeout must be greater than zero"
    );

    let explorer_concurrency = Self::setting(
      &env,
      options.explorer_concurrency,
      "EXPLORER_CONCURRENCY",
      config.explorer_concurrency,
    )?
    .unwrap_or(DEFAULT_EXPLORER_CONCURRENCY);

    ensure!(
      explorer_concurrency > 0,
      "explorer concurrency must be greater than zero"
    );

    let http_port = match env.get("PORT") {
      Some(port) => Some(
        port
          .parse()
          .with_context(|| format!("failed to parse PORT `{port}`"))?,
      ),
      None => Self::setting(&env, None, "HTTP_PORT", config.http_port)?,
    };

    Ok(Self {
      explorer_concurrency,
      explorer_timeout: Duration::from_secs(explorer_timeout),
      explorer_url,
      http_port,
    })
  }

  pub fn explorer_concurrency(&self) -> usize {
    self.explorer_concurrency
  }

  pub fn explorer_timeout(&self) -> Duration {
    self.explorer_timeout
  }

  pub fn explorer_url(&self) -> &Url {
    &self.explorer_url
  }

  pub fn http_port(&self) -> Option<u16> {
    self.http_port
  }

  pub(crate) fn resolver(&self) -> Result<Resolver> {
    let esplora = Esplora::new(&self.explorer_url, self.explorer_timeout)?;

    log::info!("Using Esplora API at {}", self.explorer_url);

    Ok(Resolver::new(Arc::new(esplora), self.explorer_concurrency))
  }

  fn config(options: &Options) -> Result<Config> {
    let path = match (&options.config, &options.config_dir) {
      (Some(path), _) => path.clone(),
      (None, Some(dir)) if dir.join(CONFIG_FILE).exists() => dir.join(CONFIG_FILE),
      _ => return Ok(Config::default()),
    };

    let file = File::open(&path)
      .with_context(|| format!("failed to open config file `{}`", path.display()))?;

    serde_yaml::from_reader(file)
      .with_context(|| format!("failed to parse config file `{}`", path.display()))
  }

  fn setting<T>(
    env: &BTreeMap<String, String>,
    arg_value: Option<T>,
    env_key: &str,
    config_value: Option<T>,
  ) -> Result<Option<T>>
  where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
  {
    if let Some(arg_value) = arg_value {
      return Ok(Some(arg_value));
    }

    let key = format!("{ENV_PREFIX}{env_key}");

    if let Some(env_value) = env.get(&key) {
      return env_value
        .parse()
        .map(Some)
        .with_context(|| format!("failed to parse {key} `{env_value}`"));
    }

    Ok(config_value)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::fs};

  fn settings(args: &[&str]) -> Result<Settings> {
    settings_with_env(args, &[])
  }

  fn settings_with_env(args: &[&str], env: &[(&str, &str)]) -> Result<Settings> {
    Settings::merge(
      Options::try_parse_from(iter::once("ord-stake").chain(args.iter().copied())).unwrap(),
      env
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect(),
    )
  }

  #[test]
  fn defaults() {
    let settings = settings(&[]).unwrap();
    assert_eq!(
      settings.explorer_url().as_str(),
      "https://blockstream.info/api"
    );
    assert_eq!(settings.explorer_timeout(), Duration::from_secs(10));
    assert_eq!(settings.explorer_concurrency(), 12);
    assert_eq!(settings.http_port(), None);
  }

  #[test]
  fn arguments_override_environment() {
    let settings = settings_with_env(
      &["--explorer-url", "http://localhost:3002", "--explorer-timeout", "3"],
      &[
        ("ORD_STAKE_EXPLORER_URL", "http://localhost:9999"),
        ("ORD_STAKE_EXPLORER_TIMEOUT", "7"),
        ("ORD_STAKE_EXPLORER_CONCURRENCY", "2"),
      ],
    )
    .unwrap();

    assert_eq!(settings.explorer_url().as_str(), "http://localhost:3002/");
    assert_eq!(settings.explorer_timeout(), Duration::from_secs(3));
    assert_eq!(settings.explorer_concurrency(), 2);
  }

  #[test]
  fn environment_overrides_config_file() {
    let tempdir = TempDir::new().unwrap();

    fs::write(
      tempdir.path().join("ord-stake.yaml"),
      "explorer_url: https://mempool.space/api\nexplorer_concurrency: 3\nhttp_port: 8080\n",
    )
    .unwrap();

    let settings = settings_with_env(
      &["--config-dir", tempdir.path().to_str().unwrap()],
      &[("ORD_STAKE_EXPLORER_CONCURRENCY", "5")],
    )
    .unwrap();

    assert_eq!(settings.explorer_url().as_str(), "https://mempool.space/api");
    assert_eq!(settings.explorer_concurrency(), 5);
    assert_eq!(settings.http_port(), Some(8080));
  }

  #[test]
  fn missing_config_dir_file_is_ignored() {
    let tempdir = TempDir::new().unwrap();

    assert_eq!(
      settings(&["--config-dir", tempdir.path().to_str().unwrap()])
        .unwrap()
        .explorer_concurrency(),
      12
    );
  }

  #[test]
  fn missing_config_file_is_an_error() {
    let tempdir = TempDir::new().unwrap();
    let path = tempdir.path().join("missing.yaml");

    assert_eq!(
      settings(&["--config", path.to_str().unwrap()])
        .unwrap_err()
        .to_string(),
      format!("failed to open config file `{}`", path.display()),
    );
  }

  #[test]
  fn port_environment_variable_takes_precedence() {
    assert_eq!(
      settings_with_env(&[], &[("PORT", "4000"), ("ORD_STAKE_HTTP_PORT", "4001")])
        .unwrap()
        .http_port(),
      Some(4000)
    );

    assert_eq!(
      settings_with_env(&[], &[("ORD_STAKE_HTTP_PORT", "4001")])
        .unwrap()
        .http_port(),
      Some(4001)
    );
  }

  #[test]
  fn invalid_port_is_an_error() {
    assert_eq!(
      settings_with_env(&[], &[("PORT", "http")])
        .unwrap_err()
        .to_string(),
      "failed to parse PORT `http`"
    );
  }

  #[test]
  fn invalid_explorer_url_is_an_error() {
    assert_eq!(
      settings(&["--explorer-url", "blockstream"])
        .unwrap_err()
        .to_string(),
      "invalid explorer url `blockstream`"
    );

    assert_eq!(
      settings(&["--explorer-url", "ftp://blockstream.info"])
        .unwrap_err()
        .to_string(),
      "explorer url `ftp://blockstream.info/` must use http or https"
    );
  }

  #[test]
  fn zero_limits_are_errors() {
    assert_eq!(
      settings(&["--explorer-concurrency", "0"])
        .unwrap_err()
        .to_string(),
      "explorer concurrency must be greater than zero"
    );

    assert_eq!(
      settings_with_env(&[], &[("ORD_STAKE_EXPLORER_TIMEOUT", "0")])
        .unwrap_err()
        .to_string(),
      "explorer timeout must be greater than zero"
    );
  }

  #[test]
  fn unparseable_environment_variable_is_an_error() {
    assert_eq!(
      settings_with_env(&[], &[("ORD_STAKE_EXPLORER_CONCURRENCY", "many")])
        .unwrap_err()
        .to_string(),
      "failed to parse ORD_STAKE_EXPLORER_CONCURRENCY `many`"
    );
  }
}

use super::*;

#[derive(Deserialize, Default, PartialEq, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
  pub(crate) explorer_concurrency: Option<usize>,
  pub(crate) explorer_timeout: Option<u64>,
  pub(crate) explorer_url: Option<String>,
  pub(crate) http_port: Option<u16>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn example_config_file_is_valid() {
    assert_eq!(
      serde_yaml::from_str::<Config>(
        "explorer_url: https://mempool.space/api\nexplorer_timeout: 5\nexplorer_concurrency: 4\nhttp_port: 8080\n"
      )
      .unwrap(),
      Config {
        explorer_concurrency: Some(4),
        explorer_timeout: Some(5),
        explorer_url: Some("https://mempool.space/api".into()),
        http_port: Some(8080),
      }
    );
  }

  #[test]
  fn missing_fields_use_defaults() {
    assert_eq!(
      serde_yaml::from_str::<Config>("explorer_timeout: 3").unwrap(),
      Config {
        explorer_timeout: Some(3),
        ..default()
      }
    );
  }

  #[test]
  fn unknown_fields_are_rejected() {
    assert!(serde_yaml::from_str::<Config>("bitcoin_rpc_url: localhost").is_err());
  }
}

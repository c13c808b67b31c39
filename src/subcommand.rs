use super::*;

pub mod decode;
pub mod inscriptions;
pub mod server;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Decode a hex data push")]
  Decode(decode::Decode),
  #[command(about = "List inscriptions in an address's transactions")]
  Inscriptions(inscriptions::Inscriptions),
  #[command(about = "Run the ordinals and staking API server")]
  Server(server::Server),
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Decode(decode) => decode.run(),
      Self::Inscriptions(inscriptions) => inscriptions.run(settings),
      Self::Server(server) => {
        let handle = axum_server::Handle::new();
        LISTENERS
          .lock()
          .unwrap_or_else(PoisonError::into_inner)
          .push(handle.clone());
        server.run(settings, handle)
      }
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
  #[default]
  Json,
  Yaml,
  Minify,
}

pub trait Output: Send {
  fn print(&self, format: OutputFormat);
}

impl<T> Output for T
where
  T: Serialize + Send,
{
  fn print(&self, format: OutputFormat) {
    match format {
      OutputFormat::Json => serde_json::to_writer_pretty(io::stdout(), self).ok(),
      OutputFormat::Yaml => serde_yaml::to_writer(io::stdout(), self).ok(),
      OutputFormat::Minify => serde_json::to_writer(io::stdout(), self).ok(),
    };
    println!();
  }
}

pub(crate) type SubcommandResult = Result<Option<Box<dyn Output>>>;

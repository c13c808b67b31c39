use super::*;

#[derive(Clone, Default, Debug, Parser)]
pub struct Options {
  #[arg(long, help = "Load configuration from <CONFIG>.")]
  pub(crate) config: Option<PathBuf>,
  #[arg(long, help = "Load configuration from <CONFIG_DIR>.")]
  pub(crate) config_dir: Option<PathBuf>,
  #[arg(
    long,
    help = "Fetch transactions from Esplora API at <EXPLORER_URL>. [default: https://blockstream.info/api]"
  )]
  pub(crate) explorer_url: Option<String>,
  #[arg(
    long,
    help = "Abort explorer requests after <EXPLORER_TIMEOUT> seconds. [default: 10]"
  )]
  pub(crate) explorer_timeout: Option<u64>,
  #[arg(
    long,
    help = "Fetch at most <EXPLORER_CONCURRENCY> transactions at once. [default: 12]"
  )]
  pub(crate) explorer_concurrency: Option<usize>,
  #[arg(long, short, value_enum, help = "Specify output format. [default: json]")]
  pub(crate) format: Option<OutputFormat>,
}

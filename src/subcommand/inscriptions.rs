use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Inscriptions {
  #[arg(help = "List inscriptions for <ADDRESS>.")]
  address: String,
}

impl Inscriptions {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    let resolver = settings.resolver()?;

    let records = Runtime::new()?
      .block_on(resolver.resolve(&self.address))
      .with_context(|| format!("failed to fetch inscriptions for `{}`", self.address))?;

    Ok(Some(Box::new(records)))
  }
}

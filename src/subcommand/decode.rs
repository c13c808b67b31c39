use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
  pub content: String,
}

#[derive(Debug, Parser)]
pub(crate) struct Decode {
  #[arg(help = "Decode <HEX> as UTF-8 text.")]
  hex: String,
}

impl Decode {
  pub(crate) fn run(self) -> SubcommandResult {
    let content = decoder::decode(&self.hex)
      .with_context(|| format!("failed to decode `{}`", self.hex))?;

    Ok(Some(Box::new(Output { content })))
  }
}

//! Decoding of hex data pushes into inscription text.
//!
//! Payloads that are not valid UTF-8 are rejected rather than lossily
//! converted, so callers never see replacement characters in place of the
//! original bytes.

use super::*;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum DecodeError {
  #[snafu(display("invalid hex payload"))]
  Hex { source: hex::FromHexError },
  #[snafu(display("payload is not valid UTF-8"))]
  Utf8 { source: std::string::FromUtf8Error },
}

pub fn decode(raw_hex: &str) -> Result<String, DecodeError> {
  let bytes = hex::decode(raw_hex).snafu_context(Hex)?;
  String::from_utf8(bytes).snafu_context(Utf8)
}

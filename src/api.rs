//! JSON bodies of the HTTP API.

use super::*;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Stake {
  pub inscription_id: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Staked {
  pub msg: String,
  pub ordinal: Arc<InscriptionRecord>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
  pub error: String,
}

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  Confirmed,
  Pending,
}

/// An inscription discovered in one transaction touching a queried address.
/// The inscription id is the transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InscriptionRecord {
  pub inscription_id: String,
  pub status: Status,
  pub discovered_at: Option<DateTime<Utc>>,
  pub transaction_id: String,
  pub contents: Vec<String>,
}

impl InscriptionRecord {
  pub(crate) fn new(summary: &TransactionSummary, detail: &TransactionDetail) -> Self {
    let (status, discovered_at) = if summary.status.confirmed {
      (
        Status::Confirmed,
        summary.status.block_time.and_then(timestamp),
      )
    } else {
      (Status::Pending, None)
    };

    Self {
      inscription_id: summary.txid.clone(),
      status,
      discovered_at,
      transaction_id: summary.txid.clone(),
      contents: scanner::scan(detail),
    }
  }
}

use {super::*, serde::de::DeserializeOwned, urlencoding::encode};

#[derive(Debug, Snafu)]
#[snafu(context(suffix(false)), visibility(pub(crate)))]
pub enum ExplorerError {
  #[snafu(display("failed to deserialize response from `{url}`"))]
  Json { url: String, source: reqwest::Error },
  #[snafu(display("explorer rate limit exceeded at `{url}`"))]
  RateLimited { url: String },
  #[snafu(display("request to `{url}` failed"))]
  Request { url: String, source: reqwest::Error },
  #[snafu(display("explorer returned {status} for `{url}`: {body}"))]
  UnexpectedStatus {
    url: String,
    status: StatusCode,
    body: String,
  },
}

impl ExplorerError {
  pub fn is_rate_limited(&self) -> bool {
    matches!(self, Self::RateLimited { .. })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
  pub confirmed: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block_height: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block_hash: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub block_time: Option<u64>,
}

/// One entry of an address's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
  pub txid: String,
  pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
  pub txid: String,
  #[serde(default)]
  pub status: TransactionStatus,
  #[serde(default)]
  pub vout: Vec<TxOutput>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
  #[serde(default)]
  pub scriptpubkey: String,
  #[serde(default)]
  pub scriptpubkey_asm: String,
  #[serde(default)]
  pub scriptpubkey_type: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scriptpubkey_address: Option<String>,
  #[serde(default)]
  pub value: u64,
}

#[async_trait]
pub trait Explorer: Send + Sync {
  async fn transactions(&self, address: &str) -> Result<Vec<TransactionSummary>, ExplorerError>;

  async fn transaction(&self, txid: &str) -> Result<TransactionDetail, ExplorerError>;
}

/// Client for the Esplora HTTP API served by blockstream.info and
/// mempool.space.
pub struct Esplora {
  client: reqwest::Client,
  url: String,
}

impl Esplora {
  pub fn new(url: &Url, timeout: Duration) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(timeout)
      .user_agent(concat!("ord-stake/", env!("CARGO_PKG_VERSION")))
      .build()
      .context("failed to build explorer client")?;

    Ok(Self {
      client,
      url: url.as_str().trim_end_matches('/').into(),
    })
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExplorerError> {
    let url = format!("{}/{path}", self.url);

    log::debug!("GET {url}");

    let response = self
      .client
      .get(&url)
      .send()
      .await
      .snafu_context(Request { url: &url })?;

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
      return RateLimited { url }.fail();
    }

    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return UnexpectedStatus { url, status, body }.fail();
    }

    response.json().await.snafu_context(Json { url })
  }
}

#[async_trait]
impl Explorer for Esplora {
  async fn transactions(&self, address: &str) -> Result<Vec<TransactionSummary>, ExplorerError> {
    self.get(&format!("address/{}/txs", encode(address))).await
  }

  async fn transaction(&self, txid: &str) -> Result<TransactionDetail, ExplorerError> {
    self.get(&format!("tx/{}", encode(txid))).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_rate_limited_errors_are_flagged() {
    assert!(ExplorerError::RateLimited { url: "a".into() }.is_rate_limited());

    assert!(!ExplorerError::UnexpectedStatus {
      url: "a".into(),
      status: StatusCode::TOO_MANY_REQUESTS,
      body: "You have exceeded the number of free API requests".into(),
    }
    .is_rate_limited());
  }

  #[test]
  fn trailing_slash_is_trimmed_from_base_url() {
    let esplora = Esplora::new(
      &"http://127.0.0.1:3002/".parse().unwrap(),
      Duration::from_secs(1),
    )
    .unwrap();

    assert_eq!(esplora.url, "http://127.0.0.1:3002");
  }

  #[test]
  fn deserialize_esplora_transaction() {
    let detail = serde_json::from_str::<TransactionDetail>(
      r#"{
        "txid": "a6b2f1c3",
        "version": 2,
        "locktime": 0,
        "vin": [],
        "vout": [
          {
            "scriptpubkey": "6a0568656c6c6f",
            "scriptpubkey_asm": "OP_RETURN OP_PUSHBYTES_5 68656c6c6f",
            "scriptpubkey_type": "op_return",
            "value": 0
          },
          {
            "scriptpubkey": "0014841b80d2cc75f5345c482af96294d04fdd66b2b7",
            "scriptpubkey_asm": "OP_0 OP_PUSHBYTES_20 841b80d2cc75f5345c482af96294d04fdd66b2b7",
            "scriptpubkey_type": "v0_p2wpkh",
            "scriptpubkey_address": "bc1qssdcp5kvwh6nghzg9tuk99xsflwkdv4hgvq58q",
            "value": 5000
          }
        ],
        "status": {
          "confirmed": true,
          "block_height": 800000,
          "block_hash": "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054",
          "block_time": 1690168629
        }
      }"#,
    )
    .unwrap();

    pretty_assert_eq!(
      detail,
      TransactionDetail {
        txid: "a6b2f1c3".into(),
        status: TransactionStatus {
          confirmed: true,
          block_height: Some(800000),
          block_hash: Some(
            "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054".into()
          ),
          block_time: Some(1690168629),
        },
        vout: vec![
          TxOutput {
            scriptpubkey: "6a0568656c6c6f".into(),
            scriptpubkey_asm: "OP_RETURN OP_PUSHBYTES_5 68656c6c6f".into(),
            scriptpubkey_type: "op_return".into(),
            scriptpubkey_address: None,
            value: 0,
          },
          TxOutput {
            scriptpubkey: "0014841b80d2cc75f5345c482af96294d04fdd66b2b7".into(),
            scriptpubkey_asm: "OP_0 OP_PUSHBYTES_20 841b80d2cc75f5345c482af96294d04fdd66b2b7"
              .into(),
            scriptpubkey_type: "v0_p2wpkh".into(),
            scriptpubkey_address: Some("bc1qssdcp5kvwh6nghzg9tuk99xsflwkdv4hgvq58q".into()),
            value: 5000,
          },
        ],
      }
    );
  }

  #[test]
  fn deserialize_unconfirmed_transaction_summary() {
    assert_eq!(
      serde_json::from_str::<TransactionSummary>(r#"{"txid":"ff","status":{"confirmed":false}}"#)
        .unwrap(),
      TransactionSummary {
        txid: "ff".into(),
        status: TransactionStatus::default(),
      }
    );
  }
}

use super::*;

#[derive(Debug, Default)]
pub struct State {
  pub delays: BTreeMap<String, Duration>,
  pub failures: BTreeSet<String>,
  pub history: BTreeMap<String, Vec<serde_json::Value>>,
  pub rate_limited: bool,
  pub requests: Vec<String>,
  pub transactions: BTreeMap<String, serde_json::Value>,
}

impl State {
  pub(crate) fn add_transaction(&mut self, address: &str, template: TransactionTemplate) {
    let status = match template.block_time {
      Some(block_time) => json!({
        "confirmed": true,
        "block_height": 800_000,
        "block_hash": "00000000000000000002a7c4c1e48d76c5a37902165a270156b7a8d72728a054",
        "block_time": block_time,
      }),
      None => json!({ "confirmed": false }),
    };

    let vout = template
      .vout
      .iter()
      .map(|vout| match vout {
        Vout::OpReturn(asm) => json!({
          "scriptpubkey": "6a",
          "scriptpubkey_asm": asm,
          "scriptpubkey_type": "op_return",
          "value": 0,
        }),
        Vout::Payment(value) => json!({
          "scriptpubkey": "0014841b80d2cc75f5345c482af96294d04fdd66b2b7",
          "scriptpubkey_asm": "OP_0 OP_PUSHBYTES_20 841b80d2cc75f5345c482af96294d04fdd66b2b7",
          "scriptpubkey_type": "v0_p2wpkh",
          "scriptpubkey_address": "bc1qssdcp5kvwh6nghzg9tuk99xsflwkdv4hgvq58q",
          "value": value,
        }),
      })
      .collect::<Vec<serde_json::Value>>();

    self
      .history
      .entry(address.into())
      .or_default()
      .push(json!({ "txid": template.txid, "status": status }));

    self.transactions.insert(
      template.txid.into(),
      json!({
        "txid": template.txid,
        "version": 2,
        "locktime": 0,
        "vin": [],
        "vout": vout,
        "status": status,
      }),
    );

    if let Some(delay) = template.delay {
      self.delays.insert(template.txid.into(), delay);
    }
  }
}

use super::*;

/// Esplora's `scriptpubkey_type` for outputs that carry data instead of value.
pub const DATA_CARRYING: &str = "op_return";

/// Returns the decoded payload of every data-carrying output, in output
/// order. Outputs without a trailing data push, or whose payload fails to
/// decode, are skipped.
pub fn scan(transaction: &TransactionDetail) -> Vec<String> {
  transaction
    .vout
    .iter()
    .enumerate()
    .filter(|(_, output)| output.scriptpubkey_type == DATA_CARRYING)
    .filter_map(|(vout, output)| {
      let Some(payload) = payload(&output.scriptpubkey_asm) else {
        log::debug!("{}:{vout} has no data push", transaction.txid);
        return None;
      };

      match decoder::decode(payload) {
        Ok(content) => Some(content),
        Err(err) => {
          log::debug!("skipping {}:{vout}: {err}", transaction.txid);
          None
        }
      }
    })
    .collect()
}

fn payload(asm: &str) -> Option<&str> {
  asm
    .split_whitespace()
    .last()
    .filter(|token| !token.starts_with("OP_"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn payload_is_last_token() {
    assert_eq!(
      payload("OP_RETURN OP_PUSHBYTES_5 68656c6c6f"),
      Some("68656c6c6f")
    );
    assert_eq!(payload("OP_RETURN 68656c6c6f"), Some("68656c6c6f"));
  }

  #[test]
  fn opcodes_are_not_payloads() {
    assert_eq!(payload("OP_RETURN"), None);
    assert_eq!(payload("OP_RETURN OP_0"), None);
    assert_eq!(payload(""), None);
    assert_eq!(payload("   "), None);
  }

  #[test]
  fn decodes_data_carrying_outputs() {
    assert_eq!(
      scan(&detail("tx1", vec![op_return("hello")])),
      vec!["hello".to_string()]
    );
  }

  #[test]
  fn transaction_without_outputs_has_no_contents() {
    assert!(scan(&detail("tx1", Vec::new())).is_empty());
  }

  #[test]
  fn value_outputs_are_ignored() {
    let mut disguised = payment();
    disguised.scriptpubkey_asm = "OP_RETURN OP_PUSHBYTES_2 6869".into();

    assert_eq!(
      scan(&detail(
        "tx1",
        vec![payment(), op_return("a"), disguised, payment(), op_return("b")],
      )),
      vec!["a".to_string(), "b".to_string()]
    );
  }

  #[test]
  fn order_matches_output_order() {
    assert_eq!(
      scan(&detail(
        "tx1",
        vec![op_return("first"), op_return("second"), op_return("third")],
      )),
      vec!["first".to_string(), "second".into(), "third".into()]
    );
  }

  #[test]
  fn interleaved_value_outputs_do_not_change_result() {
    let plain = scan(&detail("tx1", vec![op_return("x"), op_return("y")]));

    let interleaved = scan(&detail(
      "tx1",
      vec![payment(), op_return("x"), payment(), payment(), op_return("y")],
    ));

    assert_eq!(plain, interleaved);
  }

  #[test]
  fn undecodable_outputs_are_skipped() {
    assert_eq!(
      scan(&detail(
        "tx1",
        vec![
          op_return_asm("OP_RETURN OP_PUSHBYTES_2 ff68"),
          op_return_asm("OP_RETURN OP_PUSHBYTES_2 6g6h"),
          op_return_asm("OP_RETURN"),
          op_return("ok"),
          op_return_asm("OP_RETURN OP_PUSHBYTES_1 686"),
        ],
      )),
      vec!["ok".to_string()]
    );
  }
}

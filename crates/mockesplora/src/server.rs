use super::*;

type Shared = Arc<Mutex<State>>;

pub(crate) fn router(state: Shared) -> Router {
  Router::new()
    .route("/address/{address}/txs", get(transactions))
    .route("/tx/{txid}", get(transaction))
    .with_state(state)
}

/// Records the request and applies rate limiting and injected failures.
fn check(state: &Shared, path: String, key: &str) -> Result<(), Response> {
  let mut state = state.lock().unwrap();

  state.requests.push(path);

  if state.rate_limited {
    return Err((StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response());
  }

  if state.failures.contains(key) {
    return Err((StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response());
  }

  Ok(())
}

async fn transactions(Extract(state): Extract<Shared>, Path(address): Path<String>) -> Response {
  if let Err(response) = check(&state, format!("/address/{address}/txs"), &address) {
    return response;
  }

  let history = state
    .lock()
    .unwrap()
    .history
    .get(&address)
    .cloned()
    .unwrap_or_default();

  Json(history).into_response()
}

async fn transaction(Extract(state): Extract<Shared>, Path(txid): Path<String>) -> Response {
  if let Err(response) = check(&state, format!("/tx/{txid}"), &txid) {
    return response;
  }

  let (delay, response) = {
    let state = state.lock().unwrap();

    let response = match state.transactions.get(&txid) {
      Some(transaction) => Json(transaction.clone()).into_response(),
      None => (StatusCode::NOT_FOUND, "Transaction not found").into_response(),
    };

    (state.delays.get(&txid).copied(), response)
  };

  if let Some(delay) = delay {
    tokio::time::sleep(delay).await;
  }

  response
}

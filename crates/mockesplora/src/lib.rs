use {
  axum::{
    extract::{Path, State as Extract},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
  },
  serde_json::json,
  state::State,
  std::{
    collections::{BTreeMap, BTreeSet},
    net::TcpListener,
    sync::{Arc, Mutex, MutexGuard},
    thread,
    time::Duration,
  },
  tokio::sync::oneshot,
};

mod server;
mod state;

pub const RATE_LIMIT_MESSAGE: &str =
  "You have exceeded the number of free API requests. Please try again later.";

pub fn spawn() -> Handle {
  let state = Arc::new(Mutex::new(State::default()));

  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  listener.set_nonblocking(true).unwrap();

  let port = listener.local_addr().unwrap().port();

  let (shutdown, shutdown_signal) = oneshot::channel::<()>();

  let router = server::router(state.clone());

  thread::spawn(move || {
    tokio::runtime::Builder::new_multi_thread()
      .worker_threads(2)
      .enable_all()
      .build()
      .unwrap()
      .block_on(async move {
        let listener = tokio::net::TcpListener::from_std(listener).unwrap();

        axum::serve(listener, router)
          .with_graceful_shutdown(async {
            shutdown_signal.await.ok();
          })
          .await
          .unwrap();
      })
  });

  Handle {
    port,
    shutdown: Some(shutdown),
    state,
  }
}

/// Output of a mock transaction.
#[derive(Clone, Copy, Debug)]
pub enum Vout<'a> {
  /// A data-carrying output with the given script asm.
  OpReturn(&'a str),
  Payment(u64),
}

impl Vout<'_> {
  /// A data-carrying output pushing `content`.
  pub fn data(content: &str) -> String {
    format!(
      "OP_RETURN OP_PUSHBYTES_{} {}",
      content.len(),
      hex::encode(content)
    )
  }
}

#[derive(Clone, Debug)]
pub struct TransactionTemplate<'a> {
  pub block_time: Option<u64>,
  pub delay: Option<Duration>,
  pub txid: &'a str,
  pub vout: &'a [Vout<'a>],
}

impl Default for TransactionTemplate<'_> {
  fn default() -> Self {
    Self {
      block_time: Some(1_700_000_000),
      delay: None,
      txid: "",
      vout: &[],
    }
  }
}

pub struct Handle {
  port: u16,
  shutdown: Option<oneshot::Sender<()>>,
  state: Arc<Mutex<State>>,
}

impl Handle {
  pub fn url(&self) -> String {
    format!("http://127.0.0.1:{}", self.port)
  }

  pub fn state(&self) -> MutexGuard<State> {
    self.state.lock().unwrap()
  }

  pub fn add_transaction(&self, address: &str, template: TransactionTemplate) {
    self.state().add_transaction(address, template);
  }

  pub fn fail(&self, key: &str) {
    self.state().failures.insert(key.into());
  }

  pub fn clear_failures(&self) {
    self.state().failures.clear();
  }

  pub fn rate_limit(&self, rate_limited: bool) {
    self.state().rate_limited = rate_limited;
  }

  /// Paths requested so far, in arrival order.
  pub fn requests(&self) -> Vec<String> {
    self.state().requests.clone()
  }
}

impl Drop for Handle {
  fn drop(&mut self) {
    if let Some(shutdown) = self.shutdown.take() {
      shutdown.send(()).ok();
    }
  }
}

use {
  self::error::{ServerError, ServerResult},
  super::*,
  axum::{
    extract::{Json, Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
  },
  axum_server::Handle,
  tower_http::cors::{Any, CorsLayer},
};

mod error;

const DEFAULT_HTTP_PORT: u16 = 5000;

/// State shared by request handlers. Discovery and staking keep separate
/// state; the ordinals handler offers what it discovers to the ledger.
pub(crate) struct ServerState {
  pub(crate) cache: DiscoveryCache,
  pub(crate) ledger: StakingLedger,
  pub(crate) resolver: Resolver,
}

impl ServerState {
  pub(crate) fn new(resolver: Resolver) -> Self {
    Self {
      cache: DiscoveryCache::default(),
      ledger: StakingLedger::default(),
      resolver,
    }
  }
}

#[derive(Debug, Parser)]
pub struct Server {
  #[arg(
    long,
    default_value = "0.0.0.0",
    help = "Listen on <ADDRESS> for incoming requests."
  )]
  address: String,
  #[arg(
    long,
    help = "Listen on <HTTP_PORT> for incoming HTTP requests. [default: $PORT or 5000]"
  )]
  http_port: Option<u16>,
}

impl Server {
  pub fn run(self, settings: Settings, handle: Handle) -> SubcommandResult {
    Runtime::new()?.block_on(async {
      let state = Arc::new(ServerState::new(settings.resolver()?));

      let router = Self::router(state);

      let port = self.http_port(&settings);

      let addr = (self.address.as_str(), port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow!("failed to get socket addrs"))?;

      log::info!("Listening on http://{addr}");

      axum_server::Server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .with_context(|| format!("failed to serve on {addr}"))?;

      Ok(None)
    })
  }

  pub(crate) fn router(state: Arc<ServerState>) -> Router {
    Router::new()
      .route("/api/ordinals/{address}", get(Self::ordinals))
      .route("/api/stake", post(Self::stake))
      .route("/api/staked", get(Self::staked))
      .route("/status", get(Self::status))
      .layer(
        CorsLayer::new()
          .allow_methods([Method::GET, Method::POST])
          .allow_headers([header::CONTENT_TYPE])
          .allow_origin(Any),
      )
      .with_state(state)
  }

  fn http_port(&self, settings: &Settings) -> u16 {
    self
      .http_port
      .or(settings.http_port())
      .unwrap_or(DEFAULT_HTTP_PORT)
  }

  async fn ordinals(
    State(state): State<Arc<ServerState>>,
    Path(address): Path<String>,
  ) -> ServerResult<Json<Vec<Arc<InscriptionRecord>>>> {
    let records = state
      .cache
      .get_or_resolve(&address, &state.resolver)
      .await?;

    let offered = state.ledger.offer(records.iter().cloned());

    if offered > 0 {
      log::debug!("Added {offered} inscriptions from {address} to the unstaked pool");
    }

    Ok(Json(records))
  }

  async fn stake(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<api::Stake>,
  ) -> ServerResult<Json<api::Staked>> {
    let ordinal = state.ledger.stake(&request.inscription_id)?;

    log::info!("Staked ordinal {}", ordinal.inscription_id);

    Ok(Json(api::Staked {
      msg: "Ordinal staked successfully".into(),
      ordinal,
    }))
  }

  async fn staked(State(state): State<Arc<ServerState>>) -> Json<Vec<Arc<InscriptionRecord>>> {
    Json(state.ledger.staked())
  }

  async fn status() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
  }
}

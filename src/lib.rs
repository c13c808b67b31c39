#![allow(clippy::result_large_err, clippy::type_complexity)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    cache::DiscoveryCache,
    config::Config,
    error::{ResultExt, SnafuError},
    explorer::{Esplora, Explorer, ExplorerError, TransactionDetail, TransactionSummary},
    ledger::StakingLedger,
    resolver::Resolver,
    subcommand::{OutputFormat, Subcommand, SubcommandResult},
  },
  anyhow::{anyhow, ensure, Context, Error},
  async_trait::async_trait,
  chrono::{DateTime, TimeZone, Utc},
  clap::Parser,
  reqwest::{StatusCode, Url},
  serde::{Deserialize, Serialize},
  snafu::{Backtrace, ErrorCompat, Snafu},
  std::{
    backtrace::BacktraceStatus,
    collections::{BTreeMap, HashMap},
    env,
    ffi::OsString,
    fs::File,
    io,
    net::ToSocketAddrs,
    path::PathBuf,
    process,
    sync::{
      atomic::{self, AtomicBool},
      Arc, Mutex, PoisonError, RwLock,
    },
    time::Duration,
  },
  tokio::runtime::Runtime,
};

pub use self::{
  inscription_record::{InscriptionRecord, Status},
  options::Options,
  settings::Settings,
};


#[cfg(test)]
use self::test::*;

pub mod api;
mod arguments;
pub mod cache;
mod config;
pub mod decoder;
mod error;
pub mod explorer;
mod inscription_record;
pub mod ledger;
pub mod options;
pub mod resolver;
pub mod scanner;
pub mod settings;
pub mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;
type SnafuResult<T = (), E = SnafuError> = std::result::Result<T, E>;

static LISTENERS: Mutex<Vec<axum_server::Handle>> = Mutex::new(Vec::new());
static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);

/// Converts an explorer block time into a timestamp. Times chrono cannot
/// represent yield `None`.
pub fn timestamp(seconds: u64) -> Option<DateTime<Utc>> {
  Utc.timestamp_opt(seconds.try_into().ok()?, 0).single()
}

/// Marks the process as shutting down. Returns whether it already was.
fn shut_down() -> bool {
  SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed)
}

fn default<T: Default>() -> T {
  Default::default()
}

#[doc(hidden)]
pub fn parse_server_args(args: &str) -> (Settings, subcommand::server::Server) {
  match Arguments::try_parse_from(args.split_whitespace()) {
    Ok(arguments) => match arguments.subcommand {
      Subcommand::Server(server) => (
        Settings::merge(arguments.options, BTreeMap::new()).unwrap(),
        server,
      ),
      subcommand => panic!("unexpected subcommand: {subcommand:?}"),
    },
    Err(err) => panic!("error parsing arguments: {err}"),
  }
}

pub fn main() {
  env_logger::init();

  ctrlc::set_handler(move || {
    if shut_down() {
      process::exit(1);
    }

    eprintln!("Shutting down gracefully. Press <CTRL-C> again to shutdown immediately.");

    let listeners = LISTENERS.lock().unwrap_or_else(PoisonError::into_inner);

    if listeners.is_empty() {
      process::exit(1);
    }

    listeners
      .iter()
      .for_each(|handle| handle.graceful_shutdown(Some(Duration::from_millis(100))));
  })
  .expect("Error setting <CTRL-C> handler");

  let args = Arguments::parse();

  let format = args.options.format;

  match args.run() {
    Err(err) => {
      eprintln!("error: {err}");

      if let SnafuError::Anyhow { err } = err {
        for (i, err) in err.chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if env::var_os("RUST_BACKTRACE")
          .map(|val| val == "1")
          .unwrap_or_default()
        {
          eprintln!("{}", err.backtrace());
        }
      } else {
        for (i, err) in err.iter_chain().skip(1).enumerate() {
          if i == 0 {
            eprintln!();
            eprintln!("because:");
          }

          eprintln!("- {err}");
        }

        if let Some(backtrace) = err.backtrace() {
          if backtrace.status() == BacktraceStatus::Captured {
            eprintln!("backtrace:");
            eprintln!("{backtrace}");
          }
        }
      }

      process::exit(1);
    }
    Ok(output) => {
      if let Some(output) = output {
        output.print(format.unwrap_or_default());
      }
    }
  }
}

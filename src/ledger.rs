use {super::*, std::sync::MutexGuard};

#[derive(Debug, PartialEq, Snafu)]
#[snafu(display("ordinal {inscription_id} not found"))]
pub struct NotFound {
  inscription_id: String,
}

impl NotFound {
  pub fn inscription_id(&self) -> &str {
    &self.inscription_id
  }
}

#[derive(Debug, Default)]
struct Pools {
  staked: Vec<Arc<InscriptionRecord>>,
  unstaked: Vec<Arc<InscriptionRecord>>,
}

impl Pools {
  fn contains(&self, inscription_id: &str) -> bool {
    self
      .unstaked
      .iter()
      .chain(&self.staked)
      .any(|record| record.inscription_id == inscription_id)
  }
}

/// Staking bookkeeping. An inscription id is in at most one of the two
/// pools, and records only ever move from unstaked to staked.
#[derive(Debug, Default)]
pub struct StakingLedger {
  pools: Mutex<Pools>,
}

impl StakingLedger {
  fn pools(&self) -> MutexGuard<Pools> {
    self.pools.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Adds records to the unstaked pool, skipping any whose id the ledger
  /// already holds. Returns the number added.
  pub fn offer(&self, records: impl IntoIterator<Item = Arc<InscriptionRecord>>) -> usize {
    let mut pools = self.pools();

    let mut added = 0;

    for record in records {
      if pools.contains(&record.inscription_id) {
        continue;
      }

      pools.unstaked.push(record);
      added += 1;
    }

    added
  }

  pub fn stake(&self, inscription_id: &str) -> Result<Arc<InscriptionRecord>, NotFound> {
    let mut pools = self.pools();

    let Some(index) = pools
      .unstaked
      .iter()
      .position(|record| record.inscription_id == inscription_id)
    else {
      return NotFoundSnafu { inscription_id }.fail();
    };

    let record = pools.unstaked.remove(index);

    pools.staked.push(record.clone());

    Ok(record)
  }

  pub fn staked(&self) -> Vec<Arc<InscriptionRecord>> {
    self.pools().staked.clone()
  }

  pub fn unstaked(&self) -> Vec<Arc<InscriptionRecord>> {
    self.pools().unstaked.clone()
  }
}

use super::*;

/// Per-address discovery results, kept for the lifetime of the process.
///
/// Failed resolutions are never stored. Concurrent misses for the same
/// address each resolve independently and the last one to finish wins.
#[derive(Default)]
pub struct DiscoveryCache {
  entries: RwLock<HashMap<String, Vec<Arc<InscriptionRecord>>>>,
}

impl DiscoveryCache {
  pub fn get(&self, address: &str) -> Option<Vec<Arc<InscriptionRecord>>> {
    self
      .entries
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(address)
      .cloned()
  }

  pub async fn get_or_resolve(
    &self,
    address: &str,
    resolver: &Resolver,
  ) -> Result<Vec<Arc<InscriptionRecord>>, ExplorerError> {
    if let Some(records) = self.get(address) {
      log::debug!("Cache hit for {address}");
      return Ok(records);
    }

    log::info!("Resolving inscriptions for {address}");

    let records = resolver
      .resolve(address)
      .await?
      .into_iter()
      .map(Arc::new)
      .collect::<Vec<Arc<InscriptionRecord>>>();

    self
      .entries
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(address.into(), records.clone());

    Ok(records)
  }

  pub fn len(&self) -> usize {
    self
      .entries
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

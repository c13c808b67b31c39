use {
  super::*,
  futures::{stream, StreamExt, TryStreamExt},
};

pub struct Resolver {
  concurrency: usize,
  explorer: Arc<dyn Explorer>,
}

impl Resolver {
  pub fn new(explorer: Arc<dyn Explorer>, concurrency: usize) -> Self {
    Self {
      concurrency: concurrency.max(1),
      explorer,
    }
  }

  /// Builds one record per transaction in `address`'s history, in history
  /// order. Transaction details are fetched concurrently; the first failed
  /// fetch fails the whole call and drops the fetches still in flight.
  pub async fn resolve(&self, address: &str) -> Result<Vec<InscriptionRecord>, ExplorerError> {
    let transactions = self.explorer.transactions(address).await?;

    log::debug!(
      "Fetching {} transactions for {address}",
      transactions.len()
    );

    stream::iter(transactions)
      .map(|summary| async move {
        let detail = self.explorer.transaction(&summary.txid).await?;
        Ok::<_, ExplorerError>(InscriptionRecord::new(&summary, &detail))
      })
      .buffered(self.concurrency)
      .try_collect()
      .await
  }
}

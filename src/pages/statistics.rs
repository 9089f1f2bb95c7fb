use super::DetailView;
use crate::statistics::{Statistics, StatisticsClient};
use crate::store::{SharedSlice, Store};

pub const NO_STATISTICS: &str = "No data available";

pub const STATISTICS_FAILED: &str = "Failed to fetch statistics";

/// The statistics overview: one snapshot, refetched on every visit
#[derive(Debug, Clone)]
pub struct StatisticsPage {
    client: StatisticsClient,
    slice: SharedSlice<Statistics>,
}

impl StatisticsPage {
    pub fn new(client: StatisticsClient, store: &Store) -> Self {
        Self {
            client,
            slice: store.statistics.clone(),
        }
    }

    /// Failures are shown inline by [`StatisticsPage::view`], not as a notice
    pub async fn refresh(&self) -> bool {
        let token = self.slice.begin().await;
        let outcome = self
            .client
            .fetch()
            .await
            .map_err(|err| err.message_or(STATISTICS_FAILED));
        self.slice.finish(token, outcome).await
    }

    pub async fn view(&self) -> DetailView<Statistics> {
        let snapshot = self.slice.snapshot().await;
        if snapshot.loading() {
            return DetailView::Loading;
        }
        if let Some(error) = snapshot.error() {
            return DetailView::Failed(error.to_string());
        }
        match snapshot.data() {
            Some(stats) => DetailView::Ready(stats.clone()),
            None => DetailView::Empty(NO_STATISTICS),
        }
    }
}

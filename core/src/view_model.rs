//! Search screen state: the last fetched item list and the query action.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::caller::ApiCaller;
use crate::client::SearchClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::host::{Host, StringKey};
use crate::transport::UreqTransport;
use crate::types::{SearchItem, SearchResponse};

pub struct SearchViewModel {
    client: SearchClient,
    caller: ApiCaller,
    items: RwLock<Vec<SearchItem>>,
}

impl SearchViewModel {
    pub fn new(client: SearchClient, caller: ApiCaller) -> Self {
        Self {
            client,
            caller,
            items: RwLock::new(Vec::new()),
        }
    }

    /// Wire a view-model to the real HTTP transport.
    pub fn from_config(config: &ClientConfig, host: Host) -> Self {
        let transport = Arc::new(UreqTransport::new(config));
        Self::new(SearchClient::from_config(config), ApiCaller::new(transport, host))
    }

    /// Run a search with the loader shown.
    ///
    /// On success the held list is replaced (when the response carries an
    /// `items` array) and the number of fetched items is returned. Errors
    /// that carry a failure payload are surfaced through the notifier before
    /// being returned.
    pub async fn query(&self, query: &str) -> Result<usize, ApiError> {
        let request = self.client.build_search(query);
        match self.caller.call::<SearchResponse>(request, true).await {
            Ok(Some(response)) => {
                let count = response.item_count();
                debug!(query, count, total = ?response.total_count, "search completed");
                if let Some(items) = response.items {
                    *self.items.write().await = items;
                }
                if count > 0 {
                    let template = self.host().strings.lookup(StringKey::ItemsFetched);
                    self.host()
                        .notifier
                        .notify(&template.replace("{count}", &count.to_string()));
                }
                Ok(count)
            }
            Ok(None) => Ok(0),
            Err(err) => {
                if let Some((message, code)) = err.failure() {
                    warn!(query, code, message, "search failed");
                    if message.is_empty() {
                        let generic = self.host().strings.lookup(StringKey::SomeError);
                        self.host().notifier.notify(&format!("{code} {generic}"));
                    } else {
                        self.host().notifier.notify(message);
                    }
                }
                Err(err)
            }
        }
    }

    /// Snapshot of the held results.
    pub async fn items(&self) -> Vec<SearchItem> {
        self.items.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn host(&self) -> &Host {
        self.caller.host()
    }
}

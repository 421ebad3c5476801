/// Pagination state machine and the list driver built on it
///
/// States: idle -> loading on a search or page change; loading -> loaded on
/// success, loading -> error on failure. Error is not terminal: the next
/// search or page change goes back to loading.
use crate::apis::{PageData, QueryParams, RequestDescriptor, RequestDispatcher};
use crate::config::PaginationConfig;
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Error { code: i64, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    Submit,
    PageChange,
    Succeeded,
    Failed { code: i64, message: String },
}

impl ListState {
    /// Next state, or `None` when the event is not valid here
    pub fn next(&self, event: ListEvent) -> Option<ListState> {
        match (self, event) {
            (_, ListEvent::Submit) | (_, ListEvent::PageChange) => Some(ListState::Loading),
            (ListState::Loading, ListEvent::Succeeded) => Some(ListState::Loaded),
            (ListState::Loading, ListEvent::Failed { code, message }) => {
                Some(ListState::Error { code, message })
            }
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }
}

/// One paginated collection bound to a list endpoint
pub struct PaginatedList<T> {
    dispatcher: RequestDispatcher,
    path: String,
    pagination: PaginationConfig,
    filters: QueryParams,
    page: usize,
    page_size: usize,
    state: ListState,
    data: Option<PageData<T>>,
}

impl<T: DeserializeOwned> PaginatedList<T> {
    pub fn new(dispatcher: RequestDispatcher, path: &str, pagination: PaginationConfig) -> Self {
        let page_size = pagination.clamp_page_size(pagination.default_page_size);
        Self {
            dispatcher,
            path: path.to_string(),
            pagination,
            filters: QueryParams::new(),
            page: 1,
            page_size,
            state: ListState::Idle,
            data: None,
        }
    }

    /// Preset filters without loading
    pub fn with_filters(mut self, filters: QueryParams) -> Self {
        self.filters = filters;
        self
    }

    /// Preset page size without loading
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = self.pagination.clamp_page_size(page_size);
        self
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Last successfully loaded page (kept while a reload fails)
    pub fn data(&self) -> Option<&PageData<T>> {
        self.data.as_ref()
    }

    pub fn items(&self) -> &[T] {
        self.data.as_ref().map(|d| d.items.as_slice()).unwrap_or(&[])
    }

    pub fn filters(&self) -> &QueryParams {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.data.as_ref().map(|d| d.total).unwrap_or(0)
    }

    pub fn total_pages(&self) -> usize {
        self.data.as_ref().map(|d| d.total_pages()).unwrap_or(0)
    }

    /// Query sent for the current filters and page
    pub fn query_params(&self) -> QueryParams {
        let mut params = self.filters.clone();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("pageSize".to_string(), self.page_size.to_string());
        params
    }

    /// New search: replace filters and go back to page 1
    pub async fn search(&mut self, filters: QueryParams) -> &ListState {
        self.filters = filters;
        self.page = 1;
        self.load(ListEvent::Submit).await
    }

    pub async fn change_page(&mut self, page: usize) -> &ListState {
        self.page = page.max(1);
        self.load(ListEvent::PageChange).await
    }

    pub async fn change_page_size(&mut self, page_size: usize) -> &ListState {
        self.page_size = self.pagination.clamp_page_size(page_size);
        self.page = 1;
        self.load(ListEvent::PageChange).await
    }

    /// Re-fetch the current page, bypassing cached copies of this list
    pub async fn refresh(&mut self) -> &ListState {
        self.dispatcher.invalidate(Some(self.path.as_str()));
        self.load(ListEvent::PageChange).await
    }

    fn apply(&mut self, event: ListEvent) {
        match self.state.next(event.clone()) {
            Some(next) => self.state = next,
            None => logger::warning(
                LogTag::Table,
                &format!("Ignoring {:?} while {:?} ({})", event, self.state, self.path),
            ),
        }
    }

    async fn load(&mut self, trigger: ListEvent) -> &ListState {
        self.apply(trigger);

        let request = RequestDescriptor::get(&self.path).with_params(self.query_params());
        match self.dispatcher.request::<PageData<T>>(&request).await {
            Ok(page) => {
                self.data = Some(page);
                self.apply(ListEvent::Succeeded);
            }
            Err(error) => {
                self.apply(ListEvent::Failed {
                    code: error.code(),
                    message: error.user_message(),
                });
            }
        }

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::{HttpRequest, HttpResponse, Transport};
    use crate::cache::{CacheConfig, CacheStore};
    use crate::config::{ApiConfig, RetryConfig};
    use crate::errors::TransportError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_transitions() {
        let failed = ListEvent::Failed {
            code: 10001,
            message: "down".to_string(),
        };

        assert_eq!(ListState::Idle.next(ListEvent::Submit), Some(ListState::Loading));
        assert_eq!(ListState::Loaded.next(ListEvent::PageChange), Some(ListState::Loading));
        assert_eq!(ListState::Loading.next(ListEvent::Succeeded), Some(ListState::Loaded));
        assert_eq!(
            ListState::Loading.next(failed.clone()),
            Some(ListState::Error {
                code: 10001,
                message: "down".to_string()
            })
        );

        let error = ListState::Error {
            code: 10001,
            message: "down".to_string(),
        };
        assert_eq!(error.next(ListEvent::Submit), Some(ListState::Loading));
        assert_eq!(ListState::Idle.next(ListEvent::Succeeded), None);
        assert_eq!(ListState::Loaded.next(failed), None);
    }

    /// Serves `{items: [page], total: 25}` pages, or a network error while `down`
    #[derive(Default)]
    struct PagedTransport {
        down: Mutex<bool>,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for PagedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.urls.lock().push(request.url.clone());
            if *self.down.lock() {
                return Err(TransportError::Network {
                    endpoint: request.url,
                    message: "connection refused".to_string(),
                });
            }

            let page: usize = request
                .url
                .split(['?', '&'])
                .find_map(|pair| pair.strip_prefix("page="))
                .and_then(|p| p.parse().ok())
                .unwrap_or(1);
            let body = json!({
                "code": 200,
                "message": "success",
                "data": {"items": [page], "total": 25, "page": page, "pageSize": 10}
            });
            Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            })
        }
    }

    fn list(transport: Arc<PagedTransport>) -> PaginatedList<usize> {
        let cache = Arc::new(CacheStore::new(CacheConfig::custom(60_000, 10)));
        let retry = RetryConfig {
            count: 0,
            delay_ms: 0,
        };
        let dispatcher = RequestDispatcher::new(transport, cache, &ApiConfig::default(), &retry);
        PaginatedList::new(dispatcher, "/api/enterprises", PaginationConfig::default())
    }

    #[tokio::test]
    async fn test_search_and_page_change() {
        let transport = Arc::new(PagedTransport::default());
        let mut list = list(transport.clone());
        assert_eq!(list.state(), &ListState::Idle);

        let filters: QueryParams = [("status".to_string(), "SUSPENDED".to_string())].into();
        assert_eq!(list.search(filters).await, &ListState::Loaded);
        assert_eq!(list.items(), &[1]);
        assert_eq!(list.total_pages(), 3);

        assert_eq!(list.change_page(3).await, &ListState::Loaded);
        assert_eq!(list.items(), &[3]);
        assert!(transport.urls.lock()[1].contains("status=SUSPENDED"));

        // New search resets to the first page
        list.search(QueryParams::new()).await;
        assert_eq!(list.page(), 1);
    }

    #[tokio::test]
    async fn test_error_keeps_last_page_and_recovers() {
        let transport = Arc::new(PagedTransport::default());
        let mut list = list(transport.clone());

        list.change_page(2).await;
        *transport.down.lock() = true;

        match list.change_page(3).await {
            ListState::Error { code, .. } => assert_eq!(*code, 10001),
            other => panic!("expected error state, got {:?}", other),
        }
        assert_eq!(list.items(), &[2]);

        *transport.down.lock() = false;
        assert_eq!(list.change_page(3).await, &ListState::Loaded);
        assert_eq!(list.items(), &[3]);
    }

    #[tokio::test]
    async fn test_page_size_is_clamped_and_refresh_refetches() {
        let transport = Arc::new(PagedTransport::default());
        let mut list = list(transport.clone()).with_page_size(1_000);
        assert_eq!(list.page_size(), 100);
        assert!(list.query_params().get("pageSize").is_some_and(|s| s == "100"));

        list.change_page(1).await;
        list.change_page(1).await;
        assert_eq!(transport.urls.lock().len(), 1);

        list.refresh().await;
        assert_eq!(transport.urls.lock().len(), 2);
    }
}

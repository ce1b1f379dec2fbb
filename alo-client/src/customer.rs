//! Customer type-ahead
//!
//! `input` is called on every keystroke. The search only runs once the text
//! has been stable for the debounce delay, and a newer keystroke cancels both
//! a pending delay and an in-flight search.

use shared::models::CustomerOption;
use shared::query::CustomerQuery;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ClientResult;
use crate::api::CustomerService;
use crate::gate::RequestGate;

pub struct CustomerSearch<S> {
    inner: Arc<SearchInner<S>>,
}

impl<S> Clone for CustomerSearch<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct SearchInner<S> {
    service: S,
    debounce: Duration,
    gate: RequestGate,
    options: watch::Sender<Vec<CustomerOption>>,
}

impl<S: CustomerService> CustomerSearch<S> {
    pub fn new(service: S, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(SearchInner {
                service,
                debounce,
                gate: RequestGate::new(),
                options: watch::Sender::new(Vec::new()),
            }),
        }
    }

    /// One search, no debounce
    pub async fn search(&self, text: &str) -> ClientResult<Vec<CustomerOption>> {
        let customers = self
            .inner
            .service
            .search_customers(&CustomerQuery::new(text))
            .await?;
        Ok(customers.iter().map(CustomerOption::from).collect())
    }

    /// Options of the latest completed search
    pub fn options(&self) -> Vec<CustomerOption> {
        self.inner.options.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<CustomerOption>> {
        self.inner.options.subscribe()
    }
}

impl<S: CustomerService + 'static> CustomerSearch<S> {
    /// Feed a keystroke. Blank text clears the options without searching.
    pub fn input(&self, text: impl Into<String>) -> JoinHandle<()> {
        let text = text.into();
        let ticket = self.inner.gate.begin();
        let search = self.clone();

        tokio::spawn(async move {
            if text.trim().is_empty() {
                search.inner.gate.commit(&ticket, || {
                    search.inner.options.send_replace(Vec::new());
                });
                return;
            }

            tokio::select! {
                biased;
                _ = ticket.cancelled() => return,
                _ = tokio::time::sleep(search.inner.debounce) => {}
            }

            let result = tokio::select! {
                biased;
                _ = ticket.cancelled() => return,
                result = search.search(&text) => result,
            };

            match result {
                Ok(options) => {
                    let count = options.len();
                    if search.inner.gate.commit(&ticket, || {
                        search.inner.options.send_replace(options);
                    }) {
                        tracing::debug!(text = %text, count, "Customer options updated");
                    }
                }
                Err(e) => tracing::error!(text = %text, error = %e, "Error searching customers"),
            }
        })
    }
}

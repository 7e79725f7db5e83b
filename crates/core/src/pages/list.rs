use std::future::Future;
use tracing::error;

use crate::errors::CoreError;

/// What a list page should render right now.
#[derive(Debug, PartialEq)]
pub enum ListView<'a, T> {
    Loading,
    /// Full-page error with a retry control.
    Failed(&'a str),
    Ready(&'a [T]),
}

/// A fetched collection plus its loading and error flags.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> ListState<T> {
    /// Nothing fetched yet; renders as loading until the first fetch ends.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Run one fetch.
    ///
    /// On success the items are replaced wholesale and the error cleared. On
    /// failure the previous items stay and `failure_message` becomes the
    /// error, except after a 401 where navigation to login has already
    /// happened and no error view is shown. `loading` is cleared either way.
    pub async fn load<F>(&mut self, failure_message: &str, fetch: F) -> Result<(), CoreError>
    where
        F: Future<Output = Result<Vec<T>, CoreError>>,
    {
        self.loading = true;
        let outcome = fetch.await;
        self.loading = false;

        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!("{failure_message} ({e})");
                if !e.is_auth_required() {
                    self.error = Some(failure_message.to_string());
                }
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> ListView<'_, T> {
        if self.loading {
            ListView::Loading
        } else if let Some(error) = &self.error {
            ListView::Failed(error)
        } else {
            ListView::Ready(&self.items)
        }
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

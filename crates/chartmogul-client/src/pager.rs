//! Lazy iteration over paged collection endpoints.
//!
//! A [`Pager`] requests one page at a time and hands out its records before
//! asking for the next one, so a consumer that stops pulling stops the
//! requests too. Iterating is not restartable: calling the listing operation
//! again starts over at the first page.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{into_record, take_array, ChartMogulClient};
use crate::error::ClientError;
use crate::response::Document;

/// Query parameters shared by every paged listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Restrict results to one data source.
    pub data_source_uuid: Option<String>,
    /// First page to request (default: 1).
    pub page_number: Option<u32>,
    /// Records per page; the service default applies when unset.
    pub per_page: Option<u32>,
}

impl ListParams {
    /// Parameters with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to one data source.
    #[must_use]
    pub fn with_data_source(mut self, data_source_uuid: impl Into<String>) -> Self {
        self.data_source_uuid = Some(data_source_uuid.into());
        self
    }

    /// Start at a page other than the first.
    #[must_use]
    pub const fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }

    /// Set the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(uuid) = &self.data_source_uuid {
            query.push(("data_source_uuid".to_string(), uuid.clone()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        query
    }
}

/// Iterator over the raw record objects of a paged endpoint.
///
/// Yields records in page order, preserving order within each page. After an
/// error the error is yielded once and the iterator is exhausted.
#[derive(Debug)]
pub struct Pager<'a> {
    client: &'a ChartMogulClient,
    path: String,
    query: Vec<(String, String)>,
    records_key: &'static str,
    next_page: u32,
    page_count: Option<u32>,
    buffered: std::vec::IntoIter<Value>,
    finished: bool,
}

impl<'a> Pager<'a> {
    /// Page through `path`, reading each page's records from `records_key`.
    #[must_use]
    pub fn new(
        client: &'a ChartMogulClient,
        path: impl Into<String>,
        params: &ListParams,
        records_key: &'static str,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            query: params.to_query(),
            records_key,
            next_page: params.page_number.unwrap_or(1),
            page_count: None,
            buffered: Vec::new().into_iter(),
            finished: false,
        }
    }

    /// Decode each record into `T` as it is yielded.
    #[must_use]
    pub fn typed<T: DeserializeOwned>(self) -> Paged<'a, T> {
        Paged {
            pager: self,
            record: PhantomData,
        }
    }

    fn fetch_page(&mut self) -> Result<(), ClientError> {
        let page = self.next_page;
        tracing::trace!(path = %self.path, page, "fetching page");

        let mut query = self.query.clone();
        query.push(("page_number".to_string(), page.to_string()));

        let mut document = self.client.get(&self.path, &query)?;
        let records = take_array(&mut document, self.records_key)?;
        // The first response decides how many pages there are.
        let total = *self.page_count.get_or_insert_with(|| page_count(&document));

        self.buffered = records.into_iter();
        if page < total {
            self.next_page = page + 1;
        } else {
            self.finished = true;
        }
        Ok(())
    }
}

impl Iterator for Pager<'_> {
    type Item = Result<Document, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffered.next() {
                return Some(match record {
                    Value::Object(record) => Ok(record),
                    other => Err(ClientError::UnexpectedResponse(format!(
                        "expected an object in `{}`, got {other}",
                        self.records_key
                    ))),
                });
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.fetch_page() {
                self.finished = true;
                return Some(Err(err));
            }
        }
    }
}

impl FusedIterator for Pager<'_> {}

/// Read the page count, preferring `meta.page_count` over `total_pages`.
///
/// Missing metadata means the collection fits on one page.
fn page_count(document: &Document) -> u32 {
    document
        .get("meta")
        .and_then(|meta| meta.get("page_count"))
        .or_else(|| document.get("total_pages"))
        .and_then(Value::as_u64)
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or(1)
}

/// Iterator over typed records of a paged endpoint.
#[derive(Debug)]
pub struct Paged<'a, T> {
    pager: Pager<'a>,
    record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Paged<'_, T> {
    /// Drain every page into a vector, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching or decoding a page.
    pub fn collect_all(self) -> Result<Vec<T>, ClientError> {
        self.collect()
    }
}

impl<T: DeserializeOwned> Iterator for Paged<'_, T> {
    type Item = Result<T, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pager.next().map(|record| record.and_then(into_record))
    }
}

impl<T: DeserializeOwned> FusedIterator for Paged<'_, T> {}

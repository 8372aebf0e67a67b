//! Typed access to the four back-office management areas.
//!
//! Payload shapes are deliberately shallow: a typed identity plus a
//! flattened remainder, since the interesting behavior (ambient
//! credentials, envelope unwrap, the 401 retry) all lives in the
//! client underneath.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sewa_core::Result;

use crate::client::{ApiClient, RequestOptions};
use crate::endpoints::{INVENTORY, ORDERS, PRE_BOOKINGS, SUPPLIERS};

/// Pagination parameters for list endpoints.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Page number, 1-based.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Free-text filter, when supported by the endpoint.
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
            search: None,
        }
    }
}

impl PageQuery {
    /// A query for page `n` with the default page size.
    pub fn page(n: u32) -> Self {
        Self {
            page: n,
            ..Default::default()
        }
    }

    fn options(&self) -> RequestOptions {
        let mut options = RequestOptions::new()
            .query("page", self.page.to_string())
            .query("perPage", self.per_page.to_string());
        if let Some(search) = &self.search {
            options = options.query("search", search.clone());
        }
        options
    }
}

/// One page of a listed collection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

/// An inventory item (rental stock).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A supplier record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A pre-booking awaiting confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreBooking {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Facade bundling the management areas over one client.
#[derive(Debug, Clone)]
pub struct Backoffice {
    client: ApiClient,
}

impl Backoffice {
    /// Wrap a configured client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Inventory management.
    pub fn inventory(&self) -> Collection<'_, InventoryItem> {
        Collection::new(&self.client, INVENTORY)
    }

    /// Supplier management.
    pub fn suppliers(&self) -> Collection<'_, Supplier> {
        Collection::new(&self.client, SUPPLIERS)
    }

    /// Order management.
    pub fn orders(&self) -> Collection<'_, Order> {
        Collection::new(&self.client, ORDERS)
    }

    /// Pre-booking management.
    pub fn pre_bookings(&self) -> Collection<'_, PreBooking> {
        Collection::new(&self.client, PRE_BOOKINGS)
    }
}

/// CRUD operations for one resource root.
pub struct Collection<'a, T> {
    client: &'a ApiClient,
    root: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Collection<'a, T>
where
    T: DeserializeOwned,
{
    fn new(client: &'a ApiClient, root: &'static str) -> Self {
        Self {
            client,
            root,
            _marker: PhantomData,
        }
    }

    /// The collection's path root.
    pub fn root(&self) -> &str {
        self.root
    }

    /// List one page of the collection.
    pub async fn list(&self, query: &PageQuery) -> Result<Page<T>> {
        self.client.get_with(self.root, query.options()).await
    }

    /// Fetch a single record by id.
    pub async fn get(&self, id: &str) -> Result<T> {
        self.client.get(&self.item_path(id)).await
    }

    /// Create a record from a JSON body.
    pub async fn create(&self, body: &Value) -> Result<T> {
        self.client.post(self.root, body).await
    }

    /// Replace a record.
    pub async fn update(&self, id: &str, body: &Value) -> Result<T> {
        self.client.put(&self.item_path(id), body).await
    }

    /// Partially update a record.
    pub async fn modify(&self, id: &str, body: &Value) -> Result<T> {
        self.client.patch(&self.item_path(id), body).await
    }

    /// Delete a record.
    pub async fn remove(&self, id: &str) -> Result<()> {
        self.client.delete(&self.item_path(id)).await
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.root, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, 20);
        assert!(query.search.is_none());
    }

    #[test]
    fn unknown_fields_flatten_into_extra() {
        let item: InventoryItem = serde_json::from_value(json!({
            "id": "i1",
            "name": "Canvas tent",
            "dailyRate": 35.0,
            "available": true,
        }))
        .unwrap();

        assert_eq!(item.id, "i1");
        assert_eq!(item.extra.get("dailyRate"), Some(&json!(35.0)));
        assert_eq!(item.extra.get("available"), Some(&json!(true)));
    }

    #[test]
    fn page_tolerates_missing_fields() {
        let page: Page<Supplier> = serde_json::from_value(json!({})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}

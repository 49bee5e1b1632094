// ── Client-side search and filtering ──
//
// Linear scans over an already-fetched collection: a case-insensitive
// substring search on two text fields per record kind, optionally AND-ed
// with an exact status match.

use crate::model::{
    Customer, CustomerStatus, Order, OrderStatus, Product, Record, StockStatus,
};

/// Text fields a free-form search looks at.
pub trait Searchable {
    fn search_fields(&self) -> [&str; 2];
}

/// Record kinds with an enumerated status column.
pub trait HasStatus {
    type Status: Copy + PartialEq;

    fn status(&self) -> Self::Status;
}

impl Searchable for Order {
    fn search_fields(&self) -> [&str; 2] {
        [&self.customer_name, &self.id]
    }
}

impl Searchable for Customer {
    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.email]
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.category]
    }
}

impl HasStatus for Order {
    type Status = OrderStatus;

    fn status(&self) -> OrderStatus {
        self.status
    }
}

impl HasStatus for Customer {
    type Status = CustomerStatus;

    fn status(&self) -> CustomerStatus {
        self.status
    }
}

impl HasStatus for Product {
    type Status = StockStatus;

    fn status(&self) -> StockStatus {
        self.status
    }
}

/// Search term plus optional status. An empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter<S> {
    pub search: Option<String>,
    pub status: Option<S>,
}

impl<S> Default for Filter<S> {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
        }
    }
}

impl<S: Copy + PartialEq> Filter<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_status(mut self, status: S) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches<T>(&self, item: &T) -> bool
    where
        T: Searchable + HasStatus<Status = S>,
    {
        let status_ok = self.status.is_none_or(|s| item.status() == s);
        status_ok && self.search.as_deref().is_none_or(|t| matches_search(item, t))
    }

    /// Items passing the filter, in input order.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: Searchable + HasStatus<Status = S>,
    {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

/// Case-insensitive substring match on any search field. Blank terms match.
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Exact id lookup.
pub fn find_by_id<'a, T: Record>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn pending_filter_is_exact() {
        let orders = fixtures::orders();
        let pending = Filter::new().with_status(OrderStatus::Pending).apply(&orders);
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));
        let ids: Vec<_> = pending.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["#ORD-7002", "#ORD-7006", "#ORD-7009"]);
    }

    #[test]
    fn empty_filter_matches_all() {
        let orders = fixtures::orders();
        assert_eq!(Filter::<OrderStatus>::new().apply(&orders).len(), 10);
        assert_eq!(Filter::new().with_search("   ").with_status(OrderStatus::Shipped).apply(&orders).len(), 2);
    }

    #[test]
    fn order_search_covers_name_and_id() {
        let orders = fixtures::orders();
        let by_name = Filter::<OrderStatus>::new().with_search("GELLER").apply(&orders);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "#ORD-7007");

        let by_id = Filter::<OrderStatus>::new().with_search("ord-700").apply(&orders);
        assert_eq!(by_id.len(), 9);
    }

    #[test]
    fn search_and_status_combine() {
        let orders = fixtures::orders();
        let hits = Filter::new()
            .with_search("ahmed")
            .with_status(OrderStatus::Pending)
            .apply(&orders);
        assert!(hits.is_empty());
    }

    #[test]
    fn customer_search_covers_email() {
        let customers = fixtures::customers();
        let hits = Filter::<CustomerStatus>::new().with_search("fatima@").apply(&customers);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "CUST-004");

        let inactive = Filter::new().with_status(CustomerStatus::Inactive).apply(&customers);
        assert_eq!(inactive.len(), 2);
    }

    #[test]
    fn product_search_covers_category() {
        let products = fixtures::products();
        let hits = Filter::<StockStatus>::new().with_search("accessories").apply(&products);
        assert_eq!(hits.len(), 3);

        let low = Filter::new().with_status(StockStatus::LowStock).apply(&products);
        assert_eq!(low.len(), 2);
    }

    #[test]
    fn find_by_id_is_exact() {
        let products = fixtures::products();
        assert_eq!(find_by_id(&products, "PRD-003").map(|p| p.stock), Some(0));
        assert!(find_by_id(&products, "prd-003").is_none());
    }
}

// ── Fallback dataset ──
//
// Fixed sample records served whenever the backend is not configured or a
// remote query fails. Counts and values are part of the observable contract:
// 10 orders, 6 customers, 7 products.

use std::num::NonZeroU32;

use chrono::NaiveDate;

use crate::model::{
    Amount, Customer, CustomerStatus, Order, OrderStatus, Product, StockStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn items(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

fn order(
    id: &str,
    customer_name: &str,
    status: OrderStatus,
    cents: u64,
    day: u32,
    count: u32,
) -> Order {
    Order {
        id: id.into(),
        customer_name: customer_name.into(),
        status,
        amount: Amount::from_cents(cents),
        items: items(count),
        date: date(2023, 10, day),
    }
}

/// Sample orders, newest first.
pub fn orders() -> Vec<Order> {
    use OrderStatus::{Cancelled, Delivered, Pending, Shipped};

    vec![
        order("#ORD-7001", "Ahmed Ali", Delivered, 12_050, 25, 3),
        order("#ORD-7002", "Sarah Smith", Pending, 8_500, 25, 1),
        order("#ORD-7003", "John Doe", Shipped, 24_020, 24, 5),
        order("#ORD-7004", "Fatima Noor", Cancelled, 4_500, 24, 2),
        order("#ORD-7005", "Mike Ross", Delivered, 60_000, 23, 10),
        order("#ORD-7006", "Rachel Green", Pending, 3_599, 23, 1),
        order("#ORD-7007", "Monica Geller", Shipped, 15_000, 22, 4),
        order("#ORD-7008", "Chandler Bing", Delivered, 9_999, 22, 2),
        order("#ORD-7009", "Joey Tribbiani", Pending, 2_550, 21, 5),
        order("#ORD-7010", "Phoebe Buffay", Cancelled, 1_200, 21, 1),
    ]
}

fn customer(
    id: &str,
    name: &str,
    email: &str,
    location: &str,
    orders: u32,
    spent: &str,
    status: CustomerStatus,
) -> Customer {
    Customer {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        location: location.into(),
        orders,
        spent: spent.into(),
        status,
    }
}

pub fn customers() -> Vec<Customer> {
    use CustomerStatus::{Active, Inactive};

    vec![
        customer("CUST-001", "Ahmed Ali", "ahmed@example.com", "Cairo, Egypt", 12, "$1,200.50", Active),
        customer("CUST-002", "Sarah Smith", "sarah@example.com", "London, UK", 5, "$450.00", Active),
        customer("CUST-003", "John Doe", "john@example.com", "New York, USA", 2, "$120.00", Inactive),
        customer("CUST-004", "Fatima Noor", "fatima@example.com", "Dubai, UAE", 24, "$3,400.00", Active),
        customer("CUST-005", "Mike Ross", "mike@example.com", "Toronto, Canada", 1, "$45.00", Inactive),
        customer("CUST-006", "Emily Blunt", "emily@example.com", "Sydney, Australia", 8, "$890.00", Active),
    ]
}

fn product(
    id: &str,
    name: &str,
    category: &str,
    price: &str,
    stock: u32,
    status: StockStatus,
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        price: price.into(),
        stock,
        status,
    }
}

pub fn products() -> Vec<Product> {
    use StockStatus::{InStock, LowStock, OutOfStock};

    vec![
        product("PRD-001", "Luna Wireless Headset", "Electronics", "$120.00", 45, InStock),
        product("PRD-002", "Galaxy Smart Watch", "Wearables", "$250.00", 12, LowStock),
        product("PRD-003", "Ergonomic Mouse", "Accessories", "$45.00", 0, OutOfStock),
        product("PRD-004", "Mechanical Keyboard", "Accessories", "$150.00", 30, InStock),
        product("PRD-005", "USB-C Hub Multiport", "Accessories", "$60.00", 100, InStock),
        product("PRD-006", "HD Webcam 4K", "Electronics", "$99.00", 5, LowStock),
        product("PRD-007", "Laptop Stand Pro", "Furniture", "$35.00", 200, InStock),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::model::parse_currency;

    #[test]
    fn dataset_sizes() {
        assert_eq!(orders().len(), 10);
        assert_eq!(customers().len(), 6);
        assert_eq!(products().len(), 7);
    }

    #[test]
    fn ids_are_unique() {
        let ids: HashSet<_> = orders().into_iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), 10);
        let ids: HashSet<_> = customers().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 6);
        let ids: HashSet<_> = products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 7);
    }

    #[test]
    fn dates_are_real() {
        assert!(orders().iter().all(|o| o.date.to_string().starts_with("2023-10-")));
    }

    #[test]
    fn formatted_money_parses() {
        assert!(customers().iter().all(|c| parse_currency(&c.spent).is_some()));
        assert!(products().iter().all(|p| parse_currency(&p.price).is_some()));
    }
}

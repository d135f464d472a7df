//! Resource facades
//!
//! Each facade borrows the client's [`HttpClient`](crate::http::HttpClient),
//! validates input locally, issues one request and normalizes the response.

pub mod clients;
pub mod coupons;
pub mod payment_links;
pub mod products;
pub mod transactions;

pub use clients::Clients;
pub use coupons::Coupons;
pub use payment_links::PaymentLinks;
pub use products::Products;
pub use transactions::Transactions;

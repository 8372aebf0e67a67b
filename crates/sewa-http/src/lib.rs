//! sewa-http - Reqwest-backed client for the back-office API.

mod client;
pub mod endpoints;
mod resources;
mod toast;

pub use client::{ApiClient, RequestOptions};
pub use resources::{
    Backoffice, Collection, InventoryItem, Order, Page, PageQuery, PreBooking, Supplier,
};
pub use toast::ToastCookie;

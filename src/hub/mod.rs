pub mod client;

pub use client::HubClient;

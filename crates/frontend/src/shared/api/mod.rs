pub mod client;

pub use client::ScopedClient;

pub mod client;
pub mod paginator;
pub mod provider;

pub use client::GitHubClient;
pub use paginator::Paginator;
pub use provider::GitHubProvider;

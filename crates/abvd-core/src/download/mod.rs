mod client;
mod collection;
mod error;

pub use client::{Downloader, Fetcher, HttpFetcher};
pub use collection::Collection;
pub use error::DownloadError;

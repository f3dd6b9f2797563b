mod blob_store_port;
mod clock_port;
mod image_fetcher_port;
mod ledger_port;

pub use blob_store_port::BlobStorePort;
pub use clock_port::ClockPort;
pub use image_fetcher_port::ImageFetcherPort;
pub use ledger_port::LedgerPort;

#[cfg(test)]
pub mod mocks {
    pub use super::blob_store_port::mock::MockBlobStore;
    pub use super::clock_port::mock::ManualClock;
    pub use super::image_fetcher_port::MockImageFetcherPort;
    pub use super::ledger_port::mock::MockLedger;
}

pub mod conversion;
pub mod rates;
pub mod sync;
pub use sync::Synchronizer;

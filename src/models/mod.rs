//! Domain models shared across the whole service.

pub mod dto;
pub mod snapshot;
pub mod ticker;
pub mod upstream;

pub use dto::{RegisterTickersRequest, TickerDetailDto, TickerTypesDto, TickersDto};
pub use snapshot::TickerSnapshot;
pub use ticker::{TickerDetail, TickerResult, TickerType, TickersSearchConfig};

//! Core types for eventboard.
//!
//! - `event`: the `Event` record and its `EventDate`
//! - `bucket`: nine-way temporal classification relative to now
//! - `arrangement`: today/future/past split and featured slot selection
//! - `layout`: layout table and the `Board` presentation model
//! - `feed`: backend records and date fallback normalization

pub mod arrangement;
pub mod bucket;
pub mod config;
pub mod error;
pub mod event;
pub mod feed;
pub mod layout;

pub use arrangement::{Arrangement, Partition, arrange, partition};
pub use bucket::{Bucket, classify, day_difference};
pub use event::{Event, EventDate, Media};
pub use layout::{Board, FeaturedCard, Layout, LayoutSignals, SlotRole};

//! Loading permissions documents and watching for update notifications.

mod error;
mod fetch;
mod poll;

pub use error::DataError;
pub use fetch::{
    DataLocation, DataOrigin, LoadedDataset, fetch_dataset, load_or_sample, parse_dataset,
};
pub use poll::{PollConfig, PollSignal, check_for_update, interpret_notification, spawn_update_poller};

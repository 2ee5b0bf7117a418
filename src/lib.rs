//! Space-Saving is for finding the most frequent items of a stream with bounded memory
//!
//! This implementation is based on the paper Efficient Computation of Frequent and Top-k Elements
//! in Data Streams by Ahmed Metwally, Divyakant Agrawal, and Amr El Abbadi, University of California,
//! Santa Barbara
//!
//! A [`StreamSummary`] monitors at most `capacity` items. Each reported count overestimates the
//! true count by at most the item's error bound, and [`StreamSummary::most_frequents`] returns the
//! items whose rank is certain despite that error.

mod element;
pub use element::Element;

mod error;
pub use error::SummaryError;

mod space_saving;
pub use space_saving::StreamSummary;

pub mod stream;
pub use stream::{ingest, TokenSource};

mod summary_index;

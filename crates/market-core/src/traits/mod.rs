//! Core traits for the market snapshot engine.

mod http;
mod series_source;

pub use http::{HttpFetch, HttpResponse};
pub use series_source::SeriesSource;

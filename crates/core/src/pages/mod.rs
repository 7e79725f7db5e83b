//! Page controllers: the state behind each protected page and the
//! fetch / edit / save flow it runs against the backend.
//!
//! Every successful mutation is followed by a full re-fetch of the page's
//! collection, so what is displayed is always a snapshot the backend
//! actually returned.

pub mod dashboard;
pub mod form;
pub mod goals;
pub mod investments;
pub mod list;
pub mod prompt;

//! # sheet2json-http
//!
//! Reads a Google Sheets tab over HTTP and normalizes it into keyed records.
//!
//! The values endpoint (`/v4/spreadsheets/{id}/values/{sheet}`) returns a
//! 2-D array of cells; this crate turns that into a
//! [`Grid`](sheet2json_core::Grid) and hands it to
//! [`normalize`](sheet2json_core::normalize). One request is sent per call.
//! There is no retry and no timeout of its own.

mod client;
mod error;

pub use client::{parse_google_sheet, GoogleSheetConfig, GoogleSheetsClient, DEFAULT_BASE_URL};
pub use error::{FetchError, Result};

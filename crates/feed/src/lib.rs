pub mod detail;
pub mod error;
pub mod listing;

#[cfg(test)]
pub(crate) mod testutil;

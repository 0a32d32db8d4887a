mod access;

pub use access::{AccessError, AccessService};

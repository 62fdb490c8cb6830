//! Settings for tunebox: the schema, and loading it from file and environment.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;

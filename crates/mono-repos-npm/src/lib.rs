//! mono-repos npm - the npm command line as a package manager
//!
//! Every operation shells out to the configured npm program inside the
//! package directory.

mod client;

pub use client::NpmClient;

//! Library components of the `dmt` command-line tools.

pub mod logging;
pub mod pipeline;

//! End-to-end runs of the command-line pipeline
//!
//! - `pipeline`: CSV history in, tables on stdout and artifacts on disk

mod pipeline;

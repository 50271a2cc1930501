//! Statistics and metric trait implementations

pub mod ibd;

pub use ibd::IbdSummary;
pub use ibd::{genotype_ibd_segments, ibd_segments};

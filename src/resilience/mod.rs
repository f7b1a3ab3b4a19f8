pub mod fence;
pub mod freshness;

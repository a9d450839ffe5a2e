//! Feature levels folded into resolved name sets.

mod accumulator;

pub use accumulator::{Feature, FeatureAccumulator, accumulate, list_features, resolve_feature};

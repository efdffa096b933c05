mod metadata;

pub use metadata::{InitiativeSample, MetadataContext, effective_initiative};

pub mod attributes;
pub mod completion;
pub mod outfit;

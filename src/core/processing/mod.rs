pub mod crop;
pub mod flatten;
pub mod pipeline;
pub mod resize;

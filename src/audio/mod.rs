//! Audio output: format selection and file encoding.

mod encode;
mod format;

pub use encode::write_samples;
pub use format::AudioFormat;

mod core;
pub use self::core::*;
mod gemm;
mod syrk;

mod crop;
pub use crop::{
    CropCapability,
    Fract,
    Rect
};

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "linux")]
pub use linux::*;

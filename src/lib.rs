//! Crop control for Video4Linux2 capture devices.
//!
//! [`get_crop_capability`] reads a device's crop bounds, default rectangle and
//! pixel aspect, [`set_crop_rect`] asks the driver for a crop window and
//! [`get_crop_rect`] reads back the window the driver applied. All of them
//! issue a single blocking ioctl through anything implementing [`Dispatch`],
//! such as a [`VideoDevice`] or a borrowed file descriptor.
//!
//! ```no_run
//! use v4l2_crop::{get_crop_capability, set_crop_rect, VideoDevice};
//!
//! # fn main() -> anyhow::Result<()> {
//! let device = VideoDevice::open("/dev/video0")?;
//! let cap = get_crop_capability(&device)?;
//! println!("{}", cap);
//! set_crop_rect(&device, cap.default_rect)?;
//! # Ok(())
//! # }
//! ```

pub mod video_devices;
pub use video_devices::*;

 //! Crop control for v4l (Video for Linux) capture devices.
 /*
 * Cropping is driven by three ioctls on the capture stream: VIDIOC_CROPCAP reports
 * the bounds, default rectangle and pixel aspect, VIDIOC_S_CROP asks the driver
 * for a new crop window and VIDIOC_G_CROP reports the window actually in use.
 * Drivers round or clamp S_CROP requests without reporting an error, so a
 * caller that cares reads the rectangle back with G_CROP.
 *
 * Each operation is one blocking ioctl against the caller's handle. Nothing
 * here locks, retries or times out.
 *
 * For information about the API being used see:
 * https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/crop.html
 * https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-cropcap.html
 * https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-g-crop.html
 */
use std::{
    ffi::{
        c_void,
        CStr
    },
    mem
};
use super::DeviceControlError;
use crate::video_devices::{
    CropCapability,
    Rect
};

mod ioctl;
pub use ioctl::{
    Command,
    Dispatch,
    V4l2Capability,
    V4l2Crop,
    V4l2Cropcap,
    V4L2_BUF_TYPE_VIDEO_CAPTURE,
    V4L2_CAP_DEVICE_CAPS,
    V4L2_CAP_VIDEO_CAPTURE,
    V4L2_CAP_VIDEO_CAPTURE_MPLANE
};

/// Reads the cropping limits of the device's video capture stream.
pub fn get_crop_capability<D: Dispatch + ?Sized>(device: &D) -> Result<CropCapability, DeviceControlError> {
    let mut cap = V4l2Cropcap {
        typ: V4L2_BUF_TYPE_VIDEO_CAPTURE,
        ..V4l2Cropcap::default()
    };
    send(device, Command::CropCap, &mut cap)?;
    Ok(CropCapability::from(cap))
}

/// Asks the driver to crop the video capture stream to `rect`.
///
/// The driver may adjust the rectangle; use [`get_crop_rect`] to see what it applied.
pub fn set_crop_rect<D: Dispatch + ?Sized>(device: &D, rect: Rect) -> Result<(), DeviceControlError> {
    let mut crop = V4l2Crop {
        typ: V4L2_BUF_TYPE_VIDEO_CAPTURE,
        ..V4l2Crop::default()
    };
    crop.c = rect;
    send(device, Command::SetCrop, &mut crop)
}

/// Reads the crop rectangle currently applied to the video capture stream.
pub fn get_crop_rect<D: Dispatch + ?Sized>(device: &D) -> Result<Rect, DeviceControlError> {
    let mut crop = V4l2Crop {
        typ: V4L2_BUF_TYPE_VIDEO_CAPTURE,
        ..V4l2Crop::default()
    };
    send(device, Command::GetCrop, &mut crop)?;
    Ok(crop.c)
}

pub fn query_capability<D: Dispatch + ?Sized>(device: &D) -> Result<V4l2Capability, DeviceControlError> {
    let mut cap = V4l2Capability::default();
    send(device, Command::QueryCap, &mut cap)?;
    Ok(cap)
}

pub fn is_capture_device(cap: &V4l2Capability) -> bool {
    // device_caps is only filled in by drivers that set V4L2_CAP_DEVICE_CAPS.
    let caps = if cap.capabilities & V4L2_CAP_DEVICE_CAPS != 0 {
        cap.device_caps
    } else {
        cap.capabilities
    };
    (caps & ( V4L2_CAP_VIDEO_CAPTURE | V4L2_CAP_VIDEO_CAPTURE_MPLANE )) != 0
}

pub fn device_name(cap: &V4l2Capability) -> String {
    if let Ok(name) = CStr::from_bytes_until_nul(&cap.card) {
        return name.to_string_lossy().to_string();
    }
    String::from("UNKNOWN")
}

fn send<D: Dispatch + ?Sized, T>(device: &D, command: Command, arg: &mut T) -> Result<(), DeviceControlError> {
    debug_assert_eq!(mem::size_of::<T>(), command.arg_size());
    log::debug!("ioctl {} ({:#010x})", command, command.code());

    // The argument struct is the one `command` expects, checked above and by
    // the layout assertions in ioctl.rs.
    let result = unsafe { device.send(command, arg as *mut T as *mut c_void) };
    result.map_err(|err| {
        log::debug!("ioctl {} failed: {}", command, err);
        DeviceControlError::new(command, err)
    })
}

//! The ioctl commands used for cropping and the structs they exchange with the driver.
use nix::errno::Errno;
use std::{
    error::Error,
    ffi::c_void,
    fmt,
    mem,
    os::fd::{
        AsRawFd,
        BorrowedFd,
        RawFd
    }
};
use crate::video_devices::{
    CropCapability,
    Fract,
    Rect
};

pub const V4L2_CAP_VIDEO_CAPTURE: u32 = 0x00000001;
pub const V4L2_CAP_VIDEO_CAPTURE_MPLANE: u32 = 0x00001000;
pub const V4L2_CAP_DEVICE_CAPS: u32 = 0x80000000;
pub const V4L2_BUF_TYPE_VIDEO_CAPTURE: u32 = 1;

const VIDIOC: u8 = b'V';
const VIDIOC_QUERYCAP: u8 = 0;
const VIDIOC_CROPCAP: u8 = 58;
const VIDIOC_G_CROP: u8 = 59;
const VIDIOC_S_CROP: u8 = 60;

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-querycap.html

#[repr(C)]
#[derive(Copy, Clone, Default)]
pub struct V4l2Capability {
    pub driver: [u8; 16],
    pub card: [u8; 32],
    pub bus_info: [u8; 32],
    pub version: u32,
    pub capabilities: u32,
    pub device_caps: u32,
    pub reserved: [u32; 3]
}

nix::ioctl_read!(vidioc_querycap, VIDIOC, VIDIOC_QUERYCAP, V4l2Capability);

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-cropcap.html

#[repr(C)]
#[derive(Copy, Clone, Default)]
#[derive(Debug)]
pub struct V4l2Cropcap {
    pub typ: u32,
    pub bounds: Rect,
    pub defrect: Rect,
    pub pixelaspect: Fract
}

nix::ioctl_readwrite!(vidioc_cropcap, VIDIOC, VIDIOC_CROPCAP, V4l2Cropcap);

impl From<V4l2Cropcap> for CropCapability {
    fn from(cap: V4l2Cropcap) -> CropCapability {
        CropCapability::new(cap.typ, cap.bounds, cap.defrect, cap.pixelaspect)
    }
}

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-g-crop.html

#[repr(C)]
#[derive(Copy, Clone, Default)]
#[derive(Debug)]
pub struct V4l2Crop {
    pub typ: u32,
    pub c: Rect
}

nix::ioctl_readwrite!(vidioc_g_crop, VIDIOC, VIDIOC_G_CROP, V4l2Crop);
nix::ioctl_write_ptr!(vidioc_s_crop, VIDIOC, VIDIOC_S_CROP, V4l2Crop);

// Any drift from videodev2.h fails the build rather than corrupting a request.
const _: () = {
    assert!(mem::size_of::<Rect>() == 16);
    assert!(mem::offset_of!(Rect, left) == 0);
    assert!(mem::offset_of!(Rect, top) == 4);
    assert!(mem::offset_of!(Rect, width) == 8);
    assert!(mem::offset_of!(Rect, height) == 12);

    assert!(mem::size_of::<Fract>() == 8);
    assert!(mem::offset_of!(Fract, numerator) == 0);
    assert!(mem::offset_of!(Fract, denominator) == 4);

    assert!(mem::size_of::<V4l2Cropcap>() == 44);
    assert!(mem::offset_of!(V4l2Cropcap, typ) == 0);
    assert!(mem::offset_of!(V4l2Cropcap, bounds) == 4);
    assert!(mem::offset_of!(V4l2Cropcap, defrect) == 20);
    assert!(mem::offset_of!(V4l2Cropcap, pixelaspect) == 36);

    assert!(mem::size_of::<CropCapability>() == 60);
    assert!(mem::offset_of!(CropCapability, stream_type) == mem::offset_of!(V4l2Cropcap, typ));
    assert!(mem::offset_of!(CropCapability, bounds) == mem::offset_of!(V4l2Cropcap, bounds));
    assert!(mem::offset_of!(CropCapability, default_rect) == mem::offset_of!(V4l2Cropcap, defrect));
    assert!(mem::offset_of!(CropCapability, pixel_aspect) == mem::offset_of!(V4l2Cropcap, pixelaspect));

    assert!(mem::size_of::<V4l2Crop>() == 20);
    assert!(mem::offset_of!(V4l2Crop, typ) == 0);
    assert!(mem::offset_of!(V4l2Crop, c) == 4);

    assert!(mem::size_of::<V4l2Capability>() == 104);
    assert!(mem::offset_of!(V4l2Capability, card) == 16);
    assert!(mem::offset_of!(V4l2Capability, capabilities) == 84);
    assert!(mem::offset_of!(V4l2Capability, device_caps) == 88);
};

/// The device-control commands this crate issues.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[derive(Debug)]
pub enum Command {
    QueryCap,
    CropCap,
    GetCrop,
    SetCrop
}

impl Command {
    /// The request number passed to `ioctl(2)`.
    pub fn code(self) -> u32 {
        let code = match self {
            Command::QueryCap => nix::request_code_read!(VIDIOC, VIDIOC_QUERYCAP, mem::size_of::<V4l2Capability>()),
            Command::CropCap => nix::request_code_readwrite!(VIDIOC, VIDIOC_CROPCAP, mem::size_of::<V4l2Cropcap>()),
            Command::GetCrop => nix::request_code_readwrite!(VIDIOC, VIDIOC_G_CROP, mem::size_of::<V4l2Crop>()),
            Command::SetCrop => nix::request_code_write!(VIDIOC, VIDIOC_S_CROP, mem::size_of::<V4l2Crop>())
        };
        code as u32
    }

    /// Size in bytes of the argument struct the command reads or writes.
    pub fn arg_size(self) -> usize {
        match self {
            Command::QueryCap => mem::size_of::<V4l2Capability>(),
            Command::CropCap => mem::size_of::<V4l2Cropcap>(),
            Command::GetCrop | Command::SetCrop => mem::size_of::<V4l2Crop>()
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Command::QueryCap => "query capability",
            Command::CropCap => "crop capability",
            Command::GetCrop => "get crop",
            Command::SetCrop => "set crop"
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sends one device-control command against an open device handle.
///
/// The call is synchronous. When it returns `Ok`, any response the driver
/// wrote into `arg` is complete.
pub trait Dispatch {
    type Error: Error + Send + Sync + 'static;

    /// # Safety
    ///
    /// `arg` must point to a live, writable value of the argument struct for
    /// `command` (see [`Command::arg_size`]).
    unsafe fn send(&self, command: Command, arg: *mut c_void) -> Result<(), Self::Error>;
}

impl Dispatch for BorrowedFd<'_> {
    type Error = Errno;

    unsafe fn send(&self, command: Command, arg: *mut c_void) -> Result<(), Errno> {
        send_to_fd(self.as_raw_fd(), command, arg)
    }
}

unsafe fn send_to_fd(fd: RawFd, command: Command, arg: *mut c_void) -> Result<(), Errno> {
    match command {
        Command::QueryCap => vidioc_querycap(fd, arg as *mut V4l2Capability)?,
        Command::CropCap => vidioc_cropcap(fd, arg as *mut V4l2Cropcap)?,
        Command::GetCrop => vidioc_g_crop(fd, arg as *mut V4l2Crop)?,
        Command::SetCrop => vidioc_s_crop(fd, arg as *const V4l2Crop)?
    };
    Ok(())
}

use nix::errno::Errno;
use std::{
    ffi::c_void,
    fs::File,
    io,
    os::fd::{
        AsFd,
        BorrowedFd
    },
    path::{
        Path,
        PathBuf
    }
};

mod error;
pub use error::DeviceControlError;

mod v4l2;
pub use v4l2::*;

/// An open video device node. The descriptor is closed when this is dropped.
pub struct VideoDevice {
    path: PathBuf,
    file: File
}

impl VideoDevice {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<VideoDevice> {
        let path = path.as_ref().to_path_buf();
        let file = File::options()
            .read(true)
            .write(true)
            .open(&path)?;
        log::debug!("opened {}", path.display());
        Ok(VideoDevice { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AsFd for VideoDevice {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl Dispatch for VideoDevice {
    type Error = Errno;

    unsafe fn send(&self, command: Command, arg: *mut c_void) -> Result<(), Errno> {
        self.as_fd().send(command, arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_devices::Rect;

    #[test]
    fn open_reports_missing_device() {
        let err = VideoDevice::open("/dev/does-not-exist/video0").err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    // /dev/null accepts the open but has no v4l2 ioctls.
    #[test]
    fn crop_commands_on_non_video_device_fail_with_errno() {
        let device = VideoDevice::open("/dev/null").unwrap();
        let err = get_crop_capability(&device).unwrap_err();
        assert_eq!(err.command(), Command::CropCap);
        assert_eq!(err.errno(), Some(Errno::ENOTTY));

        let err = set_crop_rect(&device, Rect::new(0, 0, 640, 480)).unwrap_err();
        assert_eq!(err.command(), Command::SetCrop);
        assert!(err.errno().is_some());
    }
}

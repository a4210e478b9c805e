use nix::errno::Errno;
use std::error::Error;
use super::v4l2::Command;

/// A device-control command failed. Carries the command that was sent and
/// whatever the dispatch primitive reported.
#[derive(Debug, thiserror::Error)]
#[error("{command}: {source}")]
pub struct DeviceControlError {
    command: Command,
    #[source]
    source: Box<dyn Error + Send + Sync + 'static>
}

impl DeviceControlError {
    pub fn new<E>(command: Command, source: E) -> DeviceControlError
        where E: Error + Send + Sync + 'static
    {
        DeviceControlError {
            command,
            source: Box::new(source)
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The OS error number, when the failure came from the `ioctl` itself.
    /// `ENOTTY` and `ENODATA` mean the driver does not support cropping,
    /// `EBADF` an invalid handle.
    pub fn errno(&self) -> Option<Errno> {
        self.source.downcast_ref::<Errno>().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_command_and_cause() {
        let err = DeviceControlError::new(Command::CropCap, Errno::EBUSY);
        let msg = err.to_string();
        assert!(msg.starts_with("crop capability: "), "{msg}");
        assert!(msg.contains("EBUSY"), "{msg}");
        assert_eq!(err.command(), Command::CropCap);
    }

    #[test]
    fn errno_is_recovered_from_os_errors() {
        let err = DeviceControlError::new(Command::SetCrop, Errno::ENOTTY);
        assert_eq!(err.errno(), Some(Errno::ENOTTY));
    }

    #[test]
    fn errno_is_absent_for_other_causes() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "device busy");
        let err = DeviceControlError::new(Command::SetCrop, cause);
        assert_eq!(err.errno(), None);
        assert_eq!(err.to_string(), "set crop: device busy");
        assert!(err.source().is_some());
    }
}

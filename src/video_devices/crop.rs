//! User-space crop types. `Rect` and `Fract` are laid out exactly like the
//! kernel's `v4l2_rect` and `v4l2_fract`, so they are embedded as-is in the
//! ioctl request structures.
use std::fmt;

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/dev-overlay.html#c.v4l2_rect

#[repr(C)]
#[derive(Copy, Clone, Default)]
#[derive(PartialEq, Eq, Hash)]
#[derive(Debug)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32
}

impl Rect {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Rect {
        Rect { left, top, width, height }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{left={}, top={}, width={}, height={}}}",
            self.left, self.top, self.width, self.height)
    }
}

// https://www.kernel.org/doc/html/latest/userspace-api/media/v4l/vidioc-enumstd.html#c.v4l2_fract

/// Pixel aspect ratio. A zero denominator is carried through untouched.
#[repr(C)]
#[derive(Copy, Clone, Default)]
#[derive(PartialEq, Eq, Hash)]
#[derive(Debug)]
pub struct Fract {
    pub numerator: u32,
    pub denominator: u32
}

impl Fract {
    pub fn new(numerator: u32, denominator: u32) -> Fract {
        Fract { numerator, denominator }
    }
}

impl fmt::Display for Fract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.numerator, self.denominator)
    }
}

/// Cropping limits of one stream of a device, as reported by `VIDIOC_CROPCAP`.
///
/// The leading fields share their offsets with the kernel's `v4l2_cropcap`.
/// The trailing reserved words are always zero and are never read.
#[repr(C)]
#[derive(Copy, Clone)]
#[derive(PartialEq, Eq)]
#[derive(Debug)]
pub struct CropCapability {
    pub stream_type: u32,
    pub bounds: Rect,
    pub default_rect: Rect,
    pub pixel_aspect: Fract,
    reserved: [u32; 4]
}

impl CropCapability {
    pub fn new(stream_type: u32, bounds: Rect, default_rect: Rect, pixel_aspect: Fract) -> CropCapability {
        CropCapability {
            stream_type,
            bounds,
            default_rect,
            pixel_aspect,
            reserved: [0; 4]
        }
    }
}

impl fmt::Display for CropCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "default: {}; bounds: {}; pixel-aspect: {}",
            self.default_rect, self.bounds, self.pixel_aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn sizes_match_kernel_structs() {
        assert_eq!(mem::size_of::<Rect>(), 16);
        assert_eq!(mem::size_of::<Fract>(), 8);
        assert_eq!(mem::size_of::<CropCapability>(), 60);
    }

    #[test]
    fn reserved_words_are_zero_after_construction() {
        let cap = CropCapability::new(
            1,
            Rect::new(-8, -4, 1936, 1088),
            Rect::new(0, 0, 1920, 1080),
            Fract::new(54, 59));
        assert_eq!(cap.reserved, [0; 4]);
    }

    #[test]
    fn renders_default_bounds_and_aspect() {
        let cap = CropCapability::new(
            1,
            Rect::new(-2, 3, 2592, 1944),
            Rect::new(16, 12, 2560, 1920),
            Fract::new(11, 10));
        assert_eq!(
            cap.to_string(),
            "default: {left=16, top=12, width=2560, height=1920}; \
             bounds: {left=-2, top=3, width=2592, height=1944}; \
             pixel-aspect: 11:10");
    }

    #[test]
    fn zero_denominator_renders_without_panicking() {
        assert_eq!(Fract::new(1, 0).to_string(), "1:0");
    }
}

/// One 24-bit sample, fields in on-disk BMP byte order (blue, green, red).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    /// Construct from red, green, blue (reading order, not storage order).
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { blue, green, red }
    }

    /// Build from a 3-byte BGR triple as stored in the file.
    pub(crate) fn from_bgr_bytes(b: &[u8]) -> Self {
        Self {
            blue: b[0],
            green: b[1],
            red: b[2],
        }
    }

    /// Bytes in on-disk order.
    pub fn to_bgr_bytes(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::Bgr<u8> {
    fn from(p: Pixel) -> Self {
        rgb::Bgr {
            b: p.blue,
            g: p.green,
            r: p.red,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::Bgr<u8>> for Pixel {
    fn from(p: rgb::Bgr<u8>) -> Self {
        Self {
            blue: p.b,
            green: p.g,
            red: p.r,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::Rgb<u8> {
    fn from(p: Pixel) -> Self {
        rgb::Rgb {
            r: p.red,
            g: p.green,
            b: p.blue,
        }
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::Rgb<u8>> for Pixel {
    fn from(p: rgb::Rgb<u8>) -> Self {
        Self::rgb(p.r, p.g, p.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_order_is_bgr() {
        let p = Pixel::rgb(10, 20, 30);
        assert_eq!(p.to_bgr_bytes(), [30, 20, 10]);
        assert_eq!(Pixel::from_bgr_bytes(&[30, 20, 10]), p);
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb_conversions_keep_channels() {
        let p = Pixel::rgb(1, 2, 3);
        let c: rgb::Rgb<u8> = p.into();
        assert_eq!((c.r, c.g, c.b), (1, 2, 3));
        let d: rgb::Bgr<u8> = p.into();
        assert_eq!((d.b, d.g, d.r), (3, 2, 1));
        assert_eq!(Pixel::from(d), p);
    }
}

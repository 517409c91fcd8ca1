/// Pixel memory layout of a raw buffer handed to or returned by the codec.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels()
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Layout for a QOI channel count, `None` unless 3 or 4.
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb8),
            4 => Some(Self::Rgba8),
            _ => None,
        }
    }
}

/// One RGBA pixel as the opcode state machines see it.
///
/// Equality goes through [`Rgba::pack`], never through the in-memory
/// representation.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Starting "previous pixel" for both encoder and decoder.
    pub const START: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read one pixel from an interleaved chunk of 3 or 4 bytes.
    /// RGB input is treated as fully opaque.
    #[inline]
    pub fn from_chunk(chunk: &[u8]) -> Self {
        match *chunk {
            [r, g, b, a] => Self::new(r, g, b, a),
            [r, g, b] => Self::new(r, g, b, 255),
            _ => Self::START,
        }
    }

    #[inline]
    pub const fn pack(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    #[cfg_attr(not(test), allow(dead_code))]
    #[inline]
    pub const fn unpack(v: u32) -> Self {
        let [r, g, b, a] = v.to_be_bytes();
        Self::new(r, g, b, a)
    }

    /// Slot in the 64-entry color cache: `(3r + 5g + 7b + 11a) mod 64`.
    #[inline]
    pub const fn hash(self) -> usize {
        (self.r as usize * 3 + self.g as usize * 5 + self.b as usize * 7 + self.a as usize * 11)
            % 64
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.pack().to_be_bytes()
    }
}

impl PartialEq for Rgba {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pack() == other.pack()
    }
}

impl Eq for Rgba {}

/// Typed pixels that a [`crate::DecodeOutput`] can be viewed as.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

/// Typed pixels the encoder accepts.
#[cfg(feature = "rgb")]
pub trait EncodePixel: Copy + 'static {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

#[cfg(feature = "rgb")]
impl EncodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl EncodePixel for rgb::RGBA8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgba8
    }
}

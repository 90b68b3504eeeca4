//! TIFF output options

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

#[derive(Debug, Clone)]
pub struct TiffOptions {
    pub compression: TiffCompression,
    /// Horizontal differencing before compression. Costs time, helps LZW
    /// and Deflate on smooth images.
    pub horizontal_predictor: bool,
}

impl Default for TiffOptions {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            horizontal_predictor: false,
        }
    }
}

impl TiffOptions {
    pub fn builder() -> TiffOptionsBuilder {
        TiffOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct TiffOptionsBuilder {
    compression: Option<TiffCompression>,
    horizontal_predictor: Option<bool>,
}

impl TiffOptionsBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn horizontal_predictor(mut self, enable: bool) -> Self {
        self.horizontal_predictor = Some(enable);
        self
    }

    pub fn build(self) -> TiffOptions {
        let default = TiffOptions::default();
        TiffOptions {
            compression: self.compression.unwrap_or(default.compression),
            horizontal_predictor: self.horizontal_predictor.unwrap_or(default.horizontal_predictor),
        }
    }
}

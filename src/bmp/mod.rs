//! Uncompressed 24-bit BMP output.
//!
//! Layout: a 14 byte [`BmpHeader`], a 40 byte [`BmpInfoHeader`], then pixel
//! rows bottom-to-top, each row left-to-right in BGR order and zero padded
//! to a multiple of four bytes. All multi-byte fields are little-endian.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::canvas::Canvas;
use crate::errors::BmpError;
use crate::geometry::RgbColor;

pub const BMP_HEADER_SIZE: u32 = 14;
pub const BMP_INFO_HEADER_SIZE: u32 = 40;
pub const BMP_DATA_OFFSET: u32 = BMP_HEADER_SIZE + BMP_INFO_HEADER_SIZE;
/// Only 24-bit RGB is written.
pub const BMP_BITS_PER_PIXEL: u16 = 24;
/// BI_RGB, no compression.
pub const BMP_COMPRESSION_NONE: u32 = 0;
const BYTES_PER_PIXEL: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl Default for BmpHeader {
    fn default() -> Self {
        BmpHeader {
            file_type: 0x4D42, // "BM"
            file_size: 0,
            reserved: 0,
            data_offset: BMP_DATA_OFFSET,
        }
    }
}

impl BmpHeader {
    pub fn to_bytes(&self) -> [u8; 14] {
        let mut out = [0u8; 14];
        out[0..2].copy_from_slice(&self.file_type.to_le_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..10].copy_from_slice(&self.reserved.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfoHeader {
    pub size: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub num_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_m: u32,
    pub y_pixels_per_m: u32,
    pub num_colors_used: u32,
    pub num_important_colors: u32,
}

impl Default for BmpInfoHeader {
    fn default() -> Self {
        BmpInfoHeader {
            size: BMP_INFO_HEADER_SIZE,
            image_width: 0,
            image_height: 0,
            num_planes: 1,
            bits_per_pixel: BMP_BITS_PER_PIXEL,
            compression: BMP_COMPRESSION_NONE,
            image_size: 0,
            x_pixels_per_m: 0,
            y_pixels_per_m: 0,
            num_colors_used: 0,
            num_important_colors: 0,
        }
    }
}

impl BmpInfoHeader {
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[0..4].copy_from_slice(&self.size.to_le_bytes());
        out[4..8].copy_from_slice(&self.image_width.to_le_bytes());
        out[8..12].copy_from_slice(&self.image_height.to_le_bytes());
        out[12..14].copy_from_slice(&self.num_planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_pixels_per_m.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_pixels_per_m.to_le_bytes());
        out[32..36].copy_from_slice(&self.num_colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.num_important_colors.to_le_bytes());
        out
    }
}

/// Bytes needed after `width` pixels to reach a four byte boundary.
pub fn row_padding(width: u32) -> u32 {
    let row_bytes = u64::from(width) * u64::from(BYTES_PER_PIXEL);
    ((4 - row_bytes % 4) % 4) as u32
}

/// Narrow a header size field, which BMP caps at 32 bits.
fn header_field(value: u64, width: u32, height: u32) -> Result<u32, BmpError> {
    u32::try_from(value).map_err(|_| BmpError::TooLarge { width, height })
}

/// # BmpImage
///
/// A borrowed view of a row-major RGB pixel buffer (row 0 on top) together
/// with the headers needed to write it out as a BMP file.
///
/// # Example
///
/// ```rust
/// use lsys_render::bmp::BmpImage;
/// use lsys_render::geometry::RgbColor;
///
/// let pixels = vec![RgbColor::WHITE; 6];
/// let image = BmpImage::new(&pixels, 3, 2).unwrap();
/// let mut bytes = Vec::new();
/// image.write_to(&mut bytes).unwrap();
/// assert_eq!(&bytes[0..2], b"BM");
/// assert_eq!(bytes.len(), 54 + 2 * 12);
/// ```
#[derive(Clone, Debug)]
pub struct BmpImage<'a> {
    header: BmpHeader,
    info_header: BmpInfoHeader,
    pixels: &'a [RgbColor],
    padding_size: u32,
}

impl<'a> BmpImage<'a> {
    pub fn new(pixels: &'a [RgbColor], width: u32, height: u32) -> Result<BmpImage<'a>, BmpError> {
        let mut image = BmpImage {
            header: BmpHeader::default(),
            info_header: BmpInfoHeader::default(),
            pixels: &[],
            padding_size: 0,
        };
        image.set_pixels(pixels, width, height)?;
        Ok(image)
    }

    /// Borrow the pixels of an allocated canvas.
    pub fn from_canvas(canvas: &'a Canvas) -> Result<BmpImage<'a>, BmpError> {
        BmpImage::new(canvas.pixels()?, canvas.width(), canvas.height())
    }

    /// Attach pixel data and derive the size fields of both headers from it.
    pub fn set_pixels(
        &mut self,
        pixels: &'a [RgbColor],
        width: u32,
        height: u32,
    ) -> Result<(), BmpError> {
        let padding_size = row_padding(width);
        let (w, h, pad) = (u64::from(width), u64::from(height), u64::from(padding_size));
        let bpp = u64::from(BYTES_PER_PIXEL);
        let image_size = header_field((w * bpp + pad) * h, width, height)?;
        let file_size = header_field(
            u64::from(BMP_DATA_OFFSET) + bpp * (w + pad) * h,
            width,
            height,
        )?;

        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BmpError::PixelCountMismatch {
                expected,
                found: pixels.len(),
            });
        }
        self.pixels = pixels;
        self.padding_size = padding_size;
        self.info_header.image_width = width;
        self.info_header.image_height = height;
        self.info_header.image_size = image_size;
        self.header.file_size = file_size;
        Ok(())
    }

    /// Encode the whole file into `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(&self.header.to_bytes())?;
        out.write_all(&self.info_header.to_bytes())?;

        let width = self.info_header.image_width as usize;
        let padding = [0u8; 3];
        let mut row_bytes = Vec::with_capacity(width * 3 + self.padding_size as usize);
        if width > 0 {
            for row in self.pixels.chunks_exact(width).rev() {
                row_bytes.clear();
                for pixel in row {
                    row_bytes.extend_from_slice(&pixel.to_bgr());
                }
                row_bytes.extend_from_slice(&padding[..self.padding_size as usize]);
                out.write_all(&row_bytes)?;
            }
        }
        out.flush()
    }

    /// Write the image to `path`, truncating whatever was there.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BmpError> {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);
        self.write_to(&mut file)?;
        info!(
            path = %path.display(),
            width = self.info_header.image_width,
            height = self.info_header.image_height,
            "wrote bitmap"
        );
        Ok(())
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn info_header(&self) -> &BmpInfoHeader {
        &self.info_header
    }

    pub fn pixels(&self) -> &[RgbColor] {
        self.pixels
    }

    pub fn padding_size(&self) -> u32 {
        self.padding_size
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Bounds2d, Point2d};

    const RED: RgbColor = RgbColor::new(255, 0, 0);
    const GREEN: RgbColor = RgbColor::new(0, 255, 0);
    const BLUE: RgbColor = RgbColor::new(0, 0, 255);

    fn le32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    fn le16(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    #[test]
    fn test_row_padding() {
        assert_eq!(row_padding(1), 1);
        assert_eq!(row_padding(2), 2);
        assert_eq!(row_padding(3), 3);
        assert_eq!(row_padding(4), 0);
        assert_eq!(row_padding(400), 0);
        assert_eq!(row_padding(u32::MAX), 3);
    }

    #[test]
    fn test_dimensions_beyond_header_fields() {
        // A single row of this width already needs more than 4 GiB.
        assert!(matches!(
            BmpImage::new(&[], 0x6000_0000, 1),
            Err(BmpError::TooLarge {
                width: 0x6000_0000,
                height: 1
            })
        ));
        assert!(matches!(
            BmpImage::new(&[], 0x10000, 0x10000),
            Err(BmpError::TooLarge { .. })
        ));
        // Zero pixels still fit, and still have to match the pixel count.
        assert!(matches!(
            BmpImage::new(&[], 1, 1),
            Err(BmpError::PixelCountMismatch { .. })
        ));
    }

    #[test]
    fn test_two_by_two_layout() {
        // Top row red, green; bottom row blue, white.
        let pixels = vec![RED, GREEN, BLUE, RgbColor::WHITE];
        let image = BmpImage::new(&pixels, 2, 2).unwrap();
        assert_eq!(image.padding_size(), 2);

        let mut bytes = Vec::new();
        image.write_to(&mut bytes).unwrap();

        // File header.
        assert_eq!(&bytes[0..2], b"BM");
        assert_eq!(le32(&bytes, 2), 54 + 3 * (2 + 2) * 2);
        assert_eq!(le32(&bytes, 6), 0);
        assert_eq!(le32(&bytes, 10), 54);

        // Info header.
        assert_eq!(le32(&bytes, 14), 40);
        assert_eq!(le32(&bytes, 18), 2);
        assert_eq!(le32(&bytes, 22), 2);
        assert_eq!(le16(&bytes, 26), 1);
        assert_eq!(le16(&bytes, 28), 24);
        assert_eq!(le32(&bytes, 30), 0);
        assert_eq!(le32(&bytes, 34), 16);
        for field in (38..54).step_by(4) {
            assert_eq!(le32(&bytes, field), 0);
        }

        // Two rows of 8 bytes, bottom row first, BGR.
        assert_eq!(bytes.len(), 54 + 16);
        assert_eq!(&bytes[54..62], &[255, 0, 0, 255, 255, 255, 0, 0]);
        assert_eq!(&bytes[62..70], &[0, 0, 255, 0, 255, 0, 0, 0]);
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let pixels = vec![RED; 3];
        assert!(matches!(
            BmpImage::new(&pixels, 2, 2),
            Err(BmpError::PixelCountMismatch {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_unallocated_canvas() {
        let canvas = Canvas::new(Bounds2d::default(), 4, 4).unwrap();
        assert!(matches!(
            BmpImage::from_canvas(&canvas),
            Err(BmpError::Canvas(_))
        ));
    }

    #[test]
    fn test_write_to_file_is_readable() {
        let mut canvas = Canvas::new(Bounds2d::new(0.0, 0.0, 5.0, 3.0), 5, 3).unwrap();
        canvas.allocate_pixels();
        canvas.draw_line(Point2d::new(0.0, 0.0), 4.0, 0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.bmp");
        std::fs::write(&path, b"stale contents that must be truncated away").unwrap();
        BmpImage::from_canvas(&canvas)
            .unwrap()
            .write_to_file(&path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 54 + (5 * 3 + 1) * 3);

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (5, 3));
        assert_eq!(decoded, canvas.to_rgb_image().unwrap());
        assert_eq!(decoded.get_pixel(0, 2), &image::Rgb([255, 255, 255]));
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pixels = vec![RED; 1];
        let image = BmpImage::new(&pixels, 1, 1).unwrap();
        let result = image.write_to_file(dir.path().join("nope").join("out.bmp"));
        assert!(matches!(result, Err(BmpError::Io(_))));
    }
}

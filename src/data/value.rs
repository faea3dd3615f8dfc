//! Numeric cell types a raster can store.

/// A primitive numeric value that can live in a [`RingRaster`](super::raster::RingRaster).
///
/// `Default` must be the zero value; it fills unwritten rows.
pub trait RasterValue: Copy + Default + PartialOrd + std::fmt::Debug + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! impl_raster_value {
    ($($t:ty),*) => {
        $(
            impl RasterValue for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_raster_value!(f32, f64, u8, u16, u32, u64, i8, i16, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zero() {
        assert_eq!(f32::default().to_f64(), 0.0);
        assert_eq!(i16::default().to_f64(), 0.0);
        assert_eq!(u8::default().to_f64(), 0.0);
    }

    #[test]
    fn converts_integers_exactly() {
        assert_eq!(255u8.to_f64(), 255.0);
        assert_eq!((-32768i16).to_f64(), -32768.0);
    }
}

pub use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};

/// Largest [`FixedWidth::WIDTH`] of any implementor.
pub(crate) const MAX_WIDTH: usize = 16;

/// A number with a fixed-size binary representation.
///
/// `bytes` is always exactly [`FixedWidth::WIDTH`] long. Byte swapping is
/// left to [`ByteOrder`], which only swaps when the order differs from the
/// host's.
pub trait FixedWidth: Copy {
    /// Size in bytes.
    const WIDTH: usize;

    /// Decodes from `bytes` stored in order `B`.
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self;

    /// Encodes into `bytes` in order `B`.
    fn to_bytes<B: ByteOrder>(self, bytes: &mut [u8]);
}

impl FixedWidth for u8 {
    const WIDTH: usize = 1;

    #[inline]
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn to_bytes<B: ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }
}

impl FixedWidth for i8 {
    const WIDTH: usize = 1;

    #[inline]
    fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
        i8::from_ne_bytes([bytes[0]])
    }

    #[inline]
    fn to_bytes<B: ByteOrder>(self, bytes: &mut [u8]) {
        bytes[0] = self.to_ne_bytes()[0];
    }
}

macro_rules! impl_fixed_width {
    ($($t:ty => $read:ident, $write:ident);* $(;)?) => {
        $(
            impl FixedWidth for $t {
                const WIDTH: usize = core::mem::size_of::<$t>();

                #[inline]
                fn from_bytes<B: ByteOrder>(bytes: &[u8]) -> Self {
                    B::$read(bytes)
                }

                #[inline]
                fn to_bytes<B: ByteOrder>(self, bytes: &mut [u8]) {
                    B::$write(bytes, self);
                }
            }
        )*
    };
}

impl_fixed_width! {
    u16 => read_u16, write_u16;
    i16 => read_i16, write_i16;
    u32 => read_u32, write_u32;
    i32 => read_i32, write_i32;
    u64 => read_u64, write_u64;
    i64 => read_i64, write_i64;
    u128 => read_u128, write_u128;
    i128 => read_i128, write_i128;
    f32 => read_f32, write_f32;
    f64 => read_f64, write_f64;
}

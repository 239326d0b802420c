// Copyright (c) 2018-2022 The Botho Foundation

//! Fixed-order binary writers.

/// A value with a statically known serialized length.
///
/// Writing such a value through [`Writer::write_fixed_bytes`] checks that the
/// bytes it exposes have exactly [`AsFixedBytes::LEN`] bytes.
pub trait AsFixedBytes: AsRef<[u8]> {
    /// The exact number of bytes this value serializes to.
    const LEN: usize;
}

impl<const N: usize> AsFixedBytes for [u8; N] {
    const LEN: usize = N;
}

/// A sink accepting an ordered stream of primitive writes.
///
/// Integers are written big-endian.
pub trait Writer {
    /// Append raw bytes, without any framing.
    fn write_raw(&mut self, bytes: &[u8]);

    /// Append a single byte.
    fn write_u8(&mut self, n: u8) {
        self.write_raw(&[n]);
    }

    /// Append a big-endian u32.
    fn write_u32(&mut self, n: u32) {
        self.write_raw(&n.to_be_bytes());
    }

    /// Append a big-endian u64.
    fn write_u64(&mut self, n: u64) {
        self.write_raw(&n.to_be_bytes());
    }

    /// Append a big-endian i64.
    fn write_i64(&mut self, n: i64) {
        self.write_raw(&n.to_be_bytes());
    }

    /// Append a variable-length byte string, prefixed by its length as a u64.
    fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_u64(bytes.len() as u64);
        self.write_raw(bytes);
    }

    /// Append a fixed-size value.
    ///
    /// # Panics
    ///
    /// If the value exposes a number of bytes other than `T::LEN`. A
    /// fixed-size value of the wrong size is a programming error.
    fn write_fixed_bytes<T: AsFixedBytes>(&mut self, value: &T) {
        let bytes = value.as_ref();
        assert_eq!(
            bytes.len(),
            T::LEN,
            "fixed-size write of {} bytes, expected {}",
            bytes.len(),
            T::LEN
        );
        self.write_raw(bytes);
    }
}

/// An object which writes its fields, in a fixed order, to a [`Writer`].
pub trait Writeable {
    /// Write this object's fields.
    fn write<W: Writer>(&self, writer: &mut W);
}

impl<T: Writeable + ?Sized> Writeable for &T {
    fn write<W: Writer>(&self, writer: &mut W) {
        (**self).write(writer)
    }
}

impl Writeable for u64 {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u64(*self)
    }
}

impl Writeable for u32 {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u32(*self)
    }
}

impl<T: Writeable> Writeable for [T] {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u64(self.len() as u64);
        for item in self {
            item.write(writer);
        }
    }
}

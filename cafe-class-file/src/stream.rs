use std::io::{self, Cursor, Read};

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    item::{ClassFileItem, ConstantPool},
};

/// A forward-only, big-endian reader over a class file or over a bounded
/// slice of one.
///
/// `tell` is relative to the start of this stream. `absolute` is the offset
/// in the whole input and is what errors report.
pub struct ClassFileStream<R: Read> {
    reader: R,
    position: usize,
    origin: usize,
    /// How many `sub_stream` calls this stream is nested in.
    depth: usize,
}

/// A stream over exactly the bytes of one attribute or method body.
pub type SubStream = ClassFileStream<Cursor<Vec<u8>>>;

impl<R: Read> ClassFileStream<R> {
    /// Create a new stream from a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            origin: 0,
            depth: 0,
        }
    }

    /// Bytes consumed from this stream so far.
    pub fn tell(&self) -> usize {
        self.position
    }

    /// Offset of the cursor within the whole input.
    pub fn absolute(&self) -> usize {
        self.origin + self.position
    }

    /// Offset within the whole input at which this stream starts.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Zero for the outermost stream, one more for each enclosing `sub_stream`.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Build an error located at the current cursor.
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, self.absolute())
    }

    /// Read a sequence of `length` `T`s from this stream.
    pub fn read_sequence<T: ClassFileItem>(
        &mut self,
        constant_pool: Option<&ConstantPool>,
        length: usize,
    ) -> error::Result<Vec<T>> {
        let mut v = Vec::with_capacity(length);
        for _ in 0..length {
            v.push(T::read_from_stream(self, constant_pool)?);
        }
        Ok(v)
    }

    /// Read an unsigned 4-byte integer from the stream.
    pub fn read_u4(&mut self) -> error::Result<u32> {
        Ok(u32::from_be_bytes(self.read::<4>()?))
    }

    /// Read an unsigned 2-byte integer from the stream.
    pub fn read_u2(&mut self) -> error::Result<u16> {
        Ok(u16::from_be_bytes(self.read::<2>()?))
    }

    /// Read an unsigned byte from the stream.
    pub fn read_u1(&mut self) -> error::Result<u8> {
        Ok(self.read::<1>()?[0])
    }

    /// Read a signed 4-byte integer from the stream.
    pub fn read_s4(&mut self) -> error::Result<i32> {
        Ok(i32::from_be_bytes(self.read::<4>()?))
    }

    pub fn read_s2(&mut self) -> error::Result<i16> {
        Ok(i16::from_be_bytes(self.read::<2>()?))
    }

    pub fn read_s1(&mut self) -> error::Result<i8> {
        Ok(i8::from_be_bytes(self.read::<1>()?))
    }

    /// Utility method to read `S` bytes from the stream.
    pub fn read<const S: usize>(&mut self) -> error::Result<[u8; S]> {
        let mut w = [0; S];
        match self.reader.read_exact(&mut w) {
            Ok(()) => {
                self.position += S;
                Ok(w)
            }
            Err(e) => Err(self.read_failure(e, S)),
        }
    }

    /// Read exactly `length` bytes.
    ///
    /// The buffer grows with the data actually present, so a bogus length
    /// near `u32::MAX` fails as truncated input instead of allocating it.
    pub fn read_bytes(&mut self, length: usize) -> error::Result<Vec<u8>> {
        let mut w = Vec::new();
        let result = (&mut self.reader).take(length as u64).read_to_end(&mut w);
        let read = result.map_err(|e| self.read_failure(e, length))?;
        if read < length {
            return Err(self.error(DecodeErrorKind::TruncatedInput { requested: length }));
        }
        self.position += length;
        Ok(w)
    }

    /// Read and discard `length` bytes.
    pub fn skip(&mut self, length: usize) -> error::Result<()> {
        self.read_bytes(length).map(drop)
    }

    /// Take the next `length` bytes as an independent stream.
    ///
    /// The returned stream reports `tell()` from zero and `absolute()`
    /// continuing from this stream's offset.
    pub fn sub_stream(&mut self, length: usize) -> error::Result<SubStream> {
        let origin = self.absolute();
        let bytes = self.read_bytes(length)?;
        Ok(ClassFileStream {
            reader: Cursor::new(bytes),
            position: 0,
            origin,
            depth: self.depth + 1,
        })
    }

    /// Whether the reader has no bytes left. Consumes at most one byte.
    pub fn at_end(&mut self) -> error::Result<bool> {
        let mut probe = [0; 1];
        loop {
            match self.reader.read(&mut probe) {
                Ok(0) => return Ok(true),
                Ok(_) => return Ok(false),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.error(DecodeErrorKind::Io(e))),
            }
        }
    }

    fn read_failure(&self, e: io::Error, requested: usize) -> DecodeError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            self.error(DecodeErrorKind::TruncatedInput { requested })
        } else {
            self.error(DecodeErrorKind::Io(e))
        }
    }
}

impl SubStream {
    /// Bytes this stream was created with.
    pub fn len(&self) -> usize {
        self.reader.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes not consumed yet.
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position)
    }
}

impl ClassFileItem for u8 {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized {
        s.read_u1()
    }
}

impl ClassFileItem for u16 {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized {
        s.read_u2()
    }
}

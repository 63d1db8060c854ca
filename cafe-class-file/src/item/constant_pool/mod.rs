use std::{borrow::Cow, io::Read};

use cesu8_str::java as cesu8_java;
use log::debug;

use crate::{
    error::{self, DecodeError, DecodeErrorKind, PoolError},
    stream::ClassFileStream,
};

pub use self::entry::{tags, ConstantPoolEntry, RefKind};

use super::ClassFileItem;

mod entry;

/// The constant pool.
///
/// Indexed from 1 like the file format: slot 0 and the slot after every
/// `Long` or `Double` hold [`ConstantPoolEntry::Unusable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantPool {
    entries: Vec<ConstantPoolEntry>,
}

impl ClassFileItem for ConstantPool {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        let count = s.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count.max(1));
        entries.push(ConstantPoolEntry::Unusable);
        while entries.len() < count {
            let at = s.absolute();
            let entry = ConstantPoolEntry::read_from_stream(s, cp)?;
            let wide = entry.is_wide();
            entries.push(entry);
            if wide {
                // the reserved slot must also fit below the count
                if entries.len() >= count {
                    let index = entries.len() - 1;
                    return Err(DecodeError::new(
                        DecodeErrorKind::ConstantPoolOverflow { index, count },
                        at,
                    ));
                }
                entries.push(ConstantPoolEntry::Unusable);
            }
        }
        debug!("constant pool: {} slots", entries.len());
        Ok(Self { entries })
    }
}

impl ConstantPool {
    /// Build a pool from its logical entries, inserting the reserved slots.
    pub fn from_entries(logical: impl IntoIterator<Item = ConstantPoolEntry>) -> Self {
        let mut entries = vec![ConstantPoolEntry::Unusable];
        for entry in logical {
            let wide = entry.is_wide();
            entries.push(entry);
            if wide {
                entries.push(ConstantPoolEntry::Unusable);
            }
        }
        Self { entries }
    }

    /// Number of slots, including slot 0. Equals the count in the file.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// All slots with their indices, placeholders included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ConstantPoolEntry)> {
        self.entries.iter().enumerate()
    }

    /// The raw slot at `index`. Placeholders are returned as-is.
    pub fn slot(&self, index: usize) -> Result<&ConstantPoolEntry, PoolError> {
        self.entries.get(index).ok_or(PoolError::OutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// The constant at `index`. Fails on slot 0 and on placeholders.
    pub fn get_constant(&self, index: usize) -> Result<&ConstantPoolEntry, PoolError> {
        if index == 0 {
            return Err(PoolError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        match self.slot(index)? {
            ConstantPoolEntry::Unusable => Err(PoolError::Unusable(index)),
            entry => Ok(entry),
        }
    }

    /// The modified UTF-8 bytes of the `Utf8` constant at `index`.
    pub fn get_utf8(&self, index: usize) -> Result<&[u8], PoolError> {
        match self.get_constant(index)? {
            ConstantPoolEntry::Utf8 { bytes } => Ok(bytes),
            other => Err(unexpected(index, "Utf8", other)),
        }
    }

    /// The `Utf8` constant at `index`, decoded from modified UTF-8.
    pub fn get_str(&self, index: usize) -> Result<Cow<'_, str>, PoolError> {
        let bytes = self.get_utf8(index)?;
        let java = cesu8_java::JavaStr::from_java_cesu8(bytes)
            .map_err(|_| PoolError::InvalidModifiedUtf8(index))?;
        Ok(cesu8_java::from_java_cesu8(java))
    }

    /// The internal name of the `Class` constant at `index`.
    pub fn class_name(&self, index: usize) -> Result<Cow<'_, str>, PoolError> {
        match self.get_constant(index)? {
            ConstantPoolEntry::Class { name_index } => self.get_str(*name_index as usize),
            other => Err(unexpected(index, "Class", other)),
        }
    }

    /// Name and descriptor of the `NameAndType` constant at `index`.
    pub fn name_and_type(&self, index: usize) -> Result<(Cow<'_, str>, Cow<'_, str>), PoolError> {
        match self.get_constant(index)? {
            ConstantPoolEntry::NameAndType {
                name_index,
                descriptor_index,
            } => Ok((
                self.get_str(*name_index as usize)?,
                self.get_str(*descriptor_index as usize)?,
            )),
            other => Err(unexpected(index, "NameAndType", other)),
        }
    }
}

fn unexpected(index: usize, expected: &'static str, found: &ConstantPoolEntry) -> PoolError {
    PoolError::UnexpectedKind {
        index,
        expected,
        found: found.kind_name(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn read(bytes: &[u8]) -> error::Result<ConstantPool> {
        ConstantPool::read_from_stream(&mut ClassFileStream::new(Cursor::new(bytes)), None)
    }

    #[test]
    fn wide_constants_take_two_slots() {
        let pool = read(&[
            0x00, 0x06,
            0x05, 0, 0, 0, 1, 0, 0, 0, 2, // Long
            0x01, 0x00, 0x01, b'x',
            0x06, 0, 0, 0, 0, 0, 0, 0, 0, // Double
        ]);
        let pool = pool.unwrap();
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.slot(0).unwrap(), &ConstantPoolEntry::Unusable);
        assert_eq!(pool.get_constant(1).unwrap().as_i64(), Some((1 << 32) | 2));
        assert_eq!(pool.slot(2).unwrap(), &ConstantPoolEntry::Unusable);
        assert_eq!(pool.get_utf8(3).unwrap(), b"x");
        assert!(pool.get_constant(4).unwrap().is_wide());
        assert_eq!(pool.get_constant(2), Err(PoolError::Unusable(2)));
    }

    #[test]
    fn pool_length_matches_count() {
        let pool = read(&[
            0x00, 0x06,
            0x07, 0x00, 0x02, // Class #2
            0x01, 0x00, 0x03, b'F', b'o', b'o',
            0x06, 0x40, 0x09, 0x21, 0xfb, 0x54, 0x44, 0x2d, 0x18, // Double pi
            0x03, 0xff, 0xff, 0xff, 0xff, // Integer -1
        ])
        .unwrap();
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.slot(4).unwrap(), &ConstantPoolEntry::Unusable);
        assert_eq!(pool.get_constant(3).unwrap().as_f64(), Some(std::f64::consts::PI));
        assert_eq!(pool.get_constant(5).unwrap().as_i32(), Some(-1));
        assert_eq!(pool.class_name(1).unwrap(), "Foo");
    }

    #[test]
    fn wide_constant_in_the_last_slot_overflows() {
        let err = read(&[
            0x00, 0x02,
            0x05, 0, 0, 0, 0, 0, 0, 0, 1, // Long with no room for its second slot
        ])
        .unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::ConstantPoolOverflow { index: 1, count: 2 }
        ));
        assert_eq!(err.offset, 2);

        let err = read(&[
            0x00, 0x03,
            0x01, 0x00, 0x01, b'x',
            0x06, 0, 0, 0, 0, 0, 0, 0, 0, // Double at index 2
        ])
        .unwrap_err();
        assert!(matches!(
            err.kind,
            DecodeErrorKind::ConstantPoolOverflow { index: 2, count: 3 }
        ));
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn unknown_tag_reports_its_offset() {
        let err = read(&[0x00, 0x03, 0x01, 0x00, 0x00, 0x02]).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::UnknownConstantTag(2)));
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn truncated_pool_fails() {
        let err = read(&[0x00, 0x02, 0x01, 0x00, 0x04, b'a']).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::TruncatedInput { requested: 4 }));
    }

    #[test]
    fn lookups_fail_instead_of_defaulting() {
        let pool = ConstantPool::from_entries([
            ConstantPoolEntry::Utf8 { bytes: b"a".to_vec() },
            ConstantPoolEntry::Integer { bytes: 7 },
        ]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get_constant(0), Err(PoolError::OutOfRange { index: 0, len: 3 }));
        assert_eq!(pool.get_constant(3), Err(PoolError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(
            pool.get_utf8(2),
            Err(PoolError::UnexpectedKind {
                index: 2,
                expected: "Utf8",
                found: "Integer"
            })
        );
        assert_eq!(
            pool.class_name(1),
            Err(PoolError::UnexpectedKind {
                index: 1,
                expected: "Class",
                found: "Utf8"
            })
        );
    }

    #[test]
    fn name_and_type_resolves_both_halves() {
        let pool = ConstantPool::from_entries([
            ConstantPoolEntry::Utf8 { bytes: b"run".to_vec() },
            ConstantPoolEntry::Utf8 { bytes: b"()V".to_vec() },
            ConstantPoolEntry::NameAndType {
                name_index: 1,
                descriptor_index: 2,
            },
            ConstantPoolEntry::NameAndType {
                name_index: 1,
                descriptor_index: 9,
            },
        ]);
        let (name, descriptor) = pool.name_and_type(3).unwrap();
        assert_eq!((&*name, &*descriptor), ("run", "()V"));
        assert_eq!(pool.name_and_type(4), Err(PoolError::OutOfRange { index: 9, len: 5 }));
        assert!(matches!(
            pool.name_and_type(1),
            Err(PoolError::UnexpectedKind { expected: "NameAndType", .. })
        ));
    }

    #[test]
    fn modified_utf8_is_decoded() {
        let pool = ConstantPool::from_entries([
            // "a\0b" with the two-byte NUL, then U+1F600 as a surrogate pair
            ConstantPoolEntry::Utf8 {
                bytes: vec![b'a', 0xc0, 0x80, b'b'],
            },
            ConstantPoolEntry::Utf8 {
                bytes: vec![0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80],
            },
            ConstantPoolEntry::Utf8 { bytes: vec![0xff] },
        ]);
        assert_eq!(pool.get_str(1).unwrap(), "a\0b");
        assert_eq!(pool.get_str(2).unwrap(), "\u{1F600}");
        assert_eq!(pool.get_str(3), Err(PoolError::InvalidModifiedUtf8(3)));
    }

    #[test]
    fn method_handle_kind() {
        let handle = ConstantPoolEntry::MethodHandle {
            reference_kind: 6,
            reference_index: 1,
        };
        assert_eq!(handle.ref_kind(), Some(RefKind::REF_invokeStatic));
        let bogus = ConstantPoolEntry::MethodHandle {
            reference_kind: 0,
            reference_index: 1,
        };
        assert_eq!(bogus.ref_kind(), None);
    }
}

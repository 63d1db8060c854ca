use std::{borrow::Cow, io::Read};

use log::debug;

use crate::{
    error::{self, DecodeErrorKind, PoolError},
    stream::ClassFileStream,
};

use super::{
    attribute_info::AttributesCollection,
    member::{FieldInfo, MethodInfo},
};
pub use super::{constant_pool::ConstantPool, ClassFileItem};

/// The magic number of a class file.
pub const CLASS_MAGIC: u32 = 0xCAFEBABE;

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClassAccessFlags: u16 {
        /// Declared public; may be accessed from outside its package.
        const ACC_PUBLIC = 0x0001;
        /// Declared final; no subclasses allowed.
        const ACC_FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by the invokespecial instruction.
        const ACC_SUPER = 0x0020;
        /// Is an interface, not a class.
        const ACC_INTERFACE = 0x0200;
        /// Declared abstract; must not be instantiated.
        const ACC_ABSTRACT = 0x0400;
        /// Declared synthetic; not present in the source code.
        const ACC_SYNTHETIC = 0x1000;
        /// Declared as an annotation type.
        const ACC_ANNOTATION = 0x2000;
        /// Declared as an enum type.
        const ACC_ENUM = 0x4000;
        /// Is a module, not a class or interface.
        const ACC_MODULE = 0x8000;
    }
}

/// A class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: ClassAccessFlags,
    /// The `Class` constant for the class this file defines.
    pub this_class: u16,
    /// The `Class` constant for the direct superclass, or zero for
    /// `java/lang/Object`.
    pub super_class: u16,
    /// Direct superinterfaces as `Class` constants, in source order.
    pub interfaces: Vec<u16>,
    /// Fields declared by this class. Inherited fields are not included.
    pub fields: Vec<FieldInfo>,
    /// Methods declared by this class, initialisers included.
    pub methods: Vec<MethodInfo>,
    pub attributes: AttributesCollection,
}

impl ClassFile {
    /// Decode a whole class file. Bytes left after the class attributes
    /// are an error.
    pub fn from_bytes(bytes: &[u8]) -> error::Result<Self> {
        let mut s = ClassFileStream::new(bytes);
        let class = Self::read_from_stream(&mut s, None)?;
        if !s.at_end()? {
            return Err(s.error(DecodeErrorKind::TrailingBytes(bytes.len() - s.tell())));
        }
        Ok(class)
    }

    /// The internal name of this class, e.g. `java/lang/String`.
    pub fn this_class_name(&self) -> Result<Cow<'_, str>, PoolError> {
        self.constant_pool.class_name(self.this_class as usize)
    }

    /// The internal name of the superclass. `None` when there is none.
    pub fn super_class_name(&self) -> Result<Option<Cow<'_, str>>, PoolError> {
        if self.super_class == 0 {
            return Ok(None);
        }
        self.constant_pool.class_name(self.super_class as usize).map(Some)
    }

    /// The first method with the given name and descriptor.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| {
            matches!(m.name(&self.constant_pool), Ok(n) if n == name)
                && matches!(m.descriptor(&self.constant_pool), Ok(d) if d == descriptor)
        })
    }
}

impl ClassFileItem for ClassFile {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        // check magic number
        let at = s.absolute();
        let magic = s.read_u4()?;
        if magic != CLASS_MAGIC {
            return Err(error::DecodeError::new(DecodeErrorKind::MalformedHeader(magic), at));
        }

        // read file version
        let minor_version = s.read_u2()?;
        let major_version = s.read_u2()?;
        debug!("class file version {}.{}", major_version, minor_version);

        let constant_pool = ConstantPool::read_from_stream(s, None)?;

        let access_flags = ClassAccessFlags::from_bits_retain(s.read_u2()?);

        // read this class & super class
        let this_class = s.read_u2()?;
        let super_class = s.read_u2()?;

        let interfaces_count = s.read_u2()?;
        let interfaces = s.read_sequence::<u16>(Some(&constant_pool), interfaces_count as usize)?;

        let fields_count = s.read_u2()?;
        let fields = s.read_sequence(Some(&constant_pool), fields_count as usize)?;

        let methods_count = s.read_u2()?;
        let methods = s.read_sequence(Some(&constant_pool), methods_count as usize)?;
        debug!(
            "{} interfaces, {} fields, {} methods",
            interfaces_count, fields_count, methods_count
        );

        let attributes = AttributesCollection::read_from_stream(s, Some(&constant_pool))?;

        Ok(Self {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `Object`-like class: no super class, nothing declared.
    const EMPTY: &[u8] = &[
        0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x34,
        0x00, 0x03,
        0x07, 0x00, 0x02,
        0x01, 0x00, 0x01, b'A',
        0x00, 0x21, 0x00, 0x01, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn empty_class() {
        let class = ClassFile::from_bytes(EMPTY).unwrap();
        assert_eq!((class.major_version, class.minor_version), (52, 0));
        assert_eq!(class.access_flags, ClassAccessFlags::ACC_PUBLIC | ClassAccessFlags::ACC_SUPER);
        assert_eq!(class.this_class_name().unwrap(), "A");
        assert_eq!(class.super_class_name().unwrap(), None);
        assert!(class.methods.is_empty());
        assert!(class.method("main", "([Ljava/lang/String;)V").is_none());
    }

    #[test]
    fn bad_magic() {
        let mut bytes = EMPTY.to_vec();
        bytes[3] = 0xbf;
        let err = ClassFile::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::MalformedHeader(0xcafebabf)));
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = EMPTY.to_vec();
        bytes.extend([0, 0, 0]);
        let err = ClassFile::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::TrailingBytes(3)));
        assert_eq!(err.offset, EMPTY.len());

        // the streaming form stops after the class
        let mut s = ClassFileStream::new(&bytes[..]);
        ClassFile::read_from_stream(&mut s, None).unwrap();
        assert_eq!(s.tell(), EMPTY.len());
    }

    #[test]
    fn truncated_anywhere_fails() {
        for end in 0..EMPTY.len() {
            let err = ClassFile::from_bytes(&EMPTY[..end]).unwrap_err();
            assert!(
                matches!(err.kind, DecodeErrorKind::TruncatedInput { .. }),
                "cut at {}: {}",
                end,
                err
            );
        }
    }
}

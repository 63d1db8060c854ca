use std::{borrow::Cow, io::Read};

use bitflags::Flags;

use crate::{
    error::{self, PoolError},
    stream::ClassFileStream,
};

use super::{
    attribute_info::{AttributesCollection, Code},
    ClassFileItem, ConstantPool,
};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldAccessFlags: u16 {
        /// Declared public; may be accessed from outside its package.
        const ACC_PUBLIC = 0x0001;
        /// Declared private; usable only within the defining class.
        const ACC_PRIVATE = 0x0002;
        /// Declared protected; may be accessed within subclasses.
        const ACC_PROTECTED = 0x0004;
        const ACC_STATIC = 0x0008;
        /// Never directly assigned to after object construction.
        const ACC_FINAL = 0x0010;
        /// Cannot be cached.
        const ACC_VOLATILE = 0x0040;
        /// Not written or read by a persistent object manager.
        const ACC_TRANSIENT = 0x0080;
        /// Not present in the source code.
        const ACC_SYNTHETIC = 0x1000;
        /// An element of an enum.
        const ACC_ENUM = 0x4000;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodAccessFlags: u16 {
        const ACC_PUBLIC = 0x0001;
        const ACC_PRIVATE = 0x0002;
        const ACC_PROTECTED = 0x0004;
        const ACC_STATIC = 0x0008;
        /// Must not be overridden.
        const ACC_FINAL = 0x0010;
        /// Invocation is wrapped by a monitor use.
        const ACC_SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler.
        const ACC_BRIDGE = 0x0040;
        /// Declared with a variable number of arguments.
        const ACC_VARARGS = 0x0080;
        /// Implemented in a language other than Java.
        const ACC_NATIVE = 0x0100;
        /// No implementation is provided.
        const ACC_ABSTRACT = 0x0400;
        /// Floating-point mode is FP-strict.
        const ACC_STRICT = 0x0800;
        /// Not present in the source code.
        const ACC_SYNTHETIC = 0x1000;
    }
}

/// A `field_info` or `method_info` structure. The two share a layout and
/// differ only in the meaning of their flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo<F> {
    pub access_flags: F,
    /// A `Utf8` unqualified name.
    pub name_index: u16,
    /// A `Utf8` field or method descriptor.
    pub descriptor_index: u16,
    pub attributes: AttributesCollection,
}

pub type FieldInfo = MemberInfo<FieldAccessFlags>;
pub type MethodInfo = MemberInfo<MethodAccessFlags>;

impl<F> MemberInfo<F> {
    pub fn name<'a>(&self, cp: &'a ConstantPool) -> Result<Cow<'a, str>, PoolError> {
        cp.get_str(self.name_index as usize)
    }

    pub fn descriptor<'a>(&self, cp: &'a ConstantPool) -> Result<Cow<'a, str>, PoolError> {
        cp.get_str(self.descriptor_index as usize)
    }

    /// The body of a method. `None` for fields and for abstract or native
    /// methods.
    pub fn code(&self) -> Option<&Code> {
        self.attributes.code()
    }
}

impl<F: Flags<Bits = u16>> ClassFileItem for MemberInfo<F> {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: Sized,
    {
        let access_flags = F::from_bits_retain(s.read_u2()?);
        let name_index = s.read_u2()?;
        let descriptor_index = s.read_u2()?;
        Ok(Self {
            access_flags,
            name_index,
            descriptor_index,
            attributes: AttributesCollection::read_from_stream(s, cp)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::item::constant_pool::ConstantPoolEntry;

    fn pool() -> ConstantPool {
        ConstantPool::from_entries(["value", "I", "Deprecated"].map(|s| ConstantPoolEntry::Utf8 {
            bytes: s.as_bytes().to_vec(),
        }))
    }

    #[test]
    fn field_with_marker_attribute() {
        let bytes = [
            0x00, 0x1a, // private static final
            0x00, 0x01, 0x00, 0x02,
            0x00, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00,
        ];
        let cp = pool();
        let field = FieldInfo::read_from_stream(&mut ClassFileStream::new(&bytes[..]), Some(&cp)).unwrap();
        assert_eq!(
            field.access_flags,
            FieldAccessFlags::ACC_PRIVATE | FieldAccessFlags::ACC_STATIC | FieldAccessFlags::ACC_FINAL
        );
        assert_eq!(field.name(&cp).unwrap(), "value");
        assert_eq!(field.descriptor(&cp).unwrap(), "I");
        assert_eq!(field.attributes.len(), 1);
        assert!(field.code().is_none());
    }

    #[test]
    fn method_flags_are_not_validated() {
        let bytes = [0xff, 0xff, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00];
        let method =
            MethodInfo::read_from_stream(&mut ClassFileStream::new(&bytes[..]), Some(&pool())).unwrap();
        assert_eq!(method.access_flags.bits(), 0xffff);
        assert!(method.access_flags.contains(MethodAccessFlags::ACC_NATIVE));
        assert!(method.attributes.is_empty());
    }

    #[test]
    fn bad_name_index_fails_lookup() {
        let method = MethodInfo {
            access_flags: MethodAccessFlags::empty(),
            name_index: 9,
            descriptor_index: 0,
            attributes: AttributesCollection::default(),
        };
        let cp = pool();
        assert_eq!(method.name(&cp), Err(PoolError::OutOfRange { index: 9, len: 4 }));
        assert_eq!(method.descriptor(&cp), Err(PoolError::OutOfRange { index: 0, len: 4 }));
    }
}

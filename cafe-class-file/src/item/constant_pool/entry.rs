use std::io::Read;

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    stream::ClassFileStream,
};

pub use self::refkind::RefKind;

use crate::item::ClassFileItem;

use super::ConstantPool;

/// The tag values for each type of constant pool entry.
#[allow(non_upper_case_globals)]
pub mod tags {
    pub const CONSTANT_Utf8: u8 = 1;
    pub const CONSTANT_Integer: u8 = 3;
    pub const CONSTANT_Float: u8 = 4;
    pub const CONSTANT_Long: u8 = 5;
    pub const CONSTANT_Double: u8 = 6;
    pub const CONSTANT_Class: u8 = 7;
    pub const CONSTANT_String: u8 = 8;
    pub const CONSTANT_Fieldref: u8 = 9;
    pub const CONSTANT_Methodref: u8 = 10;
    pub const CONSTANT_InterfaceMethodref: u8 = 11;
    pub const CONSTANT_NameAndType: u8 = 12;
    pub const CONSTANT_MethodHandle: u8 = 15;
    pub const CONSTANT_MethodType: u8 = 16;
    pub const CONSTANT_Dynamic: u8 = 17;
    pub const CONSTANT_InvokeDynamic: u8 = 18;
    pub const CONSTANT_Module: u8 = 19;
    pub const CONSTANT_Package: u8 = 20;
}

/// Method handle reference kinds.
#[allow(non_upper_case_globals, non_camel_case_types)]
mod refkind {
    pub const REF_getField: u8 = 1;
    pub const REF_getStatic: u8 = 2;
    pub const REF_putField: u8 = 3;
    pub const REF_putStatic: u8 = 4;
    pub const REF_invokeVirtual: u8 = 5;
    pub const REF_invokeStatic: u8 = 6;
    pub const REF_invokeSpecial: u8 = 7;
    pub const REF_newInvokeSpecial: u8 = 8;
    pub const REF_invokeInterface: u8 = 9;

    /// The behavior a `MethodHandle` constant stands for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RefKind {
        REF_getField = REF_getField as isize,
        REF_getStatic = REF_getStatic as isize,
        REF_putField = REF_putField as isize,
        REF_putStatic = REF_putStatic as isize,
        REF_invokeVirtual = REF_invokeVirtual as isize,
        REF_invokeStatic = REF_invokeStatic as isize,
        REF_invokeSpecial = REF_invokeSpecial as isize,
        REF_newInvokeSpecial = REF_newInvokeSpecial as isize,
        REF_invokeInterface = REF_invokeInterface as isize,
    }

    impl RefKind {
        /// `None` for bytes outside 1..=9.
        pub fn from_u8(v: u8) -> Option<Self> {
            match v {
                REF_getField => Some(Self::REF_getField),
                REF_getStatic => Some(Self::REF_getStatic),
                REF_putField => Some(Self::REF_putField),
                REF_putStatic => Some(Self::REF_putStatic),
                REF_invokeVirtual => Some(Self::REF_invokeVirtual),
                REF_invokeStatic => Some(Self::REF_invokeStatic),
                REF_invokeSpecial => Some(Self::REF_invokeSpecial),
                REF_newInvokeSpecial => Some(Self::REF_newInvokeSpecial),
                REF_invokeInterface => Some(Self::REF_invokeInterface),
                _ => None,
            }
        }
    }
}

/// A constant pool entry.
///
/// Index fields are stored as read. Nothing checks that they point at an
/// entry of the right kind until a lookup is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstantPoolEntry {
    /// Slot 0, and the slot following every `Long` and `Double`.
    Unusable,
    /// Modified UTF-8 bytes, exactly as stored in the file.
    Utf8 { bytes: Vec<u8> },
    /// Raw big-endian bits of an `int`.
    Integer { bytes: u32 },
    /// Raw IEEE 754 single bits.
    Float { bytes: u32 },
    Long { high_bytes: u32, low_bytes: u32 },
    Double { high_bytes: u32, low_bytes: u32 },
    Class { name_index: u16 },
    String { string_index: u16 },
    Fieldref {
        class_index: u16,
        name_and_type_index: u16,
    },
    Methodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    InterfaceMethodref {
        class_index: u16,
        name_and_type_index: u16,
    },
    NameAndType {
        name_index: u16,
        descriptor_index: u16,
    },
    /// `reference_kind` is kept as the raw byte. See [`ConstantPoolEntry::ref_kind`].
    MethodHandle {
        reference_kind: u8,
        reference_index: u16,
    },
    MethodType { descriptor_index: u16 },
    /// `bootstrap_method_attr_index` indexes the class's `BootstrapMethods`
    /// attribute, not the constant pool.
    Dynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
    InvokeDynamic {
        bootstrap_method_attr_index: u16,
        name_and_type_index: u16,
    },
    Module { name_index: u16 },
    Package { name_index: u16 },
}

impl ConstantPoolEntry {
    /// Whether this entry takes two pool slots.
    pub fn is_wide(&self) -> bool {
        matches!(self, Self::Long { .. } | Self::Double { .. })
    }

    /// Human readable kind, used in lookup errors and listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Unusable => "unusable slot",
            Self::Utf8 { .. } => "Utf8",
            Self::Integer { .. } => "Integer",
            Self::Float { .. } => "Float",
            Self::Long { .. } => "Long",
            Self::Double { .. } => "Double",
            Self::Class { .. } => "Class",
            Self::String { .. } => "String",
            Self::Fieldref { .. } => "Fieldref",
            Self::Methodref { .. } => "Methodref",
            Self::InterfaceMethodref { .. } => "InterfaceMethodref",
            Self::NameAndType { .. } => "NameAndType",
            Self::MethodHandle { .. } => "MethodHandle",
            Self::MethodType { .. } => "MethodType",
            Self::Dynamic { .. } => "Dynamic",
            Self::InvokeDynamic { .. } => "InvokeDynamic",
            Self::Module { .. } => "Module",
            Self::Package { .. } => "Package",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer { bytes } => Some(*bytes as i32),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Float { bytes } => Some(f32::from_bits(*bytes)),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long { high_bytes, low_bytes } => Some(join(*high_bytes, *low_bytes) as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double { high_bytes, low_bytes } => {
                Some(f64::from_bits(join(*high_bytes, *low_bytes)))
            }
            _ => None,
        }
    }

    /// The reference kind of a `MethodHandle`, if it is one of the nine
    /// defined kinds.
    pub fn ref_kind(&self) -> Option<RefKind> {
        match self {
            Self::MethodHandle { reference_kind, .. } => RefKind::from_u8(*reference_kind),
            _ => None,
        }
    }
}

fn join(high: u32, low: u32) -> u64 {
    (u64::from(high) << 32) | u64::from(low)
}

impl ClassFileItem for ConstantPoolEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        let at = s.absolute();
        match s.read_u1()? {
            tags::CONSTANT_Utf8 => {
                let length = s.read_u2()?;
                Ok(Self::Utf8 {
                    bytes: s.read_bytes(length as usize)?,
                })
            }
            tags::CONSTANT_Integer => Ok(Self::Integer {
                bytes: s.read_u4()?,
            }),
            tags::CONSTANT_Float => Ok(Self::Float {
                bytes: s.read_u4()?,
            }),
            tags::CONSTANT_Long => Ok(Self::Long {
                high_bytes: s.read_u4()?,
                low_bytes: s.read_u4()?,
            }),
            tags::CONSTANT_Double => Ok(Self::Double {
                high_bytes: s.read_u4()?,
                low_bytes: s.read_u4()?,
            }),
            tags::CONSTANT_Class => Ok(Self::Class {
                name_index: s.read_u2()?,
            }),
            tags::CONSTANT_String => Ok(Self::String {
                string_index: s.read_u2()?,
            }),
            tags::CONSTANT_Fieldref => Ok(Self::Fieldref {
                class_index: s.read_u2()?,
                name_and_type_index: s.read_u2()?,
            }),
            tags::CONSTANT_Methodref => Ok(Self::Methodref {
                class_index: s.read_u2()?,
                name_and_type_index: s.read_u2()?,
            }),
            tags::CONSTANT_InterfaceMethodref => Ok(Self::InterfaceMethodref {
                class_index: s.read_u2()?,
                name_and_type_index: s.read_u2()?,
            }),
            tags::CONSTANT_NameAndType => Ok(Self::NameAndType {
                name_index: s.read_u2()?,
                descriptor_index: s.read_u2()?,
            }),
            tags::CONSTANT_MethodHandle => Ok(Self::MethodHandle {
                reference_kind: s.read_u1()?,
                reference_index: s.read_u2()?,
            }),
            tags::CONSTANT_MethodType => Ok(Self::MethodType {
                descriptor_index: s.read_u2()?,
            }),
            tags::CONSTANT_Dynamic => Ok(Self::Dynamic {
                bootstrap_method_attr_index: s.read_u2()?,
                name_and_type_index: s.read_u2()?,
            }),
            tags::CONSTANT_InvokeDynamic => Ok(Self::InvokeDynamic {
                bootstrap_method_attr_index: s.read_u2()?,
                name_and_type_index: s.read_u2()?,
            }),
            tags::CONSTANT_Module => Ok(Self::Module {
                name_index: s.read_u2()?,
            }),
            tags::CONSTANT_Package => Ok(Self::Package {
                name_index: s.read_u2()?,
            }),
            v => Err(DecodeError::new(DecodeErrorKind::UnknownConstantTag(v), at)),
        }
    }
}

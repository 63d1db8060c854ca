use std::{io::Read, ops::RangeInclusive};

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    item::{constant_pool::ConstantPool, ClassFileItem},
    stream::ClassFileStream,
};

/// Verification type tags.
#[allow(non_upper_case_globals)]
mod verification {
    pub const ITEM_Top: u8 = 0;
    pub const ITEM_Integer: u8 = 1;
    pub const ITEM_Float: u8 = 2;
    pub const ITEM_Double: u8 = 3;
    pub const ITEM_Long: u8 = 4;
    pub const ITEM_Null: u8 = 5;
    pub const ITEM_UninitializedThis: u8 = 6;
    pub const ITEM_Object: u8 = 7;
    pub const ITEM_Uninitialized: u8 = 8;
}

use self::verification::*;

pub const SAME: RangeInclusive<u8> = 0..=63;
pub const SAME_LOCALS_1_STACK_ITEM: RangeInclusive<u8> = 64..=127;
pub const SAME_LOCALS_1_STACK_ITEM_EXTENDED: u8 = 247;
pub const CHOP: RangeInclusive<u8> = 248..=250;
pub const SAME_FRAME_EXTENDED: u8 = 251;
pub const APPEND: RangeInclusive<u8> = 252..=254;
pub const FULL_FRAME: u8 = 255;

/// The type of one local variable or operand stack slot in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationTypeInfo {
    Top,
    Integer,
    Float,
    Double,
    Long,
    Null,
    UninitializedThis,
    /// An instance of the `Class` constant at `cpool_index`.
    Object { cpool_index: u16 },
    /// An object created by the `new` instruction at code offset `offset`
    /// and not yet initialised.
    Uninitialized { offset: u16 },
}

impl ClassFileItem for VerificationTypeInfo {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        _cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: Sized,
    {
        let at = s.absolute();
        match s.read_u1()? {
            ITEM_Top => Ok(Self::Top),
            ITEM_Integer => Ok(Self::Integer),
            ITEM_Float => Ok(Self::Float),
            ITEM_Double => Ok(Self::Double),
            ITEM_Long => Ok(Self::Long),
            ITEM_Null => Ok(Self::Null),
            ITEM_UninitializedThis => Ok(Self::UninitializedThis),
            ITEM_Object => Ok(Self::Object {
                cpool_index: s.read_u2()?,
            }),
            ITEM_Uninitialized => Ok(Self::Uninitialized {
                offset: s.read_u2()?,
            }),
            v => Err(DecodeError::new(DecodeErrorKind::UnknownVerificationType(v), at)),
        }
    }
}

/// A stack map frame.
///
/// The frame type byte selects the variant. For `Same` and
/// `SameLocals1StackItem` the offset delta is implied by it. `Chop` keeps the
/// number of locals removed, `251 - frame_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackMapFrame {
    /// Same locals as the previous frame, empty stack.
    Same { offset_delta: u16 },
    /// Same locals as the previous frame, one stack entry.
    SameLocals1StackItem {
        offset_delta: u16,
        stack: VerificationTypeInfo,
    },
    SameLocals1StackItemExtended {
        offset_delta: u16,
        stack: VerificationTypeInfo,
    },
    /// The last `absent_locals` locals are gone, empty stack.
    Chop { offset_delta: u16, absent_locals: u8 },
    SameExtended { offset_delta: u16 },
    /// `locals` are defined in addition to the previous frame's, empty stack.
    Append {
        offset_delta: u16,
        locals: Vec<VerificationTypeInfo>,
    },
    Full {
        offset_delta: u16,
        locals: Vec<VerificationTypeInfo>,
        stack: Vec<VerificationTypeInfo>,
    },
}

impl StackMapFrame {
    pub fn offset_delta(&self) -> u16 {
        match self {
            Self::Same { offset_delta }
            | Self::SameLocals1StackItem { offset_delta, .. }
            | Self::SameLocals1StackItemExtended { offset_delta, .. }
            | Self::Chop { offset_delta, .. }
            | Self::SameExtended { offset_delta }
            | Self::Append { offset_delta, .. }
            | Self::Full { offset_delta, .. } => *offset_delta,
        }
    }
}

impl ClassFileItem for StackMapFrame {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: Sized,
    {
        let at = s.absolute();
        match s.read_u1()? {
            v if SAME.contains(&v) => Ok(Self::Same {
                offset_delta: v as u16,
            }),
            v if SAME_LOCALS_1_STACK_ITEM.contains(&v) => Ok(Self::SameLocals1StackItem {
                offset_delta: (v - 64) as u16,
                stack: VerificationTypeInfo::read_from_stream(s, cp)?,
            }),
            SAME_LOCALS_1_STACK_ITEM_EXTENDED => Ok(Self::SameLocals1StackItemExtended {
                offset_delta: s.read_u2()?,
                stack: VerificationTypeInfo::read_from_stream(s, cp)?,
            }),
            v if CHOP.contains(&v) => Ok(Self::Chop {
                offset_delta: s.read_u2()?,
                absent_locals: 251 - v,
            }),
            SAME_FRAME_EXTENDED => Ok(Self::SameExtended {
                offset_delta: s.read_u2()?,
            }),
            v if APPEND.contains(&v) => Ok(Self::Append {
                offset_delta: s.read_u2()?,
                locals: s.read_sequence(cp, (v - 251) as usize)?,
            }),
            FULL_FRAME => {
                let offset_delta = s.read_u2()?;
                let number_of_locals = s.read_u2()?;
                let locals = s.read_sequence(cp, number_of_locals as usize)?;
                let number_of_stack_items = s.read_u2()?;
                let stack = s.read_sequence(cp, number_of_stack_items as usize)?;
                Ok(Self::Full {
                    offset_delta,
                    locals,
                    stack,
                })
            }
            v => Err(DecodeError::new(DecodeErrorKind::UnknownStackMapFrameType(v), at)),
        }
    }
}

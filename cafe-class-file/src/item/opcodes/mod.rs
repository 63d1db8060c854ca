use std::{fmt, io::Read};

use fnv::FnvHashMap;

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    stream::ClassFileStream,
};

/// An absolute branch target read from a signed 2-byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Branch(pub i64);

/// An absolute branch target read from a signed 4-byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WideBranch(pub i64);

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for WideBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod arraytype {
    pub const T_BOOLEAN: u8 = 4;
    pub const T_CHAR: u8 = 5;
    pub const T_FLOAT: u8 = 6;
    pub const T_DOUBLE: u8 = 7;
    pub const T_BYTE: u8 = 8;
    pub const T_SHORT: u8 = 9;
    pub const T_INT: u8 = 10;
    pub const T_LONG: u8 = 11;
}

/// The element type of a `newarray`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
    Boolean = arraytype::T_BOOLEAN as isize,
    Char = arraytype::T_CHAR as isize,
    Float = arraytype::T_FLOAT as isize,
    Double = arraytype::T_DOUBLE as isize,
    Byte = arraytype::T_BYTE as isize,
    Short = arraytype::T_SHORT as isize,
    Int = arraytype::T_INT as isize,
    Long = arraytype::T_LONG as isize,
}

impl ArrayType {
    /// `None` for bytes outside 4..=11.
    pub fn from_u8(v: u8) -> Option<Self> {
        use self::arraytype::*;
        match v {
            T_BOOLEAN => Some(Self::Boolean),
            T_CHAR => Some(Self::Char),
            T_FLOAT => Some(Self::Float),
            T_DOUBLE => Some(Self::Double),
            T_BYTE => Some(Self::Byte),
            T_SHORT => Some(Self::Short),
            T_INT => Some(Self::Int),
            T_LONG => Some(Self::Long),
            _ => None,
        }
    }

    /// The `atype` byte as stored in the code array.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The Java name of the element type.
    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fixed-width operand of an instruction.
trait Operand: Sized {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, address: u32) -> error::Result<Self>;
}

impl Operand for u8 {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, _address: u32) -> error::Result<Self> {
        s.read_u1()
    }
}

impl Operand for u16 {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, _address: u32) -> error::Result<Self> {
        s.read_u2()
    }
}

impl Operand for i8 {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, _address: u32) -> error::Result<Self> {
        s.read_s1()
    }
}

impl Operand for i16 {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, _address: u32) -> error::Result<Self> {
        s.read_s2()
    }
}

impl Operand for ArrayType {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, _address: u32) -> error::Result<Self> {
        let at = s.absolute();
        let atype = s.read_u1()?;
        Self::from_u8(atype)
            .ok_or_else(|| DecodeError::new(DecodeErrorKind::UnknownArrayType(atype), at))
    }
}

impl Operand for Branch {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, address: u32) -> error::Result<Self> {
        Ok(Branch(absolute(address, s.read_s2()?.into())))
    }
}

impl Operand for WideBranch {
    fn read_operand<R: Read>(s: &mut ClassFileStream<R>, address: u32) -> error::Result<Self> {
        Ok(WideBranch(absolute(address, s.read_s4()?)))
    }
}

fn absolute(address: u32, offset: i32) -> i64 {
    i64::from(address) + i64::from(offset)
}

/// Padding bytes between a switch opcode and its first operand, given the
/// offset just after the opcode relative to the start of the code array.
pub fn switch_padding(offset: usize) -> usize {
    (4 - offset % 4) % 4
}

fn raw_name(name: &'static str) -> &'static str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// The operation carried by a `wide` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideOperation {
    /// A load, store or `ret` with a 2-byte local variable index.
    Local { opcode: u8, index: u16 },
    /// `iinc` with a 2-byte index and a signed 2-byte constant.
    Iinc { index: u16, constant: i16 },
}

impl fmt::Display for WideOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local { opcode, index } => match mnemonic_of(*opcode) {
                Some(name) => write!(f, "{} {}", name, index),
                None => write!(f, "{:#04x} {}", opcode, index),
            },
            Self::Iinc { index, constant } => write!(f, "iinc {} {}", index, constant),
        }
    }
}

/// Macro for defining the opcode enum and its decoder.
///
/// Each entry is `(code) = name(field: Type, ...)`, optionally followed by
/// `pad N` for reserved zero bytes that are read and dropped.
macro_rules! def_opcode {
    (
        $opcodename:ident {
            $(
                $(#[$inner:ident $($args:tt)*])*
                ($code:expr) = $name:ident($($field:ident: $part:ty),*) $(pad $pad:literal)?
            ),* $(,)?
        }
    ) => {
        /// Numeric opcode values.
        #[allow(non_upper_case_globals)]
        pub mod codes {
            $(
                pub const $name: u8 = $code;
            )*
            pub const tableswitch: u8 = 0xaa;
            pub const lookupswitch: u8 = 0xab;
            pub const wide: u8 = 0xc4;
        }

        /// A decoded instruction. Branch targets are absolute code offsets.
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum $opcodename {
            /// Access jump table by index and jump.
            ///
            /// `targets[i]` is taken for key `low + i`.
            tableswitch {
                default: i64,
                low: i32,
                high: i32,
                targets: Vec<i64>,
            },

            /// Access jump table by key match and jump. Pairs are `(match, target)`
            /// in file order.
            lookupswitch {
                default: i64,
                pairs: Vec<(i32, i64)>,
            },

            /// Extend local variable index by additional bytes.
            wide(WideOperation),
            $(
                $(#[$inner $($args)*])*
                $name($($part),*)
            ),*
        }

        impl $opcodename {
            /// Decode the instruction at `address`. `code_start` is the stream
            /// position of the first byte of the code array.
            fn decode<R: Read>(s: &mut ClassFileStream<R>, code_start: usize, address: u32) -> error::Result<Self> {
                let at = s.absolute();
                match s.read_u1()? {
                    $(
                        codes::$name => {
                            let op = Self::$name($(<$part as Operand>::read_operand(s, address)?),*);
                            $( s.skip($pad)?; )?
                            Ok(op)
                        }
                    )*
                    codes::tableswitch => {
                        s.skip(switch_padding(s.tell() - code_start))?;
                        let default = absolute(address, s.read_s4()?);
                        let low = s.read_s4()?;
                        let high = s.read_s4()?;
                        let count = (i64::from(high) - i64::from(low) + 1).max(0);
                        let mut targets = Vec::new();
                        for _ in 0..count {
                            targets.push(absolute(address, s.read_s4()?));
                        }
                        Ok(Self::tableswitch { default, low, high, targets })
                    }
                    codes::lookupswitch => {
                        s.skip(switch_padding(s.tell() - code_start))?;
                        let default = absolute(address, s.read_s4()?);
                        let npairs = s.read_u4()?;
                        let mut pairs = Vec::new();
                        for _ in 0..npairs {
                            let key = s.read_s4()?;
                            pairs.push((key, absolute(address, s.read_s4()?)));
                        }
                        Ok(Self::lookupswitch { default, pairs })
                    }
                    codes::wide => {
                        let opcode = s.read_u1()?;
                        let index = s.read_u2()?;
                        if opcode == codes::iinc {
                            Ok(Self::wide(WideOperation::Iinc { index, constant: s.read_s2()? }))
                        } else {
                            Ok(Self::wide(WideOperation::Local { opcode, index }))
                        }
                    }
                    v => Err(DecodeError::new(DecodeErrorKind::UnknownOpcode(v), at)),
                }
            }

            /// The opcode byte of this instruction.
            pub fn opcode(&self) -> u8 {
                match self {
                    Self::tableswitch { .. } => codes::tableswitch,
                    Self::lookupswitch { .. } => codes::lookupswitch,
                    Self::wide(..) => codes::wide,
                    $(
                        Self::$name(..) => codes::$name,
                    )*
                }
            }

            /// The lowercase mnemonic, e.g. `invokevirtual`.
            pub fn mnemonic(&self) -> &'static str {
                match self {
                    Self::tableswitch { .. } => "tableswitch",
                    Self::lookupswitch { .. } => "lookupswitch",
                    Self::wide(..) => "wide",
                    $(
                        Self::$name(..) => raw_name(stringify!($name)),
                    )*
                }
            }
        }

        /// The mnemonic for an opcode byte, or `None` if it is unassigned.
        pub fn mnemonic_of(code: u8) -> Option<&'static str> {
            match code {
                codes::tableswitch => Some("tableswitch"),
                codes::lookupswitch => Some("lookupswitch"),
                codes::wide => Some("wide"),
                $(
                    codes::$name => Some(raw_name(stringify!($name))),
                )*
                _ => None,
            }
        }

        impl fmt::Display for $opcodename {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    Self::tableswitch { default, low, high, targets } => {
                        write!(f, "tableswitch default={} low={} high={} {:?}", default, low, high, targets)
                    }
                    Self::lookupswitch { default, pairs } => {
                        write!(f, "lookupswitch default={} {{", default)?;
                        for (i, (key, target)) in pairs.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}: {}", key, target)?;
                        }
                        f.write_str("}")
                    }
                    Self::wide(op) => write!(f, "wide {}", op),
                    $(
                        Self::$name($($field),*) => {
                            f.write_str(raw_name(stringify!($name)))?;
                            $( write!(f, " {}", $field)?; )*
                            Ok(())
                        }
                    )*
                }
            }
        }
    };
}

/// An instruction and the offset of its opcode byte in the code array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub address: u32,
    pub opcode: VMOpcode,
}

impl Instruction {
    pub fn new(address: u32, opcode: VMOpcode) -> Self {
        Self { address, opcode }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.address, self.opcode)
    }
}

/// The decoded body of a method, in address order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstructionList {
    instructions: Vec<Instruction>,
    by_address: FnvHashMap<u32, usize>,
}

impl InstructionList {
    /// Decode `length` bytes of code from `s`.
    ///
    /// Decoding stops once the offset from the starting position reaches
    /// `length`. If the last instruction runs past it the body is malformed.
    pub fn decode<R: Read>(length: u32, s: &mut ClassFileStream<R>) -> error::Result<Self> {
        let start = s.tell();
        let mut list = Self::default();
        let mut offset = 0;
        while offset < length as usize {
            let address = offset as u32;
            let opcode = VMOpcode::decode(s, start, address)?;
            list.by_address.insert(address, list.instructions.len());
            list.instructions.push(Instruction { address, opcode });
            offset = s.tell() - start;
        }
        if offset != length as usize {
            return Err(s.error(DecodeErrorKind::CodeLengthMismatch {
                declared: length,
                decoded: offset as u64,
            }));
        }
        Ok(list)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction whose opcode byte is at `address`.
    pub fn at(&self, address: u32) -> Option<&Instruction> {
        self.index_of(address).and_then(|i| self.instructions.get(i))
    }

    /// Position in the list of the instruction starting at `address`.
    pub fn index_of(&self, address: u32) -> Option<usize> {
        self.by_address.get(&address).copied()
    }
}

impl<'a> IntoIterator for &'a InstructionList {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

def_opcode! {
    VMOpcode {
        /// Do nothing
        (0x00) = nop(),
        /// Push `null`
        (0x01) = aconst_null(),
        /// Push `int` constant -1
        (0x02) = iconst_m1(),
        /// Push `int` constant 0
        (0x03) = iconst_0(),
        /// Push `int` constant 1
        (0x04) = iconst_1(),
        /// Push `int` constant 2
        (0x05) = iconst_2(),
        /// Push `int` constant 3
        (0x06) = iconst_3(),
        /// Push `int` constant 4
        (0x07) = iconst_4(),
        /// Push `int` constant 5
        (0x08) = iconst_5(),
        /// Push `long` constant 0
        (0x09) = lconst_0(),
        /// Push `long` constant 1
        (0x0a) = lconst_1(),
        /// Push `float` constant 0.0
        (0x0b) = fconst_0(),
        /// Push `float` constant 1.0
        (0x0c) = fconst_1(),
        /// Push `float` constant 2.0
        (0x0d) = fconst_2(),
        /// Push `double` constant 0.0
        (0x0e) = dconst_0(),
        /// Push `double` constant 1.0
        (0x0f) = dconst_1(),
        /// Push a sign-extended byte
        (0x10) = bipush(value: i8),
        /// Push a sign-extended short
        (0x11) = sipush(value: i16),
        /// Push item from run-time constant pool
        (0x12) = ldc(index: u8),
        /// Push item from run-time constant pool (wide index)
        (0x13) = ldc_w(index: u16),
        /// Push `long` or `double` from run-time constant pool
        (0x14) = ldc2_w(index: u16),
        /// Load `int` from local variable
        (0x15) = iload(index: u8),
        /// Load `long` from local variable
        (0x16) = lload(index: u8),
        /// Load `float` from local variable
        (0x17) = fload(index: u8),
        /// Load `double` from local variable
        (0x18) = dload(index: u8),
        /// Load `reference` from local variable
        (0x19) = aload(index: u8),
        /// Load `int` from local variable 0
        (0x1a) = iload_0(),
        /// Load `int` from local variable 1
        (0x1b) = iload_1(),
        /// Load `int` from local variable 2
        (0x1c) = iload_2(),
        /// Load `int` from local variable 3
        (0x1d) = iload_3(),
        /// Load `long` from local variable 0
        (0x1e) = lload_0(),
        /// Load `long` from local variable 1
        (0x1f) = lload_1(),
        /// Load `long` from local variable 2
        (0x20) = lload_2(),
        /// Load `long` from local variable 3
        (0x21) = lload_3(),
        /// Load `float` from local variable 0
        (0x22) = fload_0(),
        /// Load `float` from local variable 1
        (0x23) = fload_1(),
        /// Load `float` from local variable 2
        (0x24) = fload_2(),
        /// Load `float` from local variable 3
        (0x25) = fload_3(),
        /// Load `double` from local variable 0
        (0x26) = dload_0(),
        /// Load `double` from local variable 1
        (0x27) = dload_1(),
        /// Load `double` from local variable 2
        (0x28) = dload_2(),
        /// Load `double` from local variable 3
        (0x29) = dload_3(),
        /// Load `reference` from local variable 0
        (0x2a) = aload_0(),
        /// Load `reference` from local variable 1
        (0x2b) = aload_1(),
        /// Load `reference` from local variable 2
        (0x2c) = aload_2(),
        /// Load `reference` from local variable 3
        (0x2d) = aload_3(),
        /// Load `int` from array
        (0x2e) = iaload(),
        /// Load `long` from array
        (0x2f) = laload(),
        /// Load `float` from array
        (0x30) = faload(),
        /// Load `double` from array
        (0x31) = daload(),
        /// Load `reference` from array
        (0x32) = aaload(),
        /// Load `byte or boolean` from array
        (0x33) = baload(),
        /// Load `char` from array
        (0x34) = caload(),
        /// Load `short` from array
        (0x35) = saload(),
        /// Store `int` into local variable
        (0x36) = istore(index: u8),
        /// Store `long` into local variable
        (0x37) = lstore(index: u8),
        /// Store `float` into local variable
        (0x38) = fstore(index: u8),
        /// Store `double` into local variable
        (0x39) = dstore(index: u8),
        /// Store `reference` into local variable
        (0x3a) = astore(index: u8),
        /// Store `int` into local variable 0
        (0x3b) = istore_0(),
        /// Store `int` into local variable 1
        (0x3c) = istore_1(),
        /// Store `int` into local variable 2
        (0x3d) = istore_2(),
        /// Store `int` into local variable 3
        (0x3e) = istore_3(),
        /// Store `long` into local variable 0
        (0x3f) = lstore_0(),
        /// Store `long` into local variable 1
        (0x40) = lstore_1(),
        /// Store `long` into local variable 2
        (0x41) = lstore_2(),
        /// Store `long` into local variable 3
        (0x42) = lstore_3(),
        /// Store `float` into local variable 0
        (0x43) = fstore_0(),
        /// Store `float` into local variable 1
        (0x44) = fstore_1(),
        /// Store `float` into local variable 2
        (0x45) = fstore_2(),
        /// Store `float` into local variable 3
        (0x46) = fstore_3(),
        /// Store `double` into local variable 0
        (0x47) = dstore_0(),
        /// Store `double` into local variable 1
        (0x48) = dstore_1(),
        /// Store `double` into local variable 2
        (0x49) = dstore_2(),
        /// Store `double` into local variable 3
        (0x4a) = dstore_3(),
        /// Store `reference` into local variable 0
        (0x4b) = astore_0(),
        /// Store `reference` into local variable 1
        (0x4c) = astore_1(),
        /// Store `reference` into local variable 2
        (0x4d) = astore_2(),
        /// Store `reference` into local variable 3
        (0x4e) = astore_3(),
        /// Store into `int` array
        (0x4f) = iastore(),
        /// Store into `long` array
        (0x50) = lastore(),
        /// Store into `float` array
        (0x51) = fastore(),
        /// Store into `double` array
        (0x52) = dastore(),
        /// Store into `reference` array
        (0x53) = aastore(),
        /// Store into `byte or boolean` array
        (0x54) = bastore(),
        /// Store into `char` array
        (0x55) = castore(),
        /// Store into `short` array
        (0x56) = sastore(),
        /// Pop the top operand stack value
        (0x57) = pop(),
        /// Pop the top one or two operand stack values
        (0x58) = pop2(),
        /// Duplicate the top operand stack value
        (0x59) = dup(),
        /// Duplicate the top value and insert it two values down
        (0x5a) = dup_x1(),
        /// Duplicate the top value and insert it two or three values down
        (0x5b) = dup_x2(),
        /// Duplicate the top one or two values
        (0x5c) = dup2(),
        /// Duplicate the top one or two values and insert them two or three values down
        (0x5d) = dup2_x1(),
        /// Duplicate the top one or two values and insert them two, three, or four values down
        (0x5e) = dup2_x2(),
        /// Swap the top two operand stack values
        (0x5f) = swap(),
        /// Add `int`
        (0x60) = iadd(),
        /// Add `long`
        (0x61) = ladd(),
        /// Add `float`
        (0x62) = fadd(),
        /// Add `double`
        (0x63) = dadd(),
        /// Subtract `int`
        (0x64) = isub(),
        /// Subtract `long`
        (0x65) = lsub(),
        /// Subtract `float`
        (0x66) = fsub(),
        /// Subtract `double`
        (0x67) = dsub(),
        /// Multiply `int`
        (0x68) = imul(),
        /// Multiply `long`
        (0x69) = lmul(),
        /// Multiply `float`
        (0x6a) = fmul(),
        /// Multiply `double`
        (0x6b) = dmul(),
        /// Divide `int`
        (0x6c) = idiv(),
        /// Divide `long`
        (0x6d) = ldiv(),
        /// Divide `float`
        (0x6e) = fdiv(),
        /// Divide `double`
        (0x6f) = ddiv(),
        /// Remainder `int`
        (0x70) = irem(),
        /// Remainder `long`
        (0x71) = lrem(),
        /// Remainder `float`
        (0x72) = frem(),
        /// Remainder `double`
        (0x73) = drem(),
        /// Negate `int`
        (0x74) = ineg(),
        /// Negate `long`
        (0x75) = lneg(),
        /// Negate `float`
        (0x76) = fneg(),
        /// Negate `double`
        (0x77) = dneg(),
        /// Shift left `int`
        (0x78) = ishl(),
        /// Shift left `long`
        (0x79) = lshl(),
        /// Arithmetic shift right `int`
        (0x7a) = ishr(),
        /// Arithmetic shift right `long`
        (0x7b) = lshr(),
        /// Logical shift right `int`
        (0x7c) = iushr(),
        /// Logical shift right `long`
        (0x7d) = lushr(),
        /// Boolean AND `int`
        (0x7e) = iand(),
        /// Boolean AND `long`
        (0x7f) = land(),
        /// Boolean OR `int`
        (0x80) = ior(),
        /// Boolean OR `long`
        (0x81) = lor(),
        /// Boolean XOR `int`
        (0x82) = ixor(),
        /// Boolean XOR `long`
        (0x83) = lxor(),
        /// Increment local variable by a signed constant
        (0x84) = iinc(index: u8, constant: i8),
        /// Convert `int` to `long`
        (0x85) = i2l(),
        /// Convert `int` to `float`
        (0x86) = i2f(),
        /// Convert `int` to `double`
        (0x87) = i2d(),
        /// Convert `long` to `int`
        (0x88) = l2i(),
        /// Convert `long` to `float`
        (0x89) = l2f(),
        /// Convert `long` to `double`
        (0x8a) = l2d(),
        /// Convert `float` to `int`
        (0x8b) = f2i(),
        /// Convert `float` to `long`
        (0x8c) = f2l(),
        /// Convert `float` to `double`
        (0x8d) = f2d(),
        /// Convert `double` to `int`
        (0x8e) = d2i(),
        /// Convert `double` to `long`
        (0x8f) = d2l(),
        /// Convert `double` to `float`
        (0x90) = d2f(),
        /// Convert `int` to `byte`
        (0x91) = i2b(),
        /// Convert `int` to `char`
        (0x92) = i2c(),
        /// Convert `int` to `short`
        (0x93) = i2s(),
        /// Compare `long`
        (0x94) = lcmp(),
        /// Compare `float`, -1 on NaN
        (0x95) = fcmpl(),
        /// Compare `float`, 1 on NaN
        (0x96) = fcmpg(),
        /// Compare `double`, -1 on NaN
        (0x97) = dcmpl(),
        /// Compare `double`, 1 on NaN
        (0x98) = dcmpg(),
        /// Branch if `int` comparison with zero succeeds (eq)
        (0x99) = ifeq(target: Branch),
        /// Branch if `int` comparison with zero succeeds (ne)
        (0x9a) = ifne(target: Branch),
        /// Branch if `int` comparison with zero succeeds (lt)
        (0x9b) = iflt(target: Branch),
        /// Branch if `int` comparison with zero succeeds (ge)
        (0x9c) = ifge(target: Branch),
        /// Branch if `int` comparison with zero succeeds (gt)
        (0x9d) = ifgt(target: Branch),
        /// Branch if `int` comparison with zero succeeds (le)
        (0x9e) = ifle(target: Branch),
        /// Branch if `int` comparison succeeds (eq)
        (0x9f) = if_icmpeq(target: Branch),
        /// Branch if `int` comparison succeeds (ne)
        (0xa0) = if_icmpne(target: Branch),
        /// Branch if `int` comparison succeeds (lt)
        (0xa1) = if_icmplt(target: Branch),
        /// Branch if `int` comparison succeeds (ge)
        (0xa2) = if_icmpge(target: Branch),
        /// Branch if `int` comparison succeeds (gt)
        (0xa3) = if_icmpgt(target: Branch),
        /// Branch if `int` comparison succeeds (le)
        (0xa4) = if_icmple(target: Branch),
        /// Branch if `reference` comparison succeeds (eq)
        (0xa5) = if_acmpeq(target: Branch),
        /// Branch if `reference` comparison succeeds (ne)
        (0xa6) = if_acmpne(target: Branch),
        /// Branch always
        (0xa7) = goto(target: Branch),
        /// Jump subroutine
        (0xa8) = jsr(target: Branch),
        /// Return from subroutine
        (0xa9) = ret(index: u8),
        /// Return `int` from method
        (0xac) = ireturn(),
        /// Return `long` from method
        (0xad) = lreturn(),
        /// Return `float` from method
        (0xae) = freturn(),
        /// Return `double` from method
        (0xaf) = dreturn(),
        /// Return `reference` from method
        (0xb0) = areturn(),
        /// Return `void` from method
        (0xb1) = r#return(),
        /// Get static field from class
        (0xb2) = getstatic(index: u16),
        /// Set static field in class
        (0xb3) = putstatic(index: u16),
        /// Fetch field from object
        (0xb4) = getfield(index: u16),
        /// Set field in object
        (0xb5) = putfield(index: u16),
        /// Invoke instance method, dispatch based on class
        (0xb6) = invokevirtual(index: u16),
        /// Invoke instance method directly
        (0xb7) = invokespecial(index: u16),
        /// Invoke a class (static) method
        (0xb8) = invokestatic(index: u16),
        /// Invoke interface method
        (0xb9) = invokeinterface(index: u16, count: u8) pad 1,
        /// Invoke a dynamically-computed call site
        (0xba) = invokedynamic(index: u16) pad 2,
        /// Create new object
        (0xbb) = new(index: u16),
        /// Create new array of primitive type `atype`
        (0xbc) = newarray(atype: ArrayType),
        /// Create new array of `reference`
        (0xbd) = anewarray(index: u16),
        /// Get length of array
        (0xbe) = arraylength(),
        /// Throw exception or error
        (0xbf) = athrow(),
        /// Check whether object is of given type
        (0xc0) = checkcast(index: u16),
        /// Determine if object is of given type
        (0xc1) = instanceof(index: u16),
        /// Enter monitor for object
        (0xc2) = monitorenter(),
        /// Exit monitor for object
        (0xc3) = monitorexit(),
        /// Create new multidimensional array
        (0xc5) = multianewarray(index: u16, dimensions: u8),
        /// Branch if `reference` is `null`
        (0xc6) = ifnull(target: Branch),
        /// Branch if `reference` is not `null`
        (0xc7) = ifnonnull(target: Branch),
        /// Branch always (wide offset)
        (0xc8) = goto_w(target: WideBranch),
        /// Jump subroutine (wide offset)
        (0xc9) = jsr_w(target: WideBranch),
        /// Reserved for debuggers
        (0xca) = breakpoint(),
        /// Reserved for implementation-dependent use
        (0xfe) = impdep1(),
        /// Reserved for implementation-dependent use
        (0xff) = impdep2(),
    }
}

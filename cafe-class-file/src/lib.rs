//! Class file parser.
//!
//! Decodes JVM class files into plain data: the constant pool, fields and
//! methods, every attribute, and decoded bytecode for each `Code` body.
//!
//! ```no_run
//! use cafe_class_file::ClassFile;
//!
//! let bytes = std::fs::read("Test.class").unwrap();
//! let class = ClassFile::from_bytes(&bytes).unwrap();
//! for method in &class.methods {
//!     if let Some(code) = method.code() {
//!         for instruction in &code.instructions {
//!             println!("{}", instruction);
//!         }
//!     }
//! }
//! ```

pub mod error;
pub mod item;
pub mod stream;

pub use crate::{
    error::{DecodeError, DecodeErrorKind, PoolError},
    item::{
        attribute_info::{Attributes, AttributesCollection, Code},
        constant_pool::{ConstantPool, ConstantPoolEntry},
        file::{ClassAccessFlags, ClassFile},
        member::{FieldAccessFlags, FieldInfo, MemberInfo, MethodAccessFlags, MethodInfo},
        opcodes::{ArrayType, Instruction, InstructionList, VMOpcode},
        ClassFileItem,
    },
    stream::ClassFileStream,
};

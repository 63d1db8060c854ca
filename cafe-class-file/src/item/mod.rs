use std::io::Read;

pub mod file;
pub mod constant_pool;
pub mod attribute_info;
pub mod member;
pub mod opcodes;

use crate::{error, stream::ClassFileStream};

pub use self::constant_pool::ConstantPool;

/// A component of a class file.
pub trait ClassFileItem {
    /// Read this item from a class file stream.
    ///
    /// `cp` is the pool of the class being decoded. It is `None` only while
    /// the pool itself is being read.
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized;
}

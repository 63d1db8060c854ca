use std::io::Read;

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    item::{constant_pool::ConstantPool, ClassFileItem},
    stream::ClassFileStream,
};

/// Element value tags.
mod elementvaluetypes {
    pub const BYTE: char = 'B';
    pub const CHAR: char = 'C';
    pub const DOUBLE: char = 'D';
    pub const FLOAT: char = 'F';
    pub const INT: char = 'I';
    pub const LONG: char = 'J';
    pub const SHORT: char = 'S';
    pub const BOOLEAN: char = 'Z';
    pub const STRING: char = 's';
    pub const ENUM_TYPE: char = 'e';
    pub const CLASS: char = 'c';
    pub const ANNOTATION_TYPE: char = '@';
    pub const ARRAY_TYPE: char = '[';
}

use self::elementvaluetypes::*;

/// How many arrays and annotations an element value may sit inside.
pub const MAX_NESTING: usize = 64;

/// The annotation structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// `Utf8` field descriptor of the annotation type.
    pub type_index: u16,
    pub element_value_pairs: Vec<ElementValuePair>,
}

impl ClassFileItem for Annotation {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        Self::read_nested(s, cp, 0)
    }
}

impl Annotation {
    fn read_nested<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
        depth: usize,
    ) -> error::Result<Self> {
        let type_index = s.read_u2()?;
        let num_element_value_pairs = s.read_u2()?;
        let mut element_value_pairs = Vec::with_capacity(num_element_value_pairs as usize);
        for _ in 0..num_element_value_pairs {
            element_value_pairs.push(ElementValuePair::read_nested(s, cp, depth)?);
        }
        Ok(Self {
            type_index,
            element_value_pairs,
        })
    }
}

/// One `name = value` element of an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementValuePair {
    pub element_name_index: u16,
    pub value: ElementValue,
}

impl ClassFileItem for ElementValuePair {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        Self::read_nested(s, cp, 0)
    }
}

impl ElementValuePair {
    fn read_nested<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
        depth: usize,
    ) -> error::Result<Self> {
        Ok(Self {
            element_name_index: s.read_u2()?,
            value: ElementValue::read_nested(s, cp, depth)?,
        })
    }
}

/// The annotations of a single formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterAnnotations {
    pub annotations: Vec<Annotation>,
}

impl ClassFileItem for ParameterAnnotations {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        let num_annotations = s.read_u2()?;
        Ok(Self {
            annotations: s.read_sequence(cp, num_annotations as usize)?,
        })
    }
}

/// The value of an element-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementValue {
    /// A primitive or `String` constant. `tag` is one of `BCDFIJSZs` and
    /// tells which kind of constant `const_value_index` must name.
    Const { tag: char, const_value_index: u16 },
    Enum {
        type_name_index: u16,
        const_name_index: u16,
    },
    /// A class literal, by return descriptor.
    Class { class_info_index: u16 },
    Annotation(Annotation),
    Array(Vec<ElementValue>),
}

impl ClassFileItem for ElementValue {
    fn read_from_stream<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
    ) -> error::Result<Self>
    where
        Self: Sized,
    {
        Self::read_nested(s, cp, 0)
    }
}

impl ElementValue {
    /// `depth` counts the arrays and annotations enclosing this value.
    fn read_nested<R: Read>(
        s: &mut ClassFileStream<R>,
        cp: Option<&ConstantPool>,
        depth: usize,
    ) -> error::Result<Self> {
        let at = s.absolute();
        if depth > MAX_NESTING {
            return Err(DecodeError::new(
                DecodeErrorKind::NestingTooDeep { limit: MAX_NESTING },
                at,
            ));
        }
        match s.read_u1()? as char {
            tag @ (BYTE | CHAR | DOUBLE | FLOAT | INT | LONG | SHORT | BOOLEAN | STRING) => {
                Ok(Self::Const {
                    tag,
                    const_value_index: s.read_u2()?,
                })
            }
            ENUM_TYPE => Ok(Self::Enum {
                type_name_index: s.read_u2()?,
                const_name_index: s.read_u2()?,
            }),
            CLASS => Ok(Self::Class {
                class_info_index: s.read_u2()?,
            }),
            ANNOTATION_TYPE => Ok(Self::Annotation(Annotation::read_nested(s, cp, depth + 1)?)),
            ARRAY_TYPE => {
                let num_values = s.read_u2()?;
                let mut values = Vec::with_capacity(num_values as usize);
                for _ in 0..num_values {
                    values.push(Self::read_nested(s, cp, depth + 1)?);
                }
                Ok(Self::Array(values))
            }
            v => Err(DecodeError::new(DecodeErrorKind::UnknownElementValueTag(v), at)),
        }
    }
}

use std::io::Read;

use fnv::FnvHashMap;
use log::trace;
use once_cell::sync::Lazy;

use crate::{
    error::{self, DecodeError, DecodeErrorKind},
    item::{constant_pool::ConstantPool, opcodes::InstructionList, ClassFileItem},
    stream::{ClassFileStream, SubStream},
};

pub use self::{
    annotation::{Annotation, ElementValue, ElementValuePair, ParameterAnnotations},
    stackmap::{StackMapFrame, VerificationTypeInfo},
};

pub mod annotation;
pub mod stackmap;

/// Attribute names, as they appear in the constant pool.
#[allow(non_upper_case_globals)]
pub mod attrtype {
    pub const ConstantValue: &str = "ConstantValue";
    pub const Code: &str = "Code";
    pub const StackMapTable: &str = "StackMapTable";
    pub const Exceptions: &str = "Exceptions";
    pub const BootstrapMethods: &str = "BootstrapMethods";
    pub const InnerClasses: &str = "InnerClasses";
    pub const EnclosingMethod: &str = "EnclosingMethod";
    pub const Synthetic: &str = "Synthetic";
    pub const Signature: &str = "Signature";
    pub const RuntimeVisibleAnnotations: &str = "RuntimeVisibleAnnotations";
    pub const RuntimeInvisibleAnnotations: &str = "RuntimeInvisibleAnnotations";
    pub const RuntimeVisibleParameterAnnotations: &str = "RuntimeVisibleParameterAnnotations";
    pub const RuntimeInvisibleParameterAnnotations: &str = "RuntimeInvisibleParameterAnnotations";
    pub const AnnotationDefault: &str = "AnnotationDefault";
    pub const MethodParameters: &str = "MethodParameters";
    pub const SourceFile: &str = "SourceFile";
    pub const SourceDebugExtension: &str = "SourceDebugExtension";
    pub const LineNumberTable: &str = "LineNumberTable";
    pub const LocalVariableTable: &str = "LocalVariableTable";
    pub const LocalVariableTypeTable: &str = "LocalVariableTypeTable";
    pub const Deprecated: &str = "Deprecated";
    pub const NestHost: &str = "NestHost";
    pub const NestMembers: &str = "NestMembers";
    pub const PermittedSubclasses: &str = "PermittedSubclasses";
}

bitflags::bitflags! {
    /// Flags of an `InnerClasses` entry, as declared in source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InnerClassAccessFlags: u16 {
        const ACC_PUBLIC = 0x0001;
        const ACC_PRIVATE = 0x0002;
        const ACC_PROTECTED = 0x0004;
        const ACC_STATIC = 0x0008;
        const ACC_FINAL = 0x0010;
        const ACC_INTERFACE = 0x0200;
        const ACC_ABSTRACT = 0x0400;
        const ACC_SYNTHETIC = 0x1000;
        const ACC_ANNOTATION = 0x2000;
        const ACC_ENUM = 0x4000;
    }
}

bitflags::bitflags! {
    /// Flags of a `MethodParameters` entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParameterAccessFlags: u16 {
        const ACC_FINAL = 0x0010;
        /// Not declared in source, an artifact of the compiler.
        const ACC_SYNTHETIC = 0x1000;
        /// Implicitly declared, as the language requires.
        const ACC_MANDATED = 0x8000;
    }
}

/// The body of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub max_stack: u16,
    pub max_locals: u16,
    pub instructions: InstructionList,
    /// Handlers in the order the file lists them, which is the order they
    /// are tried in.
    pub exception_table: Vec<ExceptionTableEntry>,
    pub attributes: AttributesCollection,
}

/// A decoded attribute.
///
/// Index fields are constant pool indices unless their name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attributes {
    ConstantValue { constantvalue_index: u16 },
    Code(Code),
    StackMapTable { entries: Vec<StackMapFrame> },
    /// Checked exceptions a method declares, as `Class` constants.
    Exceptions { exception_index_table: Vec<u16> },
    InnerClasses { classes: Vec<InnerClassEntry> },
    /// `method_index` is zero when the class is not enclosed by a method.
    EnclosingMethod { class_index: u16, method_index: u16 },
    Synthetic,
    Signature { signature_index: u16 },
    SourceFile { sourcefile_index: u16 },
    SourceDebugExtension { debug_extension: Vec<u8> },
    LineNumberTable { line_number_table: Vec<LineNumberTableEntry> },
    LocalVariableTable { local_variable_table: Vec<LocalVariableTableEntry> },
    LocalVariableTypeTable { local_variable_type_table: Vec<LocalVariableTypeTableEntry> },
    RuntimeVisibleAnnotations { annotations: Vec<Annotation> },
    /// Stored as a flat list of element-value pairs, without the annotation
    /// type that the visible form carries.
    RuntimeInvisibleAnnotations { element_value_pairs: Vec<ElementValuePair> },
    RuntimeVisibleParameterAnnotations { parameter_annotations: Vec<ParameterAnnotations> },
    RuntimeInvisibleParameterAnnotations { parameter_annotations: Vec<ParameterAnnotations> },
    AnnotationDefault { default_value: ElementValue },
    BootstrapMethods { bootstrap_methods: Vec<BootstrapMethodsElement> },
    MethodParameters { parameters: Vec<MethodParametersElement> },
    NestHost { host_class_index: u16 },
    NestMembers { classes: Vec<u16> },
    PermittedSubclasses { classes: Vec<u16> },
    Deprecated,
}

impl Attributes {
    /// The name this attribute is stored under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstantValue { .. } => attrtype::ConstantValue,
            Self::Code(..) => attrtype::Code,
            Self::StackMapTable { .. } => attrtype::StackMapTable,
            Self::Exceptions { .. } => attrtype::Exceptions,
            Self::InnerClasses { .. } => attrtype::InnerClasses,
            Self::EnclosingMethod { .. } => attrtype::EnclosingMethod,
            Self::Synthetic => attrtype::Synthetic,
            Self::Signature { .. } => attrtype::Signature,
            Self::SourceFile { .. } => attrtype::SourceFile,
            Self::SourceDebugExtension { .. } => attrtype::SourceDebugExtension,
            Self::LineNumberTable { .. } => attrtype::LineNumberTable,
            Self::LocalVariableTable { .. } => attrtype::LocalVariableTable,
            Self::LocalVariableTypeTable { .. } => attrtype::LocalVariableTypeTable,
            Self::RuntimeVisibleAnnotations { .. } => attrtype::RuntimeVisibleAnnotations,
            Self::RuntimeInvisibleAnnotations { .. } => attrtype::RuntimeInvisibleAnnotations,
            Self::RuntimeVisibleParameterAnnotations { .. } => {
                attrtype::RuntimeVisibleParameterAnnotations
            }
            Self::RuntimeInvisibleParameterAnnotations { .. } => {
                attrtype::RuntimeInvisibleParameterAnnotations
            }
            Self::AnnotationDefault { .. } => attrtype::AnnotationDefault,
            Self::BootstrapMethods { .. } => attrtype::BootstrapMethods,
            Self::MethodParameters { .. } => attrtype::MethodParameters,
            Self::NestHost { .. } => attrtype::NestHost,
            Self::NestMembers { .. } => attrtype::NestMembers,
            Self::PermittedSubclasses { .. } => attrtype::PermittedSubclasses,
            Self::Deprecated => attrtype::Deprecated,
        }
    }
}

/// A decoder for the body of one kind of attribute.
type AttributeDecoder = fn(&ConstantPool, &mut SubStream) -> error::Result<Attributes>;

const REGISTRY: &[(&str, AttributeDecoder)] = &[
    (attrtype::ConstantValue, constant_value),
    (attrtype::Code, code),
    (attrtype::StackMapTable, stack_map_table),
    (attrtype::Exceptions, exceptions),
    (attrtype::InnerClasses, inner_classes),
    (attrtype::EnclosingMethod, enclosing_method),
    (attrtype::Synthetic, synthetic),
    (attrtype::Signature, signature),
    (attrtype::SourceFile, source_file),
    (attrtype::SourceDebugExtension, source_debug_extension),
    (attrtype::LineNumberTable, line_number_table),
    (attrtype::LocalVariableTable, local_variable_table),
    (attrtype::LocalVariableTypeTable, local_variable_type_table),
    (attrtype::RuntimeVisibleAnnotations, runtime_visible_annotations),
    (attrtype::RuntimeInvisibleAnnotations, runtime_invisible_annotations),
    (attrtype::RuntimeVisibleParameterAnnotations, runtime_visible_parameter_annotations),
    (attrtype::RuntimeInvisibleParameterAnnotations, runtime_invisible_parameter_annotations),
    (attrtype::AnnotationDefault, annotation_default),
    (attrtype::BootstrapMethods, bootstrap_methods),
    (attrtype::MethodParameters, method_parameters),
    (attrtype::NestHost, nest_host),
    (attrtype::NestMembers, nest_members),
    (attrtype::PermittedSubclasses, permitted_subclasses),
    (attrtype::Deprecated, deprecated),
];

static DECODERS: Lazy<FnvHashMap<&'static [u8], AttributeDecoder>> = Lazy::new(|| {
    REGISTRY
        .iter()
        .map(|&(name, decoder)| (name.as_bytes(), decoder))
        .collect()
});

/// How deeply attributes may nest through `Code` bodies.
pub const MAX_NESTING: usize = 8;

/// Read one `attribute_info` structure.
///
/// The body is handed to its decoder as a stream of exactly the declared
/// length, and the decoder must use all of it.
pub fn read_attribute<R: Read>(cp: &ConstantPool, s: &mut ClassFileStream<R>) -> error::Result<Attributes> {
    let at = s.absolute();
    if s.depth() > MAX_NESTING {
        return Err(s.error(DecodeErrorKind::NestingTooDeep { limit: MAX_NESTING }));
    }
    let name_index = s.read_u2()?;
    let length = s.read_u4()?;
    let name = cp
        .get_utf8(name_index as usize)
        .map_err(|e| DecodeError::new(e.into(), at))?;
    let mut body = s.sub_stream(length as usize)?;
    let display_name = String::from_utf8_lossy(name);
    trace!("attribute {} ({} bytes) at offset {}", display_name, length, at);

    let decoder = DECODERS.get(name).copied().ok_or_else(|| {
        DecodeError::new(
            DecodeErrorKind::UnknownAttributeName(display_name.to_string()),
            at,
        )
    })?;
    let origin = body.origin();
    let attribute = decoder(cp, &mut body).map_err(|e| {
        overrun(e, origin, |consumed| DecodeErrorKind::AttributeLengthMismatch {
            name: display_name.to_string(),
            declared: length,
            consumed,
        })
    })?;
    if body.remaining() != 0 {
        return Err(body.error(DecodeErrorKind::AttributeLengthMismatch {
            name: display_name.into_owned(),
            declared: length,
            consumed: body.tell() as u64,
        }));
    }
    Ok(attribute)
}

/// Rewrite a read past the end of a bounded stream starting at `origin`
/// into the error `kind` builds from the number of bytes it would have
/// taken.
fn overrun(e: DecodeError, origin: usize, kind: impl FnOnce(u64) -> DecodeErrorKind) -> DecodeError {
    match e.kind {
        DecodeErrorKind::TruncatedInput { requested } => {
            DecodeError::new(kind((e.offset - origin + requested) as u64), e.offset)
        }
        other => DecodeError::new(other, e.offset),
    }
}

fn counted<T: ClassFileItem>(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Vec<T>> {
    let count = s.read_u2()?;
    s.read_sequence(Some(cp), count as usize)
}

fn constant_value(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::ConstantValue {
        constantvalue_index: s.read_u2()?,
    })
}

fn code(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    let max_stack = s.read_u2()?;
    let max_locals = s.read_u2()?;
    let code_length = s.read_u4()?;
    let mut body = s.sub_stream(code_length as usize)?;
    let origin = body.origin();
    let instructions = InstructionList::decode(code_length, &mut body).map_err(|e| {
        overrun(e, origin, |decoded| DecodeErrorKind::CodeLengthMismatch {
            declared: code_length,
            decoded,
        })
    })?;
    let exception_table = counted(cp, s)?;
    let attributes = AttributesCollection::read_from_stream(s, Some(cp))?;
    Ok(Attributes::Code(Code {
        max_stack,
        max_locals,
        instructions,
        exception_table,
        attributes,
    }))
}

fn stack_map_table(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::StackMapTable {
        entries: counted(cp, s)?,
    })
}

fn exceptions(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::Exceptions {
        exception_index_table: counted(cp, s)?,
    })
}

fn inner_classes(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::InnerClasses {
        classes: counted(cp, s)?,
    })
}

fn enclosing_method(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::EnclosingMethod {
        class_index: s.read_u2()?,
        method_index: s.read_u2()?,
    })
}

fn synthetic(_cp: &ConstantPool, _s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::Synthetic)
}

fn deprecated(_cp: &ConstantPool, _s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::Deprecated)
}

fn signature(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::Signature {
        signature_index: s.read_u2()?,
    })
}

fn source_file(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::SourceFile {
        sourcefile_index: s.read_u2()?,
    })
}

fn source_debug_extension(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    let length = s.read_u4()?;
    Ok(Attributes::SourceDebugExtension {
        debug_extension: s.read_bytes(length as usize)?,
    })
}

fn line_number_table(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::LineNumberTable {
        line_number_table: counted(cp, s)?,
    })
}

fn local_variable_table(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::LocalVariableTable {
        local_variable_table: counted(cp, s)?,
    })
}

fn local_variable_type_table(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::LocalVariableTypeTable {
        local_variable_type_table: counted(cp, s)?,
    })
}

fn runtime_visible_annotations(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::RuntimeVisibleAnnotations {
        annotations: counted(cp, s)?,
    })
}

fn runtime_invisible_annotations(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::RuntimeInvisibleAnnotations {
        element_value_pairs: counted(cp, s)?,
    })
}

fn runtime_visible_parameter_annotations(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    let num_parameters = s.read_u1()?;
    Ok(Attributes::RuntimeVisibleParameterAnnotations {
        parameter_annotations: s.read_sequence(Some(cp), num_parameters as usize)?,
    })
}

fn runtime_invisible_parameter_annotations(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    let num_parameters = s.read_u1()?;
    Ok(Attributes::RuntimeInvisibleParameterAnnotations {
        parameter_annotations: s.read_sequence(Some(cp), num_parameters as usize)?,
    })
}

fn annotation_default(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::AnnotationDefault {
        default_value: ElementValue::read_from_stream(s, Some(cp))?,
    })
}

fn bootstrap_methods(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::BootstrapMethods {
        bootstrap_methods: counted(cp, s)?,
    })
}

fn method_parameters(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    let parameters_count = s.read_u1()?;
    Ok(Attributes::MethodParameters {
        parameters: s.read_sequence(Some(cp), parameters_count as usize)?,
    })
}

fn nest_host(_cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::NestHost {
        host_class_index: s.read_u2()?,
    })
}

fn nest_members(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::NestMembers {
        classes: counted(cp, s)?,
    })
}

fn permitted_subclasses(cp: &ConstantPool, s: &mut SubStream) -> error::Result<Attributes> {
    Ok(Attributes::PermittedSubclasses {
        classes: counted(cp, s)?,
    })
}

/// The attributes of a class, member or `Code` body, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributesCollection {
    attributes: Vec<Attributes>,
}

impl AttributesCollection {
    pub fn new(attributes: Vec<Attributes>) -> Self {
        Self { attributes }
    }

    /// The first attribute named `name`.
    pub fn get(&self, name: &str) -> Option<&Attributes> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Every attribute named `name`, in declared order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Attributes> + 'a {
        self.attributes.iter().filter(move |a| a.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attributes> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn code(&self) -> Option<&Code> {
        match self.get(attrtype::Code)? {
            Attributes::Code(code) => Some(code),
            _ => None,
        }
    }

    /// Index of the `Utf8` source file name.
    pub fn source_file(&self) -> Option<u16> {
        match self.get(attrtype::SourceFile)? {
            Attributes::SourceFile { sourcefile_index } => Some(*sourcefile_index),
            _ => None,
        }
    }

    /// Index of the constant a field is initialised with.
    pub fn constant_value(&self) -> Option<u16> {
        match self.get(attrtype::ConstantValue)? {
            Attributes::ConstantValue { constantvalue_index } => Some(*constantvalue_index),
            _ => None,
        }
    }
}

impl<'a> IntoIterator for &'a AttributesCollection {
    type Item = &'a Attributes;
    type IntoIter = std::slice::Iter<'a, Attributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl ClassFileItem for AttributesCollection {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        let cp = cp.ok_or_else(|| s.error(DecodeErrorKind::MissingConstantPool))?;
        let attributes_count = s.read_u2()?;
        let mut attributes = Vec::with_capacity(attributes_count as usize);
        for _ in 0..attributes_count {
            attributes.push(read_attribute(cp, s)?);
        }
        Ok(Self { attributes })
    }
}

/// An entry in the `classes` array of the `InnerClasses` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassEntry {
    pub inner_class_info_index: u16,
    /// Zero unless the inner class is a member of another class.
    pub outer_class_info_index: u16,
    /// Zero for anonymous classes.
    pub inner_name_index: u16,
    pub inner_class_access_flags: InnerClassAccessFlags,
}

impl ClassFileItem for InnerClassEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        Ok(Self {
            inner_class_info_index: s.read_u2()?,
            outer_class_info_index: s.read_u2()?,
            inner_name_index: s.read_u2()?,
            inner_class_access_flags: InnerClassAccessFlags::from_bits_retain(s.read_u2()?),
        })
    }
}

/// An entry in the exception table of a `Code` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionTableEntry {
    pub start_pc: u16,
    /// Exclusive.
    pub end_pc: u16,
    pub handler_pc: u16,
    /// A `Class` constant, or zero to catch everything.
    pub catch_type: u16,
}

impl ExceptionTableEntry {
    /// The code range the handler covers.
    pub fn pc_range(&self) -> std::ops::Range<u16> {
        self.start_pc..self.end_pc
    }
}

impl ClassFileItem for ExceptionTableEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            start_pc: s.read_u2()?,
            end_pc: s.read_u2()?,
            handler_pc: s.read_u2()?,
            catch_type: s.read_u2()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineNumberTableEntry {
    pub start_pc: u16,
    pub line_number: u16,
}

impl ClassFileItem for LineNumberTableEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            start_pc: s.read_u2()?,
            line_number: s.read_u2()?,
        })
    }
}

/// A local variable live over `start_pc..start_pc + length`, stored in
/// local slot `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVariableTableEntry {
    pub start_pc: u16,
    pub length: u16,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub index: u16,
}

impl ClassFileItem for LocalVariableTableEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            start_pc: s.read_u2()?,
            length: s.read_u2()?,
            name_index: s.read_u2()?,
            descriptor_index: s.read_u2()?,
            index: s.read_u2()?,
        })
    }
}

/// Like [`LocalVariableTableEntry`], with a generic signature in place of
/// the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalVariableTypeTableEntry {
    pub start_pc: u16,
    pub length: u16,
    pub name_index: u16,
    pub signature_index: u16,
    pub index: u16,
}

impl ClassFileItem for LocalVariableTypeTableEntry {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: Sized,
    {
        Ok(Self {
            start_pc: s.read_u2()?,
            length: s.read_u2()?,
            name_index: s.read_u2()?,
            signature_index: s.read_u2()?,
            index: s.read_u2()?,
        })
    }
}

/// A bootstrap method specifier, referenced by `Dynamic` and
/// `InvokeDynamic` constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapMethodsElement {
    /// A `MethodHandle` constant.
    pub bootstrap_method_ref: u16,
    pub bootstrap_arguments: Vec<u16>,
}

impl ClassFileItem for BootstrapMethodsElement {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        let bootstrap_method_ref = s.read_u2()?;
        let num_bootstrap_arguments = s.read_u2()?;
        Ok(Self {
            bootstrap_method_ref,
            bootstrap_arguments: s.read_sequence(cp, num_bootstrap_arguments as usize)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodParametersElement {
    /// Zero for a parameter with no name.
    pub name_index: u16,
    pub access_flags: ParameterAccessFlags,
}

impl ClassFileItem for MethodParametersElement {
    fn read_from_stream<R: Read>(s: &mut ClassFileStream<R>, _cp: Option<&ConstantPool>) -> error::Result<Self>
    where
        Self: std::marker::Sized,
    {
        Ok(Self {
            name_index: s.read_u2()?,
            access_flags: ParameterAccessFlags::from_bits_retain(s.read_u2()?),
        })
    }
}

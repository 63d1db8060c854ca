use cafe_class_file::{
    item::{
        attribute_info::{
            attrtype, Attributes, LocalVariableTableEntry, StackMapFrame, VerificationTypeInfo,
        },
        constant_pool::ConstantPoolEntry,
    },
    ClassAccessFlags, ClassFile, DecodeErrorKind, FieldAccessFlags, Instruction, MethodAccessFlags,
    PoolError, VMOpcode,
};
use pretty_assertions::assert_eq;

/// Assembles class files byte by byte.
struct ClassBuilder {
    pool: Vec<u8>,
    next_index: u16,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassBuilder {
    fn new() -> Self {
        Self {
            pool: Vec::new(),
            next_index: 1,
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    fn constant(&mut self, bytes: &[u8], slots: u16) -> u16 {
        let index = self.next_index;
        self.pool.extend(bytes);
        self.next_index += slots;
        index
    }

    fn utf8(&mut self, s: &str) -> u16 {
        let mut bytes = vec![0x01];
        bytes.extend((s.len() as u16).to_be_bytes());
        bytes.extend(s.as_bytes());
        self.constant(&bytes, 1)
    }

    fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        let mut bytes = vec![0x07];
        bytes.extend(name.to_be_bytes());
        self.constant(&bytes, 1)
    }

    fn long(&mut self, value: i64) -> u16 {
        let mut bytes = vec![0x05];
        bytes.extend(value.to_be_bytes());
        self.constant(&bytes, 2)
    }

    fn attribute(&mut self, name: &str, body: &[u8]) -> Vec<u8> {
        let mut bytes = self.utf8(name).to_be_bytes().to_vec();
        bytes.extend((body.len() as u32).to_be_bytes());
        bytes.extend(body);
        bytes
    }

    fn code(&mut self, code: &[u8]) -> Vec<u8> {
        self.code_with(code, &[])
    }

    fn code_with(&mut self, code: &[u8], nested: &[Vec<u8>]) -> Vec<u8> {
        let mut body = vec![0x00, 0x01, 0x00, 0x01];
        body.extend((code.len() as u32).to_be_bytes());
        body.extend(code);
        body.extend([0x00, 0x00]);
        body.extend((nested.len() as u16).to_be_bytes());
        for attribute in nested {
            body.extend(attribute);
        }
        self.attribute(attrtype::Code, &body)
    }

    fn member(&mut self, flags: u16, name: &str, descriptor: &str, attributes: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = flags.to_be_bytes().to_vec();
        bytes.extend(self.utf8(name).to_be_bytes());
        bytes.extend(self.utf8(descriptor).to_be_bytes());
        bytes.extend((attributes.len() as u16).to_be_bytes());
        for attribute in attributes {
            bytes.extend(attribute);
        }
        bytes
    }

    fn method(&mut self, name: &str, descriptor: &str, attributes: &[Vec<u8>]) {
        let method = self.member(0x0009, name, descriptor, attributes);
        self.methods.push(method);
    }

    fn field(&mut self, name: &str, descriptor: &str, attributes: &[Vec<u8>]) {
        let field = self.member(0x001a, name, descriptor, attributes);
        self.fields.push(field);
    }

    fn build(&mut self) -> Vec<u8> {
        let this_class = self.class("Sample");
        let super_class = self.class("java/lang/Object");
        let mut bytes = vec![0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x3d];
        bytes.extend(self.next_index.to_be_bytes());
        bytes.extend(&self.pool);
        bytes.extend([0x00, 0x21]);
        bytes.extend(this_class.to_be_bytes());
        bytes.extend(super_class.to_be_bytes());
        bytes.extend([0x00, 0x00]);
        for table in [&self.fields, &self.methods, &self.attributes] {
            bytes.extend((table.len() as u16).to_be_bytes());
            for entry in table {
                bytes.extend(entry);
            }
        }
        bytes
    }
}

fn answer_class() -> Vec<u8> {
    let mut builder = ClassBuilder::new();
    let code = builder.code(&[0x03, 0xac]);
    builder.method("answer", "()I", &[code]);
    builder.build()
}

#[test]
fn minimal_method_body() {
    let class = ClassFile::from_bytes(&answer_class()).unwrap();
    assert_eq!(class.major_version, 61);
    assert_eq!(class.access_flags, ClassAccessFlags::ACC_PUBLIC | ClassAccessFlags::ACC_SUPER);
    assert_eq!(class.this_class_name().unwrap(), "Sample");
    assert_eq!(class.super_class_name().unwrap().as_deref(), Some("java/lang/Object"));
    assert!(class.interfaces.is_empty());
    assert!(class.fields.is_empty());
    assert_eq!(class.methods.len(), 1);

    let method = class.method("answer", "()I").unwrap();
    assert_eq!(
        method.access_flags,
        MethodAccessFlags::ACC_PUBLIC | MethodAccessFlags::ACC_STATIC
    );
    assert_eq!(method.attributes.len(), 1);
    let Some(Attributes::Code(code)) = method.attributes.get(attrtype::Code) else {
        panic!("no Code attribute");
    };
    assert_eq!(
        code.instructions.instructions(),
        &[
            Instruction::new(0, VMOpcode::iconst_0()),
            Instruction::new(1, VMOpcode::ireturn()),
        ]
    );
    assert!(code.exception_table.is_empty());
    assert!(code.attributes.is_empty());
    assert_eq!(method.code(), Some(code));
}

#[test]
fn bad_magic_is_malformed_header() {
    let mut bytes = answer_class();
    bytes[0] = 0xde;
    let err = ClassFile::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::MalformedHeader(0xdefebabe)));
    assert_eq!(err.offset, 0);
}

#[test]
fn every_prefix_is_truncated() {
    let bytes = answer_class();
    for end in 0..bytes.len() {
        let err = ClassFile::from_bytes(&bytes[..end]).unwrap_err();
        assert!(
            matches!(err.kind, DecodeErrorKind::TruncatedInput { .. }),
            "cut at {}: {}",
            end,
            err
        );
        assert!(err.offset <= end, "cut at {} reported offset {}", end, err.offset);
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = answer_class();
    let len = bytes.len();
    bytes.push(0);
    let err = ClassFile::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::TrailingBytes(1)));
    assert_eq!(err.offset, len);
}

#[test]
fn unknown_attribute_on_a_field() {
    let mut builder = ClassBuilder::new();
    let attribute = builder.attribute("Frobnicate", &[0x01, 0x02]);
    builder.field("x", "I", &[attribute]);
    let bytes = builder.build();
    let err = ClassFile::from_bytes(&bytes).unwrap_err();
    match err.kind {
        DecodeErrorKind::UnknownAttributeName(ref name) => assert_eq!(name, "Frobnicate"),
        ref other => panic!("unexpected {:?}", other),
    }
    // the error points at the attribute header: name index, then length 2
    assert_eq!(&bytes[err.offset + 2..err.offset + 6], &[0, 0, 0, 2]);
}

#[test]
fn unknown_opcode_reports_file_offset() {
    let mut builder = ClassBuilder::new();
    let code = builder.code(&[0x00, 0xcb, 0xb1]);
    builder.method("broken", "()V", &[code]);
    let bytes = builder.build();
    let err = ClassFile::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::UnknownOpcode(0xcb)));
    assert_eq!(bytes[err.offset], 0xcb);
    assert_eq!(bytes[err.offset - 1], 0x00);
}

#[test]
fn wide_constants_reserve_a_slot() {
    let mut builder = ClassBuilder::new();
    let long = builder.long(-2);
    let after = builder.utf8("after");
    let class = ClassFile::from_bytes(&builder.build()).unwrap();
    let pool = &class.constant_pool;

    assert_eq!(after, long + 2);
    assert_eq!(pool.get_constant(long as usize).unwrap().as_i64(), Some(-2));
    assert_eq!(pool.slot(long as usize + 1).unwrap(), &ConstantPoolEntry::Unusable);
    assert_eq!(
        pool.get_constant(long as usize + 1),
        Err(PoolError::Unusable(long as usize + 1))
    );
    assert_eq!(pool.get_str(after as usize).unwrap(), "after");
    assert_eq!(pool.len(), builder.next_index as usize);
}

#[test]
fn switch_padding_is_relative_to_the_code_array() {
    let mut code = vec![0x00, 0xab, 0x00, 0x00];
    code.extend(16i32.to_be_bytes());
    code.extend(1u32.to_be_bytes());
    code.extend(7i32.to_be_bytes());
    code.extend(11i32.to_be_bytes());
    code.push(0xb1);
    let return_at = code.len() as u32 - 1;

    let mut builder = ClassBuilder::new();
    // vary the file offset of the code array
    builder.utf8("x");
    let code = builder.code(&code);
    builder.method("switch", "(I)V", &[code]);
    let class = ClassFile::from_bytes(&builder.build()).unwrap();
    let instructions = &class.methods[0].code().unwrap().instructions;

    assert_eq!(instructions.len(), 3);
    assert_eq!(
        instructions.at(1).unwrap().opcode,
        VMOpcode::lookupswitch {
            default: 17,
            pairs: vec![(7, 12)],
        }
    );
    assert_eq!(instructions.at(return_at).unwrap().opcode, VMOpcode::r#return());
}

#[test]
fn attribute_queries_use_declared_order() {
    let mut builder = ClassBuilder::new();
    let value = builder.long(42);
    let constant = builder.attribute(attrtype::ConstantValue, &value.to_be_bytes());
    let deprecated = builder.attribute(attrtype::Deprecated, &[]);
    builder.field("ANSWER", "J", &[deprecated, constant]);
    let first = builder.utf8("First.java");
    let second = builder.utf8("Second.java");
    let a = builder.attribute(attrtype::SourceFile, &first.to_be_bytes());
    let b = builder.attribute(attrtype::SourceFile, &second.to_be_bytes());
    builder.attributes.extend([a, b]);

    let class = ClassFile::from_bytes(&builder.build()).unwrap();
    let pool = &class.constant_pool;
    let field = &class.fields[0];
    assert_eq!(
        field.access_flags,
        FieldAccessFlags::ACC_PRIVATE | FieldAccessFlags::ACC_STATIC | FieldAccessFlags::ACC_FINAL
    );
    assert_eq!(field.name(pool).unwrap(), "ANSWER");
    assert_eq!(field.attributes.iter().next(), Some(&Attributes::Deprecated));
    let index = field.attributes.constant_value().unwrap();
    assert_eq!(pool.get_constant(index as usize).unwrap().as_i64(), Some(42));

    let source = class.attributes.source_file().unwrap();
    assert_eq!(pool.get_str(source as usize).unwrap(), "First.java");
    assert_eq!(class.attributes.get(attrtype::Signature), None);
}

#[test]
fn code_with_frames_and_local_names() {
    let mut builder = ClassBuilder::new();
    let object = builder.class("java/lang/Object");
    // aload_0; ifnonnull +4; aconst_null; areturn; aload_0; areturn
    let code = [0x2a, 0xc7, 0x00, 0x05, 0x01, 0xb0, 0x2a, 0xb0];
    let mut frames = vec![0x00, 0x01, 0xfc, 0x00, 0x06, 0x07];
    frames.extend(object.to_be_bytes());
    let frames = builder.attribute(attrtype::StackMapTable, &frames);
    let name = builder.utf8("value");
    let descriptor = builder.utf8("Ljava/lang/Object;");
    let mut locals = vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x08];
    locals.extend(name.to_be_bytes());
    locals.extend(descriptor.to_be_bytes());
    locals.extend([0x00, 0x00]);
    let locals = builder.attribute(attrtype::LocalVariableTable, &locals);
    let code = builder.code_with(&code, &[frames, locals]);
    builder.method("orNull", "(Ljava/lang/Object;)Ljava/lang/Object;", &[code]);

    let class = ClassFile::from_bytes(&builder.build()).unwrap();
    let code = class.methods[0].code().unwrap();
    assert_eq!(code.instructions.len(), 6);
    assert_eq!(code.attributes.len(), 2);
    assert_eq!(
        code.attributes.get(attrtype::StackMapTable),
        Some(&Attributes::StackMapTable {
            entries: vec![StackMapFrame::Append {
                offset_delta: 6,
                locals: vec![VerificationTypeInfo::Object { cpool_index: object }],
            }],
        })
    );
    let Some(Attributes::LocalVariableTable { local_variable_table }) =
        code.attributes.get(attrtype::LocalVariableTable)
    else {
        panic!("no LocalVariableTable");
    };
    assert_eq!(
        local_variable_table,
        &[LocalVariableTableEntry {
            start_pc: 0,
            length: 8,
            name_index: name,
            descriptor_index: descriptor,
            index: 0,
        }]
    );
    let pool = &class.constant_pool;
    assert_eq!(pool.get_str(name as usize).unwrap(), "value");
}

#[test]
fn disassembly_listing() {
    let mut builder = ClassBuilder::new();
    let code = builder.code(&[0x10, 0x07, 0x3b, 0xa7, 0xff, 0xfd]);
    builder.method("spin", "()V", &[code]);
    let class = ClassFile::from_bytes(&builder.build()).unwrap();
    let listing: Vec<String> = class.methods[0]
        .code()
        .unwrap()
        .instructions
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(listing, ["0: bipush 7", "2: istore_0", "3: goto 0"]);
}

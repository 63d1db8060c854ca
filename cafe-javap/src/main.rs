use std::{
    borrow::Cow,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bitflags::Flags;
use cafe_class_file::{ClassFile, ConstantPool, ConstantPoolEntry, MemberInfo, PoolError};
use clap::{ArgAction, Parser};
use log::{debug, warn, LevelFilter};

#[derive(Parser)]
#[command(name = "cafe-javap")]
#[command(about = "Print the contents of JVM class files")]
#[command(version)]
struct Cli {
    /// Class files to print
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Print the constant pool
    #[arg(short, long)]
    constants: bool,

    /// Skip instruction listings
    #[arg(long)]
    no_code: bool,

    /// More log output on stderr, repeat for more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for input in &cli.inputs {
        let class = read_class(input)?;
        print_class(&mut out, input, &class, &cli).context("writing output")?;
    }
    Ok(())
}

fn setup_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
        .context("installing logger")
}

fn read_class(path: &Path) -> Result<ClassFile> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    debug!("{}: {} bytes", path.display(), bytes.len());
    ClassFile::from_bytes(&bytes).with_context(|| format!("decoding {}", path.display()))
}

/// A pool lookup for display. Broken references print as the raw index.
fn lookup(result: Result<Cow<'_, str>, PoolError>, index: u16) -> String {
    match result {
        Ok(s) => s.into_owned(),
        Err(e) => {
            warn!("{}", e);
            format!("#{}", index)
        }
    }
}

fn flag_names<F: Flags>(flags: &F) -> String {
    let names: Vec<&str> = flags.iter_names().map(|(name, _)| name).collect();
    names.join(" ")
}

fn print_class(out: &mut impl Write, path: &Path, class: &ClassFile, cli: &Cli) -> io::Result<()> {
    let cp = &class.constant_pool;
    writeln!(out, "Classfile {}", path.display())?;
    writeln!(out, "  version {}.{}", class.major_version, class.minor_version)?;
    writeln!(out, "  flags: {}", flag_names(&class.access_flags))?;
    writeln!(out, "  this_class: {}", lookup(class.this_class_name(), class.this_class))?;
    match class.super_class_name() {
        Ok(Some(name)) => writeln!(out, "  super_class: {}", name)?,
        Ok(None) => {}
        Err(e) => {
            warn!("{}", e);
            writeln!(out, "  super_class: #{}", class.super_class)?;
        }
    }
    for &interface in &class.interfaces {
        writeln!(out, "  implements: {}", lookup(cp.class_name(interface as usize), interface))?;
    }
    if let Some(index) = class.attributes.source_file() {
        writeln!(out, "  source: {}", lookup(cp.get_str(index as usize), index))?;
    }

    if cli.constants {
        print_constants(out, cp)?;
    }

    if !class.fields.is_empty() {
        writeln!(out, "Fields:")?;
        for field in &class.fields {
            print_member(out, cp, field)?;
        }
    }

    if !class.methods.is_empty() {
        writeln!(out, "Methods:")?;
        for method in &class.methods {
            print_member(out, cp, method)?;
            if cli.no_code {
                continue;
            }
            if let Some(code) = method.code() {
                writeln!(out, "    stack={} locals={}", code.max_stack, code.max_locals)?;
                for instruction in &code.instructions {
                    writeln!(out, "      {}", instruction)?;
                }
                for entry in &code.exception_table {
                    let catch = match entry.catch_type {
                        0 => "any".to_string(),
                        index => lookup(cp.class_name(index as usize), index),
                    };
                    writeln!(
                        out,
                        "      handler {}..{} -> {} ({})",
                        entry.start_pc, entry.end_pc, entry.handler_pc, catch
                    )?;
                }
            }
        }
    }
    writeln!(out)
}

fn print_constants(out: &mut impl Write, cp: &ConstantPool) -> io::Result<()> {
    writeln!(out, "Constant pool:")?;
    for (index, entry) in cp.iter() {
        if let Some(text) = describe_constant(cp, index, entry) {
            writeln!(out, "  #{} = {}", index, text)?;
        }
    }
    Ok(())
}

/// `name:descriptor` of a `NameAndType` constant.
fn name_and_type(cp: &ConstantPool, index: u16) -> String {
    match cp.name_and_type(index as usize) {
        Ok((name, descriptor)) => format!("{}:{}", name, descriptor),
        Err(e) => {
            warn!("{}", e);
            format!("#{}", index)
        }
    }
}

/// One line of the constant pool listing. `None` for reserved slots.
fn describe_constant(cp: &ConstantPool, index: usize, entry: &ConstantPoolEntry) -> Option<String> {
    let kind = entry.kind_name();
    let text = match *entry {
        ConstantPoolEntry::Unusable => return None,
        ConstantPoolEntry::Utf8 { .. } => lookup(cp.get_str(index), index as u16),
        ConstantPoolEntry::Integer { .. } => format!("{}", entry.as_i32()?),
        ConstantPoolEntry::Float { .. } => format!("{}", entry.as_f32()?),
        ConstantPoolEntry::Long { .. } => format!("{}", entry.as_i64()?),
        ConstantPoolEntry::Double { .. } => format!("{}", entry.as_f64()?),
        ConstantPoolEntry::Class { .. } => lookup(cp.class_name(index), index as u16),
        ConstantPoolEntry::String { string_index } | ConstantPoolEntry::MethodType {
            descriptor_index: string_index,
        } => lookup(cp.get_str(string_index as usize), string_index),
        ConstantPoolEntry::Fieldref {
            class_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::Methodref {
            class_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::InterfaceMethodref {
            class_index,
            name_and_type_index,
        } => format!(
            "{}.{}",
            lookup(cp.class_name(class_index as usize), class_index),
            name_and_type(cp, name_and_type_index)
        ),
        ConstantPoolEntry::NameAndType { .. } => name_and_type(cp, index as u16),
        ConstantPoolEntry::Dynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        }
        | ConstantPoolEntry::InvokeDynamic {
            bootstrap_method_attr_index,
            name_and_type_index,
        } => format!(
            "#{}:{}",
            bootstrap_method_attr_index,
            name_and_type(cp, name_and_type_index)
        ),
        ConstantPoolEntry::MethodHandle {
            reference_kind,
            reference_index,
        } => match entry.ref_kind() {
            Some(ref_kind) => format!("{:?} #{}", ref_kind, reference_index),
            None => format!("{} #{}", reference_kind, reference_index),
        },
        ConstantPoolEntry::Module { name_index } | ConstantPoolEntry::Package { name_index } => {
            lookup(cp.get_str(name_index as usize), name_index)
        }
    };
    Some(format!("{} {}", kind, text))
}

fn print_member<F: Flags>(out: &mut impl Write, cp: &ConstantPool, member: &MemberInfo<F>) -> io::Result<()> {
    writeln!(
        out,
        "  {} {} {}",
        flag_names(&member.access_flags),
        lookup(member.name(cp), member.name_index),
        lookup(member.descriptor(cp), member.descriptor_index)
    )?;
    for attribute in &member.attributes {
        debug!("  attribute {}", attribute.name());
    }
    Ok(())
}

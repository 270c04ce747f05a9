//! Emits the typed message layer for a set of parsed protocols.
//!
//! The output is one self-contained Rust module: per interface a proxy type
//! with request helper methods, a descriptor static, enum newtypes with
//! entry constants, and one record type per request and event; a tagged
//! `Proxy` enum over all interfaces closes the file.

use std::io::{self, Write};

use crate::protocol::{Enum, Interface, Message, Protocol, Type};
use crate::util::{camel_ident, escape_keyword, screaming};

/// Name of the generated file, written to the working directory.
pub const OUTPUT_FILE: &str = "interfaces.rs";

/// One record field, after `new_id` expansion.
struct Field {
    doc: Option<String>,
    name: String,
    typ: Type,
    /// Synthesized by the unqualified-new_id expansion rather than named in
    /// the schema.
    synthesized: bool,
}

/// A `new_id` argument without an interface attribute carries its target
/// interface name and version on the wire, so the record gains `interface`
/// and `version` fields ahead of the id itself.
fn record_fields(message: &Message) -> Vec<Field> {
    let mut fields = Vec::new();
    for arg in &message.args {
        if arg.typ == Type::NewId && arg.interface.is_none() {
            fields.push(Field {
                doc: None,
                name: "interface".to_owned(),
                typ: Type::Str,
                synthesized: true,
            });
            fields.push(Field {
                doc: None,
                name: "version".to_owned(),
                typ: Type::Uint,
                synthesized: true,
            });
        }
        fields.push(Field {
            doc: arg.summary.clone(),
            name: escape_keyword(&arg.name),
            typ: arg.typ,
            synthesized: false,
        });
    }
    fields
}

fn field_type(typ: Type) -> &'static str {
    match typ {
        Type::Int => "i32",
        Type::Uint => "u32",
        Type::Fixed => "Fixed",
        Type::Str => "String",
        Type::Object => "u32",
        Type::NewId => "u32",
        Type::Array => "Vec<u8>",
        Type::Fd => "Fd",
    }
}

fn param_type(typ: Type) -> &'static str {
    match typ {
        Type::Int => "i32",
        Type::Uint => "u32",
        Type::Fixed => "Fixed",
        Type::Str => "&str",
        Type::Object => "ObjectId",
        Type::NewId => "ObjectId",
        Type::Array => "&[u8]",
        Type::Fd => "Fd",
    }
}

fn put_fn(typ: Type) -> &'static str {
    match typ {
        Type::Int => "put_int",
        Type::Uint => "put_uint",
        Type::Fixed => "put_fixed",
        Type::Str => "put_string",
        Type::Object => "put_object",
        Type::NewId => "put_new_id",
        Type::Array => "put_array",
        Type::Fd => "put_fd",
    }
}

fn scan_fn(typ: Type) -> &'static str {
    match typ {
        Type::Int => "int",
        Type::Uint => "uint",
        Type::Fixed => "fixed",
        Type::Str => "string",
        Type::Object => "object",
        Type::NewId => "new_id",
        Type::Array => "array",
        Type::Fd => "fd",
    }
}

fn write_doc<W: Write>(out: &mut W, summary: Option<&str>, indent: &str) -> io::Result<()> {
    match summary {
        Some(summary) if !summary.is_empty() => writeln!(out, "{indent}/// {summary}"),
        _ => Ok(()),
    }
}

fn summary_of(message: &Message) -> Option<&str> {
    message.description.as_ref().map(|desc| desc.summary.as_str())
}

/// Writes the whole generated module. `invocation` is the argument list the
/// generator was invoked with, recorded verbatim in the banner.
pub fn generate<W: Write>(
    protocols: &[Protocol],
    invocation: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "// THIS FILE IS GENERATED BY WAYLITE-SCANNER. DO NOT EDIT.")?;
    writeln!(out, "// Generated with: waylite-scanner {invocation}")?;
    writeln!(out, "#![allow(non_upper_case_globals)]")?;
    writeln!(out, "#![allow(unused_imports)]")?;
    writeln!(out)?;
    writeln!(out, "use crate::protocol::{{")?;
    writeln!(
        out,
        "    Connection, Event, EventDesc, Fd, Fixed, InterfaceDesc, Message, ObjectId, ProtocolDesc,"
    )?;
    writeln!(out, "    Request, RequestDesc,")?;
    writeln!(out, "}};")?;
    writeln!(out, "use crate::wire::{{EmitError, EventScanner, RequestEmitter, ScanError}};")?;

    for protocol in protocols {
        write_protocol(out, protocol)?;
    }
    write_proxy_enum(out, protocols)?;
    Ok(())
}

fn write_protocol<W: Write>(out: &mut W, protocol: &Protocol) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "/".repeat(80))?;
    writeln!(out, "// protocol: {}", protocol.name)?;
    writeln!(out)?;
    writeln!(out, "/// Protocol descriptor for `{}`.", protocol.name)?;
    writeln!(
        out,
        "pub static {}_PROTOCOL: ProtocolDesc = ProtocolDesc {{",
        screaming(&protocol.name)
    )?;
    writeln!(out, "    name: \"{}\",", protocol.name)?;
    writeln!(out, "    interfaces: &[")?;
    for interface in &protocol.interfaces {
        writeln!(out, "        &{}_INTERFACE,", screaming(&interface.name))?;
    }
    writeln!(out, "    ],")?;
    writeln!(out, "}};")?;

    for interface in &protocol.interfaces {
        write_interface(out, protocol, interface)?;
    }
    Ok(())
}

fn write_interface<W: Write>(
    out: &mut W,
    protocol: &Protocol,
    interface: &Interface,
) -> io::Result<()> {
    let camel = camel_ident(&interface.name);

    writeln!(out)?;
    writeln!(out, "// {}", "-".repeat(76))?;
    writeln!(out, "// interface: {}.{}", protocol.name, interface.name)?;
    writeln!(out)?;

    // proxy type
    write_doc(out, interface.description.as_ref().map(|d| d.summary.as_str()), "")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
    writeln!(out, "pub struct {camel} {{")?;
    writeln!(out, "    id: ObjectId,")?;
    writeln!(out, "    version: u32,")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl {camel} {{")?;
    writeln!(out, "    /// Wraps object `id` without version information.")?;
    writeln!(out, "    pub fn new(id: ObjectId) -> {camel} {{")?;
    writeln!(out, "        {camel} {{ id, version: 0 }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// Wraps object `id` bound at `version`.")?;
    writeln!(out, "    pub fn with_version(id: ObjectId, version: u32) -> {camel} {{")?;
    writeln!(out, "        {camel} {{ id, version }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// The proxied object id.")?;
    writeln!(out, "    pub fn id(&self) -> ObjectId {{")?;
    writeln!(out, "        self.id")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// The bound protocol version, or 0 if unknown.")?;
    writeln!(out, "    pub fn version(&self) -> u32 {{")?;
    writeln!(out, "        self.version")?;
    writeln!(out, "    }}")?;
    for request in &interface.requests {
        write_request_helper(out, &camel, request)?;
    }
    writeln!(out, "}}")?;

    // descriptor
    writeln!(out)?;
    writeln!(out, "/// Interface descriptor for `{}`.", interface.name)?;
    writeln!(
        out,
        "pub static {}_INTERFACE: InterfaceDesc = InterfaceDesc {{",
        screaming(&interface.name)
    )?;
    writeln!(out, "    name: \"{}\",", interface.name)?;
    if interface.requests.is_empty() {
        writeln!(out, "    requests: &[],")?;
    } else {
        writeln!(out, "    requests: &[")?;
        for (opcode, request) in interface.requests.iter().enumerate() {
            writeln!(out, "        RequestDesc {{")?;
            writeln!(out, "            name: \"{}\",", request.name)?;
            writeln!(out, "            opcode: {opcode},")?;
            writeln!(
                out,
                "            new_request: || Box::new({}{}Request::default()),",
                camel,
                camel_ident(&request.name)
            )?;
            writeln!(out, "        }},")?;
        }
        writeln!(out, "    ],")?;
    }
    if interface.events.is_empty() {
        writeln!(out, "    events: &[],")?;
    } else {
        writeln!(out, "    events: &[")?;
        for (opcode, event) in interface.events.iter().enumerate() {
            writeln!(out, "        EventDesc {{")?;
            writeln!(out, "            name: \"{}\",", event.name)?;
            writeln!(out, "            opcode: {opcode},")?;
            writeln!(
                out,
                "            new_event: || Box::new({}{}Event::default()),",
                camel,
                camel_ident(&event.name)
            )?;
            writeln!(out, "        }},")?;
        }
        writeln!(out, "    ],")?;
    }
    writeln!(out, "    new_proxy: |id| Proxy::{camel}({camel}::new(id)),")?;
    writeln!(out, "}};")?;

    for enu in &interface.enums {
        write_enum(out, &camel, enu)?;
    }
    for (opcode, request) in interface.requests.iter().enumerate() {
        write_record(out, &camel, request, opcode as u16, true)?;
    }
    for (opcode, event) in interface.events.iter().enumerate() {
        write_record(out, &camel, event, opcode as u16, false)?;
    }
    Ok(())
}

fn write_enum<W: Write>(out: &mut W, iface_camel: &str, enu: &Enum) -> io::Result<()> {
    let name = format!("{iface_camel}{}", camel_ident(&enu.name));
    let inner = if enu.bitfield { "u32" } else { "i32" };

    writeln!(out)?;
    write_doc(out, enu.description.as_ref().map(|d| d.summary.as_str()), "")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "pub struct {name}(pub {inner});")?;
    writeln!(out)?;
    for entry in &enu.entries {
        write_doc(out, entry.summary.as_deref(), "")?;
        writeln!(
            out,
            "pub const {name}{}: {name} = {name}({});",
            camel_ident(&entry.name),
            entry.value
        )?;
    }
    Ok(())
}

fn write_record<W: Write>(
    out: &mut W,
    iface_camel: &str,
    message: &Message,
    opcode: u16,
    request: bool,
) -> io::Result<()> {
    let suffix = if request { "Request" } else { "Event" };
    let name = format!("{iface_camel}{}{suffix}", camel_ident(&message.name));
    let fields = record_fields(message);

    writeln!(out)?;
    write_doc(out, summary_of(message), "")?;
    writeln!(out, "#[derive(Debug, Clone, Default, PartialEq)]")?;
    if fields.is_empty() {
        writeln!(out, "pub struct {name} {{}}")?;
    } else {
        writeln!(out, "pub struct {name} {{")?;
        for field in &fields {
            write_doc(out, field.doc.as_deref(), "    ")?;
            writeln!(out, "    pub {}: {},", field.name, field_type(field.typ))?;
        }
        writeln!(out, "}}")?;
    }

    writeln!(out)?;
    writeln!(out, "impl Message for {name} {{")?;
    writeln!(out, "    fn opcode(&self) -> u16 {{")?;
    writeln!(out, "        {opcode}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn message_name(&self) -> &'static str {{")?;
    writeln!(out, "        \"{name}\"")?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;

    writeln!(out)?;
    if request {
        writeln!(out, "impl Request for {name} {{")?;
        if fields.is_empty() {
            writeln!(out, "    fn emit(&self, _: &mut RequestEmitter) {{}}")?;
        } else {
            writeln!(out, "    fn emit(&self, e: &mut RequestEmitter) {{")?;
            for field in &fields {
                let by_ref = matches!(field.typ, Type::Str | Type::Array);
                if by_ref {
                    writeln!(out, "        e.{}(&self.{});", put_fn(field.typ), field.name)?;
                } else {
                    writeln!(out, "        e.{}(self.{});", put_fn(field.typ), field.name)?;
                }
            }
            writeln!(out, "    }}")?;
        }
        writeln!(out, "}}")?;
    } else {
        writeln!(out, "impl Event for {name} {{")?;
        if fields.is_empty() {
            writeln!(out, "    fn scan(&mut self, _: &mut EventScanner) -> Result<(), ScanError> {{")?;
        } else {
            writeln!(out, "    fn scan(&mut self, s: &mut EventScanner) -> Result<(), ScanError> {{")?;
            for field in &fields {
                writeln!(out, "        self.{} = s.{}()?;", field.name, scan_fn(field.typ))?;
            }
        }
        writeln!(out, "        Ok(())")?;
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
    }
    Ok(())
}

fn write_request_helper<W: Write>(
    out: &mut W,
    iface_camel: &str,
    request: &Message,
) -> io::Result<()> {
    let method = escape_keyword(&request.name);
    let record = format!("{iface_camel}{}Request", camel_ident(&request.name));

    // the helper allocates ids for new_id arguments; an interface-qualified
    // one also decides the return type
    let created = request
        .args
        .iter()
        .find(|arg| arg.typ == Type::NewId && arg.interface.is_some());
    let anonymous = request
        .args
        .iter()
        .find(|arg| arg.typ == Type::NewId && arg.interface.is_none());
    let returns = match (&created, &anonymous) {
        (Some(arg), _) => camel_ident(arg.interface.as_deref().unwrap()),
        (None, Some(_)) => "ObjectId".to_owned(),
        (None, None) => "()".to_owned(),
    };

    let mut params: Vec<(String, &'static str)> = Vec::new();
    for arg in &request.args {
        match arg.typ {
            Type::NewId if arg.interface.is_some() => {}
            Type::NewId => {
                params.push(("interface".to_owned(), "&str"));
                params.push(("version".to_owned(), "u32"));
            }
            typ => params.push((escape_keyword(&arg.name), param_type(typ))),
        }
    }

    writeln!(out)?;
    write_doc(out, summary_of(request), "    ")?;
    if params.is_empty() {
        writeln!(
            out,
            "    pub fn {method}(&self, conn: &impl Connection) -> Result<{returns}, EmitError> {{"
        )?;
    } else {
        writeln!(out, "    pub fn {method}(")?;
        writeln!(out, "        &self,")?;
        writeln!(out, "        conn: &impl Connection,")?;
        for (name, typ) in &params {
            writeln!(out, "        {name}: {typ},")?;
        }
        writeln!(out, "    ) -> Result<{returns}, EmitError> {{")?;
    }

    let mut created_var = None;
    if let Some(arg) = created {
        let var = escape_keyword(&arg.name);
        let target = camel_ident(arg.interface.as_deref().unwrap());
        writeln!(out, "        let {var} = {target}::new(conn.new_id());")?;
        writeln!(out, "        conn.register_proxy(Proxy::{target}({var}));")?;
        created_var = Some(var);
    } else if let Some(arg) = anonymous {
        let var = escape_keyword(&arg.name);
        writeln!(out, "        let {var} = conn.new_id();")?;
        created_var = Some(var);
    }

    let fields = record_fields(request);
    if fields.is_empty() {
        writeln!(out, "        let request = {record} {{}};")?;
    } else {
        writeln!(out, "        let request = {record} {{")?;
        for field in &fields {
            let init = if field.synthesized && field.typ == Type::Str {
                format!("{}: {}.to_owned()", field.name, field.name)
            } else if field.synthesized {
                field.name.clone()
            } else {
                match field.typ {
                    Type::NewId => {
                        let var = created_var.as_deref().unwrap();
                        if anonymous.is_some() {
                            format!("{}: {var}.protocol_id()", field.name)
                        } else {
                            format!("{}: {var}.id().protocol_id()", field.name)
                        }
                    }
                    Type::Object => format!("{}: {}.protocol_id()", field.name, field.name),
                    Type::Str => format!("{}: {}.to_owned()", field.name, field.name),
                    Type::Array => format!("{}: {}.to_vec()", field.name, field.name),
                    _ => field.name.clone(),
                }
            };
            writeln!(out, "            {init},")?;
        }
        writeln!(out, "        }};")?;
    }
    writeln!(out, "        conn.send_request(self.id, &request)?;")?;
    if request.destructor {
        writeln!(out, "        conn.unregister_object(self.id);")?;
    }
    match created_var {
        Some(var) => writeln!(out, "        Ok({var})")?,
        None => writeln!(out, "        Ok(())")?,
    }
    writeln!(out, "    }}")?;
    Ok(())
}

fn write_proxy_enum<W: Write>(out: &mut W, protocols: &[Protocol]) -> io::Result<()> {
    let interfaces: Vec<&Interface> =
        protocols.iter().flat_map(|protocol| &protocol.interfaces).collect();

    writeln!(out)?;
    writeln!(out, "{}", "/".repeat(80))?;
    writeln!(out, "// proxies")?;
    writeln!(out)?;
    writeln!(out, "/// A tagged reference to one bound protocol object, one variant per")?;
    writeln!(out, "/// generated interface.")?;
    writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]")?;
    writeln!(out, "pub enum Proxy {{")?;
    for interface in &interfaces {
        let camel = camel_ident(&interface.name);
        writeln!(out, "    {camel}({camel}),")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "impl Proxy {{")?;
    writeln!(out, "    /// The object id this proxy stands in for.")?;
    writeln!(out, "    pub fn id(&self) -> ObjectId {{")?;
    writeln!(out, "        match *self {{")?;
    for interface in &interfaces {
        let camel = camel_ident(&interface.name);
        writeln!(out, "            Proxy::{camel}(p) => p.id(),")?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// The interface descriptor of the proxied object.")?;
    writeln!(out, "    pub fn descriptor(&self) -> &'static InterfaceDesc {{")?;
    writeln!(out, "        match *self {{")?;
    for interface in &interfaces {
        let camel = camel_ident(&interface.name);
        writeln!(
            out,
            "            Proxy::{camel}(_) => &{}_INTERFACE,",
            screaming(&interface.name)
        )?;
    }
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    /// A fresh, empty event record for `opcode`, or `None` if the interface")?;
    writeln!(out, "    /// defines no such event.")?;
    writeln!(out, "    pub fn dispatch(&self, opcode: u16) -> Option<Box<dyn Event>> {{")?;
    writeln!(
        out,
        "        self.descriptor().events.get(usize::from(opcode)).map(|desc| (desc.new_event)())"
    )?;
    writeln!(out, "    }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    static TEST_PROTOCOL: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<protocol name="wayland">
  <interface name="wl_registry" version="1">
    <request name="bind">
      <description summary="bind an object to the display"/>
      <arg name="name" type="uint"/>
      <arg name="id" type="new_id"/>
    </request>
  </interface>
  <interface name="wl_shm_pool" version="2">
    <request name="create_buffer">
      <arg name="id" type="new_id" interface="wl_buffer"/>
      <arg name="offset" type="int"/>
      <arg name="width" type="int"/>
      <arg name="height" type="int"/>
      <arg name="stride" type="int"/>
      <arg name="format" type="uint"/>
    </request>
    <request name="destroy" type="destructor"/>
  </interface>
  <interface name="wl_shm" version="2">
    <enum name="format">
      <entry name="argb8888" value="0"/>
      <entry name="xrgb8888" value="1"/>
      <entry name="rgb565" value="0x36314752"/>
    </enum>
  </interface>
  <interface name="wl_buffer" version="1">
    <event name="release"/>
  </interface>
</protocol>
"#;

    fn generate_test_module() -> String {
        let protocol = parse::parse(TEST_PROTOCOL).unwrap();
        let mut out = Vec::new();
        generate(&[protocol], "a.xml b", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn banner_records_the_invocation() {
        let module = generate_test_module();
        let mut lines = module.lines();
        assert!(lines.next().unwrap().starts_with("// THIS FILE IS GENERATED"));
        assert!(lines.next().unwrap().contains("a.xml b"));
    }

    #[test]
    fn mangled_record_and_const_names() {
        let module = generate_test_module();
        assert!(module.contains("pub struct WlShmPoolCreateBufferRequest {"));
        assert!(module.contains("pub const WlShmFormatArgb8888: WlShmFormat = WlShmFormat(0);"));
        assert!(module.contains("pub const WlShmFormatRgb565: WlShmFormat = WlShmFormat(909199186);"));
        assert!(module.contains("pub struct WlBufferReleaseEvent {}"));
    }

    #[test]
    fn opcodes_follow_source_order() {
        let module = generate_test_module();
        let create = module.find("impl Message for WlShmPoolCreateBufferRequest").unwrap();
        let destroy = module.find("impl Message for WlShmPoolDestroyRequest").unwrap();
        assert!(create < destroy);
        assert!(module[destroy..].contains("        1\n"));
    }

    #[test]
    fn unqualified_new_id_expands_to_interface_and_version() {
        let module = generate_test_module();
        let record = module
            .find("pub struct WlRegistryBindRequest {")
            .map(|at| &module[at..at + 200])
            .unwrap();
        assert!(record.contains("pub name: u32,"));
        assert!(record.contains("pub interface: String,"));
        assert!(record.contains("pub version: u32,"));
        assert!(record.contains("pub id: u32,"));
    }

    #[test]
    fn destructor_helper_unregisters_the_sender() {
        let module = generate_test_module();
        let helper = module
            .find("pub fn destroy(&self, conn: &impl Connection)")
            .map(|at| &module[at..at + 300])
            .unwrap();
        assert!(helper.contains("conn.unregister_object(self.id);"));
    }

    #[test]
    fn region_markers_delimit_protocols_and_interfaces() {
        let module = generate_test_module();
        assert!(module.contains("// protocol: wayland"));
        assert!(module.contains("// interface: wayland.wl_shm_pool"));
        assert!(module.contains("// proxies"));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_test_module(), generate_test_module());
    }
}

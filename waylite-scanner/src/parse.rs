//! Protocol XML parsing.

use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use quick_xml::events::attributes::Attributes;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::protocol::*;

/// Error produced while decoding a protocol document.
#[derive(Debug)]
pub enum ParseError {
    /// The XML itself could not be read.
    Xml(quick_xml::Error),
    /// The document is well-formed XML but not a valid protocol schema.
    Schema(String),
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Xml(e) => Some(e),
            ParseError::Schema(_) => None,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Xml(e) => write!(f, "parsing xml: {e}"),
            ParseError::Schema(what) => write!(f, "invalid protocol schema: {what}"),
        }
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> ParseError {
        ParseError::Xml(err)
    }
}

fn schema(what: impl Into<String>) -> ParseError {
    ParseError::Schema(what.into())
}

/// Parses one protocol document from `stream`.
pub fn parse<S: Read>(stream: S) -> Result<Protocol, ParseError> {
    let mut reader = Reader::from_reader(BufReader::new(stream));
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;
    parse_protocol(reader)
}

fn decode_utf8(raw: Vec<u8>) -> Result<String, ParseError> {
    String::from_utf8(raw).map_err(|_| schema("attribute is not valid UTF-8"))
}

fn parse_num<T: FromStr>(raw: &[u8]) -> Result<T, ParseError> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|txt| txt.parse().ok())
        .ok_or_else(|| schema(format!("invalid number `{}`", String::from_utf8_lossy(raw))))
}

/// Enum entry values are decimal or `0x`-prefixed hex.
fn parse_entry_value(raw: &[u8]) -> Result<u32, ParseError> {
    if let Some(hex) = raw.strip_prefix(b"0x") {
        std::str::from_utf8(hex)
            .ok()
            .and_then(|txt| u32::from_str_radix(txt, 16).ok())
            .ok_or_else(|| schema(format!("invalid number `{}`", String::from_utf8_lossy(raw))))
    } else {
        parse_num(raw)
    }
}

fn normalize_summary(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_protocol<R: BufRead>(mut reader: Reader<R>) -> Result<Protocol, ParseError> {
    let mut protocol = init_protocol(&mut reader)?;

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"copyright" => {
                    protocol.copyright = Some(parse_copyright(&mut reader)?);
                }
                b"interface" => {
                    protocol.interfaces.push(parse_interface(&mut reader, bytes.attributes())?);
                }
                b"description" => {
                    protocol.description = Some(parse_description(&mut reader, bytes.attributes())?);
                }
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in protocol {}",
                        String::from_utf8_lossy(name),
                        protocol.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == b"protocol" => break,
            Event::Comment(_) => {}
            Event::Eof => return Err(schema("unexpected end of file")),
            _ => {}
        }
    }

    Ok(protocol)
}

fn init_protocol<R: BufRead>(reader: &mut Reader<R>) -> Result<Protocol, ParseError> {
    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Decl(_) | Event::DocType(_) | Event::Comment(_) => continue,
            Event::Start(bytes) => {
                if bytes.name().into_inner() != b"protocol" {
                    return Err(schema("missing toplevel protocol element"));
                }
                let name = bytes
                    .attributes()
                    .filter_map(|attr| attr.ok())
                    .find(|attr| attr.key.into_inner() == b"name")
                    .ok_or_else(|| schema("protocol has no name"))?;
                return Ok(Protocol::new(decode_utf8(name.value.into_owned())?));
            }
            _ => return Err(schema("missing toplevel protocol element")),
        }
    }
}

fn parse_copyright<R: BufRead>(reader: &mut Reader<R>) -> Result<String, ParseError> {
    let mut copyright = String::new();
    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Text(bytes) => {
                copyright = bytes.unescape().map(|txt| txt.to_string()).unwrap_or_default();
            }
            Event::CData(bytes) => {
                copyright = String::from_utf8_lossy(&bytes.into_inner()).to_string();
            }
            Event::End(bytes) if bytes.name().into_inner() == b"copyright" => break,
            Event::Eof => return Err(schema("unexpected end of file in copyright")),
            _ => {}
        }
    }
    Ok(copyright)
}

fn parse_description<R: BufRead>(
    reader: &mut Reader<R>,
    attrs: Attributes,
) -> Result<Description, ParseError> {
    let mut description = Description { summary: String::new(), body: String::new() };
    for attr in attrs.filter_map(|attr| attr.ok()) {
        if attr.key.into_inner() == b"summary" {
            description.summary = normalize_summary(&attr.value);
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Text(bytes) => {
                if !description.body.is_empty() {
                    description.body.push_str("\n\n");
                }
                description.body.push_str(&bytes.unescape().unwrap_or_default());
            }
            Event::End(bytes) if bytes.name().into_inner() == b"description" => break,
            Event::Comment(_) => {}
            Event::Eof => return Err(schema("unexpected end of file in description")),
            _ => {}
        }
    }

    Ok(description)
}

fn parse_interface<R: BufRead>(
    reader: &mut Reader<R>,
    attrs: Attributes,
) -> Result<Interface, ParseError> {
    let mut interface = Interface::new();
    for attr in attrs.filter_map(|attr| attr.ok()) {
        match attr.key.into_inner() {
            b"name" => interface.name = decode_utf8(attr.value.into_owned())?,
            b"version" => interface.version = parse_num(&attr.value)?,
            _ => {}
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"description" => {
                    interface.description = Some(parse_description(reader, bytes.attributes())?)
                }
                b"request" => interface.requests.push(parse_message(reader, bytes.attributes(), b"request")?),
                b"event" => interface.events.push(parse_message(reader, bytes.attributes(), b"event")?),
                b"enum" => interface.enums.push(parse_enum(reader, bytes.attributes())?),
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in interface {}",
                        String::from_utf8_lossy(name),
                        interface.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == b"interface" => break,
            Event::Eof => return Err(schema("unexpected end of file in interface")),
            _ => {}
        }
    }

    Ok(interface)
}

fn parse_message<R: BufRead>(
    reader: &mut Reader<R>,
    attrs: Attributes,
    element: &[u8],
) -> Result<Message, ParseError> {
    let mut message = Message::new();
    for attr in attrs.filter_map(|attr| attr.ok()) {
        match attr.key.into_inner() {
            b"name" => message.name = decode_utf8(attr.value.into_owned())?,
            b"type" => message.destructor = &*attr.value == b"destructor",
            b"since" => message.since = parse_num(&attr.value)?,
            _ => {}
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"description" => {
                    message.description = Some(parse_description(reader, bytes.attributes())?)
                }
                b"arg" => message.args.push(parse_arg(reader, bytes.attributes())?),
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in message {}",
                        String::from_utf8_lossy(name),
                        message.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == element => break,
            Event::Eof => return Err(schema("unexpected end of file in message")),
            _ => {}
        }
    }

    Ok(message)
}

fn parse_arg<R: BufRead>(reader: &mut Reader<R>, attrs: Attributes) -> Result<Arg, ParseError> {
    let mut arg = Arg::new();
    for attr in attrs.filter_map(|attr| attr.ok()) {
        match attr.key.into_inner() {
            b"name" => arg.name = decode_utf8(attr.value.into_owned())?,
            b"type" => arg.typ = parse_type(&attr.value)?,
            b"summary" => arg.summary = Some(normalize_summary(&attr.value)),
            b"interface" => arg.interface = Some(decode_utf8(attr.value.into_owned())?),
            b"allow-null" => arg.allow_null = &*attr.value == b"true",
            b"enum" => arg.enum_ = Some(decode_utf8(attr.value.into_owned())?),
            _ => {}
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"description" => {
                    let _ = parse_description(reader, bytes.attributes())?;
                }
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in arg {}",
                        String::from_utf8_lossy(name),
                        arg.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == b"arg" => break,
            Event::Eof => return Err(schema("unexpected end of file in arg")),
            _ => {}
        }
    }

    Ok(arg)
}

fn parse_type(raw: &[u8]) -> Result<Type, ParseError> {
    match raw {
        b"int" => Ok(Type::Int),
        b"uint" => Ok(Type::Uint),
        b"fixed" => Ok(Type::Fixed),
        b"string" => Ok(Type::Str),
        b"object" => Ok(Type::Object),
        b"new_id" => Ok(Type::NewId),
        b"array" => Ok(Type::Array),
        b"fd" => Ok(Type::Fd),
        other => Err(schema(format!(
            "unknown argument type `{}`",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn parse_enum<R: BufRead>(reader: &mut Reader<R>, attrs: Attributes) -> Result<Enum, ParseError> {
    let mut enu = Enum::new();
    for attr in attrs.filter_map(|attr| attr.ok()) {
        match attr.key.into_inner() {
            b"name" => enu.name = decode_utf8(attr.value.into_owned())?,
            b"since" => enu.since = parse_num(&attr.value)?,
            b"bitfield" => enu.bitfield = &*attr.value == b"true",
            _ => {}
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"description" => {
                    enu.description = Some(parse_description(reader, bytes.attributes())?)
                }
                b"entry" => enu.entries.push(parse_entry(reader, bytes.attributes())?),
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in enum {}",
                        String::from_utf8_lossy(name),
                        enu.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == b"enum" => break,
            Event::Eof => return Err(schema("unexpected end of file in enum")),
            _ => {}
        }
    }

    Ok(enu)
}

fn parse_entry<R: BufRead>(reader: &mut Reader<R>, attrs: Attributes) -> Result<Entry, ParseError> {
    let mut entry = Entry::new();
    for attr in attrs.filter_map(|attr| attr.ok()) {
        match attr.key.into_inner() {
            b"name" => entry.name = decode_utf8(attr.value.into_owned())?,
            b"value" => entry.value = parse_entry_value(&attr.value)?,
            b"since" => entry.since = parse_num(&attr.value)?,
            b"summary" => entry.summary = Some(normalize_summary(&attr.value)),
            _ => {}
        }
    }

    loop {
        match reader.read_event_into(&mut Vec::new())? {
            Event::Start(bytes) => match bytes.name().into_inner() {
                b"description" => {
                    entry.description = Some(parse_description(reader, bytes.attributes())?)
                }
                name => {
                    return Err(schema(format!(
                        "unexpected element `{}` in entry {}",
                        String::from_utf8_lossy(name),
                        entry.name
                    )))
                }
            },
            Event::End(bytes) if bytes.name().into_inner() == b"entry" => break,
            Event::Eof => return Err(schema("unexpected end of file in entry")),
            _ => {}
        }
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    static SMALL_PROTOCOL: &[u8] = br#"<?xml version="1.0" encoding="UTF-8"?>
<protocol name="small">
  <copyright>Copyright notice.</copyright>
  <interface name="wl_thing" version="3">
    <description summary="a test thing"/>
    <request name="create_pool">
      <arg name="id" type="new_id" interface="wl_shm_pool"/>
      <arg name="fd" type="fd"/>
      <arg name="size" type="int" summary="pool   size, in bytes"/>
    </request>
    <request name="destroy" type="destructor"/>
    <event name="ready" since="2">
      <arg name="serial" type="uint"/>
    </event>
    <enum name="flags" bitfield="true">
      <entry name="current" value="0x1" summary="current"/>
      <entry name="preferred" value="2"/>
    </enum>
  </interface>
</protocol>
"#;

    #[test]
    fn parse_small_protocol() {
        let protocol = parse(SMALL_PROTOCOL).unwrap();
        assert_eq!(protocol.name, "small");
        assert_eq!(protocol.copyright.as_deref(), Some("Copyright notice."));
        assert_eq!(protocol.interfaces.len(), 1);

        let interface = &protocol.interfaces[0];
        assert_eq!(interface.name, "wl_thing");
        assert_eq!(interface.version, 3);
        assert_eq!(interface.description.as_ref().unwrap().summary, "a test thing");

        assert_eq!(interface.requests.len(), 2);
        let create = &interface.requests[0];
        assert_eq!(create.name, "create_pool");
        assert!(!create.destructor);
        assert_eq!(create.args.len(), 3);
        assert_eq!(create.args[0].typ, Type::NewId);
        assert_eq!(create.args[0].interface.as_deref(), Some("wl_shm_pool"));
        assert_eq!(create.args[1].typ, Type::Fd);
        // whitespace runs in summaries collapse
        assert_eq!(create.args[2].summary.as_deref(), Some("pool size, in bytes"));
        assert!(interface.requests[1].destructor);

        assert_eq!(interface.events.len(), 1);
        assert_eq!(interface.events[0].since, 2);

        let flags = &interface.enums[0];
        assert!(flags.bitfield);
        assert_eq!(flags.entries[0].value, 1);
        assert_eq!(flags.entries[1].value, 2);
    }

    #[test]
    fn unknown_arg_type_is_an_error() {
        let doc = br#"<protocol name="p"><interface name="i" version="1">
            <request name="r"><arg name="a" type="quux"/></request>
        </interface></protocol>"#;
        let err = parse(&doc[..]).unwrap_err();
        assert!(err.to_string().contains("quux"));
    }

    #[test]
    fn missing_protocol_name_is_an_error() {
        let doc = br#"<protocol><interface name="i" version="1"/></protocol>"#;
        assert!(parse(&doc[..]).is_err());
    }

    #[test]
    fn truncated_document_is_an_error() {
        let doc = br#"<protocol name="p"><interface name="i" version="1">"#;
        assert!(parse(&doc[..]).is_err());
    }
}

#![allow(dead_code)]

//! A minimal scripted compositor for driving the client over a socket pair.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;

/// Reads one client request: returns (object id, opcode, body bytes).
pub fn read_message(stream: &mut UnixStream) -> (u32, u16, Vec<u8>) {
    let mut header = [0u8; 8];
    stream.read_exact(&mut header).unwrap();
    let object = u32::from_ne_bytes(header[0..4].try_into().unwrap());
    let opcode = u16::from_ne_bytes(header[4..6].try_into().unwrap());
    let size = u16::from_ne_bytes(header[6..8].try_into().unwrap());
    let mut body = vec![0u8; usize::from(size) - 8];
    stream.read_exact(&mut body).unwrap();
    (object, opcode, body)
}

/// Frames and writes one event.
pub fn write_event(stream: &mut UnixStream, object: u32, opcode: u16, body: &[u8]) {
    let size = (8 + body.len()) as u16;
    let mut message = Vec::with_capacity(usize::from(size));
    message.extend_from_slice(&object.to_ne_bytes());
    message.extend_from_slice(&opcode.to_ne_bytes());
    message.extend_from_slice(&size.to_ne_bytes());
    message.extend_from_slice(body);
    stream.write_all(&message).unwrap();
}

pub fn uint_arg(body: &[u8], at: usize) -> u32 {
    u32::from_ne_bytes(body[at..at + 4].try_into().unwrap())
}

/// Decodes a string argument at `at`; returns the string and the offset of
/// the next argument.
pub fn string_arg(body: &[u8], at: usize) -> (String, usize) {
    let len = uint_arg(body, at) as usize;
    let padded = (len + 3) & !3;
    let raw = &body[at + 4..at + 4 + len];
    let end = raw.iter().position(|&b| b == 0).unwrap_or(len);
    (String::from_utf8(raw[..end].to_vec()).unwrap(), at + 4 + padded)
}

pub fn put_uint(body: &mut Vec<u8>, v: u32) {
    body.extend_from_slice(&v.to_ne_bytes());
}

pub fn put_string(body: &mut Vec<u8>, v: &str) {
    let len = v.len() + 1;
    put_uint(body, len as u32);
    body.extend_from_slice(v.as_bytes());
    let padded = (len + 3) & !3;
    body.resize(body.len() + padded - v.len(), 0);
}

/// Body of a `wl_registry.global` announcement.
pub fn global_body(name: u32, interface: &str, version: u32) -> Vec<u8> {
    let mut body = Vec::new();
    put_uint(&mut body, name);
    put_string(&mut body, interface);
    put_uint(&mut body, version);
    body
}

/// Asserts that the peer has hung up: the next read yields EOF.
pub fn assert_eof(stream: &mut UnixStream) {
    let mut buf = [0u8; 1];
    assert_eq!(stream.read(&mut buf).unwrap(), 0);
}

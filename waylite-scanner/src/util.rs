//! Name mangling helpers.

/// Converts a lowercase-underscore identifier to UpperCamel, uppercasing
/// the segments `id` and `fd` as whole units: `wl_shm_pool` becomes
/// `WlShmPool`, `new_id` becomes `NewID`.
pub fn camel_ident(input: &str) -> String {
    input
        .split('_')
        .map(|segment| match segment {
            "id" => "ID".to_owned(),
            "fd" => "FD".to_owned(),
            _ => {
                let mut chars = segment.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            }
        })
        .collect()
}

/// Converts an interface name to the SCREAMING form used for descriptor
/// statics: `wl_display` becomes `WL_DISPLAY`.
pub fn screaming(input: &str) -> String {
    input.to_ascii_uppercase()
}

/// Appends an underscore when a schema name would collide with a Rust
/// keyword in field or method position.
pub fn escape_keyword(input: &str) -> String {
    if is_keyword(input) {
        format!("{input}_")
    } else {
        input.to_owned()
    }
}

pub fn is_keyword(txt: &str) -> bool {
    matches!(
        txt,
        "abstract"
            | "as"
            | "async"
            | "await"
            | "become"
            | "box"
            | "break"
            | "const"
            | "continue"
            | "crate"
            | "do"
            | "dyn"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "final"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "macro"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "override"
            | "priv"
            | "pub"
            | "ref"
            | "return"
            | "self"
            | "static"
            | "struct"
            | "super"
            | "trait"
            | "true"
            | "try"
            | "type"
            | "typeof"
            | "unsafe"
            | "unsized"
            | "use"
            | "virtual"
            | "where"
            | "while"
            | "yield"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_basic() {
        assert_eq!(camel_ident("wl_display"), "WlDisplay");
        assert_eq!(camel_ident("wl_shm_pool"), "WlShmPool");
        assert_eq!(camel_ident("create_buffer"), "CreateBuffer");
        assert_eq!(camel_ident("argb8888"), "Argb8888");
    }

    #[test]
    fn camel_id_and_fd_are_whole_units() {
        assert_eq!(camel_ident("new_id"), "NewID");
        assert_eq!(camel_ident("delete_id"), "DeleteID");
        assert_eq!(camel_ident("fd"), "FD");
        assert_eq!(camel_ident("invalid_fd"), "InvalidFD");
        // only whole segments are uppercased
        assert_eq!(camel_ident("idle"), "Idle");
    }

    #[test]
    fn camel_numeric_segments() {
        assert_eq!(camel_ident("90"), "90");
        assert_eq!(camel_ident("flipped_90"), "Flipped90");
    }

    #[test]
    fn screaming_interface() {
        assert_eq!(screaming("wl_shm_pool"), "WL_SHM_POOL");
    }

    #[test]
    fn keyword_escape() {
        assert_eq!(escape_keyword("move"), "move_");
        assert_eq!(escape_keyword("interface"), "interface");
        assert_eq!(escape_keyword("x"), "x");
    }
}

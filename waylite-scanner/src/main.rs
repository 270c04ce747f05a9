//! Generates the typed waylite message layer from Wayland protocol XML.
//!
//! Every positional argument names a filesystem root; each `*.xml` file
//! found under the roots is parsed as one protocol document. Dot-named
//! files and directories are skipped. The generated module is written to
//! `interfaces.rs` in the working directory, with the invocation recorded
//! in its banner.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

mod codegen;
mod parse;
mod protocol;
mod util;

use protocol::Protocol;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let mut protocols = Vec::new();
    for root in args {
        scan_root(Path::new(root), &mut protocols)?;
    }

    // protocols sort by name; interfaces and messages keep source order so
    // opcodes stay positional
    protocols.sort_by(|a, b| a.name.cmp(&b.name));

    let mut buf = Vec::new();
    codegen::generate(&protocols, &args.join(" "), &mut buf)
        .map_err(|e| format!("generating code: {e}"))?;
    fs::write(codegen::OUTPUT_FILE, &buf)
        .map_err(|e| format!("writing {}: {e}", codegen::OUTPUT_FILE))?;
    Ok(())
}

fn scan_root(path: &Path, protocols: &mut Vec<Protocol>) -> Result<(), String> {
    if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
        if name.starts_with('.') {
            return Ok(());
        }
    }

    let metadata =
        fs::metadata(path).map_err(|e| format!("scanning {}: {e}", path.display()))?;
    if metadata.is_dir() {
        let mut entries: Vec<_> = fs::read_dir(path)
            .and_then(|entries| entries.collect::<Result<_, _>>())
            .map_err(|e| format!("scanning {}: {e}", path.display()))?;
        // fixed-order scanning keeps the output deterministic
        entries.sort_by_key(|entry| entry.file_name());
        for entry in entries {
            scan_root(&entry.path(), protocols)?;
        }
        return Ok(());
    }

    if path.extension().and_then(|ext| ext.to_str()) != Some("xml") {
        return Ok(());
    }

    let file = fs::File::open(path).map_err(|e| format!("opening {}: {e}", path.display()))?;
    let protocol =
        parse::parse(file).map_err(|e| format!("processing {}: {e}", path.display()))?;
    protocols.push(protocol);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct TempTree {
        root: std::path::PathBuf,
    }

    impl TempTree {
        fn new(tag: &str) -> TempTree {
            let root = std::env::temp_dir()
                .join(format!("waylite-scanner-test-{tag}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&root);
            fs::create_dir_all(&root).unwrap();
            TempTree { root }
        }

        fn write(&self, rel: &str, contents: &str) {
            let path = self.root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            let mut file = fs::File::create(path).unwrap();
            file.write_all(contents.as_bytes()).unwrap();
        }
    }

    impl Drop for TempTree {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.root);
        }
    }

    fn protocol_doc(name: &str) -> String {
        format!(
            r#"<protocol name="{name}"><interface name="wl_thing" version="1"/></protocol>"#
        )
    }

    #[test]
    fn walk_skips_dot_entries_and_non_xml() {
        let tree = TempTree::new("walk");
        tree.write("b.xml", &protocol_doc("beta"));
        tree.write("sub/a.xml", &protocol_doc("alpha"));
        tree.write(".hidden.xml", &protocol_doc("hidden"));
        tree.write(".git/ignored.xml", &protocol_doc("ignored"));
        tree.write("notes.txt", "not xml");

        let mut protocols = Vec::new();
        scan_root(&tree.root, &mut protocols).unwrap();
        let mut names: Vec<&str> =
            protocols.iter().map(|protocol| protocol.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn walk_accepts_a_file_root() {
        let tree = TempTree::new("file-root");
        tree.write("one.xml", &protocol_doc("one"));

        let mut protocols = Vec::new();
        scan_root(&tree.root.join("one.xml"), &mut protocols).unwrap();
        assert_eq!(protocols.len(), 1);
        assert_eq!(protocols[0].name, "one");
    }

    #[test]
    fn missing_root_is_an_error_with_path_context() {
        let mut protocols = Vec::new();
        let err = scan_root(Path::new("/nonexistent/waylite"), &mut protocols).unwrap_err();
        assert!(err.contains("/nonexistent/waylite"));
    }

    #[test]
    fn malformed_xml_is_an_error_with_path_context() {
        let tree = TempTree::new("malformed");
        tree.write("bad.xml", "<protocol name=\"p\"><interface");

        let mut protocols = Vec::new();
        let err = scan_root(&tree.root, &mut protocols).unwrap_err();
        assert!(err.contains("bad.xml"));
    }
}

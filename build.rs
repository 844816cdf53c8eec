use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_LOCALE: &str = "en";

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let locales_dir = manifest_dir.join("locales");
    println!("cargo:rerun-if-changed={}", locales_dir.display());

    let mut locales = Vec::new();
    let mut entries = fs::read_dir(&locales_dir)
        .expect("locales directory must exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect::<Vec<_>>();
    entries.sort();

    for path in entries {
        println!("cargo:rerun-if-changed={}", path.display());
        let locale = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .expect("locale file name must be utf-8")
            .to_string();
        let content = fs::read_to_string(&path).expect("locale file must be readable");
        let table = toml::from_str::<toml::Table>(&content)
            .unwrap_or_else(|error| panic!("invalid locale file {}: {error}", path.display()));
        let mut messages = Vec::new();
        flatten("", &table, &mut messages);
        messages.sort();
        locales.push((locale, messages));
    }

    let mut generated = String::new();
    generated.push_str(&format!("pub const DEFAULT_LOCALE: &str = {DEFAULT_LOCALE:?};\n"));
    generated.push_str("pub static LOCALES: &[(&str, &[(&str, &str)])] = &[\n");
    for (locale, messages) in &locales {
        generated.push_str(&format!("    ({locale:?}, &[\n"));
        for (key, value) in messages {
            generated.push_str(&format!("        ({key:?}, {value:?}),\n"));
        }
        generated.push_str("    ]),\n");
    }
    generated.push_str("];\n");

    let out = Path::new(&env::var("OUT_DIR").expect("out dir")).join("calmform_i18n_generated.rs");
    fs::write(out, generated).expect("generated catalog must be writable");
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut Vec<(String, String)>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(text) => out.push((full_key, text.clone())),
            toml::Value::Table(nested) => flatten(&full_key, nested, out),
            other => panic!("locale key {full_key} must be a string, found {other}"),
        }
    }
}

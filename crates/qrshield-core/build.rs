use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    // Data files live under the crate directory so they are included in the
    // crate tarball and `cargo publish` works correctly.
    let data_dir = Path::new(&manifest_dir).join("assets").join("data");

    compile_word_list(
        &data_dir,
        &out_dir,
        "suspicious_tlds.txt",
        "SUSPICIOUS_TLDS",
        "suspicious_tlds_gen.rs",
    );
    compile_word_list(
        &data_dir,
        &out_dir,
        "shorteners.txt",
        "SHORTENERS",
        "shorteners_gen.rs",
    );
    compile_keyword_groups(&data_dir, &out_dir);
    compile_file_extensions(&data_dir, &out_dir);

    println!("cargo:rerun-if-changed=assets/data/suspicious_tlds.txt");
    println!("cargo:rerun-if-changed=assets/data/shorteners.txt");
    println!("cargo:rerun-if-changed=assets/data/keyword_groups.csv");
    println!("cargo:rerun-if-changed=assets/data/file_extensions.csv");
    println!("cargo:rerun-if-changed=build.rs");
}

/// One lowercase entry per line, `#` comments allowed.
fn compile_word_list(data_dir: &Path, out_dir: &str, file: &str, name: &str, out_file: &str) {
    let path = data_dir.join(file);
    let content =
        fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {file}: {e}"));

    let mut words = Vec::new();
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let word = line.to_lowercase();
        if !words.contains(&word) {
            words.push(word);
        }
    }

    let mut code = String::new();
    code.push_str(&format!("/// Auto-generated from {file}.\n"));
    code.push_str(&format!("pub const {name}: &[&str] = &[\n"));
    for word in &words {
        code.push_str(&format!("    {word:?},\n"));
    }
    code.push_str("];\n");

    let out_path = Path::new(out_dir).join(out_file);
    fs::write(&out_path, code).unwrap();
}

/// `group,term` rows. Group order is first appearance; term order is file order.
fn compile_keyword_groups(data_dir: &Path, out_dir: &str) {
    let path = data_dir.join("keyword_groups.csv");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read keyword_groups.csv: {e}"));

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((group, term)) = line.split_once(',') else {
            panic!("Malformed keyword row: {line}");
        };
        let group = group.trim().to_lowercase();
        let term = term.trim().to_lowercase();
        match groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, terms)) => terms.push(term),
            None => groups.push((group, vec![term])),
        }
    }

    let mut code = String::new();
    code.push_str("/// Auto-generated keyword table: (group, terms) in evaluation order.\n");
    code.push_str("pub const KEYWORD_GROUPS: &[(&str, &[&str])] = &[\n");
    for (group, terms) in &groups {
        code.push_str(&format!("    ({group:?}, &["));
        let quoted: Vec<String> = terms.iter().map(|t| format!("{t:?}")).collect();
        code.push_str(&quoted.join(", "));
        code.push_str("]),\n");
    }
    code.push_str("];\n");

    let out_path = Path::new(out_dir).join("keyword_groups_gen.rs");
    fs::write(&out_path, code).unwrap();
}

/// `kind,extension` rows where kind is `executable` or `document`.
fn compile_file_extensions(data_dir: &Path, out_dir: &str) {
    let path = data_dir.join("file_extensions.csv");
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read file_extensions.csv: {e}"));

    let mut executable = Vec::new();
    let mut document = Vec::new();
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 2 {
            continue;
        }
        let ext = parts[1].to_lowercase();
        match parts[0] {
            "executable" => executable.push(ext),
            "document" => document.push(ext),
            other => panic!("Unknown extension kind '{other}' in file_extensions.csv"),
        }
    }

    let mut code = String::new();
    code.push_str("/// Auto-generated executable/archive extensions.\n");
    code.push_str("pub const EXECUTABLE_EXTENSIONS: &[&str] = &[\n");
    for ext in &executable {
        code.push_str(&format!("    {ext:?},\n"));
    }
    code.push_str("];\n\n");
    code.push_str("/// Auto-generated document extensions.\n");
    code.push_str("pub const DOCUMENT_EXTENSIONS: &[&str] = &[\n");
    for ext in &document {
        code.push_str(&format!("    {ext:?},\n"));
    }
    code.push_str("];\n");

    let out_path = Path::new(out_dir).join("file_extensions_gen.rs");
    fs::write(&out_path, code).unwrap();
}

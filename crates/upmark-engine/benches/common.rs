// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content**.\n\n\n- Bullet point\n\t- Nested item\n- Another item\n\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_nested_lists(items: usize, depth: usize) -> String {
    let mut content = String::from("\n");
    for i in 0..items {
        let indent = "\t".repeat(i % depth.max(1));
        content.push_str(&format!("\n{indent}{}. item {i}", i + 1));
    }
    content.push('\n');
    content
}

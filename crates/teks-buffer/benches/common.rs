// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_lf_text(lines: usize) -> Vec<u8> {
    let mut text = Vec::new();
    for line in 0..lines {
        text.extend_from_slice(format!("line {line} with some ordinary content\n").as_bytes());
    }
    text
}

#[allow(dead_code)]
pub fn generate_mixed_newline_text(lines: usize) -> Vec<u8> {
    let endings: [&[u8]; 3] = [b"\n", b"\r\n", b"\r"];
    let mut text = Vec::new();
    for line in 0..lines {
        text.extend_from_slice(format!("line {line} with\0binary content").as_bytes());
        text.extend_from_slice(endings[line % endings.len()]);
    }
    text
}

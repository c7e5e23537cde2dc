pub const NO_CONTEXT: &str = "No specific context available.";

/// Join documents into numbered blocks, stopping at the first block that
/// would push the running length past `max_chars`.
pub fn build_context<S: AsRef<str>>(documents: &[S], max_chars: usize) -> String {
    if documents.is_empty() {
        return NO_CONTEXT.to_string();
    }
    let mut parts = Vec::new();
    let mut used = 0usize;
    for (i, doc) in documents.iter().enumerate() {
        let block = format!("\n[Document {}]\n{}\n", i + 1, doc.as_ref());
        let len = block.chars().count();
        if used + len > max_chars {
            break;
        }
        used += len;
        parts.push(block);
    }
    parts.join("\n")
}

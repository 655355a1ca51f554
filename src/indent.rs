/// Padding that aligns continuation lines with the placeholder.
///
/// The prefix between the start of the placeholder's line and the
/// placeholder itself is returned when it holds nothing but spaces. A
/// placeholder on the first line of the file never gets padding, and a
/// prefix with tabs or text is rejected.
///
/// # Arguments
///
/// * `template` - Full template bytes
/// * `match_start` - Byte offset where the placeholder begins
pub fn padding_for(template: &[u8], match_start: usize) -> Option<&[u8]> {
    let line_start = template[..match_start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|newline| newline + 1)
        .unwrap_or(0);

    if line_start == 0 {
        return None;
    }

    let prefix = &template[line_start..match_start];
    prefix.iter().all(|&b| b == b' ').then_some(prefix)
}

/// Prefix every line after the first with `padding`.
///
/// The first line already sits behind the template's own indentation. A
/// trailing `\n` in `replacement` yields a final line that is padded too.
pub fn reindent(replacement: &[u8], padding: &[u8]) -> Vec<u8> {
    let mut lines = replacement.split(|&b| b == b'\n');
    let mut out = Vec::with_capacity(replacement.len());

    if let Some(first) = lines.next() {
        out.extend_from_slice(first);
    }
    for line in lines {
        out.push(b'\n');
        out.extend_from_slice(padding);
        out.extend_from_slice(line);
    }

    out
}

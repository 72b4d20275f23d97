use super::cursor::Cursor;

/// An executable fragment lifted out of inert markup.
///
/// Carries everything needed to re-create an equivalent executable node in
/// the preview surface: the attribute list of the original tag and its
/// inline body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFragment {
    /// Attributes in source order; names lowercased, values verbatim.
    pub attrs: Vec<(String, String)>,
    /// Inline body text, verbatim.
    pub body: String,
}

pub struct ScriptTag;

impl ScriptTag {
    pub const OPEN: &'static [u8] = b"<script";
    pub const CLOSE: &'static [u8] = b"</script";
}

const STYLE_OPEN: &[u8] = b"<style";
const STYLE_CLOSE: &[u8] = b"</style";

/// Finds every script element in `html` and returns its attributes and
/// inline body, in document order.
///
/// Best-effort by contract: malformed tags are skipped as plain text, an
/// unterminated script element takes the rest of the input as its body, and
/// no input ever produces an error.
pub fn extract_scripts(html: &str) -> Vec<ScriptFragment> {
    let mut cur = Cursor::new(html);
    let mut out = Vec::new();

    while !cur.eof() {
        if at_tag_open(&cur, ScriptTag::OPEN)
            && let Some(fragment) = try_parse_script(&mut cur)
        {
            out.push(fragment);
            continue;
        }
        cur.bump();
    }
    out
}

/// Removes every well-formed tag from `html`, keeping text content.
///
/// Comments are dropped, and the contents of script and style elements are
/// dropped with their tags since they are code, not text. A stray `<` that
/// opens nothing is kept as text.
pub fn strip_tags(html: &str) -> String {
    let mut cur = Cursor::new(html);
    let mut out = String::new();
    let mut text_start = 0;

    while !cur.eof() {
        if cur.peek() == Some(b'<') {
            let tag_start = cur.i;
            if try_skip_comment(&mut cur)
                || try_skip_element_with_body(&mut cur, ScriptTag::OPEN, ScriptTag::CLOSE)
                || try_skip_element_with_body(&mut cur, STYLE_OPEN, STYLE_CLOSE)
                || try_skip_plain_tag(&mut cur)
            {
                out.push_str(&cur.s[text_start..tag_start]);
                text_start = cur.i;
                continue;
            }
        }
        cur.bump();
    }
    out.push_str(&cur.s[text_start..]);
    out
}

/// True if the cursor sits on `open` followed by a tag-name boundary, so
/// `<script>` matches but `<scripts>` does not.
fn at_tag_open(cur: &Cursor<'_>, open: &[u8]) -> bool {
    cur.starts_with_ignore_case(open)
        && matches!(
            cur.peek_ahead(open.len()),
            None | Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        )
}

/// Attempts to parse a full script element at the current position.
///
/// Returns `None` if the open tag itself is malformed (no closing `>`); the
/// cursor is restored so the caller falls back to treating it as text.
fn try_parse_script(cur: &mut Cursor<'_>) -> Option<ScriptFragment> {
    let saved = cur.clone();
    cur.bump_n(ScriptTag::OPEN.len());

    let Some((attrs, self_closing)) = parse_attrs(cur) else {
        *cur = saved;
        return None;
    };
    if self_closing {
        return Some(ScriptFragment {
            attrs,
            body: String::new(),
        });
    }

    // Body runs to the matching close tag; an unterminated element takes the
    // rest of the input, as a forgiving document parser does.
    let body_start = cur.i;
    while !cur.eof() && !cur.starts_with_ignore_case(ScriptTag::CLOSE) {
        cur.bump();
    }
    let body = cur.s[body_start..cur.i].to_string();
    skip_close_tag(cur, ScriptTag::CLOSE);

    Some(ScriptFragment { attrs, body })
}

/// Parses the attribute list of an open tag, consuming through the closing
/// `>` (or `/>`). Returns `None` if the input ends before the tag closes.
///
/// Accepts double-quoted, single-quoted, and bare values, and valueless
/// attributes. Names are lowercased.
fn parse_attrs(cur: &mut Cursor<'_>) -> Option<(Vec<(String, String)>, bool)> {
    let mut attrs = Vec::new();
    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None => return None,
            Some(b'>') => {
                cur.bump();
                return Some((attrs, false));
            }
            Some(b'/') => {
                if cur.starts_with(b"/>") {
                    cur.bump_n(2);
                    return Some((attrs, true));
                }
                cur.bump();
            }
            Some(_) => {
                let name =
                    cur.take_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'));
                if name.is_empty() {
                    // Stray '=' with no name; skip it rather than loop forever
                    cur.bump();
                    continue;
                }
                cur.skip_whitespace();
                let value = if cur.peek() == Some(b'=') {
                    cur.bump();
                    cur.skip_whitespace();
                    match cur.peek() {
                        Some(q @ (b'"' | b'\'')) => {
                            cur.bump();
                            let v = cur.take_while(|b| b != q);
                            if cur.eof() {
                                return None; // unterminated quote
                            }
                            cur.bump();
                            v
                        }
                        _ => cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
                    }
                } else {
                    ""
                };
                attrs.push((name.to_ascii_lowercase(), value.to_string()));
            }
        }
    }
}

/// Consumes a close tag (`</script` plus anything through `>`), if present.
fn skip_close_tag(cur: &mut Cursor<'_>, close: &[u8]) {
    if cur.eof() {
        return;
    }
    cur.bump_n(close.len());
    while let Some(b) = cur.bump() {
        if b == b'>' {
            break;
        }
    }
}

/// Skips a `<!-- -->` comment; an unterminated comment runs to end of input.
fn try_skip_comment(cur: &mut Cursor<'_>) -> bool {
    if !cur.starts_with(b"<!--") {
        return false;
    }
    cur.bump_n(4);
    while !cur.eof() && !cur.starts_with(b"-->") {
        cur.bump();
    }
    if !cur.eof() {
        cur.bump_n(3);
    }
    true
}

/// Skips an element whose contents are code rather than text, dropping the
/// body along with the tags.
fn try_skip_element_with_body(cur: &mut Cursor<'_>, open: &[u8], close: &[u8]) -> bool {
    if !at_tag_open(cur, open) {
        return false;
    }
    let saved = cur.clone();
    cur.bump_n(open.len());
    let Some((_, self_closing)) = parse_attrs(cur) else {
        *cur = saved;
        return false;
    };
    if self_closing {
        return true;
    }
    while !cur.eof() && !cur.starts_with_ignore_case(close) {
        cur.bump();
    }
    skip_close_tag(cur, close);
    true
}

/// Skips a single well-formed tag. Quoted attribute values may contain `>`.
/// Returns false, restoring the cursor, if the tag never closes or the `<`
/// does not open one.
fn try_skip_plain_tag(cur: &mut Cursor<'_>) -> bool {
    match cur.peek_ahead(1) {
        Some(b'/' | b'!' | b'?') => {}
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }

    let saved = cur.clone();
    cur.bump(); // '<'
    let mut quote: Option<u8> = None;
    while let Some(b) = cur.bump() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return true,
                _ => {}
            },
        }
    }
    *cur = saved;
    false
}

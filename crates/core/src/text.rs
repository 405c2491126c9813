// Decoded in declaration order; anything outside this set passes through.
const ENTITIES: [(&str, &str); 6] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

pub fn clean(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut tag = String::new();
    let mut in_tag = false;
    for ch in raw.chars() {
        if in_tag {
            if ch == '>' {
                // "<>" has no tag content and stays literal text.
                if tag.is_empty() {
                    stripped.push_str("<>");
                }
                tag.clear();
                in_tag = false;
            } else {
                tag.push(ch);
            }
        } else if ch == '<' {
            in_tag = true;
        } else {
            stripped.push(ch);
        }
    }
    // A "<" that never closes is literal text, not markup.
    if in_tag {
        stripped.push('<');
        stripped.push_str(&tag);
    }

    // Entities decode after tag removal, so a decoded "<" never opens a tag.
    let mut decoded = stripped;
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

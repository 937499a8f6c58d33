/// 숫자 등에 포함된 '.'만 escape (MarkdownV2)
/// Escapes literal periods, the only special character in formatted numbers.
pub fn escape_dots(value: impl ToString) -> String {
    value.to_string().replace('.', "\\.")
}

const MARKDOWN_V2_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// 임의 텍스트 (사용자 입력, API 응답)를 MarkdownV2용으로 escape
/// Escapes arbitrary text for a MarkdownV2 message.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

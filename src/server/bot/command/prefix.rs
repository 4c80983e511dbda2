//! Recognizing commands in message content.

/// Strips the command prefix or a leading bot mention from a message.
///
/// Accepts `<prefix>cmd`, `<@bot> cmd` and `<@!bot> cmd`. Returns `None` when
/// the message is not addressed to the bot or nothing follows the prefix.
pub fn parse_prefix<'a>(content: &'a str, prefix: &str, bot_id: u64) -> Option<&'a str> {
    let content = content.trim_start();

    let rest = if !prefix.is_empty() && content.starts_with(prefix) {
        &content[prefix.len()..]
    } else {
        let mention = format!("<@{}>", bot_id);
        let nick_mention = format!("<@!{}>", bot_id);

        content
            .strip_prefix(mention.as_str())
            .or_else(|| content.strip_prefix(nick_mention.as_str()))?
    };

    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Splits command text on whitespace. Double quotes group words into one token
/// and are removed.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if has_token {
        tokens.push(current);
    }

    tokens
}

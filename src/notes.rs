use std::borrow::Cow;

/// Ticket reference prefix that inventory owners put in front of the application name.
pub const TICKET_PREFIX: &str = "RITM";

/// Strips a leading `RITM<digits>` ticket token from a free-text notes value.
///
/// Missing or blank notes yield an empty string. When the first whitespace-separated
/// token is a ticket reference and at least one more token follows, the remaining tokens
/// are returned joined by single spaces. Any other value is returned untouched, including
/// its original whitespace.
pub fn normalize_notes(notes: Option<&str>) -> Cow<'_, str> {
    let Some(raw) = notes else {
        return Cow::Borrowed("");
    };
    if raw.trim().is_empty() {
        return Cow::Borrowed("");
    }
    let mut tokens = raw.split_whitespace();
    match tokens.next() {
        Some(first) if is_ticket_token(first) => {
            let rest = tokens.collect::<Vec<_>>();
            if rest.is_empty() {
                Cow::Borrowed(raw)
            } else {
                Cow::Owned(rest.join(" "))
            }
        }
        _ => Cow::Borrowed(raw),
    }
}

fn is_ticket_token(token: &str) -> bool {
    match token.strip_prefix(TICKET_PREFIX) {
        Some(number) => !number.is_empty() && number.chars().all(|ch| ch.is_ascii_digit()),
        None => false,
    }
}

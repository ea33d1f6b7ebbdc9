pub const DATA_LINE: &[u8] = b"data: Hello, world!\n";
pub const COMMENT_LINE: &[u8] = b": this is a comment\n";
pub const EVENT_LINE: &[u8] = b"event: update\n";
pub const ID_LINE: &[u8] = b"id: 42\n";
pub const EMPTY_LINE: &[u8] = b"\n";
pub const NO_VALUE_LINE: &[u8] = b"data\n";
pub const NO_SPACE_LINE: &[u8] = b"data:value\n";
pub const DONE_LINE: &[u8] = b"data: [DONE]\n";

// roughly 1 KiB payload with multi-byte characters mixed in
const BIG_DATA_LINE_STR: &str = "data: mQ4tZ8kXw1\u{1F680}pLbN0vYcR7sDfGh2JkMn9QwEr5TzUi3OpAs6DfGhJkL0ZxCvBnM1qWeRtY\u{1F680}uIoP8aSdFgH4jKlZx7CvBnMq2WeRtYuI9oPaSdF0gHjKlZXcVbNm5QwErTy\u{1F680}Ui6OpAsDf1GhJkLzXcV3bNmQwEr8TyUiOp0AsDfGhJk4LzXcVbNm\u{1F680}QwErTyUi2OpAsDfGh7JkLzXcVbN1mQwErTyUi5OpAsDfGhJkLz9XcVbNmQwE\u{1F680}rTyUiOpAs3DfGhJkLzXc0VbNmQwErTy6UiOpAsDfGh1JkLzXcVbNmQw8ErTyUiOpAsD\u{1F680}fGhJkLzXcVbN4mQwErTyUiOp2AsDfGhJkLzX7cVbNmQwErTyUi0OpAsDfGhJkL5zXcVbNmQwErT\u{1F680}yUiOpAsDfGh9JkLzXcVbNmQwEr3TyUiOpAsDfGhJk1LzXcVbNmQwErTyU6iOpAsDfGhJkLzXc8VbNm\u{1F680}QwErTyUiOpAsDf0GhJkLzXcVbNmQwEr4TyUiOpAsDfGhJkLz2XcVbNmQwErTyUiOp7AsDfGhJkLzXcVbNm\u{1F680}5QwErTyUiOpAsDfGhJk9LzXcVbNmQwErTyUiOpA3sDfGhJkLzXcVbNmQwErTy1UiOpAsDfGhJkLzXcVbNmQw6Er\u{1F680}TyUiOpAsDfGhJkLzXcVbNm8QwErTyUiOpAsDfGhJkLzXcV0bNmQwErTyUiOpAsDfGhJkLzXc4VbNmQwErTyUiOpAsDfGhJkLz\u{1F680}XcVbNmQwErTyUiOpAsDfGhJkLzXcVbNmQwErTyUiOpAsDfGhJkLzXcVbNmQwErTyUiOpAsDfGhJkLzXcVbNmQwErTyUiOpAsDfG\n";
pub const BIG_DATA_LINE: &[u8] = BIG_DATA_LINE_STR.as_bytes();

pub fn generate_one_of_each(n: usize) -> Vec<u8> {
    let mut buf = Vec::<u8>::with_capacity(
        (DATA_LINE.len()
            + COMMENT_LINE.len()
            + EVENT_LINE.len()
            + ID_LINE.len()
            + EMPTY_LINE.len())
            * n,
    );

    for _ in 0..n {
        buf.extend_from_slice(DATA_LINE);
        buf.extend_from_slice(COMMENT_LINE);
        buf.extend_from_slice(EVENT_LINE);
        buf.extend_from_slice(ID_LINE);
        buf.extend_from_slice(EMPTY_LINE);
    }
    buf
}

/// `n` single-line events followed by the completion marker, the shape of a chat response
pub fn generate_chat_stream(n: usize) -> Vec<u8> {
    let mut buf = Vec::<u8>::with_capacity(
        (DATA_LINE.len() + EMPTY_LINE.len()) * n + DONE_LINE.len() + EMPTY_LINE.len(),
    );

    for _ in 0..n {
        buf.extend_from_slice(DATA_LINE);
        buf.extend_from_slice(EMPTY_LINE);
    }
    buf.extend_from_slice(DONE_LINE);
    buf.extend_from_slice(EMPTY_LINE);
    buf
}

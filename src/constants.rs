pub(crate) const LF: u8 = b'\n';
pub(crate) const CR: u8 = b'\r';

const BOM_CHAR: char = '\u{FEFF}';
const BOM_LEN: usize = BOM_CHAR.len_utf8();
// bom           = %xFEFF ; U+FEFF BYTE ORDER MARK
pub(crate) const BOM: &[u8; BOM_LEN] = &{
    let mut buf = [0u8; BOM_LEN];
    BOM_CHAR.encode_utf8(&mut buf);
    buf
};

pub(crate) const DATA_FIELD: &[u8] = b"data";

/// Completion marker, matched after trimming and ignoring ascii case
pub(crate) const DONE_MARKER: &str = "[DONE]";

/// Prefix for errors degraded into the response body once streaming has begun
pub(crate) const ERROR_PREFIX: &str = "Error: ";

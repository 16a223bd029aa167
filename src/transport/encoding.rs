const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode a query value the way the legacy HTTP API expects it.
///
/// Bytes in `[A-Za-z0-9-_.~]` pass through, a space becomes `+`, and every
/// other byte (including control bytes and each byte of a multi-byte UTF-8
/// sequence) becomes `%XX` with uppercase hex digits.
pub fn url_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
                out.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(encoded: &str) -> String {
        let bytes = encoded.as_bytes();
        let mut out = Vec::new();
        let mut idx = 0;
        while idx < bytes.len() {
            match bytes[idx] {
                b'+' => {
                    out.push(b' ');
                    idx += 1;
                }
                b'%' => {
                    let hex = std::str::from_utf8(&bytes[idx + 1..idx + 3]).unwrap();
                    out.push(u8::from_str_radix(hex, 16).unwrap());
                    idx += 3;
                }
                other => {
                    out.push(other);
                    idx += 1;
                }
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn safe_characters_pass_through() {
        assert_eq!(url_encode("Hello_World-2.0~Test"), "Hello_World-2.0~Test");
    }

    #[test]
    fn space_becomes_plus_and_punctuation_is_escaped() {
        assert_eq!(url_encode("Hello World!"), "Hello+World%21");
        assert_eq!(url_encode("a+b&c=d"), "a%2Bb%26c%3Dd");
    }

    #[test]
    fn empty_input_is_noop() {
        assert_eq!(url_encode(""), "");
    }

    #[test]
    fn control_and_non_ascii_bytes_are_escaped_per_byte() {
        assert_eq!(url_encode("\0\n"), "%00%0A");
        assert_eq!(url_encode("é"), "%C3%A9");
    }

    #[test]
    fn printable_ascii_survives_decoding() {
        let printable: String = (0x20u8..=0x7e).map(char::from).collect();
        let encoded = url_encode(&printable);
        assert!(!encoded.contains(' '));
        assert_eq!(decode(&encoded), printable);
    }
}

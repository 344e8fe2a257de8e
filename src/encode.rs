// src/encode.rs

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: char = '=';

/// Returns the length of the padded base64 encoding of `len` bytes.
pub fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

fn encode_group(group: [u8; 3]) -> [char; 4] {
    let index = [
        group[0] >> 2,
        ((group[0] & 0x03) << 4) | (group[1] >> 4),
        ((group[1] & 0x0f) << 2) | (group[2] >> 6),
        group[2] & 0x3f,
    ];
    index.map(|i| ALPHABET[i as usize] as char)
}

/// Encodes the given file content to a Base64 string.
///
/// Standard alphabet with `=` padding. One trailing byte yields two data
/// characters and `==`, two trailing bytes yield three data characters and `=`.
///
/// # Arguments
///
/// * `file_content` - A slice of bytes representing the file content.
///
/// # Returns
///
/// * A String containing the Base64 encoded representation of the file content.
pub fn encode_to_base64(file_content: &[u8]) -> String {
    let mut encoded = String::with_capacity(encoded_len(file_content.len()));
    let mut groups = file_content.chunks_exact(3);
    for group in &mut groups {
        encoded.extend(encode_group([group[0], group[1], group[2]]));
    }

    let (group, data_chars) = match *groups.remainder() {
        [] => return encoded,
        [a] => ([a, 0, 0], 2),
        [a, b] => ([a, b, 0], 3),
        _ => unreachable!("chunks_exact(3) leaves at most two bytes"),
    };
    encoded.extend(encode_group(group).into_iter().take(data_chars));
    encoded.extend(std::iter::repeat(PAD).take(4 - data_chars));
    encoded
}

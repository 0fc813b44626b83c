//! ESC/POS command constants
//!
//! Opaque byte sequences keyed by symbolic name. Values follow the Epson
//! ESC/POS command set, which most 80mm/58mm network printers implement.

/// ESC @ - Initialize printer (clears buffer and resets modes)
pub const RESET: &[u8] = &[0x1B, 0x40];

/// ESC a 1 - Center justification
pub const ALIGN_CENTER: &[u8] = &[0x1B, 0x61, 0x01];

/// ESC a 0 - Left justification
pub const ALIGN_LEFT: &[u8] = &[0x1B, 0x61, 0x00];

/// ESC t 0 - Character code table PC437 (USA, Standard Europe)
///
/// The selected table persists for the whole connection, so it must be sent
/// before any text.
pub const CODEPAGE_ASCII: &[u8] = &[0x1B, 0x74, 0x00];

/// GS ! 0x11 - Double width and double height
pub const DOUBLE_SIZE: &[u8] = &[0x1D, 0x21, 0x11];

/// GS ! 0x00 - Normal character size
pub const NORMAL_SIZE: &[u8] = &[0x1D, 0x21, 0x00];

/// GS V 0 - Full cut
pub const CUT: &[u8] = &[0x1D, 0x56, 0x00];

/// Line feed
pub const LF: u8 = b'\n';

const ESC: u8 = 0x1B;
const GS: u8 = 0x1D;

/// Remove the command sequences this crate emits, leaving only text bytes
///
/// Recognizes `ESC @` (two bytes) and the three-byte `ESC x n` / `GS x n`
/// forms. Used to preview receipts in logs.
pub fn strip_commands(data: &[u8]) -> Vec<u8> {
    let mut text = Vec::with_capacity(data.len());
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            ESC if data.get(i + 1) == Some(&0x40) => i += 2,
            ESC | GS => i += 3,
            b => {
                text.push(b);
                i += 1;
            }
        }
    }
    text
}

/// Text lines of a payload, commands removed
pub fn text_lines(data: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(&strip_commands(data))
        .split('\n')
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_commands() {
        let mut data = Vec::new();
        data.extend_from_slice(RESET);
        data.extend_from_slice(ALIGN_CENTER);
        data.extend_from_slice(b"HOLA\n");
        data.extend_from_slice(DOUBLE_SIZE);
        data.extend_from_slice(b"TOTAL\n");
        data.extend_from_slice(CUT);

        assert_eq!(strip_commands(&data), b"HOLA\nTOTAL\n");
        assert_eq!(text_lines(&data), vec!["HOLA", "TOTAL", ""]);
    }

    #[test]
    fn test_commands_start_with_escape_or_gs() {
        for cmd in [RESET, ALIGN_CENTER, ALIGN_LEFT, CODEPAGE_ASCII, DOUBLE_SIZE, NORMAL_SIZE, CUT] {
            assert!(cmd[0] == 0x1B || cmd[0] == 0x1D);
        }
    }
}

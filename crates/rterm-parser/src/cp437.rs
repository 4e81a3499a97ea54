//! Code page 437 glyph table, used for bytes 0x80-0xFF when no Unicode
//! translate table overrides them (§6).

/// `CP437[b - 0x80]` is the Unicode code point for byte `b`.
#[rustfmt::skip]
pub const CP437_HIGH: [char; 128] = [
    'Ç','ü','é','â','ä','à','å','ç','ê','ë','è','ï','î','ì','Ä','Å',
    'É','æ','Æ','ô','ö','ò','û','ù','ÿ','Ö','Ü','¢','£','¥','₧','ƒ',
    'á','í','ó','ú','ñ','Ñ','ª','º','¿','⌐','¬','½','¼','¡','«','»',
    '░','▒','▓','│','┤','╡','╢','╖','╕','╣','║','╗','╝','╜','╛','┐',
    '└','┴','┬','├','─','┼','╞','╟','╚','╔','╩','╦','╠','═','╬','╧',
    '╨','╤','╥','╙','╘','╒','╓','╫','╪','┘','┌','█','▄','▌','▐','▀',
    'α','ß','Γ','π','Σ','σ','µ','τ','Φ','Θ','Ω','δ','∞','φ','ε','∩',
    '≡','±','≥','≤','⌠','⌡','÷','≈','°','∙','·','√','ⁿ','²','■','\u{00A0}',
];

/// Maps a byte >= 0x80 to its CP437 glyph.
#[must_use]
pub fn cp437(byte: u8) -> char {
    debug_assert!(byte >= 0x80);
    CP437_HIGH[(byte - 0x80) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_0x80_to_c_cedilla() {
        assert_eq!(cp437(0x80), 'Ç');
    }

    #[test]
    fn maps_0xb0_to_light_shade() {
        assert_eq!(cp437(0xB0), '░');
    }
}

//! 1-bit-per-pixel bitmap fonts for `draw_text`

/// A fixed-size bitmap font borrowed from caller data.
///
/// Each glyph is `glyph_height` bytes, one byte per row; bit `n` of a row is
/// column `n` counted from the left, so glyphs are at most 8 pixels wide.
/// Glyph `i` covers character code `min_char + i`.
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    pub glyphs: &'a [u8],
    pub glyph_width: u32,
    pub glyph_height: u32,
    pub min_char: u8,
    pub max_char: u8,
    /// Glyph index drawn for bytes outside `min_char..=max_char`
    pub fallback_glyph: u8,
}

impl<'a> Font<'a> {
    pub fn new(
        glyphs: &'a [u8],
        glyph_width: u32,
        glyph_height: u32,
        min_char: u8,
        max_char: u8,
        fallback_glyph: u8,
    ) -> Self {
        Self {
            glyphs,
            glyph_width: glyph_width.min(8),
            glyph_height,
            min_char,
            max_char,
            fallback_glyph,
        }
    }

    /// Glyph index used to draw byte `ch`
    pub fn glyph_index(&self, ch: u8) -> usize {
        if ch < self.min_char || ch > self.max_char {
            self.fallback_glyph as usize
        } else {
            (ch - self.min_char) as usize
        }
    }

    /// Row bytes of a glyph, `None` when the index is past the font data
    pub fn glyph_rows(&self, index: usize) -> Option<&'a [u8]> {
        let h = self.glyph_height as usize;
        let start = index.checked_mul(h)?;
        self.glyphs.get(start..start.checked_add(h)?)
    }

    /// Built-in 3x5 font covering `' '..='Z'`, fallback `'?'`.
    /// Cells are 4 pixels wide so glyphs get one column of spacing.
    pub fn tiny() -> Font<'static> {
        Font::new(&TINY_GLYPHS, 4, 5, b' ', b'Z', b'?' - b' ')
    }
}

const fn row(s: &str) -> u8 {
    let bytes = s.as_bytes();
    let mut bits = 0u8;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'X' {
            bits |= 1 << i;
        }
        i += 1;
    }
    bits
}

const TINY_LAYOUT: [[&str; 5]; 59] = [
    ["...", "...", "...", "...", "..."], // ' '
    [".X.", ".X.", ".X.", "...", ".X."], // !
    ["X.X", "X.X", "...", "...", "..."], // "
    ["X.X", "XXX", "X.X", "XXX", "X.X"], // #
    [".XX", "XX.", ".X.", ".XX", "XX."], // $
    ["X.X", "..X", ".X.", "X..", "X.X"], // %
    [".X.", "X.X", ".X.", "X.X", ".XX"], // &
    [".X.", ".X.", "...", "...", "..."], // '
    ["..X", ".X.", ".X.", ".X.", "..X"], // (
    ["X..", ".X.", ".X.", ".X.", "X.."], // )
    ["...", "X.X", ".X.", "X.X", "..."], // *
    ["...", ".X.", "XXX", ".X.", "..."], // +
    ["...", "...", "...", ".X.", "X.."], // ,
    ["...", "...", "XXX", "...", "..."], // -
    ["...", "...", "...", "...", ".X."], // .
    ["..X", "..X", ".X.", "X..", "X.."], // /
    ["XXX", "X.X", "X.X", "X.X", "XXX"], // 0
    [".X.", "XX.", ".X.", ".X.", "XXX"], // 1
    ["XXX", "..X", "XXX", "X..", "XXX"], // 2
    ["XXX", "..X", ".XX", "..X", "XXX"], // 3
    ["X.X", "X.X", "XXX", "..X", "..X"], // 4
    ["XXX", "X..", "XXX", "..X", "XXX"], // 5
    ["XXX", "X..", "XXX", "X.X", "XXX"], // 6
    ["XXX", "..X", ".X.", ".X.", ".X."], // 7
    ["XXX", "X.X", "XXX", "X.X", "XXX"], // 8
    ["XXX", "X.X", "XXX", "..X", "XXX"], // 9
    ["...", ".X.", "...", ".X.", "..."], // :
    ["...", ".X.", "...", ".X.", "X.."], // ;
    ["..X", ".X.", "X..", ".X.", "..X"], // <
    ["...", "XXX", "...", "XXX", "..."], // =
    ["X..", ".X.", "..X", ".X.", "X.."], // >
    ["XXX", "..X", ".XX", "...", ".X."], // ?
    ["XXX", "X.X", "XXX", "X..", ".XX"], // @
    [".X.", "X.X", "XXX", "X.X", "X.X"], // A
    ["XX.", "X.X", "XX.", "X.X", "XX."], // B
    [".XX", "X..", "X..", "X..", ".XX"], // C
    ["XX.", "X.X", "X.X", "X.X", "XX."], // D
    ["XXX", "X..", "XX.", "X..", "XXX"], // E
    ["XXX", "X..", "XX.", "X..", "X.."], // F
    [".XX", "X..", "X.X", "X.X", ".XX"], // G
    ["X.X", "X.X", "XXX", "X.X", "X.X"], // H
    ["XXX", ".X.", ".X.", ".X.", "XXX"], // I
    ["..X", "..X", "..X", "X.X", ".X."], // J
    ["X.X", "X.X", "XX.", "X.X", "X.X"], // K
    ["X..", "X..", "X..", "X..", "XXX"], // L
    ["X.X", "XXX", "XXX", "X.X", "X.X"], // M
    ["XX.", "X.X", "X.X", "X.X", "X.X"], // N
    [".X.", "X.X", "X.X", "X.X", ".X."], // O
    ["XX.", "X.X", "XX.", "X..", "X.."], // P
    [".X.", "X.X", "X.X", "XX.", ".XX"], // Q
    ["XX.", "X.X", "XX.", "X.X", "X.X"], // R
    [".XX", "X..", ".X.", "..X", "XX."], // S
    ["XXX", ".X.", ".X.", ".X.", ".X."], // T
    ["X.X", "X.X", "X.X", "X.X", "XXX"], // U
    ["X.X", "X.X", "X.X", "X.X", ".X."], // V
    ["X.X", "X.X", "XXX", "XXX", "X.X"], // W
    ["X.X", "X.X", ".X.", "X.X", "X.X"], // X
    ["X.X", "X.X", ".X.", ".X.", ".X."], // Y
    ["XXX", "..X", ".X.", "X..", "XXX"], // Z
];

const TINY_GLYPHS: [u8; 59 * 5] = {
    let mut out = [0u8; 59 * 5];
    let mut g = 0;
    while g < 59 {
        let mut r = 0;
        while r < 5 {
            out[g * 5 + r] = row(TINY_LAYOUT[g][r]);
            r += 1;
        }
        g += 1;
    }
    out
};

//! Deterministic word-cloud rendering.
//!
//! Words are drawn with a built-in 5x7 bitmap font scaled by frequency and
//! packed greedily from the canvas centre outward. The same corpus always
//! produces the same PNG bytes.

use std::collections::HashMap;
use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};

use crate::config::WordCloudConfig;
use crate::error::WordCloudError;

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
const MIN_SCALE: u32 = 1;
/// Occupancy grid resolution in pixels.
const CELL: u32 = 4;
const PADDING: u32 = 2;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

const PALETTE: &[Rgb<u8>] = &[
    Rgb([68, 1, 84]),
    Rgb([59, 82, 139]),
    Rgb([33, 145, 140]),
    Rgb([24, 110, 60]),
    Rgb([180, 70, 30]),
    Rgb([40, 40, 40]),
];

const GLYPH_BOX: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 26] = [
    [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
];

fn glyph(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        upper @ 'A'..='Z' => GLYPHS[(upper as u8 - b'A') as usize],
        '-' => [0, 0, 0, 0x1F, 0, 0, 0],
        '+' => [0, 0x04, 0x04, 0x1F, 0x04, 0x04, 0],
        _ => GLYPH_BOX,
    }
}

/// A word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// A word drawn onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub scale: u32,
    pub x: u32,
    pub y: u32,
}

/// Rendered cloud: the PNG bytes and the words that made it onto the canvas.
#[derive(Debug, Clone)]
pub struct WordCloud {
    pub png: Vec<u8>,
    pub placed: Vec<PlacedWord>,
}

impl WordCloud {
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.png)
    }
}

/// Count whitespace-separated words, most frequent first, ties alphabetical.
#[must_use]
pub fn frequencies(corpus: &str) -> Vec<WordFrequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in corpus.split_whitespace() {
        *counts.entry(word).or_default() += 1;
    }
    let mut out: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, count)| WordFrequency {
            word: word.to_owned(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    out
}

#[derive(Debug, Clone)]
pub struct WordCloudRenderer {
    width: u32,
    height: u32,
    max_words: usize,
    background: Rgb<u8>,
    max_scale: u32,
}

impl Default for WordCloudRenderer {
    fn default() -> Self {
        Self::new(&WordCloudConfig::default())
    }
}

impl WordCloudRenderer {
    #[must_use]
    pub fn new(config: &WordCloudConfig) -> Self {
        let background = parse_hex_color(&config.background).unwrap_or_else(|| {
            tracing::warn!(
                background = %config.background,
                "invalid word cloud background, using white"
            );
            WHITE
        });
        let width = config.width.max(1);
        let height = config.height.max(1);
        Self {
            width,
            height,
            max_words: config.max_words,
            background,
            max_scale: (height / (GLYPH_HEIGHT * 4)).max(MIN_SCALE),
        }
    }

    /// Render the space-joined cleansed word list.
    ///
    /// # Errors
    ///
    /// Returns [`WordCloudError::EmptyCorpus`] when the corpus has no words and
    /// [`WordCloudError::Encode`] if PNG encoding fails.
    pub fn render_corpus(&self, corpus: &str) -> Result<WordCloud, WordCloudError> {
        let mut freqs = frequencies(corpus);
        if freqs.is_empty() {
            return Err(WordCloudError::EmptyCorpus);
        }
        freqs.truncate(self.max_words);

        let placed = self.layout(&freqs);
        let image = self.draw(&placed);

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        tracing::debug!(
            words = freqs.len(),
            placed = placed.len(),
            bytes = png.len(),
            "word cloud rendered"
        );
        Ok(WordCloud { png, placed })
    }

    fn scale_for(&self, count: usize, max_count: usize) -> u32 {
        #[allow(clippy::cast_precision_loss)]
        let relative = count as f64 / max_count.max(1) as f64;
        let span = f64::from(self.max_scale - MIN_SCALE);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let extra = (span * relative).round() as u32;
        MIN_SCALE + extra
    }

    fn layout(&self, freqs: &[WordFrequency]) -> Vec<PlacedWord> {
        let max_count = freqs.first().map_or(1, |f| f.count);
        let mut grid = Occupancy::new(self.width.div_ceil(CELL), self.height.div_ceil(CELL));
        let candidates = grid.cells_by_distance_from_centre();
        let mut placed = Vec::new();

        for freq in freqs {
            let len = u32::try_from(freq.word.chars().count()).unwrap_or(u32::MAX);
            let mut scale = self.scale_for(freq.count, max_count);

            while scale >= MIN_SCALE {
                let (w, h) = word_box(len, scale);
                if w <= self.width && h <= self.height {
                    let (cw, ch) = (w.div_ceil(CELL), h.div_ceil(CELL));
                    if let Some((cx, cy)) = grid.find_slot(&candidates, cw, ch) {
                        grid.mark(cx, cy, cw, ch);
                        placed.push(PlacedWord {
                            word: freq.word.clone(),
                            scale,
                            x: cx * CELL,
                            y: cy * CELL,
                        });
                        break;
                    }
                }
                scale -= 1;
            }
            if scale < MIN_SCALE {
                tracing::trace!(word = %freq.word, "word dropped from cloud");
            }
        }
        placed
    }

    fn draw(&self, placed: &[PlacedWord]) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, self.background);
        for (rank, word) in placed.iter().enumerate() {
            let color = PALETTE[rank % PALETTE.len()];
            let s = word.scale;
            let mut origin_x = word.x + PADDING;
            for c in word.word.chars() {
                let rows = glyph(c);
                for (row, bits) in (0u32..).zip(rows) {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        let px = origin_x + col * s;
                        let py = word.y + PADDING + row * s;
                        fill_block(&mut img, px, py, s, color);
                    }
                }
                origin_x += GLYPH_ADVANCE * s;
            }
        }
        img
    }
}

fn word_box(len: u32, scale: u32) -> (u32, u32) {
    let text_width = (GLYPH_ADVANCE.saturating_mul(len)).saturating_sub(1);
    (
        text_width.saturating_mul(scale).saturating_add(2 * PADDING),
        GLYPH_HEIGHT * scale + 2 * PADDING,
    )
}

fn fill_block(img: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = (x + dx, y + dy);
            if px < img.width() && py < img.height() {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional).
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<Rgb<u8>> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Coarse occupancy grid with a summed-area table for O(1) rectangle checks.
struct Occupancy {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
    sums: Vec<u32>,
}

impl Occupancy {
    fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; (cols * rows) as usize],
            sums: vec![0; ((cols + 1) * (rows + 1)) as usize],
        }
    }

    fn cells_by_distance_from_centre(&self) -> Vec<(u32, u32)> {
        let (mid_x, mid_y) = (i64::from(self.cols) / 2, i64::from(self.rows) / 2);
        let mut cells: Vec<(u32, u32)> = (0..self.rows)
            .flat_map(|y| (0..self.cols).map(move |x| (x, y)))
            .collect();
        cells.sort_by_key(|&(x, y)| {
            let (dx, dy) = (i64::from(x) - mid_x, i64::from(y) - mid_y);
            (dx * dx + dy * dy, y, x)
        });
        cells
    }

    /// First candidate centre where a `w`x`h` block fits, as its top-left cell.
    fn find_slot(&self, candidates: &[(u32, u32)], w: u32, h: u32) -> Option<(u32, u32)> {
        if w > self.cols || h > self.rows {
            return None;
        }
        candidates.iter().find_map(|&(cx, cy)| {
            let x = cx.checked_sub(w / 2)?;
            let y = cy.checked_sub(h / 2)?;
            (x + w <= self.cols && y + h <= self.rows && self.is_free(x, y, w, h))
                .then_some((x, y))
        })
    }

    fn sum_at(&self, x: u32, y: u32) -> u32 {
        self.sums[(y * (self.cols + 1) + x) as usize]
    }

    fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        let total = self.sum_at(x + w, y + h) + self.sum_at(x, y)
            - self.sum_at(x + w, y)
            - self.sum_at(x, y + h);
        total == 0
    }

    fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for row in y..y + h {
            for col in x..x + w {
                self.cells[(row * self.cols + col) as usize] = true;
            }
        }
        self.rebuild_sums();
    }

    fn rebuild_sums(&mut self) {
        let stride = (self.cols + 1) as usize;
        for row in 0..self.rows as usize {
            let mut running = 0;
            for col in 0..self.cols as usize {
                running += u32::from(self.cells[row * self.cols as usize + col]);
                self.sums[(row + 1) * stride + col + 1] = self.sums[row * stride + col + 1] + running;
            }
        }
    }
}

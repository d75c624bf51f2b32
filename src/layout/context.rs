use super::metrics::{MM_PER_POINT, text_width};
use super::options::LayoutOptions;
use super::{Align, Element, FontStyle, Page, Rect, TextRun};

/// Slack for comparing accumulated cursor positions.
const EPSILON: f32 = 1e-3;

/// One cell of a row: a fixed width box with optional border.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell<'a> {
    pub width: f32,
    pub text: &'a str,
    pub font: FontStyle,
    pub size: f32,
    pub align: Align,
    pub border: bool,
}

/// Layout state threaded through the section functions.
///
/// Every operation consumes the context and returns the updated one, so a
/// render never shares cursor state with anything else.
#[derive(Debug)]
pub(crate) struct LayoutContext<'o> {
    options: &'o LayoutOptions,
    finished: Vec<Page>,
    page: Page,
    y: f32,
}

impl<'o> LayoutContext<'o> {
    /// A context positioned at the top of a single empty page.
    pub fn new(options: &'o LayoutOptions) -> Self {
        Self {
            options,
            finished: Vec::new(),
            page: Page::new(1),
            y: options.margin_top,
        }
    }

    pub fn options(&self) -> &'o LayoutOptions {
        self.options
    }

    /// Current vertical cursor, in millimetres from the top edge.
    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.finished.len() + 1
    }

    /// Whether a band of `height` still fits above the bottom margin.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.options.break_line() + EPSILON
    }

    /// Whether the cursor sits at the top of its page.
    pub fn at_page_top(&self) -> bool {
        (self.y - self.options.margin_top).abs() < EPSILON
    }

    pub fn new_page(mut self) -> Self {
        let number = self.page_count() + 1;
        log::debug!("page break at y={:.1}mm, starting page {number}", self.y);
        let full = std::mem::replace(&mut self.page, Page::new(number));
        self.finished.push(full);
        self.y = self.options.margin_top;
        self
    }

    /// Start a new page unless a band of `height` fits on the current one.
    pub fn ensure(self, height: f32) -> Self {
        if self.fits(height) || self.at_page_top() {
            self
        } else {
            self.new_page()
        }
    }

    /// Move the cursor down without checking for a page break.
    pub fn gap(mut self, height: f32) -> Self {
        self.y += height;
        self
    }

    /// Place `cells` left to right from the left margin at the cursor, then
    /// move the cursor below the row.
    pub fn row(mut self, cells: &[Cell<'_>], height: f32) -> Self {
        let mut x = self.options.margin_left;
        let y = self.y;
        let padding = self.options.cell_padding;
        let page = &mut self.page;

        for cell in cells {
            if cell.border {
                page.elements.push(Element::Border(Rect {
                    x,
                    y,
                    width: cell.width,
                    height,
                }));
            }
            if !cell.text.is_empty() {
                let width = text_width(cell.text, cell.font, cell.size);
                let text_x = match cell.align {
                    Align::Left => x + padding,
                    Align::Center => x + (cell.width - width) / 2.0,
                    Align::Right => x + cell.width - padding - width,
                };
                page.elements.push(Element::Text(TextRun {
                    x: text_x,
                    baseline: y + height / 2.0 + 0.3 * cell.size * MM_PER_POINT,
                    text: cell.text.to_string(),
                    font: cell.font,
                    size: cell.size,
                }));
            }
            x += cell.width;
        }

        self.y += height;
        self
    }

    /// A single full-width text line.
    pub fn line(self, text: &str, font: FontStyle, size: f32) -> Self {
        let height = self.options.line_height;
        let cell = Cell {
            width: self.options.content_width(),
            text,
            font,
            size,
            align: Align::Left,
            border: false,
        };
        self.ensure(height).row(&[cell], height)
    }

    pub fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.page);
        self.finished
    }
}
